use std::collections::HashMap;

use serde_json::Value;

use simoly_core::{Answers, Evaluator, FormDocument};

use crate::app::{resolve_field, AppContext};
use crate::cli::FormEvaluateArgs;
use crate::errors::CliError;
use crate::helpers::{parse_answer, read_text_source};
use crate::output::evaluation_json;
use crate::ui::{badge, blank_line, format_score, header, kv, print, short_field_id, Badge};

/// Collect answers from `--answers-file` then `--answer`; later values win.
fn collect_answers(form: &FormDocument, args: &FormEvaluateArgs) -> anyhow::Result<Answers> {
    let mut answers = Answers::new();

    if let Some(path) = &args.answers_file {
        let text = read_text_source(path)?;
        let raw: HashMap<String, Value> = serde_json::from_str(&text).map_err(|e| {
            CliError::invalid_input_with_hint(
                format!("Invalid answers file: {}", e),
                "Expected a JSON object keyed by field id.",
            )
        })?;
        for (reference, value) in raw {
            answers.insert(resolve_field(form, &reference)?, value);
        }
    }

    for entry in &args.answer {
        let (reference, value) = parse_answer(entry)?;
        answers.insert(resolve_field(form, &reference)?, value);
    }

    Ok(answers)
}

pub fn handle_evaluate(ctx: &AppContext, args: &FormEvaluateArgs) -> anyhow::Result<()> {
    let (_store, form) = ctx.load_form(&args.target.form)?;
    let answers = collect_answers(&form, args)?;

    let evaluator = Evaluator::new(&form, &answers);
    let report = evaluator.report();
    let score = evaluator.score();

    let ui_ctx = ctx.ui_context(args.json);
    if ui_ctx.mode.is_json() {
        let value = evaluation_json(&form, &report, &score);
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let visible = report.fields.iter().filter(|f| f.visible).count();
    let hidden: Vec<_> = report.hidden().collect();
    let pages: Vec<String> = report
        .visible_pages
        .iter()
        .map(|page| (page + 1).to_string())
        .collect();

    if ui_ctx.mode.is_pretty() {
        print(&ui_ctx, &header(&ui_ctx, "evaluate", Some(&form.title)));
        blank_line(&ui_ctx);
        print(
            &ui_ctx,
            &badge(
                &ui_ctx,
                Badge::Info,
                &format!("{} of {} field(s) visible", visible, report.fields.len()),
            ),
        );
        println!("  {}", kv(&ui_ctx, "Pages", &pages.join(", ")));
        println!(
            "  {}",
            kv(
                &ui_ctx,
                "Score",
                &format!("{} / {}", format_score(score.total), format_score(score.max))
            )
        );
        for id in hidden {
            let label = form.field(id).map(|f| f.label.as_str()).unwrap_or_default();
            println!("  hidden  {}  {}", short_field_id(id), label);
        }
    } else {
        println!("visible_fields={}", visible);
        println!("hidden_fields={}", hidden.len());
        println!("visible_pages={}", pages.join(","));
        println!("score={}", format_score(score.total));
        println!("max_score={}", format_score(score.max));
        for id in hidden {
            println!("hidden={}", id.as_str());
        }
    }
    Ok(())
}

use simoly_core::{Applied, Edit};

use crate::app::AppContext;
use crate::cli::FormImportArgs;
use crate::commands::print_receipt;
use crate::helpers::read_text_source;
use crate::ui::{badge, print, Badge};

pub fn handle_import(ctx: &AppContext, args: &FormImportArgs) -> anyhow::Result<()> {
    let text = read_text_source(&args.file)?;

    let (form, applied) = ctx.edit_form(&args.target.form, |session| {
        Ok(session.apply(Edit::ImportPage {
            text,
            title: args.title.clone(),
        })?)
    })?;

    let Applied::Imported {
        page,
        fields,
        skipped,
    } = applied
    else {
        return Err(anyhow::anyhow!("Import did not produce a page"));
    };

    let ui_ctx = ctx.ui_context(args.json);
    if ui_ctx.mode.is_json() {
        let value = serde_json::json!({
            "form": form.id,
            "page": page + 1,
            "page_title": form.pages.get(page).map(|p| p.title.as_str()),
            "fields": fields,
            "skipped": skipped,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print_receipt(
        ctx,
        "Imported questions",
        &[
            ("id", form.id.to_string()),
            ("page", (page + 1).to_string()),
            ("fields", fields.to_string()),
            ("skipped", skipped.to_string()),
        ],
    );
    if skipped > 0 && ui_ctx.mode.is_pretty() && !ctx.quiet() {
        print(
            &ui_ctx,
            &badge(
                &ui_ctx,
                Badge::Warn,
                &format!("{} record(s) skipped, see warnings above", skipped),
            ),
        );
    }
    Ok(())
}

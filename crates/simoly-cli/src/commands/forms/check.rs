use simoly_core::integrity;

use crate::app::AppContext;
use crate::cli::FormCheckArgs;
use crate::output::issues_json;
use crate::ui::{badge, print, Badge, OutputMode};

pub fn handle_check(ctx: &AppContext, args: &FormCheckArgs) -> anyhow::Result<()> {
    let (_store, form) = ctx.load_form(&args.target.form)?;
    let issues = integrity::check(&form);
    let ui_ctx = ctx.ui_context(args.json);

    match ui_ctx.mode {
        OutputMode::Json => {
            println!("{}", serde_json::to_string_pretty(&issues_json(&form, &issues))?);
        }
        OutputMode::Pretty => {
            if issues.is_empty() {
                if !ctx.quiet() {
                    print(&ui_ctx, &badge(&ui_ctx, Badge::Ok, "No issues found"));
                }
            } else {
                for issue in &issues {
                    print(&ui_ctx, &badge(&ui_ctx, Badge::Warn, &issue.to_string()));
                }
            }
        }
        OutputMode::Plain => {
            for issue in &issues {
                println!("issue={}", issue);
            }
            println!("issues={}", issues.len());
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(anyhow::anyhow!("Form check found {} issue(s)", issues.len()))
    }
}

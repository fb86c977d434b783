use simoly_core::storage::FormStore;

use crate::app::AppContext;
use crate::cli::CheckArgs;
use crate::ui::{badge, hint, kv, print, Badge, OutputMode};

pub fn handle_check(ctx: &AppContext, args: &CheckArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let ui_ctx = ctx.ui_context(args.json);

    match store.check_integrity() {
        Ok(()) => {
            let metadata = store.metadata()?;
            if ui_ctx.mode.is_json() {
                let value = serde_json::json!({
                    "status": "ok",
                    "store": store.path().display().to_string(),
                    "format_version": metadata.format_version,
                    "forms": metadata.form_count,
                    "last_modified": metadata.last_modified.to_rfc3339(),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else if !ctx.quiet() {
                match ui_ctx.mode {
                    OutputMode::Pretty => {
                        print(&ui_ctx, &badge(&ui_ctx, Badge::Ok, "All checks passed"));
                        println!("  {}", kv(&ui_ctx, "Forms", &metadata.form_count.to_string()));
                        println!("  {}", kv(&ui_ctx, "Format", &metadata.format_version));
                    }
                    OutputMode::Plain | OutputMode::Json => {
                        println!("check=sqlite ok");
                        println!("check=metadata_keys ok");
                        println!("check=documents ok");
                        println!("status=ok");
                        println!("forms={}", metadata.form_count);
                    }
                }
            }
            Ok(())
        }
        Err(err) => {
            if ui_ctx.mode.is_pretty() {
                print(&ui_ctx, &badge(&ui_ctx, Badge::Err, "Integrity check failed"));
                print(
                    &ui_ctx,
                    &hint(&ui_ctx, "Export readable forms before replacing the store."),
                );
            }
            Err(anyhow::anyhow!("Integrity check failed: {}", err))
        }
    }
}

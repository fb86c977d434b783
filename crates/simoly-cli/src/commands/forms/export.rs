use std::path::Path;

use crate::app::AppContext;
use crate::cli::FormExportArgs;
use crate::commands::print_receipt;

pub fn handle_export(ctx: &AppContext, args: &FormExportArgs) -> anyhow::Result<()> {
    let (_store, form) = ctx.load_form(&args.target.form)?;
    let document = serde_json::to_string_pretty(&form)?;

    match args.output.as_deref() {
        Some(path) => {
            let path = Path::new(path);
            simoly_core::fs::write_atomic(path, format!("{}\n", document).as_bytes())?;
            print_receipt(
                ctx,
                "Exported form",
                &[
                    ("id", form.id.to_string()),
                    ("output", path.display().to_string()),
                ],
            );
        }
        None => println!("{}", document),
    }
    Ok(())
}

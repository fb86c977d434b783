use simoly_core::storage::FormStore;

use crate::app::AppContext;
use crate::cli::FormDeleteArgs;
use crate::commands::print_receipt;
use crate::helpers::confirm;
use crate::ui::print;

pub fn handle_delete(ctx: &AppContext, args: &FormDeleteArgs) -> anyhow::Result<()> {
    let (mut store, form) = ctx.load_form(&args.target.form)?;

    if !args.force {
        let ui_ctx = ctx.ui_context(false);
        let prompt = format!(
            "Delete form \"{}\" with {} field(s)?",
            form.title,
            form.field_count()
        );
        if !confirm(&prompt, ui_ctx.is_interactive())? {
            print(&ui_ctx, "Cancelled.");
            return Ok(());
        }
    }

    store.delete_form(&form.id)?;
    tracing::info!(form = %form.id, "deleted form");

    print_receipt(
        ctx,
        "Deleted form",
        &[("id", form.id.to_string()), ("title", form.title.clone())],
    );
    Ok(())
}

use simoly_core::{Edit, FormSession};

use crate::app::AppContext;
use crate::cli::FormCreateArgs;
use crate::commands::print_receipt;
use crate::ui::{blank_line, hint, print};

pub fn handle_create(ctx: &AppContext, args: &FormCreateArgs) -> anyhow::Result<()> {
    let mut store = ctx.open_store()?;

    let title = args.title.trim();
    let mut session = FormSession::create(title);
    // Rejects a blank title before anything is stored.
    session.apply(Edit::SetTitle(title.to_string()))?;
    if let Some(description) = &args.description {
        session.apply(Edit::SetDescription(Some(description.clone())))?;
    }
    if args.inactive {
        session.apply(Edit::SetActive(false))?;
    }
    session.save(&mut store)?;

    let form = session.document();
    print_receipt(
        ctx,
        "Created form",
        &[
            ("id", form.id.to_string()),
            ("title", form.title.clone()),
            ("active", form.active.to_string()),
            ("pages", form.pages.len().to_string()),
        ],
    );

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        if ui_ctx.mode.is_pretty() {
            blank_line(&ui_ctx);
            print(
                &ui_ctx,
                &hint(
                    &ui_ctx,
                    &format!(
                        "simoly form add-field {} --type text --label \"Your name\"",
                        form.id
                    ),
                ),
            );
        }
    }
    Ok(())
}

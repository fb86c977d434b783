use simoly_core::Edit;

use crate::app::AppContext;
use crate::cli::FormSetActiveArgs;
use crate::commands::print_receipt;

/// `form activate` / `form deactivate`.
pub fn handle_set_active(
    ctx: &AppContext,
    args: &FormSetActiveArgs,
    active: bool,
) -> anyhow::Result<()> {
    let (form, _) = ctx.edit_form(&args.target.form, |session| {
        Ok(session.apply(Edit::SetActive(active))?)
    })?;

    let title = if active {
        "Form activated"
    } else {
        "Form deactivated"
    };
    print_receipt(
        ctx,
        title,
        &[("id", form.id.to_string()), ("active", form.active.to_string())],
    );
    Ok(())
}

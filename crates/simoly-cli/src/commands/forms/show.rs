use crate::app::AppContext;
use crate::cli::FormShowArgs;
use crate::output::print_form_outline;

pub fn handle_show(ctx: &AppContext, args: &FormShowArgs) -> anyhow::Result<()> {
    let (_store, form) = ctx.load_form(&args.target.form)?;
    let ui_ctx = ctx.ui_context(args.json);

    if ui_ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&form)?);
    } else {
        print_form_outline(&ui_ctx, &form);
    }
    Ok(())
}

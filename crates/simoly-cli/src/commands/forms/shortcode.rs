use simoly_core::Shortcode;

use crate::app::AppContext;
use crate::cli::FormShortcodeArgs;
use crate::errors::CliError;
use crate::helpers::parse_position;

pub fn handle_shortcode(ctx: &AppContext, args: &FormShortcodeArgs) -> anyhow::Result<()> {
    let (_store, form) = ctx.load_form(&args.target.form)?;

    let shortcode = match args.page {
        Some(number) => {
            let index = parse_position(number, "Page")?;
            let page = form.page(index).ok_or_else(|| {
                CliError::not_found(
                    format!("Page {} not found", number),
                    format!("The form has {} page(s).", form.pages.len()),
                )
            })?;
            Shortcode::page(page.id.to_string())?
        }
        None => Shortcode::form(form.id),
    };

    println!("{}", shortcode);
    Ok(())
}

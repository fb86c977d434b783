use simoly_core::form::HeaderImage;
use simoly_core::{Applied, Edit};

use crate::app::AppContext;
use crate::cli::{AddPageArgs, DeletePageArgs, EditPageArgs, MovePageArgs};
use crate::commands::print_receipt;
use crate::helpers::{parse_image_position, parse_position};

pub fn handle_add_page(ctx: &AppContext, args: &AddPageArgs) -> anyhow::Result<()> {
    let (form, index) = ctx.edit_form(&args.target.form, |session| {
        let index = match session.apply(Edit::AddPage {
            title: args.title.clone(),
        })? {
            Applied::Page(index) => index,
            _ => session.document().pages.len().saturating_sub(1),
        };
        if let Some(description) = &args.description {
            session.apply(Edit::SetPageDescription {
                page: index,
                description: Some(description.clone()),
            })?;
        }
        Ok(index)
    })?;

    let title = form
        .page(index)
        .map(|page| page.title.clone())
        .unwrap_or_default();
    print_receipt(
        ctx,
        "Added page",
        &[
            ("id", form.id.to_string()),
            ("page", (index + 1).to_string()),
            ("title", title),
        ],
    );
    Ok(())
}

pub fn handle_edit_page(ctx: &AppContext, args: &EditPageArgs) -> anyhow::Result<()> {
    let page = parse_position(args.page, "Page")?;
    let position = args
        .image_position
        .as_deref()
        .map(parse_image_position)
        .transpose()?
        .unwrap_or_default();

    let (form, _) = ctx.edit_form(&args.target.form, |session| {
        if let Some(title) = &args.title {
            session.apply(Edit::SetPageTitle {
                page,
                title: title.trim().to_string(),
            })?;
        }
        if args.clear_description || args.description.is_some() {
            session.apply(Edit::SetPageDescription {
                page,
                description: args.description.clone().filter(|d| !d.trim().is_empty()),
            })?;
        }
        if args.no_image || args.image.is_some() {
            let image = args.image.as_ref().map(|url| HeaderImage {
                url: url.trim().to_string(),
                position,
            });
            session.apply(Edit::SetHeaderImage { page, image })?;
        }
        Ok(())
    })?;

    let edited = form.page(page);
    let image = edited
        .and_then(|p| p.header_image.as_ref())
        .map(|image| format!("{} ({})", image.url, image.position))
        .unwrap_or_else(|| "none".to_string());
    print_receipt(
        ctx,
        "Edited page",
        &[
            ("id", form.id.to_string()),
            ("page", args.page.to_string()),
            (
                "title",
                edited.map(|p| p.title.clone()).unwrap_or_default(),
            ),
            ("image", image),
        ],
    );
    Ok(())
}

pub fn handle_delete_page(ctx: &AppContext, args: &DeletePageArgs) -> anyhow::Result<()> {
    let page = parse_position(args.page, "Page")?;
    let (form, _) = ctx.edit_form(&args.target.form, |session| {
        Ok(session.apply(Edit::DeletePage { page })?)
    })?;

    print_receipt(
        ctx,
        "Deleted page",
        &[
            ("id", form.id.to_string()),
            ("pages", form.pages.len().to_string()),
            ("fields", form.field_count().to_string()),
        ],
    );
    Ok(())
}

pub fn handle_move_page(ctx: &AppContext, args: &MovePageArgs) -> anyhow::Result<()> {
    let from = parse_position(args.from, "Page")?;
    let to = parse_position(args.to, "Page")?;
    let (form, _) = ctx.edit_form(&args.target.form, |session| {
        Ok(session.apply(Edit::MovePage { from, to })?)
    })?;

    let title = form.page(to).map(|page| page.title.clone()).unwrap_or_default();
    print_receipt(
        ctx,
        "Moved page",
        &[
            ("id", form.id.to_string()),
            ("page", args.to.to_string()),
            ("title", title),
        ],
    );
    Ok(())
}

use simoly_core::storage::{FormFilter, FormStore};

use crate::app::AppContext;
use crate::cli::FormListArgs;
use crate::constants::DEFAULT_LIST_LIMIT;
use crate::output::{print_form_list, summaries_json};
use crate::ui::{header, print};

pub fn handle_list(ctx: &AppContext, args: &FormListArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;

    let mut filter = FormFilter::new().limit(args.limit.unwrap_or(DEFAULT_LIST_LIMIT));
    if args.active {
        filter = filter.active(true);
    } else if args.inactive {
        filter = filter.active(false);
    }
    if let Some(title) = args.title.as_deref().filter(|t| !t.trim().is_empty()) {
        filter = filter.title(title.trim());
    }

    let forms = store.list_forms(&filter)?;
    let ui_ctx = ctx.ui_context(args.json);

    if ui_ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&summaries_json(&forms))?);
        return Ok(());
    }

    if forms.is_empty() {
        if !ctx.quiet() {
            print(&ui_ctx, "No forms found.");
        }
        return Ok(());
    }

    if ui_ctx.mode.is_pretty() && !ctx.quiet() {
        let context = format!("{} shown", forms.len());
        print(&ui_ctx, &header(&ui_ctx, "forms", Some(&context)));
    }
    print_form_list(&ui_ctx, &forms);
    Ok(())
}

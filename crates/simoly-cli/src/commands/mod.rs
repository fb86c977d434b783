pub mod fields;
pub mod forms;
pub mod init;
pub mod maintenance;
pub mod misc;
pub mod pages;
pub mod shortcode;

use crate::app::AppContext;
use crate::ui::{print, receipt};

/// Print an action receipt unless `--quiet` is set.
pub(crate) fn print_receipt(ctx: &AppContext, title: &str, items: &[(&str, String)]) {
    if ctx.quiet() {
        return;
    }
    let ui_ctx = ctx.ui_context(false);
    print(&ui_ctx, &receipt(&ui_ctx, title, items));
}

//! Output formatting helpers for the CLI.
//!
//! JSON shapes for `--json` and text renderings of form listings and
//! outlines.

mod json;
mod text;

pub use json::{evaluation_json, issues_json, summaries_json};
pub use text::{print_form_list, print_form_outline};

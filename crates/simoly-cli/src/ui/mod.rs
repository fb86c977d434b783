//! UI primitives for the Simoly CLI.
//!
//! - **Context**: Environment detection (TTY, width, color, unicode)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badge tokens and styles
//! - **Render**: Tables, headers, receipts, hints
//! - **Format**: String utilities (truncate, ids, scores)

mod context;
pub mod format;
mod mode;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use mode::OutputMode;
pub use theme::Badge;

pub use render::{
    badge, blank_line, header, hint, kv, print, print_error, receipt, simple_table, Column,
};

pub use format::{format_datetime, format_score, short_field_id, short_id, single_line, truncate};

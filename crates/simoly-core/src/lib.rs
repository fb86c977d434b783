//! # Simoly Core
//!
//! Core library for Simoly - the questionnaire model behind the Simoly admin
//! console.
//!
//! This crate provides the form document model, conditional visibility,
//! the bulk import format, and document persistence, independent of the CLI
//! interface.
//!
//! ## Architecture
//!
//! - **form**: Form documents, pages, fields, options and conditional logic
//! - **evaluate**: Conditional visibility and questionnaire scoring
//! - **import**: Pipe-delimited bulk question import
//! - **session**: Edit session (validated, reindexed mutations and save)
//! - **integrity**: Drift detection for rule references and ordering
//! - **shortcode**: Embed shortcodes for forms, pages and AI reports
//! - **storage**: Store trait and the SQLite backend

pub mod error;
pub mod evaluate;
pub mod form;
pub mod fs;
pub mod import;
pub mod integrity;
pub mod session;
pub mod shortcode;
pub mod storage;

pub use error::{FormError, Result};
pub use evaluate::{Answers, Evaluator};
pub use form::{
    ConditionalLogic, ConditionalRule, Field, FieldId, FieldKind, FieldOption, FormDocument,
    LogicOperator, Page, RuleOperator,
};
pub use integrity::Issue;
pub use session::{Applied, Edit, FieldPatch, FormSession};
pub use shortcode::Shortcode;
pub use storage::{FormFilter, FormStore, SqliteFormStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}

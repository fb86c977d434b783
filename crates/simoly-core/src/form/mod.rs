//! Form document model.
//!
//! A [`FormDocument`] owns an ordered list of [`Page`]s, and each page owns
//! its [`Field`]s. Page membership is structural: a field's page is the page
//! whose list contains it.

mod document;
mod field;
mod kind;
mod logic;

pub use document::{FieldLocation, FormDocument, HeaderImage, ImagePosition, Page};
pub use field::{option_value, Field, FieldId, FieldOption, DEFAULT_OPTION_COUNT};
pub use kind::FieldKind;
pub use logic::{ConditionalLogic, ConditionalRule, LogicOperator, RuleOperator};

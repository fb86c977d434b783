//! Input and parsing helper functions for the CLI.
//!
//! - Import text, answer files and delete confirmation (`input`)
//! - Positions, field types, operators and answers (`parsing`)

mod input;
mod parsing;

pub use input::{confirm, read_text_source};
pub use parsing::{
    parse_answer, parse_field_kind, parse_image_position, parse_logic_operator, parse_position,
    parse_rule_operator,
};

//! Parsing helpers for positions, field types, operators and answers.

use serde_json::Value;

use simoly_core::form::ImagePosition;
use simoly_core::{FieldKind, LogicOperator, RuleOperator};

use crate::errors::CliError;

/// Convert a 1-based position from the command line to an index.
pub fn parse_position(value: usize, what: &str) -> anyhow::Result<usize> {
    value.checked_sub(1).ok_or_else(|| {
        CliError::invalid_input(format!("{} numbers start at 1", what)).into()
    })
}

pub fn parse_field_kind(value: &str) -> anyhow::Result<FieldKind> {
    value.parse::<FieldKind>().map_err(|_| {
        let names: Vec<&str> = FieldKind::ALL.iter().map(FieldKind::as_str).collect();
        CliError::invalid_input_with_hint(
            format!("Unknown field type: {}", value),
            format!("Valid types: {}", names.join(", ")),
        )
        .into()
    })
}

pub fn parse_rule_operator(value: &str) -> anyhow::Result<RuleOperator> {
    value.parse::<RuleOperator>().map_err(|_| {
        CliError::invalid_input_with_hint(
            format!("Unknown rule operator: {}", value),
            "Use equals, not_equals, contains, not_contains, greater or less.",
        )
        .into()
    })
}

pub fn parse_logic_operator(value: &str) -> anyhow::Result<LogicOperator> {
    value.parse::<LogicOperator>().map_err(|_| {
        CliError::invalid_input_with_hint(
            format!("Unknown logic operator: {}", value),
            "Use `and` or `or`.",
        )
        .into()
    })
}

pub fn parse_image_position(value: &str) -> anyhow::Result<ImagePosition> {
    value.parse::<ImagePosition>().map_err(|_| {
        CliError::invalid_input_with_hint(
            format!("Unknown image position: {}", value),
            "Use top, bottom, left or right.",
        )
        .into()
    })
}

/// Parse `FIELD=VALUE`. The value is taken as JSON when it parses as JSON
/// (numbers, arrays, `null`), otherwise as a plain string.
pub fn parse_answer(value: &str) -> anyhow::Result<(String, Value)> {
    let (field, raw) = value.split_once('=').ok_or_else(|| {
        CliError::invalid_input_with_hint(
            format!("Invalid answer: {}", value),
            "Answers are written FIELD=VALUE.",
        )
    })?;
    let field = field.trim();
    if field.is_empty() {
        return Err(CliError::invalid_input(format!("Invalid answer: {}", value)).into());
    }
    let parsed = match serde_json::from_str::<Value>(raw) {
        Ok(json @ (Value::Number(_) | Value::Array(_) | Value::Null | Value::Bool(_))) => json,
        _ => Value::String(raw.to_string()),
    };
    Ok((field.to_string(), parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position(1, "Page").unwrap(), 0);
        assert!(parse_position(0, "Page").is_err());
    }

    #[test]
    fn test_parse_answer_values() {
        assert_eq!(
            parse_answer("q1=yes").unwrap(),
            ("q1".to_string(), Value::String("yes".into()))
        );
        assert_eq!(parse_answer("age=42").unwrap().1, serde_json::json!(42));
        assert_eq!(
            parse_answer("pick=[\"a\",\"b\"]").unwrap().1,
            serde_json::json!(["a", "b"])
        );
        assert_eq!(
            parse_answer("note=a=b").unwrap().1,
            Value::String("a=b".into())
        );
        assert!(parse_answer("novalue").is_err());
        assert!(parse_answer("=x").is_err());
    }

    #[test]
    fn test_parse_kind_and_operators() {
        assert_eq!(parse_field_kind("multi_select").unwrap(), FieldKind::MultiSelect);
        assert!(parse_field_kind("slider").is_err());
        assert_eq!(parse_rule_operator("gt").unwrap(), RuleOperator::Greater);
        assert_eq!(parse_logic_operator("or").unwrap(), LogicOperator::Or);
        assert_eq!(parse_image_position("Right").unwrap(), ImagePosition::Right);
        assert!(parse_image_position("centre").is_err());
    }
}

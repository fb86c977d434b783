//! Bulk question import.
//!
//! The import format is a block of records separated by `---`. Each record
//! is a `|`-separated list: a free-form question id followed by `key=value`
//! pairs.
//!
//! ```text
//! Q1|type=text|question=Name|options=[]|condition=null|score=null
//! ---
//! Q2|type=radio|question=Pick|options=[A:5|B:3]
//! ```
//!
//! Option lists are bracketed and use `|` between `label:score` items, so the
//! tokenizer only splits on `|` outside brackets. There are no escaping rules:
//! a label cannot contain `|` or `---`.

use std::fmt;

use serde::Serialize;

use crate::error::{FormError, Result};
use crate::form::{Field, FieldKind, FieldOption};

/// Literal separating two records.
pub const RECORD_DELIMITER: &str = "---";

/// Why a record produced no field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason", content = "detail")]
pub enum SkipReason {
    MissingType,
    MissingQuestion,
    UnknownType(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingType => f.write_str("missing type"),
            Self::MissingQuestion => f.write_str("missing question"),
            Self::UnknownType(kind) => write!(f, "unknown type '{}'", kind),
        }
    }
}

/// A record that was dropped, by 1-based position in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    pub record: usize,
    pub key: String,
    pub reason: SkipReason,
}

/// Outcome of parsing an import block.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub fields: Vec<Field>,
    pub skipped: Vec<SkippedRecord>,
}

/// Parse an import block, failing when no record yields a field.
pub fn parse(input: &str) -> Result<ImportReport> {
    let report = parse_lenient(input);
    if report.fields.is_empty() {
        return Err(FormError::Import(format!(
            "no valid questions found ({} record(s) skipped)",
            report.skipped.len()
        )));
    }
    Ok(report)
}

/// Parse an import block, returning whatever records were usable.
pub fn parse_lenient(input: &str) -> ImportReport {
    let mut fields = Vec::new();
    let mut skipped = Vec::new();

    let records = input
        .split(RECORD_DELIMITER)
        .map(str::trim)
        .filter(|record| !record.is_empty());

    for (index, record) in records.enumerate() {
        match parse_record(record) {
            Ok(mut field) => {
                field.order = fields.len() as u32;
                fields.push(field);
            }
            Err((key, reason)) => {
                tracing::warn!(record = index + 1, %reason, "skipping import record");
                skipped.push(SkippedRecord {
                    record: index + 1,
                    key,
                    reason,
                });
            }
        }
    }

    ImportReport { fields, skipped }
}

/// Split on `|` and line breaks that are not inside the `[...]` of an
/// `options=` value. Brackets anywhere else are plain text.
fn tokenize(record: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in record.char_indices() {
        match c {
            '[' if record[start..i].trim_start().starts_with("options=") => depth += 1,
            ']' if depth > 0 => depth -= 1,
            '|' | '\n' if depth == 0 => {
                tokens.push(&record[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    tokens.push(&record[start..]);
    tokens
        .into_iter()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

fn parse_record(record: &str) -> std::result::Result<Field, (String, SkipReason)> {
    let tokens = tokenize(record);
    let Some((key, pairs)) = tokens.split_first() else {
        return Err((String::new(), SkipReason::MissingType));
    };
    let key = key.to_string();

    let mut kind = None;
    let mut question = None;
    let mut options = None;
    let mut condition = None;
    let mut score = None;
    for pair in pairs {
        let Some((name, value)) = pair.split_once('=') else {
            continue;
        };
        let value = value.trim();
        match name.trim().to_ascii_lowercase().as_str() {
            "type" => kind = Some(value),
            "question" => question = Some(value),
            "options" => options = Some(value),
            "condition" => condition = Some(value),
            "score" => score = Some(value),
            _ => {}
        }
    }

    let kind = match kind.filter(|k| !k.is_empty()) {
        Some(raw) => raw
            .parse::<FieldKind>()
            .map_err(|_| (key.clone(), SkipReason::UnknownType(raw.to_string())))?,
        None => return Err((key, SkipReason::MissingType)),
    };
    let question = match question.filter(|q| !q.is_empty()) {
        Some(question) => question,
        None => return Err((key, SkipReason::MissingQuestion)),
    };

    let mut field = Field::new(kind, question)
        .with_required(true)
        .with_options(Vec::new());
    if kind.is_choice() {
        field.options = options.map(parse_options).unwrap_or_default();
    }
    // TODO: translate the condition text into ConditionalRule entries once the
    // import syntax for rules is settled; for now it only enables the block.
    if condition.is_some_and(|c| !c.is_empty() && c != "null") {
        field.conditional_logic.enabled = true;
    }
    field.score = score.and_then(|s| s.parse::<f64>().ok());
    field.import_key = Some(key);
    Ok(field)
}

/// Parse `[label:score|label:score]` into options.
fn parse_options(raw: &str) -> Vec<FieldOption> {
    let inner = raw.trim();
    let inner = inner.strip_prefix('[').unwrap_or(inner);
    let inner = inner.strip_suffix(']').unwrap_or(inner);
    inner
        .split('|')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| match item.rsplit_once(':') {
            Some((label, score)) => {
                FieldOption::from_label(label.trim(), score.trim().parse().unwrap_or(0.0))
            }
            None => FieldOption::from_label(item, 0.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_text_record() {
        let report =
            parse("Q1|type=text|question=Name|options=[]|condition=null|score=null").unwrap();
        assert_eq!(report.fields.len(), 1);
        let field = &report.fields[0];
        assert_eq!(field.kind, FieldKind::Text);
        assert_eq!(field.label, "Name");
        assert!(field.required);
        assert_eq!(field.order, 0);
        assert!(field.options.is_empty());
        assert!(!field.conditional_logic.enabled);
        assert_eq!(field.score, None);
        assert_eq!(field.import_key.as_deref(), Some("Q1"));
    }

    #[test]
    fn test_radio_options_with_scores() {
        let report = parse("Q2|type=radio|question=Pick|options=[A:5|B:3]").unwrap();
        let field = &report.fields[0];
        assert_eq!(
            field.options,
            vec![
                FieldOption::new("A", "a", 5.0),
                FieldOption::new("B", "b", 3.0),
            ]
        );
    }

    #[test]
    fn test_skipped_records_do_not_consume_order() {
        let input = "Q1|type=text|question=First\n---\nQ2|type=text\n---\nQ3|type=email|question=Mail";
        let report = parse(input).unwrap();
        let orders: Vec<_> = report.fields.iter().map(|f| f.order).collect();
        assert_eq!(orders, vec![0, 1]);
        assert_eq!(report.fields[1].kind, FieldKind::Email);
        assert_eq!(
            report.skipped,
            vec![SkippedRecord {
                record: 2,
                key: "Q2".to_string(),
                reason: SkipReason::MissingQuestion,
            }]
        );
    }

    #[test]
    fn test_options_dropped_for_non_choice_kinds() {
        let report = parse("Q1|type=number|question=Age|options=[A:1|B:2]").unwrap();
        assert!(report.fields[0].options.is_empty());
    }

    #[test]
    fn test_condition_enables_logic_without_rules() {
        let report = parse("Q4|type=text|question=Why?|condition=Q2=A").unwrap();
        let logic = &report.fields[0].conditional_logic;
        assert!(logic.enabled);
        assert!(logic.rules.is_empty());
    }

    #[test]
    fn test_unknown_type_and_missing_type_are_skipped() {
        let report = parse_lenient("Q1|type=slider|question=X\n---\nQ2|question=Y");
        assert!(report.fields.is_empty());
        assert_eq!(
            report.skipped[0].reason,
            SkipReason::UnknownType("slider".to_string())
        );
        assert_eq!(report.skipped[1].reason, SkipReason::MissingType);
    }

    #[test]
    fn test_zero_fields_is_an_error() {
        let err = parse("Q1|question=Orphan").unwrap_err();
        assert!(matches!(err, FormError::Import(_)));
        assert!(parse("   ").is_err());
    }

    #[test]
    fn test_option_edge_cases() {
        let report =
            parse("Q1|type=checkbox|question=Pick|options=[Very Good:x|Plain|Time: 5pm:2]|score=1.5")
                .unwrap();
        let field = &report.fields[0];
        assert_eq!(field.options[0], FieldOption::new("Very Good", "very_good", 0.0));
        assert_eq!(field.options[1], FieldOption::new("Plain", "plain", 0.0));
        assert_eq!(field.options[2], FieldOption::new("Time: 5pm", "time:_5pm", 2.0));
        assert_eq!(field.score, Some(1.5));
    }

    #[test]
    fn test_brackets_outside_options_are_text() {
        let report = parse("Q1|type=text|question=Pick [one|score=1").unwrap();
        let field = &report.fields[0];
        assert_eq!(field.label, "Pick [one");
        assert_eq!(field.score, Some(1.0));

        let report =
            parse("Q2|type=radio|question=Rate [1-5]|options=[Low:1|High:5]|score=2").unwrap();
        let field = &report.fields[0];
        assert_eq!(field.label, "Rate [1-5]");
        assert_eq!(field.options.len(), 2);
        assert_eq!(field.score, Some(2.0));
    }

    #[test]
    fn test_field_ids_are_unique() {
        let report = parse("Q1|type=text|question=A\n---\nQ1|type=text|question=B").unwrap();
        assert_ne!(report.fields[0].id, report.fields[1].id);
    }
}

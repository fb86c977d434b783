//! Fields and their answer options.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ConditionalLogic, FieldKind};

/// Number of options a new choice field starts with.
pub const DEFAULT_OPTION_COUNT: usize = 2;

/// Stable identifier of a field within a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    /// Generate a fresh `field_<uuid>` identifier.
    pub fn generate() -> Self {
        Self(format!("field_{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for FieldId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive an option value from its label: trimmed, lowercased, whitespace
/// runs replaced by `_`.
pub fn option_value(label: &str) -> String {
    label
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// One selectable answer of a choice field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: String,

    /// Contribution to the questionnaire score when selected
    #[serde(default)]
    pub score: f64,

    /// Set once the value was edited by hand; label edits stop re-deriving it
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub value_edited: bool,
}

impl FieldOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            score,
            value_edited: false,
        }
    }

    /// Option whose value is derived from the label.
    pub fn from_label(label: impl Into<String>, score: f64) -> Self {
        let label = label.into();
        let value = option_value(&label);
        Self::new(label, value, score)
    }

    /// Placeholder option for 1-based slot `n` (`Option n` / `option{n}`).
    pub fn numbered(n: usize) -> Self {
        Self::new(format!("Option {}", n), Self::default_value(n), 0.0)
    }

    pub fn default_value(n: usize) -> String {
        format!("option{}", n)
    }

    /// Set the label, re-deriving the value unless it was edited by hand.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
        if !self.value_edited {
            self.value = option_value(&self.label);
        }
    }

    /// Set the value by hand. Later label edits leave it alone.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.value_edited = true;
    }
}

/// A single question within a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,

    #[serde(rename = "type")]
    pub kind: FieldKind,

    pub label: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    /// Guide text shown under the question
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,

    /// Position within the owning page
    #[serde(default)]
    pub order: u32,

    #[serde(default)]
    pub conditional_logic: ConditionalLogic,

    /// Field-level weight from bulk import
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    /// Question id of the import record this field came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_key: Option<String>,
}

impl Field {
    /// Create a field with a generated id. Choice kinds get placeholder options.
    pub fn new(kind: FieldKind, label: impl Into<String>) -> Self {
        let options = if kind.is_choice() {
            (1..=DEFAULT_OPTION_COUNT).map(FieldOption::numbered).collect()
        } else {
            Vec::new()
        };
        Self {
            id: FieldId::generate(),
            kind,
            label: label.into(),
            required: false,
            placeholder: None,
            help_text: None,
            options,
            order: 0,
            conditional_logic: ConditionalLogic::default(),
            score: None,
            import_key: None,
        }
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = options;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Score of the option with the given value.
    pub fn option_score(&self, value: &str) -> Option<f64> {
        self.options
            .iter()
            .find(|option| option.value == value)
            .map(|option| option.score)
    }

    /// Copy of this field under a fresh id.
    pub fn duplicate(&self) -> Self {
        Self {
            id: FieldId::generate(),
            label: format!("{} (copy)", self.label),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_value_transform() {
        assert_eq!(option_value("A"), "a");
        assert_eq!(option_value("  Very   Good "), "very_good");
        assert_eq!(option_value("Yes, please"), "yes,_please");
    }

    #[test]
    fn test_label_follows_until_manual_edit() {
        let mut option = FieldOption::numbered(1);
        assert_eq!(option.value, "option1");

        option.set_label("Apple Pie");
        assert_eq!(option.value, "apple_pie");

        option.set_label("Cherry Pie");
        assert_eq!(option.value, "cherry_pie");

        option.set_value("custom");
        option.set_label("Plum");
        assert_eq!(option.label, "Plum");
        assert_eq!(option.value, "custom");
    }

    #[test]
    fn test_manual_value_matching_next_label_is_kept() {
        let mut option = FieldOption::numbered(1);
        option.set_value("maybe");
        option.set_label("Maybe");
        option.set_label("Perhaps");
        assert_eq!(option.value, "maybe");
        assert!(option.value_edited);
    }

    #[test]
    fn test_value_edited_flag_round_trips() {
        let untouched = serde_json::to_value(FieldOption::numbered(1)).unwrap();
        assert!(untouched.get("value_edited").is_none());

        let mut edited = FieldOption::numbered(2);
        edited.set_value("two");
        let json = serde_json::to_string(&edited).unwrap();
        let back: FieldOption = serde_json::from_str(&json).unwrap();
        assert!(back.value_edited);
    }

    #[test]
    fn test_new_choice_field_has_default_options() {
        let field = Field::new(FieldKind::Radio, "Pick one");
        assert_eq!(field.options.len(), DEFAULT_OPTION_COUNT);
        assert_eq!(field.options[1].value, "option2");
        assert!(field.id.as_str().starts_with("field_"));

        let text = Field::new(FieldKind::Text, "Name");
        assert!(text.options.is_empty());
    }

    #[test]
    fn test_field_serializes_kind_as_type() {
        let field = Field::new(FieldKind::MultiSelect, "Toppings").with_required(true);
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "multi-select");
        assert_eq!(json["required"], true);
        assert!(json.get("placeholder").is_none());
    }

    #[test]
    fn test_duplicate_gets_new_id() {
        let field = Field::new(FieldKind::Text, "Name");
        let copy = field.duplicate();
        assert_ne!(copy.id, field.id);
        assert_eq!(copy.label, "Name (copy)");
    }
}

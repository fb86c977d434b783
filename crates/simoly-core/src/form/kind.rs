//! Field kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// The closed set of question kinds a field can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    Text,
    Textarea,
    Richtext,
    Radio,
    Checkbox,
    Select,
    MultiSelect,
    Boolean,
    Rating,
    Range,
    ImagePicker,
    Color,
    Number,
    Currency,
    Date,
    Time,
    Datetime,
    FileUpload,
    Signature,
    Matrix,
    Address,
    Email,
    Tel,
    Url,
    Password,
    Name,
}

impl FieldKind {
    /// Every kind, in the order editors list them.
    pub const ALL: [FieldKind; 26] = [
        Self::Text,
        Self::Textarea,
        Self::Richtext,
        Self::Radio,
        Self::Checkbox,
        Self::Select,
        Self::MultiSelect,
        Self::Boolean,
        Self::Rating,
        Self::Range,
        Self::ImagePicker,
        Self::Color,
        Self::Number,
        Self::Currency,
        Self::Date,
        Self::Time,
        Self::Datetime,
        Self::FileUpload,
        Self::Signature,
        Self::Matrix,
        Self::Address,
        Self::Email,
        Self::Tel,
        Self::Url,
        Self::Password,
        Self::Name,
    ];

    /// Wire name (e.g. `multi-select`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Richtext => "richtext",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Select => "select",
            Self::MultiSelect => "multi-select",
            Self::Boolean => "boolean",
            Self::Rating => "rating",
            Self::Range => "range",
            Self::ImagePicker => "image-picker",
            Self::Color => "color",
            Self::Number => "number",
            Self::Currency => "currency",
            Self::Date => "date",
            Self::Time => "time",
            Self::Datetime => "datetime",
            Self::FileUpload => "file-upload",
            Self::Signature => "signature",
            Self::Matrix => "matrix",
            Self::Address => "address",
            Self::Email => "email",
            Self::Tel => "tel",
            Self::Url => "url",
            Self::Password => "password",
            Self::Name => "name",
        }
    }

    /// Whether fields of this kind carry a list of options.
    pub fn is_choice(&self) -> bool {
        match self {
            Self::Radio | Self::Checkbox | Self::Select | Self::MultiSelect | Self::ImagePicker => {
                true
            }
            Self::Text
            | Self::Textarea
            | Self::Richtext
            | Self::Boolean
            | Self::Rating
            | Self::Range
            | Self::Color
            | Self::Number
            | Self::Currency
            | Self::Date
            | Self::Time
            | Self::Datetime
            | Self::FileUpload
            | Self::Signature
            | Self::Matrix
            | Self::Address
            | Self::Email
            | Self::Tel
            | Self::Url
            | Self::Password
            | Self::Name => false,
        }
    }

    /// Whether an answer is a list of selected option values.
    pub fn is_multi_answer(&self) -> bool {
        matches!(self, Self::Checkbox | Self::MultiSelect)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = FormError;

    /// Accepts wire names case-insensitively, with `_` in place of `-`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| FormError::InvalidInput(format!("Unknown field type: {}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip_through_from_str() {
        for kind in FieldKind::ALL {
            assert_eq!(kind.as_str().parse::<FieldKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&FieldKind::MultiSelect).unwrap();
        assert_eq!(json, "\"multi-select\"");
        let kind: FieldKind = serde_json::from_str("\"file-upload\"").unwrap();
        assert_eq!(kind, FieldKind::FileUpload);
    }

    #[test]
    fn test_from_str_is_lenient() {
        assert_eq!(
            "Image_Picker".parse::<FieldKind>().unwrap(),
            FieldKind::ImagePicker
        );
        assert!("slider".parse::<FieldKind>().is_err());
    }

    #[test]
    fn test_choice_kinds() {
        let choice: Vec<_> = FieldKind::ALL.iter().filter(|k| k.is_choice()).collect();
        assert_eq!(
            choice,
            vec![
                &FieldKind::Radio,
                &FieldKind::Checkbox,
                &FieldKind::Select,
                &FieldKind::MultiSelect,
                &FieldKind::ImagePicker,
            ]
        );
    }
}

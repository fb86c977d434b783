//! Conditional visibility rules attached to fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::FieldId;
use crate::error::FormError;

/// How rule results are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicOperator {
    /// Visible iff every rule holds
    #[default]
    And,
    /// Visible iff at least one rule holds
    Or,
}

/// Comparison applied between a source answer and a rule value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleOperator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    Greater,
    Less,
}

impl RuleOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::Contains => "contains",
            Self::NotContains => "not_contains",
            Self::Greater => "greater",
            Self::Less => "less",
        }
    }

    /// Result of the comparison when the source field has no answer yet.
    pub fn holds_without_answer(&self) -> bool {
        matches!(self, Self::NotEquals | Self::NotContains)
    }
}

impl fmt::Display for RuleOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleOperator {
    type Err = FormError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "equals" | "eq" => Ok(Self::Equals),
            "not_equals" | "ne" => Ok(Self::NotEquals),
            "contains" => Ok(Self::Contains),
            "not_contains" => Ok(Self::NotContains),
            "greater" | "gt" => Ok(Self::Greater),
            "less" | "lt" => Ok(Self::Less),
            _ => Err(FormError::InvalidInput(format!(
                "Unknown rule operator: {} (use equals, not_equals, contains, not_contains, greater, less)",
                value
            ))),
        }
    }
}

impl FromStr for LogicOperator {
    type Err = FormError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "and" => Ok(Self::And),
            "or" => Ok(Self::Or),
            _ => Err(FormError::InvalidInput(format!(
                "Unknown logic operator: {} (use and, or)",
                value
            ))),
        }
    }
}

impl fmt::Display for LogicOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => f.write_str("and"),
            Self::Or => f.write_str("or"),
        }
    }
}

/// One comparison against an earlier field's answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalRule {
    /// Field whose answer is compared
    pub source_field_id: FieldId,

    pub operator: RuleOperator,

    /// Comparison value, always stored as text
    pub value: String,
}

impl ConditionalRule {
    pub fn new(source_field_id: FieldId, operator: RuleOperator, value: impl Into<String>) -> Self {
        Self {
            source_field_id,
            operator,
            value: value.into(),
        }
    }
}

/// Visibility predicate of a field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConditionalLogic {
    /// When false the field is always shown
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub operator: LogicOperator,

    #[serde(default)]
    pub rules: Vec<ConditionalRule>,
}

impl ConditionalLogic {
    pub fn references(&self, field_id: &FieldId) -> bool {
        self.rules.iter().any(|rule| &rule.source_field_id == field_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_operator_parsing() {
        assert_eq!(
            "not-equals".parse::<RuleOperator>().unwrap(),
            RuleOperator::NotEquals
        );
        assert_eq!("GT".parse::<RuleOperator>().unwrap(), RuleOperator::Greater);
        assert!("between".parse::<RuleOperator>().is_err());
    }

    #[test]
    fn test_logic_defaults() {
        let logic: ConditionalLogic = serde_json::from_str("{}").unwrap();
        assert!(!logic.enabled);
        assert_eq!(logic.operator, LogicOperator::And);
        assert!(logic.rules.is_empty());
    }

    #[test]
    fn test_rule_serializes_snake_case() {
        let rule = ConditionalRule::new(FieldId::from("q1"), RuleOperator::NotContains, "x");
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["operator"], "not_contains");
        assert_eq!(json["source_field_id"], "q1");
    }
}

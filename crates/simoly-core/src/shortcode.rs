//! Embed shortcodes resolved by the host site's renderer.

use std::fmt;

use uuid::Uuid;

use crate::error::{FormError, Result};

/// A bracketed embed placeholder.
///
/// Attribute values are written verbatim between double quotes, so values
/// containing `"`, `[` or `]` are rejected when the shortcode is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shortcode {
    Form {
        id: Uuid,
    },
    Page {
        id: String,
    },
    AiReport {
        questionnaire_id: Uuid,
        prompt_id: String,
        provider: String,
    },
}

impl Shortcode {
    pub fn form(id: Uuid) -> Self {
        Self::Form { id }
    }

    pub fn page(id: impl Into<String>) -> Result<Self> {
        Ok(Self::Page {
            id: attribute("id", id.into())?,
        })
    }

    pub fn ai_report(
        questionnaire_id: Uuid,
        prompt_id: impl Into<String>,
        provider: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self::AiReport {
            questionnaire_id,
            prompt_id: attribute("prompt_id", prompt_id.into())?,
            provider: attribute("provider", provider.into())?,
        })
    }

    /// Tag name inside the brackets.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Form { .. } => "simoly_form",
            Self::Page { .. } => "simoly_page",
            Self::AiReport { .. } => "simoly_ai_report",
        }
    }
}

fn attribute(name: &str, value: String) -> Result<String> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(FormError::InvalidInput(format!(
            "shortcode attribute {} cannot be empty",
            name
        )));
    }
    if value.contains(['"', '[', ']']) {
        return Err(FormError::InvalidInput(format!(
            "shortcode attribute {} cannot contain '\"', '[' or ']'",
            name
        )));
    }
    Ok(value)
}

impl fmt::Display for Shortcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Form { id } => write!(f, "[{} id=\"{}\"]", self.tag(), id),
            Self::Page { id } => write!(f, "[{} id=\"{}\"]", self.tag(), id),
            Self::AiReport {
                questionnaire_id,
                prompt_id,
                provider,
            } => write!(
                f,
                "[{} questionnaire_id=\"{}\" prompt_id=\"{}\" provider=\"{}\"]",
                self.tag(),
                questionnaire_id,
                prompt_id,
                provider
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_shortcode() {
        let id = Uuid::nil();
        assert_eq!(
            Shortcode::form(id).to_string(),
            "[simoly_form id=\"00000000-0000-0000-0000-000000000000\"]"
        );
    }

    #[test]
    fn test_ai_report_shortcode() {
        let id = Uuid::nil();
        let code = Shortcode::ai_report(id, "12", "openai").unwrap();
        assert_eq!(
            code.to_string(),
            "[simoly_ai_report questionnaire_id=\"00000000-0000-0000-0000-000000000000\" prompt_id=\"12\" provider=\"openai\"]"
        );
    }

    #[test]
    fn test_rejects_unescapable_values() {
        assert!(Shortcode::page("a\"b").is_err());
        assert!(Shortcode::page("[x]").is_err());
        assert!(Shortcode::ai_report(Uuid::nil(), "1", "  ").is_err());
        assert_eq!(
            Shortcode::page(" landing ").unwrap().to_string(),
            "[simoly_page id=\"landing\"]"
        );
    }
}

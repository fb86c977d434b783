//! CLI error types for structured error handling.
//!
//! Typed errors carry a hint and map to specific exit codes; everything
//! else travels as `anyhow::Error` and exits with the general code.

use std::fmt;

use simoly_core::FormError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config, store, form, field)
    NotFound { message: String, hint: String },

    /// Invalid user input
    InvalidInput { message: String, hint: Option<String> },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, .. } => write!(f, "{}", message),
            CliError::InvalidInput { message, .. } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput {
            message: message.into(),
            hint: None,
        }
    }

    /// Create an InvalidInput error with a hint.
    pub fn invalid_input_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::InvalidInput {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            CliError::NotFound { hint, .. } => Some(hint),
            CliError::InvalidInput { hint, .. } => hint.as_deref(),
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::InvalidInput { .. } => exit_codes::GENERAL,
        }
    }
}

/// Exit code for any error reaching `main`.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }
    match err.downcast_ref::<FormError>() {
        Some(form_err) if form_err.is_not_found() => exit_codes::NOT_FOUND,
        _ => exit_codes::GENERAL,
    }
}

/// Hint for an error reaching `main`, if one applies.
pub fn hint_for(err: &anyhow::Error) -> Option<String> {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.hint().map(str::to_string);
    }
    match err.downcast_ref::<FormError>()? {
        FormError::StoreNotFound => Some("Run `simoly init` to create a form store.".to_string()),
        FormError::Import(_) => Some(
            "Each record needs `type=` and `question=`; separate records with `---`.".to_string(),
        ),
        FormError::Validation(message) if message.contains("rule source") => {
            Some("Rules may only reference fields placed earlier in the form.".to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_exit_code() {
        let err = anyhow::Error::new(CliError::not_found("Form not found", "list forms"));
        assert_eq!(exit_code_for(&err), exit_codes::NOT_FOUND);
        assert_eq!(hint_for(&err).as_deref(), Some("list forms"));
    }

    #[test]
    fn test_core_errors_map_to_exit_codes() {
        let missing = anyhow::Error::new(FormError::StoreNotFound);
        assert_eq!(exit_code_for(&missing), exit_codes::NOT_FOUND);
        assert!(hint_for(&missing).is_some());

        let refused = anyhow::Error::new(FormError::Validation("last page".into()));
        assert_eq!(exit_code_for(&refused), exit_codes::GENERAL);
        assert_eq!(hint_for(&refused), None);

        let plain = anyhow::anyhow!("boom");
        assert_eq!(exit_code_for(&plain), exit_codes::GENERAL);
    }
}

//! Path resolution and form/field lookup.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use simoly_core::storage::{FormStore, SqliteFormStore};
use simoly_core::{FieldId, FormDocument};

use crate::cli::Cli;
use crate::config::{default_config_path, default_store_path, SimolyConfig};
use crate::errors::CliError;

/// Resolve the config file path, checking SIMOLY_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("SIMOLY_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the store path from CLI args, then config, then the XDG default.
pub fn resolve_store_path(cli: &Cli, config: Option<&SimolyConfig>) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.store.as_deref().filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }
    if let Some(config) = config {
        return Ok(PathBuf::from(&config.store.path));
    }
    default_store_path()
}

/// Error message when the store file is missing.
pub fn missing_store_message(path: &Path) -> String {
    format!("No form store found at {}", path.display())
}

/// Load a form by full UUID or unique id prefix.
pub fn resolve_form(store: &SqliteFormStore, reference: &str) -> anyhow::Result<FormDocument> {
    let found = match Uuid::parse_str(reference.trim()) {
        Ok(id) => store.get_form(&id)?,
        Err(_) => store.find_form_by_prefix(reference)?,
    };
    found.ok_or_else(|| {
        CliError::not_found(
            format!("Form '{}' not found", reference),
            "Run `simoly form list` to see form IDs.",
        )
        .into()
    })
}

/// Resolve a field by exact id, unique id prefix (with or without the
/// `field_` prefix), or import question key.
pub fn resolve_field(form: &FormDocument, reference: &str) -> anyhow::Result<FieldId> {
    let reference = reference.trim();
    if let Some(field) = form.fields().find(|f| f.id.as_str() == reference) {
        return Ok(field.id.clone());
    }

    let prefixed = format!("field_{}", reference);
    let matches: Vec<&FieldId> = form
        .fields()
        .filter(|f| {
            !reference.is_empty()
                && (f.id.as_str().starts_with(reference)
                    || f.id.as_str().starts_with(&prefixed)
                    || f.import_key.as_deref() == Some(reference))
        })
        .map(|f| &f.id)
        .collect();

    match matches.as_slice() {
        [id] => Ok((*id).clone()),
        [] => Err(CliError::not_found(
            format!("Field '{}' not found", reference),
            format!("Run `simoly form show {}` to see field IDs.", form.id),
        )
        .into()),
        _ => Err(CliError::invalid_input_with_hint(
            format!("Field reference '{}' is ambiguous", reference),
            "Use more characters of the field ID.",
        )
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simoly_core::{Field, FieldKind};

    fn form() -> FormDocument {
        let mut form = FormDocument::new("Lookup");
        let mut imported = Field::new(FieldKind::Text, "Imported");
        imported.import_key = Some("Q7".to_string());
        form.pages[0].fields = vec![
            Field::new(FieldKind::Text, "Name"),
            Field::new(FieldKind::Email, "Email"),
            imported,
        ];
        form
    }

    #[test]
    fn test_resolve_field_by_exact_and_key() {
        let form = form();
        let name = form.pages[0].fields[0].id.clone();
        assert_eq!(resolve_field(&form, name.as_str()).unwrap(), name);
        assert_eq!(
            resolve_field(&form, "Q7").unwrap(),
            form.pages[0].fields[2].id
        );
    }

    #[test]
    fn test_resolve_field_by_prefix() {
        let form = form();
        let email = form.pages[0].fields[1].id.clone();
        let hex = &email.as_str()["field_".len()..];
        assert_eq!(resolve_field(&form, &hex[..12]).unwrap(), email);
    }

    #[test]
    fn test_resolve_field_errors() {
        let form = form();
        let missing = resolve_field(&form, "zzzz").unwrap_err();
        assert!(matches!(
            missing.downcast_ref::<CliError>(),
            Some(CliError::NotFound { .. })
        ));
        let ambiguous = resolve_field(&form, "field_").unwrap_err();
        assert!(matches!(
            ambiguous.downcast_ref::<CliError>(),
            Some(CliError::InvalidInput { .. })
        ));
    }
}

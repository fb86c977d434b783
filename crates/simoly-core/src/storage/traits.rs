//! Storage engine trait definition.
//!
//! The `FormStore` trait is the interface the edit session and the CLI use
//! to persist documents. Saves are whole-document upserts with last write
//! wins.

use std::path::Path;
use uuid::Uuid;

use super::types::{FormFilter, FormSummary, StoreMetadata};
use crate::error::Result;
use crate::form::FormDocument;

/// Storage interface for form documents.
pub trait FormStore: Send + Sync {
    /// Create a new store at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `FormError::Storage` if:
    /// - File already exists
    /// - Cannot write to path
    fn create(path: &Path) -> Result<Self>
    where
        Self: Sized;

    /// Open an existing store.
    ///
    /// # Errors
    ///
    /// Returns `FormError::StoreNotFound` if the file does not exist, and
    /// `FormError::Storage` if it is not a form store.
    fn open(path: &Path) -> Result<Self>
    where
        Self: Sized;

    /// Get store metadata.
    fn metadata(&self) -> Result<StoreMetadata>;

    // --- Form operations ---

    /// Insert or replace the whole document under its id.
    fn upsert_form(&mut self, form: &FormDocument) -> Result<()>;

    /// Get a form by ID.
    ///
    /// Returns `Ok(None)` if not found.
    fn get_form(&self, id: &Uuid) -> Result<Option<FormDocument>>;

    /// Resolve a form by a unique id prefix.
    ///
    /// # Errors
    ///
    /// Returns `FormError::InvalidInput` if the prefix is not hexadecimal or
    /// matches more than one form.
    fn find_form_by_prefix(&self, prefix: &str) -> Result<Option<FormDocument>>;

    /// List form summaries matching the filter, most recently updated first.
    fn list_forms(&self, filter: &FormFilter) -> Result<Vec<FormSummary>>;

    /// Delete a form.
    ///
    /// Returns `FormError::NotFound` if no form has this id.
    fn delete_form(&mut self, id: &Uuid) -> Result<()>;

    // --- Maintenance operations ---

    /// Check store integrity.
    ///
    /// Verifies:
    /// - SQLite page structure
    /// - Required metadata keys
    /// - Every stored document parses and matches its row
    fn check_integrity(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_definition_compiles() {
        fn _accepts_form_store<T: FormStore>(_store: T) {}
        fn _accepts_dyn_store(_store: &mut dyn FormStore) {}
    }
}

//! Data types for the storage layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::form::FormDocument;

/// On-disk schema version written to the `meta` table.
pub const FORMAT_VERSION: &str = "1";

/// Metadata for a form store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMetadata {
    /// Format version (e.g., "1")
    pub format_version: String,

    /// When this store was created
    pub created_at: DateTime<Utc>,

    /// Last write to any form (informational)
    pub last_modified: DateTime<Utc>,

    pub form_count: usize,
}

/// Listing row for a stored form, without the document body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSummary {
    pub id: Uuid,
    pub title: String,
    pub active: bool,
    pub page_count: usize,
    pub field_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&FormDocument> for FormSummary {
    fn from(form: &FormDocument) -> Self {
        Self {
            id: form.id,
            title: form.title.clone(),
            active: form.active,
            page_count: form.pages.len(),
            field_count: form.field_count(),
            created_at: form.created_at,
            updated_at: form.updated_at,
        }
    }
}

/// Filter for listing forms.
#[derive(Debug, Clone, Default)]
pub struct FormFilter {
    /// Only active (`true`) or inactive (`false`) forms
    pub active: Option<bool>,

    /// Case-insensitive title substring
    pub title: Option<String>,

    /// Maximum number of results
    pub limit: Option<usize>,
}

impl FormFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_filter_builder() {
        let filter = FormFilter::new().active(true).title("intake").limit(10);

        assert_eq!(filter.active, Some(true));
        assert_eq!(filter.title, Some("intake".to_string()));
        assert_eq!(filter.limit, Some(10));
    }

    #[test]
    fn test_summary_from_document() {
        let form = FormDocument::new("Survey");
        let summary = FormSummary::from(&form);
        assert_eq!(summary.id, form.id);
        assert_eq!(summary.page_count, 1);
        assert_eq!(summary.field_count, 0);
        assert!(summary.active);
    }
}

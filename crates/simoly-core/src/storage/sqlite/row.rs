//! Row types for form queries.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{FormError, Result};
use crate::form::FormDocument;
use crate::storage::types::FormSummary;

/// Raw row from the forms table, before parsing the document.
#[derive(Debug)]
pub struct FormRow {
    pub id: String,
    pub document_json: String,
}

impl FormRow {
    pub fn from_sql(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            document_json: row.get(1)?,
        })
    }
}

impl TryFrom<FormRow> for FormDocument {
    type Error = FormError;

    fn try_from(row: FormRow) -> Result<Self> {
        let id = parse_uuid(&row.id)?;
        let mut document: FormDocument = serde_json::from_str(&row.document_json)
            .map_err(|e| FormError::Storage(format!("Invalid form JSON for {}: {}", id, e)))?;
        if document.id != id {
            return Err(FormError::Storage(format!(
                "Form row {} holds document {}",
                id, document.id
            )));
        }
        if document.pages.is_empty() {
            return Err(FormError::Storage(format!("Form {} has no pages", id)));
        }
        document.normalize();
        Ok(document)
    }
}

/// Summary columns of the forms table.
#[derive(Debug)]
pub struct SummaryRow {
    pub id: String,
    pub title: String,
    pub active: bool,
    pub page_count: i64,
    pub field_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl SummaryRow {
    pub fn from_sql(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            active: row.get(2)?,
            page_count: row.get(3)?,
            field_count: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }
}

impl TryFrom<SummaryRow> for FormSummary {
    type Error = FormError;

    fn try_from(row: SummaryRow) -> Result<Self> {
        Ok(FormSummary {
            id: parse_uuid(&row.id)?,
            title: row.title,
            active: row.active,
            page_count: usize::try_from(row.page_count)
                .map_err(|_| FormError::Storage("Invalid page count".to_string()))?,
            field_count: usize::try_from(row.field_count)
                .map_err(|_| FormError::Storage("Invalid field count".to_string()))?,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

pub fn parse_uuid(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| FormError::Storage(format!("Invalid form UUID: {}", e)))
}

pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)
        .map_err(|e| FormError::Storage(format!("Invalid timestamp: {}", e)))?
        .with_timezone(&Utc))
}

//! SQLite storage backend.
//!
//! Each form is one row in `forms`: the full document as JSON plus the
//! summary columns used for listing. Writes go straight to the database
//! file; there is no separate close step.

mod row;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::error::{FormError, Result};
use crate::form::FormDocument;
use crate::storage::traits::FormStore;
use crate::storage::types::{FormFilter, FormSummary, StoreMetadata, FORMAT_VERSION};

use row::{parse_timestamp, FormRow, SummaryRow};

const SCHEMA: &str = r#"
    CREATE TABLE meta (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE forms (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        active INTEGER NOT NULL DEFAULT 1,
        page_count INTEGER NOT NULL,
        field_count INTEGER NOT NULL,
        document_json TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );

    CREATE INDEX forms_updated_at ON forms(updated_at);
"#;

const SUMMARY_COLUMNS: &str =
    "id, title, active, page_count, field_count, created_at, updated_at";

/// SQLite-backed form store.
pub struct SqliteFormStore {
    path: PathBuf,
    conn: Mutex<Connection>,
}

impl SqliteFormStore {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| FormError::Storage("SQLite connection poisoned".to_string()))
    }

    fn meta_value(conn: &Connection, key: &str) -> Result<String> {
        conn.query_row("SELECT value FROM meta WHERE key = ?", [key], |row| {
            row.get(0)
        })
        .optional()?
        .ok_or_else(|| FormError::Storage(format!("Metadata key '{}' is missing", key)))
    }

    fn touch(conn: &Connection) -> Result<()> {
        conn.execute(
            "UPDATE meta SET value = ? WHERE key = 'last_modified'",
            [Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn validate_prefix(prefix: &str) -> Result<&str> {
        let prefix = prefix.trim();
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_hexdigit() || c == '-') {
            return Err(FormError::InvalidInput(format!(
                "'{}' is not a form id or id prefix",
                prefix
            )));
        }
        Ok(prefix)
    }
}

impl FormStore for SqliteFormStore {
    fn create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Err(FormError::Storage(format!(
                "Store file already exists: {}",
                path.display()
            )));
        }

        let mut conn = Connection::open(path)?;
        let now = Utc::now().to_rfc3339();
        let tx = conn.transaction()?;
        tx.execute_batch(SCHEMA)?;
        for (key, value) in [
            ("format_version", FORMAT_VERSION),
            ("created_at", now.as_str()),
            ("last_modified", now.as_str()),
        ] {
            tx.execute(
                "INSERT INTO meta (key, value) VALUES (?, ?)",
                params![key, value],
            )?;
        }
        tx.commit()?;

        tracing::debug!(path = %path.display(), "created form store");
        Ok(Self {
            path: path.to_path_buf(),
            conn: Mutex::new(conn),
        })
    }

    fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FormError::StoreNotFound);
        }

        let conn = Connection::open(path)?;
        let format_version = Self::meta_value(&conn, "format_version")
            .map_err(|_| FormError::Storage(format!("{} is not a form store", path.display())))?;
        if format_version != FORMAT_VERSION {
            return Err(FormError::Storage(format!(
                "Unsupported store format version {}",
                format_version
            )));
        }

        tracing::debug!(path = %path.display(), "opened form store");
        Ok(Self {
            path: path.to_path_buf(),
            conn: Mutex::new(conn),
        })
    }

    fn metadata(&self) -> Result<StoreMetadata> {
        let conn = self.lock_conn()?;

        let format_version = Self::meta_value(&conn, "format_version")?;
        let created_at = parse_timestamp(&Self::meta_value(&conn, "created_at")?)?;
        let last_modified = parse_timestamp(&Self::meta_value(&conn, "last_modified")?)?;
        let form_count: i64 = conn.query_row("SELECT COUNT(*) FROM forms", [], |row| row.get(0))?;

        Ok(StoreMetadata {
            format_version,
            created_at,
            last_modified,
            form_count: form_count.max(0) as usize,
        })
    }

    fn upsert_form(&mut self, form: &FormDocument) -> Result<()> {
        let document_json = serde_json::to_string(form)
            .map_err(|e| FormError::Storage(format!("Cannot serialize form: {}", e)))?;
        let mut conn = self.lock_conn()?;

        let tx = conn.transaction()?;
        tx.execute(
            r#"
            INSERT INTO forms (id, title, active, page_count, field_count, document_json, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                active = excluded.active,
                page_count = excluded.page_count,
                field_count = excluded.field_count,
                document_json = excluded.document_json,
                updated_at = excluded.updated_at
            "#,
            params![
                form.id.to_string(),
                form.title,
                form.active,
                form.pages.len() as i64,
                form.field_count() as i64,
                document_json,
                form.created_at.to_rfc3339(),
                form.updated_at.to_rfc3339(),
            ],
        )?;
        Self::touch(&tx)?;
        tx.commit()?;

        tracing::debug!(form = %form.id, "saved form");
        Ok(())
    }

    fn get_form(&self, id: &Uuid) -> Result<Option<FormDocument>> {
        let conn = self.lock_conn()?;

        let row = conn
            .query_row(
                "SELECT id, document_json FROM forms WHERE id = ?",
                [id.to_string()],
                FormRow::from_sql,
            )
            .optional()?;

        row.map(FormDocument::try_from).transpose()
    }

    fn find_form_by_prefix(&self, prefix: &str) -> Result<Option<FormDocument>> {
        let prefix = Self::validate_prefix(prefix)?.to_ascii_lowercase();
        let conn = self.lock_conn()?;

        let mut stmt =
            conn.prepare("SELECT id, document_json FROM forms WHERE id LIKE ? || '%' LIMIT 2")?;
        let rows = stmt
            .query_map([&prefix], FormRow::from_sql)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        match rows.len() {
            0 => Ok(None),
            1 => rows
                .into_iter()
                .next()
                .map(FormDocument::try_from)
                .transpose(),
            _ => Err(FormError::InvalidInput(format!(
                "id prefix '{}' matches more than one form",
                prefix
            ))),
        }
    }

    fn list_forms(&self, filter: &FormFilter) -> Result<Vec<FormSummary>> {
        let conn = self.lock_conn()?;

        let mut conditions: Vec<String> = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(active) = filter.active {
            conditions.push("active = ?".to_string());
            params.push(Box::new(active));
        }

        if let Some(ref title) = filter.title {
            conditions.push("instr(lower(title), lower(?)) > 0".to_string());
            params.push(Box::new(title.clone()));
        }

        let mut query = format!("SELECT {} FROM forms", SUMMARY_COLUMNS);
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY updated_at DESC, id");

        if let Some(limit) = filter.limit {
            query.push_str(" LIMIT ?");
            params.push(Box::new(limit as i64));
        }

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map(
            rusqlite::params_from_iter(params.iter()),
            SummaryRow::from_sql,
        )?;

        let mut forms = Vec::new();
        for row in rows {
            forms.push(row?.try_into()?);
        }
        Ok(forms)
    }

    fn delete_form(&mut self, id: &Uuid) -> Result<()> {
        let mut conn = self.lock_conn()?;

        let tx = conn.transaction()?;
        let deleted = tx.execute("DELETE FROM forms WHERE id = ?", [id.to_string()])?;
        if deleted == 0 {
            return Err(FormError::NotFound(format!("form {}", id)));
        }
        Self::touch(&tx)?;
        tx.commit()?;

        tracing::debug!(form = %id, "deleted form");
        Ok(())
    }

    fn check_integrity(&self) -> Result<()> {
        let conn = self.lock_conn()?;

        let status: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        if status != "ok" {
            return Err(FormError::Storage(format!(
                "SQLite integrity check failed: {}",
                status
            )));
        }

        let metadata_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM meta WHERE key IN ('format_version', 'created_at', 'last_modified')",
            [],
            |row| row.get(0),
        )?;
        if metadata_count < 3 {
            return Err(FormError::Storage(
                "Metadata table missing required keys".to_string(),
            ));
        }

        let mut stmt = conn.prepare("SELECT id, document_json FROM forms")?;
        let rows = stmt.query_map([], FormRow::from_sql)?;
        for row in rows {
            FormDocument::try_from(row?)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_prefix() {
        assert_eq!(SqliteFormStore::validate_prefix(" 3f2a ").unwrap(), "3f2a");
        assert!(SqliteFormStore::validate_prefix("").is_err());
        assert!(SqliteFormStore::validate_prefix("abc%").is_err());
        assert!(SqliteFormStore::validate_prefix("x_y").is_err());
    }
}

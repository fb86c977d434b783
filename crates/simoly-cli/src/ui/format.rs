//! String formatting utilities for UI rendering.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use simoly_core::FieldId;

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}

/// Format a short ID from a UUID (first 8 characters).
pub fn short_id(id: &Uuid) -> String {
    id.to_string()[..8].to_string()
}

/// Field id shortened to its prefix and first 8 hex characters.
pub fn short_field_id(id: &FieldId) -> String {
    let raw = id.as_str();
    match raw.strip_prefix("field_") {
        Some(rest) => format!("field_{}", rest.chars().take(8).collect::<String>()),
        None => truncate(raw, 14),
    }
}

/// Format a datetime for display.
pub fn format_datetime(dt: &DateTime<Utc>, pretty: bool) -> String {
    if pretty {
        dt.format("%Y-%m-%d %H:%M UTC").to_string()
    } else {
        dt.to_rfc3339()
    }
}

/// Render a score without a trailing `.0` for whole numbers.
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 && score.abs() < 1e15 {
        format!("{}", score as i64)
    } else {
        format!("{}", score)
    }
}

/// Sanitize a string for single-line output (replace newlines with spaces).
pub fn single_line(s: &str) -> String {
    s.replace('\n', " ").replace('\r', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hello", 2), "he");
    }

    #[test]
    fn test_short_id() {
        let id = Uuid::parse_str("7a2e3c0b-1234-5678-9abc-def012345678").unwrap();
        assert_eq!(short_id(&id), "7a2e3c0b");
    }

    #[test]
    fn test_short_field_id() {
        let id = FieldId::from("field_0123456789abcdef0123456789abcdef");
        assert_eq!(short_field_id(&id), "field_01234567");
        assert_eq!(short_field_id(&FieldId::from("legacy")), "legacy");
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(5.0), "5");
        assert_eq!(format_score(1.5), "1.5");
        assert_eq!(format_score(-2.0), "-2");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("hello\nworld"), "hello world");
    }
}

//! Form documents and pages.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Field, FieldId};
use crate::error::FormError;

/// Where a page's header image is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImagePosition {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl FromStr for ImagePosition {
    type Err = FormError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(FormError::InvalidInput(format!(
                "Unknown image position: {} (use top, bottom, left, right)",
                value
            ))),
        }
    }
}

impl fmt::Display for ImagePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderImage {
    pub url: String,

    #[serde(default)]
    pub position: ImagePosition,
}

/// An ordered subdivision of a form. Owns its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: Uuid,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_image: Option<HeaderImage>,

    #[serde(default)]
    pub fields: Vec<Field>,

    /// Position within the document
    #[serde(default)]
    pub order: u32,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            header_image: None,
            fields: Vec::new(),
            order: 0,
        }
    }

    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    pub fn field_position(&self, id: &FieldId) -> Option<usize> {
        self.fields.iter().position(|field| &field.id == id)
    }
}

/// Structural address of a field: page index and position in that page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FieldLocation {
    pub page: usize,
    pub position: usize,
}

fn default_active() -> bool {
    true
}

/// Top-level questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDocument {
    pub id: Uuid,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub pages: Vec<Page>,

    #[serde(default = "default_active")]
    pub active: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl FormDocument {
    /// New active document with a single empty page.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            pages: vec![Page::new("Page 1")],
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// All fields in document order (page by page).
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.pages.iter().flat_map(|page| page.fields.iter())
    }

    pub fn field_count(&self) -> usize {
        self.pages.iter().map(|page| page.fields.len()).sum()
    }

    pub fn field(&self, id: &FieldId) -> Option<&Field> {
        self.fields().find(|field| &field.id == id)
    }

    pub fn contains_field(&self, id: &FieldId) -> bool {
        self.field(id).is_some()
    }

    /// Find which page owns a field, and where.
    pub fn locate_field(&self, id: &FieldId) -> Option<FieldLocation> {
        self.pages.iter().enumerate().find_map(|(page, p)| {
            p.field_position(id)
                .map(|position| FieldLocation { page, position })
        })
    }

    /// Fields a rule on `id` may reference: those strictly earlier in
    /// document order. Empty when `id` is not in the document.
    pub fn rule_source_candidates(&self, id: &FieldId) -> Vec<&Field> {
        if !self.contains_field(id) {
            return Vec::new();
        }
        self.fields().take_while(|field| &field.id != id).collect()
    }

    /// Whether `earlier` comes strictly before `later` in document order.
    pub fn precedes(&self, earlier: &FieldId, later: &FieldId) -> bool {
        match (self.locate_field(earlier), self.locate_field(later)) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        }
    }

    /// Renumber page and field `order` values sequentially from 0.
    pub fn renumber(&mut self) {
        for (page_index, page) in self.pages.iter_mut().enumerate() {
            page.order = page_index as u32;
            for (field_index, field) in page.fields.iter_mut().enumerate() {
                field.order = field_index as u32;
            }
        }
    }

    /// Sort pages and fields by their stored `order`, then renumber.
    ///
    /// Documents written by other editors may carry gaps or an unsorted
    /// array; ties keep their array order.
    pub fn normalize(&mut self) {
        self.pages.sort_by_key(|page| page.order);
        for page in &mut self.pages {
            page.fields.sort_by_key(|field| field.order);
        }
        self.renumber();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FieldKind;

    fn sample() -> FormDocument {
        let mut doc = FormDocument::new("Intake");
        doc.pages[0].fields = vec![
            Field::new(FieldKind::Text, "Name"),
            Field::new(FieldKind::Radio, "Plan"),
        ];
        doc.pages
            .push(Page::new("Page 2").with_fields(vec![Field::new(FieldKind::Number, "Age")]));
        doc.renumber();
        doc
    }

    #[test]
    fn test_new_document_has_one_page() {
        let doc = FormDocument::new("Survey");
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(doc.pages[0].title, "Page 1");
        assert!(doc.active);
    }

    #[test]
    fn test_locate_field_is_structural() {
        let doc = sample();
        let age = doc.pages[1].fields[0].id.clone();
        assert_eq!(
            doc.locate_field(&age),
            Some(FieldLocation {
                page: 1,
                position: 0
            })
        );
        assert_eq!(doc.locate_field(&FieldId::from("missing")), None);
    }

    #[test]
    fn test_rule_source_candidates_are_strictly_earlier() {
        let doc = sample();
        let name = doc.pages[0].fields[0].id.clone();
        let plan = doc.pages[0].fields[1].id.clone();
        let age = doc.pages[1].fields[0].id.clone();

        assert!(doc.rule_source_candidates(&name).is_empty());
        let ids: Vec<_> = doc
            .rule_source_candidates(&age)
            .into_iter()
            .map(|f| f.id.clone())
            .collect();
        assert_eq!(ids, vec![name.clone(), plan.clone()]);
        assert!(doc.precedes(&name, &age));
        assert!(!doc.precedes(&age, &plan));
    }

    #[test]
    fn test_normalize_sorts_by_order() {
        let mut doc = sample();
        doc.pages[0].fields[0].order = 7;
        doc.pages[0].fields[1].order = 2;
        let plan = doc.pages[0].fields[1].id.clone();

        doc.normalize();

        assert_eq!(doc.pages[0].fields[0].id, plan);
        let orders: Vec<_> = doc.pages[0].fields.iter().map(|f| f.order).collect();
        assert_eq!(orders, vec![0, 1]);
    }

    #[test]
    fn test_document_json_round_trip_keeps_structure() {
        let doc = sample();
        let json = serde_json::to_string(&doc).unwrap();
        let back: FormDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}

//! Edit session: the single mutation entry point for a form document.
//!
//! Every [`Edit`] is validated before anything changes. A refused edit
//! returns an error and leaves the document exactly as it was; an accepted
//! edit is applied and the document is renumbered in the same call.

use chrono::Utc;

use crate::error::{FormError, Result};
use crate::form::{
    ConditionalRule, Field, FieldId, FieldKind, FieldOption, FormDocument, HeaderImage,
    LogicOperator, Page, DEFAULT_OPTION_COUNT,
};
use crate::import;
use crate::storage::FormStore;

/// A choice field must keep at least this many options.
pub const MIN_CHOICE_OPTIONS: usize = 1;

/// Partial update of a field's presentation attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPatch {
    pub label: Option<String>,
    pub required: Option<bool>,
    /// `Some(None)` clears the placeholder
    pub placeholder: Option<Option<String>>,
    /// `Some(None)` clears the help text
    pub help_text: Option<Option<String>>,
}

impl FieldPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn placeholder(mut self, placeholder: Option<String>) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn help_text(mut self, help_text: Option<String>) -> Self {
        self.help_text = Some(help_text);
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// One structural or attribute change to a document.
///
/// Pages are addressed by index, fields by id, options and rules by their
/// index within the field.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    SetTitle(String),
    SetDescription(Option<String>),
    SetActive(bool),

    AddPage {
        title: Option<String>,
    },
    DeletePage {
        page: usize,
    },
    MovePage {
        from: usize,
        to: usize,
    },
    SetPageTitle {
        page: usize,
        title: String,
    },
    SetPageDescription {
        page: usize,
        description: Option<String>,
    },
    SetHeaderImage {
        page: usize,
        image: Option<HeaderImage>,
    },

    AddField {
        page: usize,
        kind: FieldKind,
        label: String,
    },
    DeleteField {
        field: FieldId,
    },
    /// Reorder within one page
    MoveField {
        page: usize,
        from: usize,
        to: usize,
    },
    /// Move to the end of another page
    MoveFieldToPage {
        field: FieldId,
        page: usize,
    },
    DuplicateField {
        field: FieldId,
    },
    PatchField {
        field: FieldId,
        patch: FieldPatch,
    },
    SetFieldKind {
        field: FieldId,
        kind: FieldKind,
    },

    AddOption {
        field: FieldId,
    },
    RemoveOption {
        field: FieldId,
        option: usize,
    },
    SetOptionLabel {
        field: FieldId,
        option: usize,
        label: String,
    },
    SetOptionValue {
        field: FieldId,
        option: usize,
        value: String,
    },
    SetOptionScore {
        field: FieldId,
        option: usize,
        score: f64,
    },

    SetLogicEnabled {
        field: FieldId,
        enabled: bool,
    },
    SetLogicOperator {
        field: FieldId,
        operator: LogicOperator,
    },
    AddRule {
        field: FieldId,
        rule: ConditionalRule,
    },
    RemoveRule {
        field: FieldId,
        rule: usize,
    },

    /// Parse an import block and append its fields as a new page
    ImportPage {
        text: String,
        title: Option<String>,
    },
}

impl Edit {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetTitle(_) => "set_title",
            Self::SetDescription(_) => "set_description",
            Self::SetActive(_) => "set_active",
            Self::AddPage { .. } => "add_page",
            Self::DeletePage { .. } => "delete_page",
            Self::MovePage { .. } => "move_page",
            Self::SetPageTitle { .. } => "set_page_title",
            Self::SetPageDescription { .. } => "set_page_description",
            Self::SetHeaderImage { .. } => "set_header_image",
            Self::AddField { .. } => "add_field",
            Self::DeleteField { .. } => "delete_field",
            Self::MoveField { .. } => "move_field",
            Self::MoveFieldToPage { .. } => "move_field_to_page",
            Self::DuplicateField { .. } => "duplicate_field",
            Self::PatchField { .. } => "patch_field",
            Self::SetFieldKind { .. } => "set_field_kind",
            Self::AddOption { .. } => "add_option",
            Self::RemoveOption { .. } => "remove_option",
            Self::SetOptionLabel { .. } => "set_option_label",
            Self::SetOptionValue { .. } => "set_option_value",
            Self::SetOptionScore { .. } => "set_option_score",
            Self::SetLogicEnabled { .. } => "set_logic_enabled",
            Self::SetLogicOperator { .. } => "set_logic_operator",
            Self::AddRule { .. } => "add_rule",
            Self::RemoveRule { .. } => "remove_rule",
            Self::ImportPage { .. } => "import_page",
        }
    }
}

/// What an accepted edit produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    Updated,
    Page(usize),
    Field(FieldId),
    Option { field: FieldId, option: usize },
    Imported { page: usize, fields: usize, skipped: usize },
}

/// An editor's in-memory document plus its unsaved-changes flag.
#[derive(Debug, Clone)]
pub struct FormSession {
    document: FormDocument,
    dirty: bool,
}

impl FormSession {
    /// Start a session on a loaded document, normalizing its ordering.
    pub fn new(mut document: FormDocument) -> Self {
        document.normalize();
        Self {
            document,
            dirty: false,
        }
    }

    /// Start a session on a brand new document.
    pub fn create(title: impl Into<String>) -> Self {
        Self {
            document: FormDocument::new(title),
            dirty: true,
        }
    }

    pub fn document(&self) -> &FormDocument {
        &self.document
    }

    pub fn into_document(self) -> FormDocument {
        self.document
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Validate and apply one edit, then renumber pages and fields.
    pub fn apply(&mut self, edit: Edit) -> Result<Applied> {
        let name = edit.name();
        let applied = self.apply_inner(edit)?;
        self.document.renumber();
        self.dirty = true;
        tracing::debug!(form = %self.document.id, edit = name, "applied edit");
        Ok(applied)
    }

    /// Upsert the whole document. On failure the session is unchanged.
    pub fn save<S: FormStore + ?Sized>(&mut self, store: &mut S) -> Result<()> {
        let mut snapshot = self.document.clone();
        snapshot.updated_at = Utc::now();
        store.upsert_form(&snapshot)?;
        self.document = snapshot;
        self.dirty = false;
        Ok(())
    }

    fn page_index(&self, page: usize) -> Result<usize> {
        if page < self.document.pages.len() {
            Ok(page)
        } else {
            Err(FormError::NotFound(format!(
                "page {} (form has {} page(s))",
                page,
                self.document.pages.len()
            )))
        }
    }

    fn field_mut(&mut self, id: &FieldId) -> Result<&mut Field> {
        let location = self
            .document
            .locate_field(id)
            .ok_or_else(|| FormError::NotFound(format!("field {}", id)))?;
        Ok(&mut self.document.pages[location.page].fields[location.position])
    }

    fn choice_field_mut(&mut self, id: &FieldId) -> Result<&mut Field> {
        let field = self.field_mut(id)?;
        if !field.kind.is_choice() {
            return Err(FormError::Validation(format!(
                "{} fields have no options",
                field.kind
            )));
        }
        Ok(field)
    }

    fn option_mut(&mut self, id: &FieldId, option: usize) -> Result<&mut FieldOption> {
        let field = self.choice_field_mut(id)?;
        let count = field.options.len();
        field
            .options
            .get_mut(option)
            .ok_or_else(|| FormError::NotFound(format!("option {} (field has {})", option, count)))
    }

    fn apply_inner(&mut self, edit: Edit) -> Result<Applied> {
        match edit {
            Edit::SetTitle(title) => {
                require_text(&title, "form title")?;
                self.document.title = title;
                Ok(Applied::Updated)
            }
            Edit::SetDescription(description) => {
                self.document.description = description;
                Ok(Applied::Updated)
            }
            Edit::SetActive(active) => {
                self.document.active = active;
                Ok(Applied::Updated)
            }

            Edit::AddPage { title } => {
                let index = self.document.pages.len();
                let title = title.unwrap_or_else(|| format!("Page {}", index + 1));
                self.document.pages.push(Page::new(title));
                Ok(Applied::Page(index))
            }
            Edit::DeletePage { page } => {
                let page = self.page_index(page)?;
                if self.document.pages.len() <= 1 {
                    return Err(FormError::Validation(
                        "a form must keep at least one page".to_string(),
                    ));
                }
                self.document.pages.remove(page);
                Ok(Applied::Updated)
            }
            Edit::MovePage { from, to } => {
                let from = self.page_index(from)?;
                let to = self.page_index(to)?;
                let page = self.document.pages.remove(from);
                self.document.pages.insert(to, page);
                Ok(Applied::Page(to))
            }
            Edit::SetPageTitle { page, title } => {
                let page = self.page_index(page)?;
                require_text(&title, "page title")?;
                self.document.pages[page].title = title;
                Ok(Applied::Page(page))
            }
            Edit::SetPageDescription { page, description } => {
                let page = self.page_index(page)?;
                self.document.pages[page].description = description;
                Ok(Applied::Page(page))
            }
            Edit::SetHeaderImage { page, image } => {
                let page = self.page_index(page)?;
                if let Some(image) = &image {
                    require_text(&image.url, "header image url")?;
                }
                self.document.pages[page].header_image = image;
                Ok(Applied::Page(page))
            }

            Edit::AddField { page, kind, label } => {
                let page = self.page_index(page)?;
                let field = Field::new(kind, label);
                let id = field.id.clone();
                self.document.pages[page].fields.push(field);
                Ok(Applied::Field(id))
            }
            Edit::DeleteField { field } => {
                let location = self
                    .document
                    .locate_field(&field)
                    .ok_or_else(|| FormError::NotFound(format!("field {}", field)))?;
                self.document.pages[location.page]
                    .fields
                    .remove(location.position);
                Ok(Applied::Updated)
            }
            Edit::MoveField { page, from, to } => {
                let page = self.page_index(page)?;
                let fields = &mut self.document.pages[page].fields;
                if from >= fields.len() || to >= fields.len() {
                    return Err(FormError::NotFound(format!(
                        "field position {} or {} (page has {} field(s))",
                        from,
                        to,
                        fields.len()
                    )));
                }
                let field = fields.remove(from);
                let id = field.id.clone();
                fields.insert(to, field);
                Ok(Applied::Field(id))
            }
            Edit::MoveFieldToPage { field, page } => {
                let page = self.page_index(page)?;
                let location = self
                    .document
                    .locate_field(&field)
                    .ok_or_else(|| FormError::NotFound(format!("field {}", field)))?;
                let moved = self.document.pages[location.page]
                    .fields
                    .remove(location.position);
                self.document.pages[page].fields.push(moved);
                Ok(Applied::Field(field))
            }
            Edit::DuplicateField { field } => {
                let location = self
                    .document
                    .locate_field(&field)
                    .ok_or_else(|| FormError::NotFound(format!("field {}", field)))?;
                let fields = &mut self.document.pages[location.page].fields;
                let copy = fields[location.position].duplicate();
                let id = copy.id.clone();
                fields.insert(location.position + 1, copy);
                Ok(Applied::Field(id))
            }
            Edit::PatchField { field, patch } => {
                if let Some(label) = &patch.label {
                    require_text(label, "field label")?;
                }
                let target = self.field_mut(&field)?;
                if let Some(label) = patch.label {
                    target.label = label;
                }
                if let Some(required) = patch.required {
                    target.required = required;
                }
                if let Some(placeholder) = patch.placeholder {
                    target.placeholder = placeholder;
                }
                if let Some(help_text) = patch.help_text {
                    target.help_text = help_text;
                }
                Ok(Applied::Field(field))
            }
            Edit::SetFieldKind { field, kind } => {
                let target = self.field_mut(&field)?;
                target.kind = kind;
                if !kind.is_choice() {
                    target.options.clear();
                } else if target.options.is_empty() {
                    target.options = (1..=DEFAULT_OPTION_COUNT)
                        .map(FieldOption::numbered)
                        .collect();
                }
                Ok(Applied::Field(field))
            }

            Edit::AddOption { field } => {
                let target = self.choice_field_mut(&field)?;
                let index = target.options.len();
                target.options.push(FieldOption::numbered(index + 1));
                Ok(Applied::Option {
                    field,
                    option: index,
                })
            }
            Edit::RemoveOption { field, option } => {
                let target = self.choice_field_mut(&field)?;
                if option >= target.options.len() {
                    return Err(FormError::NotFound(format!(
                        "option {} (field has {})",
                        option,
                        target.options.len()
                    )));
                }
                if target.options.len() <= MIN_CHOICE_OPTIONS {
                    return Err(FormError::Validation(format!(
                        "a {} field needs at least {} option(s)",
                        target.kind, MIN_CHOICE_OPTIONS
                    )));
                }
                target.options.remove(option);
                Ok(Applied::Updated)
            }
            Edit::SetOptionLabel {
                field,
                option,
                label,
            } => {
                self.option_mut(&field, option)?.set_label(label);
                Ok(Applied::Option { field, option })
            }
            Edit::SetOptionValue {
                field,
                option,
                value,
            } => {
                require_text(&value, "option value")?;
                self.option_mut(&field, option)?.set_value(value);
                Ok(Applied::Option { field, option })
            }
            Edit::SetOptionScore {
                field,
                option,
                score,
            } => {
                if !score.is_finite() {
                    return Err(FormError::InvalidInput(format!(
                        "option score must be a finite number, got {}",
                        score
                    )));
                }
                self.option_mut(&field, option)?.score = score;
                Ok(Applied::Option { field, option })
            }

            Edit::SetLogicEnabled { field, enabled } => {
                self.field_mut(&field)?.conditional_logic.enabled = enabled;
                Ok(Applied::Field(field))
            }
            Edit::SetLogicOperator { field, operator } => {
                self.field_mut(&field)?.conditional_logic.operator = operator;
                Ok(Applied::Field(field))
            }
            Edit::AddRule { field, rule } => {
                let candidates = self.document.rule_source_candidates(&field);
                if !self.document.contains_field(&field) {
                    return Err(FormError::NotFound(format!("field {}", field)));
                }
                if !candidates.iter().any(|c| c.id == rule.source_field_id) {
                    return Err(FormError::Validation(format!(
                        "rule source {} must be a field placed before {}",
                        rule.source_field_id, field
                    )));
                }
                self.field_mut(&field)?.conditional_logic.rules.push(rule);
                Ok(Applied::Field(field))
            }
            Edit::RemoveRule { field, rule } => {
                let rules = &mut self.field_mut(&field)?.conditional_logic.rules;
                if rule >= rules.len() {
                    return Err(FormError::NotFound(format!(
                        "rule {} (field has {})",
                        rule,
                        rules.len()
                    )));
                }
                rules.remove(rule);
                Ok(Applied::Field(field))
            }

            Edit::ImportPage { text, title } => {
                let report = import::parse(&text)?;
                let index = self.document.pages.len();
                let fields = report.fields.len();
                let title = title.unwrap_or_else(|| "Imported page".to_string());
                self.document
                    .pages
                    .push(Page::new(title).with_fields(report.fields));
                Ok(Applied::Imported {
                    page: index,
                    fields,
                    skipped: report.skipped.len(),
                })
            }
        }
    }
}

fn require_text(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FormError::Validation(format!("{} cannot be empty", what)));
    }
    Ok(())
}

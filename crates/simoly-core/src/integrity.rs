//! Read-only drift detection on a form document.
//!
//! Structural edits never re-check rule direction, so a document can pick up
//! forward references or dangling rule sources over time. [`check`] reports
//! them together with ordering and option inconsistencies.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::form::{FieldId, FormDocument};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "issue")]
pub enum Issue {
    NoPages,
    UnknownRuleSource { field: FieldId, source: FieldId },
    SelfReference { field: FieldId },
    ForwardReference { field: FieldId, source: FieldId },
    DuplicateFieldId { field: FieldId },
    OptionsOnNonChoice { field: FieldId },
    ChoiceWithoutOptions { field: FieldId },
    PageOrder { page: usize },
    FieldOrder { page: usize },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPages => write!(f, "form has no pages"),
            Self::UnknownRuleSource { field, source } => {
                write!(f, "field {} has a rule on unknown field {}", field, source)
            }
            Self::SelfReference { field } => {
                write!(f, "field {} has a rule on itself", field)
            }
            Self::ForwardReference { field, source } => write!(
                f,
                "field {} has a rule on later field {}",
                field, source
            ),
            Self::DuplicateFieldId { field } => write!(f, "field id {} is used twice", field),
            Self::OptionsOnNonChoice { field } => {
                write!(f, "field {} has options but is not a choice field", field)
            }
            Self::ChoiceWithoutOptions { field } => {
                write!(f, "choice field {} has no options", field)
            }
            Self::PageOrder { page } => write!(f, "page {} is out of order", page),
            Self::FieldOrder { page } => {
                write!(f, "fields on page {} are not numbered 0..n", page)
            }
        }
    }
}

/// Collect every issue in document order.
pub fn check(document: &FormDocument) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    if document.pages.is_empty() {
        issues.push(Issue::NoPages);
    }

    for (index, page) in document.pages.iter().enumerate() {
        if page.order as usize != index {
            issues.push(Issue::PageOrder { page: index });
        }
        let contiguous = page
            .fields
            .iter()
            .enumerate()
            .all(|(position, field)| field.order as usize == position);
        if !contiguous {
            issues.push(Issue::FieldOrder { page: index });
        }

        for field in &page.fields {
            if !seen.insert(&field.id) {
                issues.push(Issue::DuplicateFieldId {
                    field: field.id.clone(),
                });
            }
            match (field.kind.is_choice(), field.options.is_empty()) {
                (false, false) => issues.push(Issue::OptionsOnNonChoice {
                    field: field.id.clone(),
                }),
                (true, true) => issues.push(Issue::ChoiceWithoutOptions {
                    field: field.id.clone(),
                }),
                _ => {}
            }

            for rule in &field.conditional_logic.rules {
                let source = &rule.source_field_id;
                let issue = if source == &field.id {
                    Issue::SelfReference {
                        field: field.id.clone(),
                    }
                } else if !document.contains_field(source) {
                    Issue::UnknownRuleSource {
                        field: field.id.clone(),
                        source: source.clone(),
                    }
                } else if !document.precedes(source, &field.id) {
                    Issue::ForwardReference {
                        field: field.id.clone(),
                        source: source.clone(),
                    }
                } else {
                    continue;
                };
                issues.push(issue);
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{ConditionalRule, Field, FieldKind, FieldOption, Page, RuleOperator};

    fn doc(fields: Vec<Field>) -> FormDocument {
        let mut doc = FormDocument::new("Check");
        doc.pages[0].fields = fields;
        doc.renumber();
        doc
    }

    #[test]
    fn test_clean_document_has_no_issues() {
        let name = Field::new(FieldKind::Text, "Name");
        let mut why = Field::new(FieldKind::Textarea, "Why");
        why.conditional_logic.rules.push(ConditionalRule::new(
            name.id.clone(),
            RuleOperator::Equals,
            "x",
        ));
        assert!(check(&doc(vec![name, why])).is_empty());
    }

    #[test]
    fn test_rule_reference_issues() {
        let mut first = Field::new(FieldKind::Text, "First");
        let second = Field::new(FieldKind::Text, "Second");
        first.conditional_logic.rules = vec![
            ConditionalRule::new(second.id.clone(), RuleOperator::Equals, "a"),
            ConditionalRule::new(first.id.clone(), RuleOperator::Equals, "b"),
            ConditionalRule::new(FieldId::from("field_gone"), RuleOperator::Equals, "c"),
        ];
        let first_id = first.id.clone();
        let second_id = second.id.clone();

        let issues = check(&doc(vec![first, second]));

        assert_eq!(
            issues,
            vec![
                Issue::ForwardReference {
                    field: first_id.clone(),
                    source: second_id,
                },
                Issue::SelfReference {
                    field: first_id.clone(),
                },
                Issue::UnknownRuleSource {
                    field: first_id,
                    source: FieldId::from("field_gone"),
                },
            ]
        );
    }

    #[test]
    fn test_option_and_order_issues() {
        let text = Field::new(FieldKind::Text, "Name").with_options(vec![FieldOption::numbered(1)]);
        let radio = Field::new(FieldKind::Radio, "Pick").with_options(Vec::new());
        let mut document = doc(vec![text.clone(), radio.clone()]);
        document.pages[0].fields[1].order = 5;
        document.pages.push(Page::new("Second"));

        let issues = check(&document);

        assert!(issues.contains(&Issue::OptionsOnNonChoice { field: text.id }));
        assert!(issues.contains(&Issue::ChoiceWithoutOptions { field: radio.id }));
        assert!(issues.contains(&Issue::FieldOrder { page: 0 }));
        assert!(issues.contains(&Issue::PageOrder { page: 1 }));
    }

    #[test]
    fn test_duplicate_ids_across_pages() {
        let field = Field::new(FieldKind::Text, "Name");
        let mut document = doc(vec![field.clone()]);
        document.pages.push(Page::new("Second").with_fields(vec![field.clone()]));
        document.renumber();

        assert_eq!(
            check(&document),
            vec![Issue::DuplicateFieldId { field: field.id }]
        );
    }

    #[test]
    fn test_pageless_document_is_flagged() {
        let mut document = doc(Vec::new());
        document.pages.clear();

        let issues = check(&document);

        assert_eq!(issues, vec![Issue::NoPages]);
        assert_eq!(issues[0].to_string(), "form has no pages");
    }
}

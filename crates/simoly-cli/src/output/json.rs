//! JSON output formatting for forms.

use serde_json::json;

use simoly_core::evaluate::{ScoreSummary, VisibilityReport};
use simoly_core::storage::FormSummary;
use simoly_core::{FormDocument, Issue};

/// Convert form summaries to a JSON array for output.
pub fn summaries_json(forms: &[FormSummary]) -> Vec<serde_json::Value> {
    forms
        .iter()
        .map(|form| {
            json!({
                "id": form.id,
                "title": form.title,
                "active": form.active,
                "pages": form.page_count,
                "fields": form.field_count,
                "created_at": form.created_at.to_rfc3339(),
                "updated_at": form.updated_at.to_rfc3339(),
            })
        })
        .collect()
}

/// Visibility and score for one set of answers.
pub fn evaluation_json(
    form: &FormDocument,
    report: &VisibilityReport,
    score: &ScoreSummary,
) -> serde_json::Value {
    let visible: Vec<_> = report
        .fields
        .iter()
        .filter(|entry| entry.visible)
        .map(|entry| entry.field_id.as_str())
        .collect();
    let hidden: Vec<_> = report.hidden().map(|id| id.as_str()).collect();
    json!({
        "form_id": form.id,
        "visible_fields": visible,
        "hidden_fields": hidden,
        "visible_pages": report.visible_pages.iter().map(|page| page + 1).collect::<Vec<_>>(),
        "score": { "total": score.total, "max": score.max },
    })
}

pub fn issues_json(form: &FormDocument, issues: &[Issue]) -> serde_json::Value {
    json!({
        "form_id": form.id,
        "ok": issues.is_empty(),
        "issues": issues
            .iter()
            .map(|issue| json!({ "kind": issue, "message": issue.to_string() }))
            .collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use simoly_core::{Answers, Evaluator, Field, FieldKind};

    #[test]
    fn test_evaluation_json_uses_page_numbers() {
        let mut form = FormDocument::new("Eval");
        form.pages[0].fields.push(Field::new(FieldKind::Text, "Name"));
        let answers = Answers::new();
        let evaluator = Evaluator::new(&form, &answers);

        let value = evaluation_json(&form, &evaluator.report(), &evaluator.score());

        assert_eq!(value["visible_pages"], json!([1]));
        assert_eq!(value["visible_fields"].as_array().map(Vec::len), Some(1));
        assert_eq!(value["hidden_fields"], json!([]));
    }
}

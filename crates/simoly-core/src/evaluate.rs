//! Conditional visibility and questionnaire scoring.
//!
//! Answers are JSON values keyed by field id, the shape a renderer collects
//! them in. Comparisons follow these rules:
//!
//! - `equals` / `not_equals` compare the answer's text form with the rule
//!   value, or compare numerically when both sides parse as numbers
//! - `contains` / `not_contains` test array membership for list answers and
//!   substring containment otherwise
//! - `greater` / `less` coerce both sides to numbers; a side that does not
//!   parse makes the comparison false
//! - a rule whose source field is not in the document is false
//! - a rule whose source field has no answer holds only for the negated
//!   operators

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::form::{
    ConditionalLogic, ConditionalRule, Field, FieldId, FormDocument, LogicOperator, RuleOperator,
};

/// Answers collected so far, keyed by field id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers(HashMap<FieldId, Value>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<FieldId>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<FieldId>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    /// Answer for a field; an explicit JSON `null` counts as unanswered.
    pub fn get(&self, field: &FieldId) -> Option<&Value> {
        self.0.get(field).filter(|value| !value.is_null())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Text form of an answer used by the comparisons.
pub fn answer_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(answer_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

fn as_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// Apply a rule operator to a present answer.
pub fn compare(operator: RuleOperator, answer: &Value, expected: &str) -> bool {
    match operator {
        RuleOperator::Equals => answers_equal(answer, expected),
        RuleOperator::NotEquals => !answers_equal(answer, expected),
        RuleOperator::Contains => answer_contains(answer, expected),
        RuleOperator::NotContains => !answer_contains(answer, expected),
        RuleOperator::Greater => numeric(answer, expected).is_some_and(|(a, b)| a > b),
        RuleOperator::Less => numeric(answer, expected).is_some_and(|(a, b)| a < b),
    }
}

fn answers_equal(answer: &Value, expected: &str) -> bool {
    let text = answer_text(answer);
    if text == expected {
        return true;
    }
    match (as_number(&text), as_number(expected)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn answer_contains(answer: &Value, expected: &str) -> bool {
    match answer {
        Value::Array(items) => items.iter().any(|item| answer_text(item) == expected),
        other => answer_text(other).contains(expected),
    }
}

fn numeric(answer: &Value, expected: &str) -> Option<(f64, f64)> {
    Some((as_number(&answer_text(answer))?, as_number(expected)?))
}

/// Visibility of one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldVisibility {
    pub field_id: FieldId,
    pub page: usize,
    pub visible: bool,
}

/// Visibility of a whole document under a set of answers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibilityReport {
    pub fields: Vec<FieldVisibility>,
    pub visible_pages: Vec<usize>,
}

impl VisibilityReport {
    pub fn is_visible(&self, field: &FieldId) -> bool {
        self.fields
            .iter()
            .any(|entry| &entry.field_id == field && entry.visible)
    }

    pub fn hidden(&self) -> impl Iterator<Item = &FieldId> {
        self.fields
            .iter()
            .filter(|entry| !entry.visible)
            .map(|entry| &entry.field_id)
    }
}

/// Questionnaire score over visible choice fields.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScoreSummary {
    pub total: f64,
    pub max: f64,
}

/// Evaluates visibility and scores of a document against answers.
pub struct Evaluator<'a> {
    document: &'a FormDocument,
    answers: &'a Answers,
}

impl<'a> Evaluator<'a> {
    pub fn new(document: &'a FormDocument, answers: &'a Answers) -> Self {
        Self { document, answers }
    }

    /// Evaluate one rule against the current answers.
    pub fn rule_holds(&self, rule: &ConditionalRule) -> bool {
        if !self.document.contains_field(&rule.source_field_id) {
            return false;
        }
        match self.answers.get(&rule.source_field_id) {
            Some(answer) => compare(rule.operator, answer, &rule.value),
            None => rule.operator.holds_without_answer(),
        }
    }

    /// Evaluate a logic block. Disabled or rule-less blocks always pass.
    pub fn logic_holds(&self, logic: &ConditionalLogic) -> bool {
        if !logic.enabled || logic.rules.is_empty() {
            return true;
        }
        match logic.operator {
            LogicOperator::And => logic.rules.iter().all(|rule| self.rule_holds(rule)),
            LogicOperator::Or => logic.rules.iter().any(|rule| self.rule_holds(rule)),
        }
    }

    pub fn is_field_visible(&self, field: &Field) -> bool {
        self.logic_holds(&field.conditional_logic)
    }

    /// A page is visible when it is empty or any of its fields is visible.
    pub fn is_page_visible(&self, index: usize) -> bool {
        match self.document.page(index) {
            Some(page) => {
                page.fields.is_empty() || page.fields.iter().any(|f| self.is_field_visible(f))
            }
            None => false,
        }
    }

    pub fn visible_fields(&self) -> Vec<&'a Field> {
        self.document
            .fields()
            .filter(|field| self.is_field_visible(field))
            .collect()
    }

    pub fn report(&self) -> VisibilityReport {
        let mut fields = Vec::with_capacity(self.document.field_count());
        for (page_index, page) in self.document.pages.iter().enumerate() {
            for field in &page.fields {
                fields.push(FieldVisibility {
                    field_id: field.id.clone(),
                    page: page_index,
                    visible: self.is_field_visible(field),
                });
            }
        }
        let visible_pages = (0..self.document.pages.len())
            .filter(|index| self.is_page_visible(*index))
            .collect();
        VisibilityReport {
            fields,
            visible_pages,
        }
    }

    /// Sum option scores of the selected answers across visible choice fields.
    pub fn score(&self) -> ScoreSummary {
        let mut summary = ScoreSummary::default();
        for field in self.visible_fields() {
            if !field.kind.is_choice() || field.options.is_empty() {
                continue;
            }
            summary.max += if field.kind.is_multi_answer() {
                field.options.iter().map(|o| o.score.max(0.0)).sum::<f64>()
            } else {
                field
                    .options
                    .iter()
                    .map(|o| o.score)
                    .fold(f64::NEG_INFINITY, f64::max)
            };
            summary.total += match self.answers.get(&field.id) {
                Some(Value::Array(items)) => items
                    .iter()
                    .filter_map(|item| field.option_score(&answer_text(item)))
                    .sum(),
                Some(answer) => field.option_score(&answer_text(answer)).unwrap_or(0.0),
                None => 0.0,
            };
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FieldKind, FieldOption, Page};
    use serde_json::json;

    struct Fixture {
        doc: FormDocument,
        plan: FieldId,
        age: FieldId,
        toppings: FieldId,
        follow_up: FieldId,
    }

    fn fixture() -> Fixture {
        let mut doc = FormDocument::new("Checkout");
        let plan = Field::new(FieldKind::Radio, "Plan").with_options(vec![
            FieldOption::from_label("Basic", 1.0),
            FieldOption::from_label("Pro", 5.0),
        ]);
        let age = Field::new(FieldKind::Number, "Age");
        let toppings = Field::new(FieldKind::Checkbox, "Toppings").with_options(vec![
            FieldOption::from_label("Cheese", 2.0),
            FieldOption::from_label("Ham", 3.0),
            FieldOption::from_label("Nothing", -1.0),
        ]);
        let follow_up = Field::new(FieldKind::Text, "Why pro?");
        let ids = (
            plan.id.clone(),
            age.id.clone(),
            toppings.id.clone(),
            follow_up.id.clone(),
        );
        doc.pages[0].fields = vec![plan, age, toppings];
        doc.pages.push(Page::new("Details").with_fields(vec![follow_up]));
        doc.renumber();
        Fixture {
            doc,
            plan: ids.0,
            age: ids.1,
            toppings: ids.2,
            follow_up: ids.3,
        }
    }

    fn rule(source: &FieldId, operator: RuleOperator, value: &str) -> ConditionalRule {
        ConditionalRule::new(source.clone(), operator, value)
    }

    fn logic(operator: LogicOperator, rules: Vec<ConditionalRule>) -> ConditionalLogic {
        ConditionalLogic {
            enabled: true,
            operator,
            rules,
        }
    }

    #[test]
    fn test_and_or_combinators() {
        let fx = fixture();
        let answers = Answers::new().with(fx.plan.clone(), "pro");
        let eval = Evaluator::new(&fx.doc, &answers);
        let yes = rule(&fx.plan, RuleOperator::Equals, "pro");
        let no = rule(&fx.plan, RuleOperator::Equals, "basic");

        assert!(!eval.logic_holds(&logic(LogicOperator::And, vec![yes.clone(), no.clone()])));
        assert!(eval.logic_holds(&logic(LogicOperator::Or, vec![yes, no])));
    }

    #[test]
    fn test_disabled_logic_is_always_visible() {
        let fx = fixture();
        let answers = Answers::new();
        let eval = Evaluator::new(&fx.doc, &answers);
        let mut block = logic(
            LogicOperator::And,
            vec![rule(&fx.plan, RuleOperator::Equals, "never")],
        );
        block.enabled = false;
        assert!(eval.logic_holds(&block));
    }

    #[test]
    fn test_enabled_without_rules_is_visible() {
        let fx = fixture();
        let answers = Answers::new();
        let eval = Evaluator::new(&fx.doc, &answers);
        assert!(eval.logic_holds(&logic(LogicOperator::Or, Vec::new())));
    }

    #[test]
    fn test_unknown_source_is_false_for_every_operator() {
        let fx = fixture();
        let ghost = FieldId::from("ghost");
        let answers = Answers::new().with(ghost.clone(), "x");
        let eval = Evaluator::new(&fx.doc, &answers);
        assert!(!eval.rule_holds(&rule(&ghost, RuleOperator::Equals, "x")));
        assert!(!eval.rule_holds(&rule(&ghost, RuleOperator::NotEquals, "y")));
        assert!(!eval.rule_holds(&rule(&ghost, RuleOperator::NotContains, "z")));
    }

    #[test]
    fn test_missing_answer_only_satisfies_negations() {
        let fx = fixture();
        let answers = Answers::new().with(fx.plan.clone(), Value::Null);
        let eval = Evaluator::new(&fx.doc, &answers);
        assert!(!eval.rule_holds(&rule(&fx.plan, RuleOperator::Equals, "")));
        assert!(eval.rule_holds(&rule(&fx.plan, RuleOperator::NotEquals, "pro")));
        assert!(eval.rule_holds(&rule(&fx.plan, RuleOperator::NotContains, "pro")));
        assert!(!eval.rule_holds(&rule(&fx.plan, RuleOperator::Less, "100")));
    }

    #[test]
    fn test_numeric_comparisons() {
        assert!(compare(RuleOperator::Greater, &json!(42), "18"));
        assert!(compare(RuleOperator::Less, &json!("7.5"), "10"));
        assert!(!compare(RuleOperator::Greater, &json!("abc"), "1"));
        assert!(!compare(RuleOperator::Less, &json!(3), "n/a"));
        assert!(compare(RuleOperator::Equals, &json!(5), "5.0"));
    }

    #[test]
    fn test_contains_uses_membership_for_lists() {
        assert!(compare(RuleOperator::Contains, &json!(["cheese", "ham"]), "ham"));
        assert!(!compare(RuleOperator::Contains, &json!(["cheese", "ham"]), "he"));
        assert!(compare(RuleOperator::Contains, &json!("hello world"), "lo w"));
        assert!(compare(RuleOperator::NotContains, &json!(["cheese"]), "ham"));
        assert!(compare(RuleOperator::Equals, &json!(true), "true"));
    }

    #[test]
    fn test_report_and_page_visibility() {
        let mut fx = fixture();
        fx.doc.pages[1].fields[0].conditional_logic = logic(
            LogicOperator::And,
            vec![rule(&fx.plan, RuleOperator::Equals, "pro")],
        );

        let basic = Answers::new().with(fx.plan.clone(), "basic");
        let report = Evaluator::new(&fx.doc, &basic).report();
        assert!(!report.is_visible(&fx.follow_up));
        assert!(report.is_visible(&fx.age));
        assert_eq!(report.visible_pages, vec![0]);
        assert_eq!(report.hidden().collect::<Vec<_>>(), vec![&fx.follow_up]);

        let pro = Answers::new().with(fx.plan.clone(), "pro");
        let report = Evaluator::new(&fx.doc, &pro).report();
        assert_eq!(report.visible_pages, vec![0, 1]);
    }

    #[test]
    fn test_score_sums_selected_options() {
        let fx = fixture();
        let answers = Answers::new()
            .with(fx.plan.clone(), "pro")
            .with(fx.toppings.clone(), json!(["cheese", "ham"]))
            .with(fx.age.clone(), 30);
        let score = Evaluator::new(&fx.doc, &answers).score();
        assert_eq!(score.total, 10.0);
        assert_eq!(score.max, 10.0);
    }

    #[test]
    fn test_answers_deserialize_from_object() {
        let answers: Answers = serde_json::from_str(r#"{"q1": "yes", "q2": [1, 2]}"#).unwrap();
        assert_eq!(answers.len(), 2);
        assert_eq!(answers.get(&FieldId::from("q1")), Some(&json!("yes")));
    }
}

//! Text and table output formatting for forms.

use simoly_core::storage::FormSummary;
use simoly_core::{Field, FormDocument};

use crate::ui::{
    blank_line, format_datetime, format_score, header, kv, print, short_field_id, short_id,
    simple_table, single_line, truncate, Column, UiContext,
};

const LIST_COLUMNS: [Column; 5] = [
    Column::new("ID"),
    Column::new("Title"),
    Column::new("Status"),
    Column::new("Fields"),
    Column::new("Updated"),
];

fn status(active: bool) -> &'static str {
    if active {
        "active"
    } else {
        "inactive"
    }
}

/// Print a list of forms as a table (pretty) or one line per form (plain).
pub fn print_form_list(ui: &UiContext, forms: &[FormSummary]) {
    let pretty = ui.mode.is_pretty();
    let rows: Vec<Vec<String>> = forms
        .iter()
        .map(|form| {
            let id = if pretty {
                short_id(&form.id)
            } else {
                form.id.to_string()
            };
            let title = if pretty {
                truncate(&single_line(&form.title), 40)
            } else {
                format!("{:?}", form.title)
            };
            vec![
                id,
                title,
                status(form.active).to_string(),
                form.field_count.to_string(),
                format_datetime(&form.updated_at, pretty),
            ]
        })
        .collect();

    print(ui, &simple_table(ui, &LIST_COLUMNS, &rows));
}

fn field_line(field: &Field, pretty: bool) -> String {
    let mut flags = Vec::new();
    if field.required {
        flags.push("required".to_string());
    }
    let logic = &field.conditional_logic;
    if logic.enabled {
        flags.push(format!(
            "shown when {} of {} rule(s)",
            if logic.operator == simoly_core::LogicOperator::And {
                "all"
            } else {
                "any"
            },
            logic.rules.len()
        ));
    }
    let id = if pretty {
        short_field_id(&field.id)
    } else {
        field.id.to_string()
    };
    let suffix = if flags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", flags.join(", "))
    };
    format!(
        "{}. {} ({}) {}{}",
        field.order + 1,
        single_line(&field.label),
        field.kind,
        id,
        suffix
    )
}

/// Print a form with its pages, fields, options and rules.
pub fn print_form_outline(ui: &UiContext, form: &FormDocument) {
    let pretty = ui.mode.is_pretty();
    print(ui, &header(ui, "form", Some(&form.title)));
    print(ui, &kv(ui, "ID", &form.id.to_string()));
    print(ui, &kv(ui, "Status", status(form.active)));
    if let Some(description) = &form.description {
        print(ui, &kv(ui, "Description", &single_line(description)));
    }
    print(ui, &kv(ui, "Pages", &form.pages.len().to_string()));
    print(ui, &kv(ui, "Fields", &form.field_count().to_string()));
    print(ui, &kv(ui, "Updated", &format_datetime(&form.updated_at, pretty)));

    for (index, page) in form.pages.iter().enumerate() {
        blank_line(ui);
        print(
            ui,
            &format!("Page {}: {}", index + 1, single_line(&page.title)),
        );
        if page.fields.is_empty() {
            print(ui, "  (no fields)");
        }
        for field in &page.fields {
            print(ui, &format!("  {}", field_line(field, pretty)));
            for (position, option) in field.options.iter().enumerate() {
                print(
                    ui,
                    &format!(
                        "      {}) {} = {} (score {})",
                        position + 1,
                        single_line(&option.label),
                        option.value,
                        format_score(option.score)
                    ),
                );
            }
            for (position, rule) in field.conditional_logic.rules.iter().enumerate() {
                let source = form
                    .field(&rule.source_field_id)
                    .map(|source| single_line(&source.label))
                    .unwrap_or_else(|| "<missing field>".to_string());
                print(
                    ui,
                    &format!(
                        "      rule {}: {} [{}] {} {:?}",
                        position + 1,
                        source,
                        rule.source_field_id,
                        rule.operator,
                        rule.value
                    ),
                );
            }
        }
    }
}

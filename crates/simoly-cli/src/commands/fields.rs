//! Field, option and rule edits.
//!
//! Every handler resolves field references against the freshly loaded
//! document, applies its edits through one session and saves once.

use simoly_core::{Applied, ConditionalRule, Edit, FieldId, FieldPatch};

use crate::app::{resolve_field, AppContext};
use crate::cli::{
    AddFieldArgs, AddOptionArgs, AddRuleArgs, EditFieldArgs, FieldRefArgs, LogicArgs, MoveFieldArgs,
    OptionRefArgs, RemoveRuleArgs, SetOptionArgs,
};
use crate::commands::print_receipt;
use crate::errors::CliError;
use crate::helpers::{parse_field_kind, parse_logic_operator, parse_position, parse_rule_operator};

fn created_field(applied: Applied) -> anyhow::Result<FieldId> {
    match applied {
        Applied::Field(id) => Ok(id),
        _ => Err(anyhow::anyhow!("Edit did not produce a field")),
    }
}

pub fn handle_add_field(ctx: &AppContext, args: &AddFieldArgs) -> anyhow::Result<()> {
    let kind = parse_field_kind(&args.kind)?;
    let page = args
        .page
        .map(|number| parse_position(number, "Page"))
        .transpose()?;

    let (form, id) = ctx.edit_form(&args.target.form, |session| {
        let page = page.unwrap_or_else(|| session.document().pages.len().saturating_sub(1));
        let id = created_field(session.apply(Edit::AddField {
            page,
            kind,
            label: args.label.clone(),
        })?)?;

        let mut patch = FieldPatch::new();
        if args.required {
            patch = patch.required(true);
        }
        if args.placeholder.is_some() {
            patch = patch.placeholder(args.placeholder.clone());
        }
        if args.help_text.is_some() {
            patch = patch.help_text(args.help_text.clone());
        }
        if !patch.is_empty() {
            session.apply(Edit::PatchField {
                field: id.clone(),
                patch,
            })?;
        }
        Ok(id)
    })?;

    let location = form.locate_field(&id);
    let options = form.field(&id).map(|f| f.options.len()).unwrap_or(0);
    print_receipt(
        ctx,
        "Added field",
        &[
            ("field", id.to_string()),
            ("type", kind.to_string()),
            (
                "page",
                location.map(|l| l.page + 1).unwrap_or_default().to_string(),
            ),
            ("options", options.to_string()),
        ],
    );
    Ok(())
}

pub fn handle_edit_field(ctx: &AppContext, args: &EditFieldArgs) -> anyhow::Result<()> {
    let kind = args.kind.as_deref().map(parse_field_kind).transpose()?;

    let (form, id) = ctx.edit_form(&args.target.form, |session| {
        let id = resolve_field(session.document(), &args.field)?;
        if let Some(kind) = kind {
            session.apply(Edit::SetFieldKind {
                field: id.clone(),
                kind,
            })?;
        }

        let mut patch = FieldPatch::new();
        if let Some(label) = &args.label {
            patch = patch.label(label.trim());
        }
        if args.required || args.optional {
            patch = patch.required(args.required);
        }
        if let Some(placeholder) = &args.placeholder {
            patch = patch.placeholder(Some(placeholder.clone()).filter(|p| !p.is_empty()));
        }
        if let Some(help_text) = &args.help_text {
            patch = patch.help_text(Some(help_text.clone()).filter(|h| !h.is_empty()));
        }
        if !patch.is_empty() {
            session.apply(Edit::PatchField {
                field: id.clone(),
                patch,
            })?;
        }
        Ok(id)
    })?;

    let field = form.field(&id).ok_or_else(|| {
        CliError::not_found(
            format!("Field '{}' not found", id),
            format!("Run `simoly form show {}` to see field IDs.", form.id),
        )
    })?;
    print_receipt(
        ctx,
        "Edited field",
        &[
            ("field", id.to_string()),
            ("type", field.kind.to_string()),
            ("label", field.label.clone()),
            ("required", field.required.to_string()),
            ("options", field.options.len().to_string()),
        ],
    );
    Ok(())
}

pub fn handle_delete_field(ctx: &AppContext, args: &FieldRefArgs) -> anyhow::Result<()> {
    let (form, id) = ctx.edit_form(&args.target.form, |session| {
        let id = resolve_field(session.document(), &args.field)?;
        session.apply(Edit::DeleteField { field: id.clone() })?;
        Ok(id)
    })?;

    print_receipt(
        ctx,
        "Deleted field",
        &[
            ("field", id.to_string()),
            ("fields", form.field_count().to_string()),
        ],
    );
    Ok(())
}

pub fn handle_move_field(ctx: &AppContext, args: &MoveFieldArgs) -> anyhow::Result<()> {
    let to = args.to.map(|n| parse_position(n, "Position")).transpose()?;
    let page = args.page.map(|n| parse_position(n, "Page")).transpose()?;

    let (form, id) = ctx.edit_form(&args.target.form, |session| {
        let id = resolve_field(session.document(), &args.field)?;
        if let Some(page) = page {
            session.apply(Edit::MoveFieldToPage {
                field: id.clone(),
                page,
            })?;
        }
        if let Some(to) = to {
            let location = session
                .document()
                .locate_field(&id)
                .ok_or_else(|| anyhow::anyhow!("Field {} disappeared during the move", id))?;
            session.apply(Edit::MoveField {
                page: location.page,
                from: location.position,
                to,
            })?;
        }
        Ok(id)
    })?;

    let location = form.locate_field(&id);
    print_receipt(
        ctx,
        "Moved field",
        &[
            ("field", id.to_string()),
            (
                "page",
                location.map(|l| l.page + 1).unwrap_or_default().to_string(),
            ),
            (
                "position",
                location.map(|l| l.position + 1).unwrap_or_default().to_string(),
            ),
        ],
    );
    Ok(())
}

pub fn handle_duplicate_field(ctx: &AppContext, args: &FieldRefArgs) -> anyhow::Result<()> {
    let (_form, (source, copy)) = ctx.edit_form(&args.target.form, |session| {
        let source = resolve_field(session.document(), &args.field)?;
        let copy = created_field(session.apply(Edit::DuplicateField {
            field: source.clone(),
        })?)?;
        Ok((source, copy))
    })?;

    print_receipt(
        ctx,
        "Duplicated field",
        &[("source", source.to_string()), ("field", copy.to_string())],
    );
    Ok(())
}

pub fn handle_add_option(ctx: &AppContext, args: &AddOptionArgs) -> anyhow::Result<()> {
    let (form, (id, option)) = ctx.edit_form(&args.target.form, |session| {
        let id = resolve_field(session.document(), &args.field)?;
        let option = match session.apply(Edit::AddOption { field: id.clone() })? {
            Applied::Option { option, .. } => option,
            _ => return Err(anyhow::anyhow!("Edit did not produce an option")),
        };
        if let Some(label) = &args.label {
            session.apply(Edit::SetOptionLabel {
                field: id.clone(),
                option,
                label: label.clone(),
            })?;
        }
        if let Some(score) = args.score {
            session.apply(Edit::SetOptionScore {
                field: id.clone(),
                option,
                score,
            })?;
        }
        Ok((id, option))
    })?;

    let added = form.field(&id).and_then(|f| f.options.get(option));
    print_receipt(
        ctx,
        "Added option",
        &[
            ("field", id.to_string()),
            ("option", (option + 1).to_string()),
            ("label", added.map(|o| o.label.clone()).unwrap_or_default()),
            ("value", added.map(|o| o.value.clone()).unwrap_or_default()),
        ],
    );
    Ok(())
}

pub fn handle_remove_option(ctx: &AppContext, args: &OptionRefArgs) -> anyhow::Result<()> {
    let option = parse_position(args.option, "Option")?;
    let (form, id) = ctx.edit_form(&args.target.form, |session| {
        let id = resolve_field(session.document(), &args.field)?;
        session.apply(Edit::RemoveOption {
            field: id.clone(),
            option,
        })?;
        Ok(id)
    })?;

    let remaining = form.field(&id).map(|f| f.options.len()).unwrap_or(0);
    print_receipt(
        ctx,
        "Removed option",
        &[("field", id.to_string()), ("options", remaining.to_string())],
    );
    Ok(())
}

pub fn handle_set_option(ctx: &AppContext, args: &SetOptionArgs) -> anyhow::Result<()> {
    let target = &args.option;
    let option = parse_position(target.option, "Option")?;

    let (form, id) = ctx.edit_form(&target.target.form, |session| {
        let id = resolve_field(session.document(), &target.field)?;
        // Label before value: an explicit value must not be overwritten by the label sync.
        if let Some(label) = &args.label {
            session.apply(Edit::SetOptionLabel {
                field: id.clone(),
                option,
                label: label.clone(),
            })?;
        }
        if let Some(value) = &args.value {
            session.apply(Edit::SetOptionValue {
                field: id.clone(),
                option,
                value: value.clone(),
            })?;
        }
        if let Some(score) = args.score {
            session.apply(Edit::SetOptionScore {
                field: id.clone(),
                option,
                score,
            })?;
        }
        Ok(id)
    })?;

    let updated = form.field(&id).and_then(|f| f.options.get(option));
    print_receipt(
        ctx,
        "Updated option",
        &[
            ("field", id.to_string()),
            ("option", target.option.to_string()),
            ("label", updated.map(|o| o.label.clone()).unwrap_or_default()),
            ("value", updated.map(|o| o.value.clone()).unwrap_or_default()),
            (
                "score",
                updated.map(|o| o.score.to_string()).unwrap_or_default(),
            ),
        ],
    );
    Ok(())
}

pub fn handle_add_rule(ctx: &AppContext, args: &AddRuleArgs) -> anyhow::Result<()> {
    let operator = parse_rule_operator(&args.operator)?;

    let (form, id) = ctx.edit_form(&args.target.form, |session| {
        let id = resolve_field(session.document(), &args.field)?;
        let source = resolve_field(session.document(), &args.source)?;
        session.apply(Edit::AddRule {
            field: id.clone(),
            rule: ConditionalRule::new(source, operator, args.value.clone()),
        })?;
        if !args.no_enable {
            session.apply(Edit::SetLogicEnabled {
                field: id.clone(),
                enabled: true,
            })?;
        }
        Ok(id)
    })?;

    let logic = form.field(&id).map(|f| &f.conditional_logic);
    print_receipt(
        ctx,
        "Added rule",
        &[
            ("field", id.to_string()),
            (
                "rules",
                logic.map(|l| l.rules.len()).unwrap_or_default().to_string(),
            ),
            (
                "logic",
                logic.map(|l| l.enabled).unwrap_or_default().to_string(),
            ),
        ],
    );
    Ok(())
}

pub fn handle_remove_rule(ctx: &AppContext, args: &RemoveRuleArgs) -> anyhow::Result<()> {
    let rule = parse_position(args.rule, "Rule")?;
    let (form, id) = ctx.edit_form(&args.target.form, |session| {
        let id = resolve_field(session.document(), &args.field)?;
        session.apply(Edit::RemoveRule {
            field: id.clone(),
            rule,
        })?;
        Ok(id)
    })?;

    let remaining = form
        .field(&id)
        .map(|f| f.conditional_logic.rules.len())
        .unwrap_or_default();
    print_receipt(
        ctx,
        "Removed rule",
        &[("field", id.to_string()), ("rules", remaining.to_string())],
    );
    Ok(())
}

pub fn handle_logic(ctx: &AppContext, args: &LogicArgs) -> anyhow::Result<()> {
    if !args.enable && !args.disable && args.operator.is_none() {
        return Err(CliError::invalid_input_with_hint(
            "Nothing to change",
            "Pass --enable, --disable or --operator <and|or>.",
        )
        .into());
    }
    let operator = args
        .operator
        .as_deref()
        .map(parse_logic_operator)
        .transpose()?;

    let (form, id) = ctx.edit_form(&args.target.form, |session| {
        let id = resolve_field(session.document(), &args.field)?;
        if let Some(operator) = operator {
            session.apply(Edit::SetLogicOperator {
                field: id.clone(),
                operator,
            })?;
        }
        if args.enable || args.disable {
            session.apply(Edit::SetLogicEnabled {
                field: id.clone(),
                enabled: args.enable,
            })?;
        }
        Ok(id)
    })?;

    let logic = form.field(&id).map(|f| &f.conditional_logic);
    print_receipt(
        ctx,
        "Updated logic",
        &[
            ("field", id.to_string()),
            (
                "enabled",
                logic.map(|l| l.enabled).unwrap_or_default().to_string(),
            ),
            (
                "operator",
                logic.map(|l| l.operator.to_string()).unwrap_or_default(),
            ),
        ],
    );
    Ok(())
}

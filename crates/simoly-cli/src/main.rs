//! Simoly CLI - build, import and evaluate questionnaire forms
//!
//! Command-line front end over `simoly-core`: form editing, bulk import,
//! conditional visibility checks and embed shortcodes.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::{CommandFactory, Parser};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::app::AppContext;
use crate::cli::{Cli, Commands, FormSubcommand, ShortcodeSubcommand};
use crate::commands::{fields, forms, init, maintenance, misc, pages, shortcode};
use crate::constants::DEFAULT_LOG_FILTER;
use crate::errors::{exit_code_for, hint_for};
use crate::ui::print_error;

fn main() {
    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);

    init_tracing(&ctx);

    if let Err(e) = run(&ctx, &cli) {
        let ui_ctx = ctx.ui_context(false);
        let hint = hint_for(&e);
        print_error(&ui_ctx, &format!("{:#}", e), hint.as_deref());
        std::process::exit(exit_code_for(&e));
    }
}

/// Log to stderr. `RUST_LOG` wins over the config file's `log.filter`.
fn init_tracing(ctx: &AppContext) {
    let configured = ctx
        .config()
        .ok()
        .flatten()
        .and_then(|config| config.log.filter.clone());

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured.as_deref().unwrap_or(DEFAULT_LOG_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => {
            init::handle_init(ctx, args)?;
        }
        Some(Commands::Check(args)) => {
            maintenance::handle_check(ctx, args)?;
        }
        Some(Commands::Completions(args)) => {
            misc::handle_completions(args)?;
        }
        Some(Commands::Shortcode(args)) => match &args.command {
            ShortcodeSubcommand::Report(report_args) => {
                shortcode::handle_report(report_args)?;
            }
        },
        Some(Commands::Form(args)) => match &args.command {
            FormSubcommand::Create(a) => forms::handle_create(ctx, a)?,
            FormSubcommand::List(a) => forms::handle_list(ctx, a)?,
            FormSubcommand::Show(a) => forms::handle_show(ctx, a)?,
            FormSubcommand::Delete(a) => forms::handle_delete(ctx, a)?,
            FormSubcommand::Activate(a) => forms::handle_set_active(ctx, a, true)?,
            FormSubcommand::Deactivate(a) => forms::handle_set_active(ctx, a, false)?,
            FormSubcommand::Import(a) => forms::handle_import(ctx, a)?,
            FormSubcommand::Export(a) => forms::handle_export(ctx, a)?,
            FormSubcommand::Evaluate(a) => forms::handle_evaluate(ctx, a)?,
            FormSubcommand::Check(a) => forms::handle_check(ctx, a)?,
            FormSubcommand::Shortcode(a) => forms::handle_shortcode(ctx, a)?,
            FormSubcommand::AddPage(a) => pages::handle_add_page(ctx, a)?,
            FormSubcommand::EditPage(a) => pages::handle_edit_page(ctx, a)?,
            FormSubcommand::DeletePage(a) => pages::handle_delete_page(ctx, a)?,
            FormSubcommand::MovePage(a) => pages::handle_move_page(ctx, a)?,
            FormSubcommand::AddField(a) => fields::handle_add_field(ctx, a)?,
            FormSubcommand::EditField(a) => fields::handle_edit_field(ctx, a)?,
            FormSubcommand::DeleteField(a) => fields::handle_delete_field(ctx, a)?,
            FormSubcommand::MoveField(a) => fields::handle_move_field(ctx, a)?,
            FormSubcommand::DuplicateField(a) => fields::handle_duplicate_field(ctx, a)?,
            FormSubcommand::AddOption(a) => fields::handle_add_option(ctx, a)?,
            FormSubcommand::RemoveOption(a) => fields::handle_remove_option(ctx, a)?,
            FormSubcommand::SetOption(a) => fields::handle_set_option(ctx, a)?,
            FormSubcommand::AddRule(a) => fields::handle_add_rule(ctx, a)?,
            FormSubcommand::RemoveRule(a) => fields::handle_remove_rule(ctx, a)?,
            FormSubcommand::Logic(a) => fields::handle_logic(ctx, a)?,
        },
        None => {
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}

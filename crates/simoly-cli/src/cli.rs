use clap::{ArgGroup, Args, Parser, Subcommand};
use clap_complete::Shell;

use simoly_core::VERSION;

/// Simoly - build, import and evaluate questionnaire forms
#[derive(Parser)]
#[command(name = "simoly")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the form store
    #[arg(short, long, global = true, env = "SIMOLY_STORE")]
    pub store: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the store will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `check` command
#[derive(Args)]
pub struct CheckArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

/// Form reference shared by every `form` subcommand
#[derive(Args)]
pub struct FormRef {
    /// Form ID (full UUID or unique prefix)
    #[arg(value_name = "FORM")]
    pub form: String,
}

#[derive(Args)]
pub struct FormCreateArgs {
    /// Form title
    #[arg(value_name = "TITLE")]
    pub title: String,

    /// Form description
    #[arg(long)]
    pub description: Option<String>,

    /// Create the form inactive
    #[arg(long)]
    pub inactive: bool,
}

#[derive(Args)]
#[command(group(ArgGroup::new("state").args(["active", "inactive"])))]
pub struct FormListArgs {
    /// Only active forms
    #[arg(long)]
    pub active: bool,

    /// Only inactive forms
    #[arg(long)]
    pub inactive: bool,

    /// Case-insensitive title filter
    #[arg(long)]
    pub title: Option<String>,

    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct FormShowArgs {
    #[command(flatten)]
    pub target: FormRef,

    /// Output the full document as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct FormDeleteArgs {
    #[command(flatten)]
    pub target: FormRef,

    /// Skip confirmation
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args)]
pub struct FormImportArgs {
    #[command(flatten)]
    pub target: FormRef,

    /// Import file (`-` for stdin)
    #[arg(long, value_name = "PATH", default_value = "-")]
    pub file: String,

    /// Title of the new page
    #[arg(long)]
    pub title: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct FormExportArgs {
    #[command(flatten)]
    pub target: FormRef,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,
}

#[derive(Args)]
pub struct FormEvaluateArgs {
    #[command(flatten)]
    pub target: FormRef,

    /// Answer as FIELD=VALUE (VALUE may be JSON, e.g. '["a","b"]')
    #[arg(short, long, value_name = "FIELD=VALUE")]
    pub answer: Vec<String>,

    /// JSON object of answers keyed by field id
    #[arg(long, value_name = "PATH")]
    pub answers_file: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct FormCheckArgs {
    #[command(flatten)]
    pub target: FormRef,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct FormShortcodeArgs {
    #[command(flatten)]
    pub target: FormRef,

    /// Render the page shortcode for this page number instead
    #[arg(long, value_name = "PAGE")]
    pub page: Option<usize>,
}

#[derive(Args)]
pub struct FormSetActiveArgs {
    #[command(flatten)]
    pub target: FormRef,
}

#[derive(Args)]
pub struct AddPageArgs {
    #[command(flatten)]
    pub target: FormRef,

    /// Page title (defaults to "Page N")
    #[arg(long)]
    pub title: Option<String>,

    /// Page description
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args)]
#[command(group(ArgGroup::new("change").required(true).multiple(true).args(["title", "description", "clear_description", "image", "no_image"])))]
pub struct EditPageArgs {
    #[command(flatten)]
    pub target: FormRef,

    /// Page number (1-based)
    #[arg(value_name = "PAGE")]
    pub page: usize,

    /// New page title
    #[arg(long)]
    pub title: Option<String>,

    /// New page description
    #[arg(long, conflicts_with = "clear_description")]
    pub description: Option<String>,

    /// Remove the page description
    #[arg(long)]
    pub clear_description: bool,

    /// Header image URL
    #[arg(long, value_name = "URL", conflicts_with = "no_image")]
    pub image: Option<String>,

    /// Header image placement: top, bottom, left or right
    #[arg(long, value_name = "POSITION", requires = "image")]
    pub image_position: Option<String>,

    /// Remove the header image
    #[arg(long)]
    pub no_image: bool,
}

#[derive(Args)]
pub struct DeletePageArgs {
    #[command(flatten)]
    pub target: FormRef,

    /// Page number (1-based)
    #[arg(value_name = "PAGE")]
    pub page: usize,
}

#[derive(Args)]
pub struct MovePageArgs {
    #[command(flatten)]
    pub target: FormRef,

    /// Current page number (1-based)
    #[arg(value_name = "FROM")]
    pub from: usize,

    /// New page number (1-based)
    #[arg(value_name = "TO")]
    pub to: usize,
}

#[derive(Args)]
pub struct AddFieldArgs {
    #[command(flatten)]
    pub target: FormRef,

    /// Field type (e.g. text, radio, multi-select)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub kind: String,

    /// Question label
    #[arg(short, long)]
    pub label: String,

    /// Page number (1-based, defaults to the last page)
    #[arg(long)]
    pub page: Option<usize>,

    /// Mark the field required
    #[arg(long)]
    pub required: bool,

    /// Placeholder text
    #[arg(long)]
    pub placeholder: Option<String>,

    /// Help text shown under the question
    #[arg(long = "help-text")]
    pub help_text: Option<String>,
}

#[derive(Args)]
#[command(group(ArgGroup::new("change").required(true).multiple(true).args(["label", "kind", "required", "optional", "placeholder", "help_text"])))]
pub struct EditFieldArgs {
    #[command(flatten)]
    pub target: FormRef,

    /// Field ID (or unique prefix)
    #[arg(value_name = "FIELD")]
    pub field: String,

    /// New question label
    #[arg(short, long)]
    pub label: Option<String>,

    /// New field type; switching to a non-choice type drops the options
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub kind: Option<String>,

    /// Mark the field required
    #[arg(long, conflicts_with = "optional")]
    pub required: bool,

    /// Mark the field optional
    #[arg(long)]
    pub optional: bool,

    /// Placeholder text (empty string clears it)
    #[arg(long)]
    pub placeholder: Option<String>,

    /// Help text (empty string clears it)
    #[arg(long = "help-text")]
    pub help_text: Option<String>,
}

#[derive(Args)]
pub struct FieldRefArgs {
    #[command(flatten)]
    pub target: FormRef,

    /// Field ID (or unique prefix)
    #[arg(value_name = "FIELD")]
    pub field: String,
}

#[derive(Args)]
#[command(group(ArgGroup::new("destination").required(true).args(["to", "page"])))]
pub struct MoveFieldArgs {
    #[command(flatten)]
    pub target: FormRef,

    /// Field ID (or unique prefix)
    #[arg(value_name = "FIELD")]
    pub field: String,

    /// New position within its page (1-based)
    #[arg(long)]
    pub to: Option<usize>,

    /// Move to the end of this page (1-based)
    #[arg(long)]
    pub page: Option<usize>,
}

#[derive(Args)]
pub struct AddOptionArgs {
    #[command(flatten)]
    pub target: FormRef,

    /// Field ID (or unique prefix)
    #[arg(value_name = "FIELD")]
    pub field: String,

    /// Option label (defaults to "Option N")
    #[arg(long)]
    pub label: Option<String>,

    /// Option score
    #[arg(long)]
    pub score: Option<f64>,
}

#[derive(Args)]
pub struct OptionRefArgs {
    #[command(flatten)]
    pub target: FormRef,

    /// Field ID (or unique prefix)
    #[arg(value_name = "FIELD")]
    pub field: String,

    /// Option number (1-based)
    #[arg(value_name = "OPTION")]
    pub option: usize,
}

#[derive(Args)]
#[command(group(ArgGroup::new("change").required(true).multiple(true).args(["label", "value", "score"])))]
pub struct SetOptionArgs {
    #[command(flatten)]
    pub option: OptionRefArgs,

    /// New label (the value follows while it was never set by hand)
    #[arg(long)]
    pub label: Option<String>,

    /// Explicit value
    #[arg(long)]
    pub value: Option<String>,

    /// Score contribution
    #[arg(long)]
    pub score: Option<f64>,
}

#[derive(Args)]
pub struct AddRuleArgs {
    #[command(flatten)]
    pub target: FormRef,

    /// Field whose visibility the rule controls
    #[arg(value_name = "FIELD")]
    pub field: String,

    /// Earlier field the rule reads
    #[arg(long, value_name = "FIELD")]
    pub source: String,

    /// equals, not_equals, contains, not_contains, greater, less
    #[arg(long, value_name = "OPERATOR")]
    pub operator: String,

    /// Value compared against the answer
    #[arg(long)]
    pub value: String,

    /// Leave conditional logic disabled
    #[arg(long)]
    pub no_enable: bool,
}

#[derive(Args)]
pub struct RemoveRuleArgs {
    #[command(flatten)]
    pub target: FormRef,

    /// Field ID (or unique prefix)
    #[arg(value_name = "FIELD")]
    pub field: String,

    /// Rule number (1-based)
    #[arg(value_name = "RULE")]
    pub rule: usize,
}

#[derive(Args)]
#[command(group(ArgGroup::new("toggle").args(["enable", "disable"])))]
pub struct LogicArgs {
    #[command(flatten)]
    pub target: FormRef,

    /// Field ID (or unique prefix)
    #[arg(value_name = "FIELD")]
    pub field: String,

    /// Enable conditional logic
    #[arg(long)]
    pub enable: bool,

    /// Disable conditional logic
    #[arg(long)]
    pub disable: bool,

    /// Combine rules with `and` or `or`
    #[arg(long, value_name = "OPERATOR")]
    pub operator: Option<String>,
}

#[derive(Args)]
pub struct FormArgs {
    #[command(subcommand)]
    pub command: FormSubcommand,
}

#[derive(Subcommand)]
pub enum FormSubcommand {
    /// Create a new form with one empty page
    Create(FormCreateArgs),

    /// List forms (most recently updated first)
    List(FormListArgs),

    /// Show a form outline
    Show(FormShowArgs),

    /// Delete a form
    Delete(FormDeleteArgs),

    /// Mark a form active
    Activate(FormSetActiveArgs),

    /// Mark a form inactive
    Deactivate(FormSetActiveArgs),

    /// Bulk-import questions as a new page
    Import(FormImportArgs),

    /// Export the form document as JSON
    Export(FormExportArgs),

    /// Evaluate visibility and score for a set of answers
    Evaluate(FormEvaluateArgs),

    /// Report rule references and ordering problems
    Check(FormCheckArgs),

    /// Print the embed shortcode
    Shortcode(FormShortcodeArgs),

    /// Append a page
    AddPage(AddPageArgs),

    /// Retitle a page or change its description and header image
    EditPage(EditPageArgs),

    /// Delete a page and its fields
    DeletePage(DeletePageArgs),

    /// Move a page
    MovePage(MovePageArgs),

    /// Add a field to a page
    AddField(AddFieldArgs),

    /// Change a field's label, type, required flag or texts
    EditField(EditFieldArgs),

    /// Delete a field
    DeleteField(FieldRefArgs),

    /// Reorder a field or move it to another page
    MoveField(MoveFieldArgs),

    /// Duplicate a field below itself
    DuplicateField(FieldRefArgs),

    /// Append an option to a choice field
    AddOption(AddOptionArgs),

    /// Remove an option from a choice field
    RemoveOption(OptionRefArgs),

    /// Change an option's label, value or score
    SetOption(SetOptionArgs),

    /// Add a visibility rule to a field
    AddRule(AddRuleArgs),

    /// Remove a visibility rule
    RemoveRule(RemoveRuleArgs),

    /// Toggle conditional logic or change how rules combine
    Logic(LogicArgs),
}

#[derive(Args)]
pub struct ShortcodeArgs {
    #[command(subcommand)]
    pub command: ShortcodeSubcommand,
}

#[derive(Subcommand)]
pub enum ShortcodeSubcommand {
    /// Print an AI report shortcode
    Report(ReportShortcodeArgs),
}

#[derive(Args)]
pub struct ReportShortcodeArgs {
    /// Questionnaire (form) ID, full UUID
    #[arg(long, value_name = "FORM")]
    pub questionnaire: String,

    /// Prompt identifier
    #[arg(long)]
    pub prompt: String,

    /// AI provider name
    #[arg(long)]
    pub provider: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new form store
    Init(InitArgs),

    /// Check store integrity
    Check(CheckArgs),

    /// Manage forms
    #[command(alias = "forms")]
    Form(FormArgs),

    /// Render shortcodes that are not tied to a stored form
    Shortcode(ShortcodeArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_rule() {
        let cli = Cli::parse_from([
            "simoly", "form", "add-rule", "3f2a", "field_b", "--source", "field_a", "--operator",
            "equals", "--value", "yes",
        ]);
        match cli.command {
            Some(Commands::Form(FormArgs {
                command: FormSubcommand::AddRule(args),
            })) => {
                assert_eq!(args.target.form, "3f2a");
                assert_eq!(args.source, "field_a");
                assert!(!args.no_enable);
            }
            _ => panic!("expected form add-rule"),
        }
    }

    #[test]
    fn test_edit_commands_need_a_change() {
        assert!(Cli::try_parse_from(["simoly", "form", "edit-page", "3f2a", "1"]).is_err());
        assert!(Cli::try_parse_from(["simoly", "form", "edit-field", "3f2a", "f"]).is_err());
        assert!(Cli::try_parse_from([
            "simoly", "form", "edit-page", "3f2a", "1", "--image-position", "left"
        ])
        .is_err());
        assert!(Cli::try_parse_from([
            "simoly", "form", "edit-field", "3f2a", "f", "--required", "--optional"
        ])
        .is_err());
        assert!(Cli::try_parse_from([
            "simoly", "form", "edit-field", "3f2a", "f", "--type", "select"
        ])
        .is_ok());
    }

    #[test]
    fn test_move_field_needs_destination() {
        let result = Cli::try_parse_from(["simoly", "form", "move-field", "3f2a", "field_a"]);
        assert!(result.is_err());
    }
}

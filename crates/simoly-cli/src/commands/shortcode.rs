use uuid::Uuid;

use simoly_core::Shortcode;

use crate::cli::ReportShortcodeArgs;
use crate::errors::CliError;

pub fn handle_report(args: &ReportShortcodeArgs) -> anyhow::Result<()> {
    let questionnaire = Uuid::parse_str(args.questionnaire.trim()).map_err(|_| {
        CliError::invalid_input_with_hint(
            format!("Invalid questionnaire id: {}", args.questionnaire),
            "Pass the full form UUID shown by `simoly form list --json`.",
        )
    })?;

    let shortcode = Shortcode::ai_report(questionnaire, args.prompt.trim(), args.provider.trim())?;
    println!("{}", shortcode);
    Ok(())
}

//! Input handling helpers for import text and confirmations.

use std::io::{self, IsTerminal, Read};
use std::path::Path;

use dialoguer::Confirm;

use crate::errors::CliError;

/// Read text from a file, or from stdin when `source` is `-`.
pub fn read_text_source(source: &str) -> anyhow::Result<String> {
    let text = if source == "-" {
        if io::stdin().is_terminal() {
            return Err(CliError::invalid_input_with_hint(
                "No input provided on stdin",
                "Pipe the import text in or pass --file <PATH>.",
            )
            .into());
        }
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        buffer
    } else {
        let path = Path::new(source);
        if !path.exists() {
            return Err(CliError::not_found(
                format!("File not found: {}", path.display()),
                "Check the path passed to --file.",
            )
            .into());
        }
        std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?
    };

    if text.trim().is_empty() {
        return Err(CliError::invalid_input("Input is empty").into());
    }
    Ok(text)
}

/// Ask for confirmation, refusing when no terminal is attached.
pub fn confirm(prompt: &str, interactive: bool) -> anyhow::Result<bool> {
    if !interactive {
        return Err(CliError::invalid_input_with_hint(
            "Confirmation required but no TTY is available",
            "Pass --force to skip the prompt.",
        )
        .into());
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))
}

use std::path::PathBuf;

use simoly_core::storage::{FormStore, SqliteFormStore};

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_store_path, write_config, SimolyConfig};
use crate::errors::CliError;
use crate::ui::{blank_line, hint, print};

use super::print_receipt;

/// Create the store file and, unless one already exists, the config pointing at it.
pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let store_path = match args
        .path
        .as_deref()
        .or(ctx.cli().store.as_deref())
        .filter(|p| !p.trim().is_empty())
    {
        Some(path) => PathBuf::from(path),
        None => default_store_path()?,
    };

    if store_path.exists() {
        return Err(CliError::invalid_input_with_hint(
            format!("A file already exists at {}", store_path.display()),
            "Pick another path or remove the existing file first.",
        )
        .into());
    }

    if let Some(parent) = store_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!("Failed to create directory {}: {}", parent.display(), e)
        })?;
    }

    SqliteFormStore::create(&store_path)?;
    tracing::info!(path = %store_path.display(), "initialized form store");

    let config_path = resolve_config_path()?;
    let config_written = args.force || !config_path.exists();
    if config_written {
        write_config(&config_path, &SimolyConfig::new(&store_path))?;
    }

    print_receipt(
        ctx,
        "Form store created",
        &[
            ("store", store_path.display().to_string()),
            ("config", config_path.display().to_string()),
            (
                "config_status",
                if config_written { "written" } else { "unchanged" }.to_string(),
            ),
        ],
    );

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        if ui_ctx.mode.is_pretty() {
            blank_line(&ui_ctx);
            print(&ui_ctx, &hint(&ui_ctx, "simoly form create \"My questionnaire\""));
        }
    }
    Ok(())
}

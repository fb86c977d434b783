//! Application context for the Simoly CLI.
//!
//! Bundles CLI arguments with the lazily-loaded config file.

use std::path::PathBuf;

use once_cell::unsync::OnceCell;

use simoly_core::storage::{FormStore, SqliteFormStore};
use simoly_core::{FormDocument, FormError, FormSession};

use crate::cli::Cli;
use crate::config::{read_config, SimolyConfig};
use crate::errors::CliError;
use crate::ui::UiContext;

use super::resolver::{missing_store_message, resolve_config_path, resolve_form, resolve_store_path};

/// Application context that bundles CLI args with configuration.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<SimolyConfig>>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the config file, loading it lazily. `None` when no file exists.
    pub fn config(&self) -> anyhow::Result<Option<&SimolyConfig>> {
        let config = self.config.get_or_try_init(|| {
            let path = resolve_config_path()?;
            if !path.exists() {
                return Ok::<_, anyhow::Error>(None);
            }
            read_config(&path).map(Some)
        })?;
        Ok(config.as_ref())
    }

    /// UI context for this invocation.
    pub fn ui_context(&self, json: bool) -> UiContext {
        let config_color = self
            .config()
            .ok()
            .flatten()
            .map(SimolyConfig::color_enabled)
            .unwrap_or(true);
        UiContext::from_env(json, !self.cli.no_color && config_color)
    }

    pub fn store_path(&self) -> anyhow::Result<PathBuf> {
        resolve_store_path(self.cli, self.config()?)
    }

    /// Open the configured store.
    pub fn open_store(&self) -> anyhow::Result<SqliteFormStore> {
        let path = self.store_path()?;
        match SqliteFormStore::open(&path) {
            Ok(store) => Ok(store),
            Err(FormError::StoreNotFound) => Err(CliError::not_found(
                missing_store_message(&path),
                "Run `simoly init` or pass --store <PATH>.",
            )
            .into()),
            Err(err) => Err(err.into()),
        }
    }

    /// Open the store and load one form.
    pub fn load_form(&self, reference: &str) -> anyhow::Result<(SqliteFormStore, FormDocument)> {
        let store = self.open_store()?;
        let form = resolve_form(&store, reference)?;
        Ok((store, form))
    }

    /// Load a form, run `edit` against a session on it, and save.
    ///
    /// Nothing is written when `edit` fails.
    pub fn edit_form<T, F>(&self, reference: &str, edit: F) -> anyhow::Result<(FormDocument, T)>
    where
        F: FnOnce(&mut FormSession) -> anyhow::Result<T>,
    {
        let (mut store, form) = self.load_form(reference)?;
        let mut session = FormSession::new(form);
        let outcome = edit(&mut session)?;
        session.save(&mut store)?;
        tracing::debug!(form = %session.document().id, "form saved");
        Ok((session.into_document(), outcome))
    }
}

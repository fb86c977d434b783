use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct SimolyConfig {
    pub store: StoreSection,
    #[serde(default)]
    pub ui: UiSection,
    #[serde(default)]
    pub log: LogSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreSection {
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct UiSection {
    /// `false` disables colored output
    pub color: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct LogSection {
    /// Tracing filter directive, e.g. `simoly=debug`
    pub filter: Option<String>,
}

impl SimolyConfig {
    pub fn new(store_path: &Path) -> Self {
        Self {
            store: StoreSection {
                path: store_path.to_string_lossy().to_string(),
            },
            ui: UiSection::default(),
            log: LogSection::default(),
        }
    }

    pub fn color_enabled(&self) -> bool {
        self.ui.color.unwrap_or(true)
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_store_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("forms.db"))
}

pub fn read_config(path: &Path) -> anyhow::Result<SimolyConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &SimolyConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    simoly_core::fs::write_atomic(path, contents.as_bytes())
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("simoly"));
        }
    }
    Ok(home_dir()?.join(".config").join("simoly"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("simoly"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("simoly"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trip_with_defaults() {
        let config: SimolyConfig = toml::from_str("[store]\npath = \"/tmp/forms.db\"\n").unwrap();
        assert_eq!(config.store.path, "/tmp/forms.db");
        assert!(config.color_enabled());
        assert!(config.log.filter.is_none());

        let written = toml::to_string_pretty(&SimolyConfig::new(Path::new("/x/forms.db"))).unwrap();
        assert!(written.contains("path = \"/x/forms.db\""));
    }

    #[test]
    fn test_config_sections() {
        let config: SimolyConfig = toml::from_str(
            "[store]\npath = \"a.db\"\n\n[ui]\ncolor = false\n\n[log]\nfilter = \"simoly=debug\"\n",
        )
        .unwrap();
        assert!(!config.color_enabled());
        assert_eq!(config.log.filter.as_deref(), Some("simoly=debug"));
    }
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;

/// Root configuration structure, deserialized from `.tribute/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// What to scan and what to leave out.
    #[serde(default)]
    pub scan: ScanConfig,
    /// License rules applied to discovered libraries.
    #[serde(default)]
    pub policy: PolicyConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScanConfig {
    /// Exclusion globs, relative to the project root.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Libraries omitted from every command.
    #[serde(default)]
    pub skip: Vec<String>,
    /// Package cache scanned when a `Package.resolved` is found.
    pub spm_cache: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct PolicyConfig {
    /// Libraries exported even though their license is unrecognized.
    #[serde(default)]
    pub allow: Vec<String>,
    /// License families rejected by `check-unsupported`.
    #[serde(default = "default_unsupported")]
    pub unsupported: Vec<String>,
}

fn default_unsupported() -> Vec<String> {
    vec!["AGPL".to_string(), "LGPL".to_string(), "GPL".to_string()]
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            allow: Vec::new(),
            unsupported: default_unsupported(),
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.tribute/config.toml`
/// 3. `~/.config/tribute/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".tribute").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("tribute").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    debug!("no config file found, using defaults");
    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    debug!("loading config from {}", path.display());
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Unable to read config file at {}.", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Invalid config file at {}.", path.display()))
}

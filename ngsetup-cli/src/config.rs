//! Configuration file loading for ngsetup.
//!
//! Discovers and loads `ngsetup.toml` from the workspace root, then merges it
//! with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "ngsetup.toml";

/// Top-level configuration from ngsetup.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NgsetupConfig {
    /// Tool toggles.
    pub tools: ToolsConfig,

    /// Version pins for tooling packages, e.g. `lefthook = "^1.13.4"`.
    pub versions: BTreeMap<String, String>,
}

/// Tools section of the config. Everything defaults to enabled.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub eslint: bool,
    pub prettier: bool,
    pub lefthook: bool,
    pub vitest: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            eslint: true,
            prettier: true,
            lefthook: true,
            vitest: true,
        }
    }
}

/// Discover the ngsetup.toml config file in the workspace root.
pub fn discover_config(root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {config_path}");
        Some(config_path)
    } else {
        debug!("no config file at {config_path}");
        None
    }
}

/// Load and parse a ngsetup.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<NgsetupConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {path}"))?;
    parse_config(&contents).with_context(|| format!("parse config file {path}"))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<NgsetupConfig> {
    let config: NgsetupConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from the workspace root, or return defaults if not found.
pub fn load_or_default(root: &Utf8Path) -> anyhow::Result<NgsetupConfig> {
    match discover_config(root) {
        Some(path) => load_config(&path),
        None => Ok(NgsetupConfig::default()),
    }
}

//! Configuration loader with layered resolution
//!
//! Loads configuration from multiple locations with layered priority:
//! 1. Built-in defaults (lowest priority)
//! 2. `~/.config/deployer/config.toml`
//! 3. `<project>/deploy.toml`
//! 4. `--config <path>`
//! 5. `DEPLOYER_*` environment variables (highest priority)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use super::model::Config;

/// Application name used for XDG directories
const APP_NAME: &str = "deployer";

/// Per-project configuration file name
pub const PROJECT_CONFIG_FILE: &str = "deploy.toml";

/// Get config search paths in priority order (lowest to highest)
pub fn config_paths(project_dir: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join(APP_NAME).join("config.toml"));
    }

    paths.push(project_dir.join(PROJECT_CONFIG_FILE));

    paths
}

/// Load configuration for a project directory
///
/// Later layers override earlier ones. Environment variables use the
/// `DEPLOYER_` prefix with `__` separating sections, e.g.
/// `DEPLOYER_NPM__BUILD_DIR=out` sets `npm.build_dir`.
///
/// # Arguments
/// * `project_dir` - Project whose `deploy.toml` should be layered in
/// * `override_path` - Optional config file that takes priority over files
pub fn load_config(project_dir: &Path, override_path: Option<&str>) -> Result<Config> {
    let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

    for path in config_paths(project_dir) {
        if path.exists() {
            tracing::debug!("Loading config from: {}", path.display());
            figment = figment.merge(Toml::file(&path));
        }
    }

    if let Some(path) = override_path {
        let path = PathBuf::from(path);
        if path.exists() {
            tracing::debug!("Loading override config from: {}", path.display());
            figment = figment.merge(Toml::file(&path));
        } else {
            tracing::warn!("Config file not found, using defaults: {}", path.display());
        }
    }

    figment = figment.merge(Env::prefixed("DEPLOYER_").split("__"));

    figment.extract().context("Failed to load configuration")
}

/// Write configuration as pretty TOML, creating parent directories
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let contents = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

//! Named TOML configuration files.
//!
//! Configs live in `<config dir>/pktmeter/<name>.toml`. Any path that
//! contains a separator or ends in `.toml` is used as-is instead. The binary
//! picks up `<config dir>/pktmeter/config.toml` when no config is named.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MeterError, Result};
use crate::settings::stats::StatsOptions;

/// File name of the config loaded when none is given explicitly.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Configuration file structure for storing stats settings
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    /// Sampling and output settings
    #[serde(default)]
    stats: StatsOptions,
}

/// Parses a config file's contents.
pub fn parse_config(content: &str) -> Result<StatsOptions> {
    let config: ConfigFile = toml::from_str(content)?;
    Ok(config.stats)
}

/// Loads a config by name or path.
pub fn load_config(name: &str) -> Result<StatsOptions> {
    let path = resolve_config_path(name)?;
    let content = fs::read_to_string(&path)?;
    let options = parse_config(&content)?;

    info!("Loaded configuration from {}", path.display());
    Ok(options)
}

/// Loads the config at `path`, or `None` if there is no such file.
pub fn load_config_if_exists(path: &Path) -> Result<Option<StatsOptions>> {
    if !path.is_file() {
        debug!("No configuration at {}", path.display());
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let options = parse_config(&content)?;

    info!("Loaded configuration from {}", path.display());
    Ok(Some(options))
}

/// Saves `options` by name or path, returning where it was written.
pub fn save_config(name: &str, options: &StatsOptions) -> Result<PathBuf> {
    let path = resolve_config_path(name)?;
    let config = ConfigFile {
        stats: options.clone(),
    };

    let content = toml::to_string_pretty(&config)?;
    fs::write(&path, content)?;

    info!("Saved configuration to {}", path.display());
    Ok(path)
}

/// Lists the names of all configs in `dir`.
pub fn list_configs(dir: &Path) -> Result<Vec<String>> {
    let mut configs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
            if let Some(name) = path.file_stem().and_then(|name| name.to_str()) {
                configs.push(name.to_string());
            }
        }
    }

    configs.sort();
    Ok(configs)
}

/// Gets the path to the configs directory, creating it if needed.
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| {
        MeterError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine config directory",
        ))
    })?;

    let dir = base.join("pktmeter");
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

/// Path of the default config, `<config dir>/pktmeter/config.toml`.
pub fn default_config_path() -> Result<PathBuf> {
    Ok(default_config_in(&config_dir()?))
}

fn default_config_in(dir: &Path) -> PathBuf {
    dir.join(DEFAULT_CONFIG_FILE)
}

fn resolve_config_path(name: &str) -> Result<PathBuf> {
    let as_path = Path::new(name);
    if as_path.components().count() > 1 || as_path.extension().is_some_and(|ext| ext == "toml") {
        return Ok(as_path.to_path_buf());
    }

    Ok(config_dir()?.join(format!("{}.toml", name)))
}

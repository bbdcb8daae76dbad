//! Application settings: where to find the game settings and where to log.
//!
//! Resolution order is built-in defaults, then
//! `<config dir>/drawnumber/config.toml`, then `DRAWNUMBER_*` environment
//! variables.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::info;

/// Directory under the user's config dir holding the application settings.
pub const CONFIG_DIR: &str = "drawnumber";
const CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "DRAWNUMBER";

const DEFAULT_CONFIG: &str = r#"# drawnumber application settings
# Every entry can also be set through DRAWNUMBER_<NAME>, e.g. DRAWNUMBER_SEED=7.

# Game settings file with `min`, `max` and `attempts` lines.
settings_path = "config.yml"

# Plain-text log of every result and error.
log_path = "logger.txt"

# Also echo results and errors to stdout.
mirror_stdout = false

# Fixed seed for the secret number generator.
# seed = 42
"#;

/// Resolved application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Game settings file read at startup.
    pub settings_path: PathBuf,
    /// Destination of the plain-text event log.
    pub log_path: PathBuf,
    /// Attach an extra stream view writing to stdout.
    pub mirror_stdout: bool,
    /// Seed for reproducible secrets; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl AppConfig {
    /// Load from the default file location and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load from `path` (optional) and the environment.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .set_default("settings_path", "config.yml")?
            .set_default("log_path", "logger.txt")?
            .set_default("mirror_stdout", false)?
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .with_context(|| format!("failed to read {}", path.display()))?;
        settings
            .try_deserialize()
            .context("failed to parse application settings")
    }
}

/// Location of the application settings file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

/// Write a commented default settings file on first run.
pub fn ensure_default_config() -> Result<()> {
    write_default_config(config_path())
}

fn write_default_config(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "Wrote default application settings");
    Ok(())
}

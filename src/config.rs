//! Application configuration
//!
//! All tunables are carried in an explicitly constructed [`Config`] value
//! that is handed to the repository and aggregator; nothing reads ambient
//! global state.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::types::{Result, ScreenlogError};

/// Daily hours above which a day is flagged as an alert.
pub const DEFAULT_THRESHOLD_HOURS: f64 = 6.0;

const DB_FILE: &str = "screenlog.sqlite";
const CONFIG_FILE: &str = "config.json";

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    pub threshold_hours: f64,
}

/// On-disk config file shape; every field optional so a partial file works.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    db_path: Option<PathBuf>,
    #[serde(default)]
    threshold_hours: Option<f64>,
}

impl Config {
    /// Resolve configuration: CLI overrides beat the config file, which
    /// beats platform defaults.
    pub fn load(db_override: Option<PathBuf>, threshold_override: Option<f64>) -> Result<Self> {
        let file = match config_file_path() {
            Some(path) if path.exists() => read_config_file(&path)?,
            _ => ConfigFile::default(),
        };

        let config = Self {
            db_path: db_override
                .or(file.db_path)
                .unwrap_or_else(default_db_path),
            threshold_hours: threshold_override
                .or(file.threshold_hours)
                .unwrap_or(DEFAULT_THRESHOLD_HOURS),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(self.threshold_hours > 0.0) {
            return Err(ScreenlogError::Config(format!(
                "threshold_hours must be positive, got {}",
                self.threshold_hours
            )));
        }
        Ok(())
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw)
        .map_err(|e| ScreenlogError::Config(format!("invalid {}: {e}", path.display())))
}

fn default_db_path() -> PathBuf {
    ProjectDirs::from("", "", "screenlog")
        .map(|dirs| dirs.data_dir().join(DB_FILE))
        .unwrap_or_else(|| PathBuf::from(DB_FILE))
}

fn config_file_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "screenlog").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

//! Application configuration.
//!
//! Defaults cover the standard sample dataset; an optional `ledgerlens.json`
//! in the working directory overrides any subset of the fields. A missing or
//! malformed file falls back to the defaults rather than failing the run.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "ledgerlens.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Input table analysed when no `--file` override is given.
    pub input_path: PathBuf,
    /// Directory the report files are written into (overwritten each run).
    pub output_dir: PathBuf,
    /// Minimum count of non-missing, non-zero numeric values a column needs
    /// to qualify for Benford auto-selection.
    pub min_numeric_count: usize,
    /// How many columns the readable summary lists in its missing-values
    /// section.
    pub top_missing: usize,
    /// Fraction of a string column's non-missing values that must parse as
    /// dates before the column is reported as a date column.
    pub date_ratio_threshold: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("data/je_samples.csv"),
            output_dir: PathBuf::from("outputs"),
            min_numeric_count: 10,
            top_missing: 10,
            date_ratio_threshold: 0.8,
        }
    }
}

/// Load the application config from the working directory, falling back to
/// defaults when the file is absent.
pub fn load_app_config() -> AppConfig {
    load_config_from(Path::new(CONFIG_FILE))
}

pub fn load_config_from(path: &Path) -> AppConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring malformed config {}: {e}", path.display());
                AppConfig::default()
            }
        },
        Err(_) => AppConfig::default(),
    }
}

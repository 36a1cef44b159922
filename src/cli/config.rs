//! Configuration file for blobcheck
//!
//! JSON object; every field is optional:
//!
//! ```json
//! {
//!   "backend": "file",
//!   "data_dir": "./blobcheck-data",
//!   "table": "users",
//!   "log_level": "info",
//!   "max_blob_bytes": null
//! }
//! ```
//!
//! Command-line flags override file values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::backend::BackendKind;
use crate::observability::Severity;

use super::args::StorageArgs;
use super::errors::{CliError, CliResult};

/// Config file read when `--config` is not given, if it exists
pub const DEFAULT_CONFIG_PATH: &str = "./blobcheck.json";

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Backend to verify against (default "file")
    #[serde(default)]
    pub backend: BackendKind,

    /// Data directory for the file backend
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Table name; records live under `<data_dir>/<table>/`
    #[serde(default = "default_table")]
    pub table: String,

    /// Minimum log severity (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Cap on stored binary values, simulating a column size limit
    #[serde(default)]
    pub max_blob_bytes: Option<usize>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./blobcheck-data")
}
fn default_table() -> String {
    "users".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            data_dir: default_data_dir(),
            table: default_table(),
            log_level: default_log_level(),
            max_blob_bytes: None,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Build the effective configuration for a command.
    ///
    /// An explicit `--config` path must exist. Without one, the default path
    /// is read if present, otherwise built-in defaults are used.
    pub fn resolve(args: &StorageArgs) -> CliResult<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::load(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_overrides(args);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&mut self, args: &StorageArgs) {
        if let Some(backend) = args.backend {
            self.backend = backend;
        }
        if let Some(dir) = &args.data_dir {
            self.data_dir = dir.clone();
        }
        if let Some(table) = &args.table {
            self.table = table.clone();
        }
        if let Some(level) = &args.log_level {
            self.log_level = level.clone();
        }
        if args.max_blob_bytes.is_some() {
            self.max_blob_bytes = args.max_blob_bytes;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.table.is_empty() {
            return Err(CliError::config_error("table must not be empty"));
        }

        if self.table.contains(['/', '\\']) || self.table == "." || self.table == ".." {
            return Err(CliError::config_error(format!(
                "Invalid table name: '{}'. Table names cannot contain path separators.",
                self.table
            )));
        }

        self.severity()?;

        if self.max_blob_bytes == Some(0) {
            return Err(CliError::config_error("max_blob_bytes must be > 0"));
        }

        Ok(())
    }

    /// Parsed log level
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level.parse().map_err(CliError::config_error)
    }
}

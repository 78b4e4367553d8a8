//! Configuration loading
//!
//! Sources, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. `support-desk.yaml` in the working directory, or the file given with
//!    `--config`
//! 3. Environment variables such as `SUPPORT_DESK__STORAGE__BACKEND=sqlite`

use crate::error::Result;
use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "SUPPORT_DESK";
const DEFAULT_FILE_STEM: &str = "support-desk";

/// Which store adapter to open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Root directory for the file store, or the directory holding the
    /// SQLite database
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
}

/// Identity recorded on status changes and comments made from the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub id: String,
    pub name: String,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportDeskConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub agent: AgentConfig,
}

impl Default for SupportDeskConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                backend: StorageBackend::File,
                path: default_data_dir(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            agent: AgentConfig {
                id: "system".to_string(),
                name: "Support Agent".to_string(),
            },
        }
    }
}

impl SupportDeskConfig {
    /// Load configuration from defaults, file and environment
    ///
    /// An explicit `path` must exist; the default `support-desk.yaml` is
    /// optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();

        let mut builder = Config::builder()
            .set_default("storage.backend", "file")?
            .set_default(
                "storage.path",
                defaults.storage.path.to_string_lossy().into_owned(),
            )?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("agent.id", defaults.agent.id)?
            .set_default("agent.name", defaults.agent.name)?;

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_FILE_STEM).required(false)),
        };

        let config: Self = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        tracing::debug!(
            backend = ?config.storage.backend,
            path = %config.storage.path.display(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Path of the SQLite database file
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage.path.join("tickets.db")
    }
}

/// Platform data directory, falling back to `.support-desk` in the working
/// directory
#[must_use]
pub fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", DEFAULT_FILE_STEM).map_or_else(
        || PathBuf::from(".support-desk"),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

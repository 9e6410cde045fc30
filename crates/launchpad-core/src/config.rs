//! Configuration and data directory management.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Key the group list is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "launchpad.groups";

/// Paths to all Launchpad data locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// JSON key-value state file (`data/state.json`).
    pub state_file: PathBuf,
    /// SQLite database directory (`data/db/`).
    pub db_dir: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            state_file: root.join("state.json"),
            db_dir: root.join("db"),
            root,
        };
        paths.ensure_dirs()?;
        Ok(paths)
    }

    fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::create_dir_all(&self.db_dir)?;
        Ok(())
    }
}

/// Which persistence implementation backs the group list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Json,
    Sqlite,
}

impl FromStr for StorageBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "json" => Ok(Self::Json),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(Error::Config(format!(
                "unknown storage backend \"{other}\" (expected json or sqlite)"
            ))),
        }
    }
}

/// Top-level Launchpad configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchpadConfig {
    /// Data directory paths.
    pub data_paths: DataPaths,
    /// Persistence implementation.
    pub backend: StorageBackend,
    /// Key the group list lives under.
    pub storage_key: String,
}

impl LaunchpadConfig {
    /// Create configuration from environment and defaults.
    ///
    /// Reads `LAUNCHPAD_BACKEND` and `LAUNCHPAD_STORAGE_KEY`.
    pub fn from_env(data_dir: impl AsRef<Path>) -> Result<Self> {
        Self::from_vars(data_dir, |name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable lookup.
    pub fn from_vars<F>(data_dir: impl AsRef<Path>, var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match var("LAUNCHPAD_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::default(),
        };

        let storage_key = var("LAUNCHPAD_STORAGE_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());

        let data_paths = DataPaths::new(data_dir)?;

        Ok(Self {
            data_paths,
            backend,
            storage_key,
        })
    }
}

//! Launchpad Core — error types and configuration shared by every crate.

pub mod config;
pub mod error;

pub use config::{DataPaths, LaunchpadConfig, StorageBackend, DEFAULT_STORAGE_KEY};
pub use error::{Error, Result};

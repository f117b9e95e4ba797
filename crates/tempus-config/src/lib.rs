//! Tempus Configuration System
//!
//! Provides configuration management for hosts embedding the Tempus planning
//! engine:
//! - Project configuration (tempus.toml)
//! - Global user configuration (~/.tempus/config.toml)
//! - Environment overrides (TEMPUS_*)
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded and merged in the following order (later overrides
//! earlier):
//! 1. Global config (~/.tempus/config.toml)
//! 2. Project config (./tempus.toml)
//! 3. Environment variables (TEMPUS_*)
//!
//! # Example
//!
//! ```no_run
//! use tempus_config::EngineConfig;
//! use std::path::Path;
//!
//! let config = EngineConfig::load_from_directory(Path::new(".")).unwrap();
//! ```

pub mod engine;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Home directory not found")]
    HomeNotFound,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

// Re-export main types
pub use engine::{EngineConfig, EngineSection};

//! Engine artifact resolution
//!
//! Locates the planning engine's shared library on disk, handling
//! platform-specific naming conventions and search paths. Resolution is
//! driven by an explicit [`Locator`] value (usually built from a
//! `tempus_config::EngineConfig`) rather than ambient process state, so two
//! different engine artifacts can be bound side by side.

use std::path::PathBuf;
use tempus_config::EngineConfig;
use thiserror::Error;

/// File stem of the engine artifact (`libtemporal_planner.so` on Linux)
pub const ARTIFACT_STEM: &str = "temporal_planner";

/// Artifact loading and symbol binding errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BindingError {
    /// Artifact file not found in the search paths
    #[error("engine artifact '{name}' not found in search paths")]
    ArtifactNotFound { name: String },

    /// The artifact exists but could not be loaded (wrong architecture,
    /// incompatible ABI, unreadable file)
    #[error("failed to load engine artifact '{artifact}': {reason}")]
    LoadFailed { artifact: PathBuf, reason: String },

    /// A required entry point is missing from the artifact's exports
    #[error("symbol '{symbol}' not found in engine artifact '{artifact}'")]
    MissingSymbol {
        artifact: PathBuf,
        symbol: &'static str,
    },
}

/// Engine artifact locator
///
/// Holds an optional explicit artifact path plus an ordered list of search
/// directories. The default search order mirrors where a development build
/// of the engine lands: the current directory, then `target/release`, then
/// `target/debug`.
#[derive(Debug, Clone, PartialEq)]
pub struct Locator {
    artifact: Option<PathBuf>,
    search_paths: Vec<PathBuf>,
}

impl Locator {
    /// Create a locator with the default search paths
    pub fn new() -> Self {
        Self {
            artifact: None,
            search_paths: Self::default_search_paths(),
        }
    }

    /// Create a locator for an explicit artifact path
    ///
    /// The path is used verbatim and must exist at resolution time.
    pub fn with_artifact(path: impl Into<PathBuf>) -> Self {
        Self {
            artifact: Some(path.into()),
            search_paths: Vec::new(),
        }
    }

    /// Build a locator from engine configuration
    ///
    /// An explicit `engine.path` wins; configured search paths are probed
    /// before the defaults.
    pub fn from_config(config: &EngineConfig) -> Self {
        if let Some(path) = config.engine_path() {
            return Self::with_artifact(path);
        }

        let mut locator = Self::new();
        for path in config.search_paths().iter().rev() {
            locator.add_search_path(path.clone());
        }
        locator
    }

    /// Default search paths: current directory, then target/release, then
    /// target/debug
    fn default_search_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from("."),
            PathBuf::from("target/release"),
            PathBuf::from("target/debug"),
        ];

        if let Ok(cwd) = std::env::current_dir() {
            paths[0] = cwd;
        }

        paths
    }

    /// Add a custom search path (prepended to search list)
    pub fn add_search_path(&mut self, path: PathBuf) {
        self.search_paths.insert(0, path);
    }

    /// Platform-specific artifact file name
    ///
    /// - Linux: lib{stem}.so
    /// - macOS: lib{stem}.dylib
    /// - Windows: {stem}.dll
    pub fn artifact_file_name() -> String {
        if cfg!(target_os = "windows") {
            format!("{}.dll", ARTIFACT_STEM)
        } else if cfg!(target_os = "macos") {
            format!("lib{}.dylib", ARTIFACT_STEM)
        } else {
            format!("lib{}.so", ARTIFACT_STEM)
        }
    }

    /// Resolve the artifact to a concrete path
    pub fn resolve(&self) -> Result<PathBuf, BindingError> {
        if let Some(path) = &self.artifact {
            if path.exists() {
                return Ok(path.clone());
            }
            return Err(BindingError::ArtifactNotFound {
                name: path.display().to_string(),
            });
        }

        let file_name = Self::artifact_file_name();
        for search_path in &self.search_paths {
            let candidate = search_path.join(&file_name);
            if candidate.exists() {
                return Ok(candidate);
            }
        }

        Err(BindingError::ArtifactNotFound { name: file_name })
    }

    /// Directories this locator probes, highest priority first
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }
}

impl Default for Locator {
    fn default() -> Self {
        Self::new()
    }
}

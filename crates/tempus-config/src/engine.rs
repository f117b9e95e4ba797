//! Engine artifact configuration (tempus.toml / ~/.tempus/config.toml)
//!
//! Describes where the planning engine's shared library lives. The engine
//! artifact path is explicit configuration handed to the loader, never
//! ambient process state, so two different artifacts can be bound side by
//! side from two configs.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the per-project configuration file
pub const PROJECT_CONFIG_FILE: &str = "tempus.toml";

/// Environment variable overriding the engine artifact path
pub const ENGINE_PATH_ENV: &str = "TEMPUS_ENGINE_PATH";

/// Engine configuration from tempus.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Engine artifact settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<EngineSection>,
}

/// `[engine]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct EngineSection {
    /// Explicit path to the engine shared library
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Extra directories searched for the engine artifact, highest priority
    /// first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_paths: Vec<PathBuf>,
}

impl EngineConfig {
    /// Load configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration for a project directory
    ///
    /// Merges global config, the directory's tempus.toml, and environment
    /// overrides, in that order. Missing files are not an error; defaults
    /// apply.
    pub fn load_from_directory(dir: &Path) -> ConfigResult<Self> {
        let mut config = match Self::global_config_path() {
            Ok(global) if global.exists() => Self::load_from_file(&global)?,
            _ => Self::default(),
        };

        let project = dir.join(PROJECT_CONFIG_FILE);
        if project.exists() {
            config.merge(&Self::load_from_file(&project)?);
        }

        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Get the global config file path (~/.tempus/config.toml)
    pub fn global_config_path() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".tempus").join("config.toml"))
    }

    /// Merge another config into this one
    /// Other config takes precedence for non-None values
    pub fn merge(&mut self, other: &EngineConfig) {
        if other.engine.is_some() {
            self.engine = other.engine.clone();
        }
    }

    /// Apply environment overrides (TEMPUS_ENGINE_PATH)
    pub fn apply_env(&mut self) {
        if let Some(path) = std::env::var_os(ENGINE_PATH_ENV) {
            self.engine
                .get_or_insert_with(EngineSection::default)
                .path = Some(PathBuf::from(path));
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(engine) = &self.engine {
            if let Some(path) = &engine.path {
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidValue {
                        field: "engine.path".to_string(),
                        reason: "path must not be empty".to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Explicit engine artifact path, if configured
    pub fn engine_path(&self) -> Option<&Path> {
        self.engine.as_ref().and_then(|e| e.path.as_deref())
    }

    /// Configured extra search directories
    pub fn search_paths(&self) -> &[PathBuf] {
        self.engine
            .as_ref()
            .map(|e| e.search_paths.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
[engine]
path = "/opt/tempus/libtemporal_planner.so"
"#;

        let config: EngineConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.engine_path(),
            Some(Path::new("/opt/tempus/libtemporal_planner.so"))
        );
        assert!(config.search_paths().is_empty());
    }

    #[test]
    fn test_parse_search_paths() {
        let toml = r#"
[engine]
search_paths = ["/usr/local/lib", "vendor/engines"]
"#;

        let config: EngineConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.engine_path(), None);
        assert_eq!(config.search_paths().len(), 2);
        assert_eq!(config.search_paths()[0], PathBuf::from("/usr/local/lib"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let toml = r#"
[engine]
binary = "whoops"
"#;

        assert!(toml::from_str::<EngineConfig>(toml).is_err());
    }

    #[test]
    fn test_empty_path_invalid() {
        let config = EngineConfig {
            engine: Some(EngineSection {
                path: Some(PathBuf::new()),
                search_paths: Vec::new(),
            }),
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_configs() {
        let mut base = EngineConfig {
            engine: Some(EngineSection {
                path: Some(PathBuf::from("/old/engine.so")),
                search_paths: Vec::new(),
            }),
        };
        let override_config = EngineConfig {
            engine: Some(EngineSection {
                path: Some(PathBuf::from("/new/engine.so")),
                search_paths: Vec::new(),
            }),
        };

        base.merge(&override_config);
        assert_eq!(base.engine_path(), Some(Path::new("/new/engine.so")));
    }

    #[test]
    fn test_merge_keeps_base_when_other_empty() {
        let mut base = EngineConfig {
            engine: Some(EngineSection {
                path: Some(PathBuf::from("/old/engine.so")),
                search_paths: Vec::new(),
            }),
        };

        base.merge(&EngineConfig::default());
        assert_eq!(base.engine_path(), Some(Path::new("/old/engine.so")));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(PROJECT_CONFIG_FILE);
        std::fs::write(&file, "[engine]\nsearch_paths = [\"target/release\"]\n").unwrap();

        let config = EngineConfig::load_from_file(&file).unwrap();
        assert_eq!(config.search_paths(), &[PathBuf::from("target/release")]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = EngineConfig::load_from_file(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(PROJECT_CONFIG_FILE);
        std::fs::write(&file, "[engine\npath = ").unwrap();

        let result = EngineConfig::load_from_file(&file);
        assert!(matches!(result, Err(ConfigError::TomlParseError { .. })));
    }

    #[test]
    #[serial]
    fn test_env_override() {
        std::env::set_var(ENGINE_PATH_ENV, "/env/engine.so");

        let mut config = EngineConfig {
            engine: Some(EngineSection {
                path: Some(PathBuf::from("/file/engine.so")),
                search_paths: vec![PathBuf::from("vendor")],
            }),
        };
        config.apply_env();

        std::env::remove_var(ENGINE_PATH_ENV);

        assert_eq!(config.engine_path(), Some(Path::new("/env/engine.so")));
        // Search paths from the file layer survive an env override
        assert_eq!(config.search_paths(), &[PathBuf::from("vendor")]);
    }

    #[test]
    #[serial]
    fn test_load_from_directory_without_files() {
        std::env::remove_var(ENGINE_PATH_ENV);

        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::load_from_directory(dir.path()).unwrap();
        assert_eq!(config.engine_path(), None);
    }

    #[test]
    #[serial]
    fn test_load_from_directory_reads_project_file() {
        std::env::remove_var(ENGINE_PATH_ENV);

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(PROJECT_CONFIG_FILE),
            "[engine]\npath = \"/project/engine.so\"\n",
        )
        .unwrap();

        let config = EngineConfig::load_from_directory(dir.path()).unwrap();
        assert_eq!(config.engine_path(), Some(Path::new("/project/engine.so")));
    }
}

//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Solflat has two configuration scopes:
//! - **Global**: User-level path defaults
//! - **Project**: Per-project overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$SOLFLAT_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/solflat/config.toml`
//! 3. `~/.solflat/config.toml` (canonical write location)
//!
//! # Project Config Locations
//!
//! Searched in order:
//! 1. `solflat.toml` (canonical)
//! 2. `.solflat/config.toml` (compatibility, warns)
//!
//! # Example
//!
//! ```no_run
//! use solflat::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/project"))).unwrap();
//! let config = result.config;
//!
//! println!("Sources directory: {}", config.sources());
//! println!("Include roots: {:?}", config.include());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, PathsConfig, ProjectConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessor methods apply precedence rules automatically: project config
/// overrides global config overrides defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Project configuration (if present)
    pub project: Option<ProjectConfig>,
}

impl Config {
    /// Default sources directory.
    pub const DEFAULT_SOURCES: &'static str = "contracts";

    /// Default library include root.
    pub const DEFAULT_INCLUDE: &'static str = "node_modules";

    /// Load configuration from default locations.
    ///
    /// If `project_root` is provided, also loads project-specific config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or fail
    /// validation. Missing config files are not an error (defaults are
    /// used).
    pub fn load(project_root: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let global = Self::load_global()?;
        let project = match project_root {
            Some(root) => Self::load_project(root, &mut warnings)?,
            None => None,
        };

        global.validate()?;
        if let Some(ref p) = project {
            p.validate()?;
        }

        Ok(ConfigLoadResult {
            config: Config { global, project },
            warnings,
        })
    }

    /// Load global configuration from standard locations.
    fn load_global() -> Result<GlobalConfig, ConfigError> {
        // 1. Check $SOLFLAT_CONFIG
        if let Ok(path) = std::env::var("SOLFLAT_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Self::read_config(&path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/solflat/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("solflat/config.toml");
            if path.exists() {
                return Self::read_config(&path);
            }
        }

        // 3. Check ~/.solflat/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".solflat/config.toml");
            if path.exists() {
                return Self::read_config(&path);
            }
        }

        Ok(GlobalConfig::default())
    }

    /// Load project configuration from standard locations.
    fn load_project(
        root: &Path,
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<Option<ProjectConfig>, ConfigError> {
        // 1. solflat.toml (canonical)
        let canonical = root.join("solflat.toml");
        if canonical.exists() {
            return Ok(Some(Self::read_config(&canonical)?));
        }

        // 2. .solflat/config.toml (compatibility)
        let compat = root.join(".solflat/config.toml");
        if compat.exists() {
            warnings.push(ConfigWarning {
                message: format!(
                    "Using deprecated config location. Please move to '{}'",
                    canonical.display()
                ),
                path: compat.clone(),
            });
            return Ok(Some(Self::read_config(&compat)?));
        }

        Ok(None)
    }

    /// Read and parse a TOML config file.
    fn read_config<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Sources directory, with precedence applied.
    pub fn sources(&self) -> &str {
        self.project
            .as_ref()
            .and_then(|p| p.paths.as_ref())
            .and_then(|p| p.sources.as_deref())
            .or_else(|| {
                self.global
                    .paths
                    .as_ref()
                    .and_then(|p| p.sources.as_deref())
            })
            .unwrap_or(Self::DEFAULT_SOURCES)
    }

    /// Library include roots, with precedence applied.
    pub fn include(&self) -> Vec<String> {
        self.project
            .as_ref()
            .and_then(|p| p.paths.as_ref())
            .and_then(|p| p.include.clone())
            .or_else(|| {
                self.global
                    .paths
                    .as_ref()
                    .and_then(|p| p.include.clone())
            })
            .unwrap_or_else(|| vec![Self::DEFAULT_INCLUDE.to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_any_config() {
        let config = Config::default();
        assert_eq!(config.sources(), "contracts");
        assert_eq!(config.include(), vec!["node_modules".to_string()]);
    }

    #[test]
    fn project_overrides_global() {
        let config = Config {
            global: GlobalConfig {
                paths: Some(PathsConfig {
                    sources: Some("global-src".to_string()),
                    include: Some(vec!["global-lib".to_string()]),
                }),
            },
            project: Some(ProjectConfig {
                paths: Some(PathsConfig {
                    sources: Some("project-src".to_string()),
                    include: None,
                }),
            }),
        };

        // Project sets sources; global still supplies include.
        assert_eq!(config.sources(), "project-src");
        assert_eq!(config.include(), vec!["global-lib".to_string()]);
    }

    #[test]
    fn global_fills_gaps() {
        let config = Config {
            global: GlobalConfig {
                paths: Some(PathsConfig {
                    sources: Some("global-src".to_string()),
                    include: None,
                }),
            },
            project: None,
        };

        assert_eq!(config.sources(), "global-src");
        assert_eq!(config.include(), vec!["node_modules".to_string()]);
    }

    #[test]
    fn loads_project_config_from_canonical_location() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("solflat.toml"),
            "[paths]\nsources = \"src-sol\"\n",
        )
        .unwrap();

        let result = Config::load(Some(dir.path())).unwrap();
        assert_eq!(result.config.sources(), "src-sol");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn compat_location_warns() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".solflat")).unwrap();
        fs::write(
            dir.path().join(".solflat/config.toml"),
            "[paths]\nsources = \"src-sol\"\n",
        )
        .unwrap();

        let result = Config::load(Some(dir.path())).unwrap();
        assert_eq!(result.config.sources(), "src-sol");
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn missing_project_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(dir.path())).unwrap();
        assert_eq!(result.config.sources(), "contracts");
    }

    #[test]
    fn malformed_project_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("solflat.toml"), "not valid toml [[").unwrap();

        assert!(Config::load(Some(dir.path())).is_err());
    }
}

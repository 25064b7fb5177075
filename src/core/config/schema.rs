//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$SOLFLAT_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/solflat/config.toml`
//! 3. `~/.solflat/config.toml` (canonical write location)
//!
//! # Project Config
//!
//! Located at `solflat.toml` in the project root.
//!
//! # Validation
//!
//! Config values are validated after parsing; path values must be relative
//! to the project root.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// [paths]
/// sources = "contracts"
/// include = ["node_modules"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Path defaults applied to every project
    pub paths: Option<PathsConfig>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(paths) = &self.paths {
            paths.validate()?;
        }
        Ok(())
    }
}

/// Project configuration.
///
/// # Example
///
/// ```toml
/// [paths]
/// sources = "contracts"
/// include = ["node_modules", "lib"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Path overrides for this project
    pub paths: Option<PathsConfig>,
}

impl ProjectConfig {
    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(paths) = &self.paths {
            paths.validate()?;
        }
        Ok(())
    }
}

/// Source and library path settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Directory holding project sources (default: "contracts")
    pub sources: Option<String>,

    /// Library include roots searched for bare imports
    /// (default: ["node_modules"])
    pub include: Option<Vec<String>>,
}

impl PathsConfig {
    /// Validate path values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for absolute or empty paths.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(sources) = &self.sources {
            Self::validate_relative("paths.sources", sources)?;
        }
        if let Some(include) = &self.include {
            for root in include {
                Self::validate_relative("paths.include", root)?;
            }
        }
        Ok(())
    }

    fn validate_relative(key: &str, value: &str) -> Result<(), ConfigError> {
        if value.is_empty() {
            return Err(ConfigError::InvalidValue(format!(
                "{key} cannot be empty"
            )));
        }
        if std::path::Path::new(value).is_absolute() {
            return Err(ConfigError::InvalidValue(format!(
                "{key} must be relative to the project root, got '{value}'"
            )));
        }
        Ok(())
    }
}

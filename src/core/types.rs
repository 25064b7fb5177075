//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`SourceName`] - Validated canonical source name
//! - [`ResolvedSource`] - One source unit: name, contents, direct dependencies
//! - [`SourceFingerprint`] - Hash over a resolved source set
//!
//! # Validation
//!
//! [`SourceName`] enforces validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use solflat::core::types::SourceName;
//!
//! // Valid constructions
//! let name = SourceName::new("contracts/Market.sol").unwrap();
//! assert_eq!(name.as_str(), "contracts/Market.sol");
//!
//! // Invalid constructions fail at creation time
//! assert!(SourceName::new("/etc/passwd").is_err());
//! assert!(SourceName::new("contracts/../secret.sol").is_err());
//! ```

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid source name: {0}")]
    InvalidSourceName(String),
}

/// A validated canonical source name.
///
/// Source names identify one source unit within a project. They are always
/// project-relative with `/` separators, regardless of platform:
/// - Cannot be empty
/// - Cannot be absolute (start with `/`)
/// - Cannot contain `\`, `//`, or ASCII control characters
/// - Cannot contain `.` or `..` path components
/// - Cannot end with `/`
///
/// # Example
///
/// ```
/// use solflat::core::types::SourceName;
///
/// let name = SourceName::new("contracts/token/ERC20.sol").unwrap();
/// assert_eq!(name.as_str(), "contracts/token/ERC20.sol");
///
/// let library = SourceName::new("@openzeppelin/contracts/utils/Context.sol").unwrap();
/// assert_eq!(library.as_str(), "@openzeppelin/contracts/utils/Context.sol");
///
/// assert!(SourceName::new("").is_err());
/// assert!(SourceName::new("/abs/path.sol").is_err());
/// assert!(SourceName::new("a//b.sol").is_err());
/// assert!(SourceName::new("a\\b.sol").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SourceName(String);

impl SourceName {
    /// Create a new validated source name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidSourceName` if the name is not a valid
    /// project-relative path.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    /// Validate a source name.
    fn validate(name: &str) -> Result<(), TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidSourceName(
                "source name cannot be empty".into(),
            ));
        }

        if name.starts_with('/') {
            return Err(TypeError::InvalidSourceName(
                "source name cannot be absolute".into(),
            ));
        }

        if name.ends_with('/') {
            return Err(TypeError::InvalidSourceName(
                "source name cannot end with '/'".into(),
            ));
        }

        if name.contains('\\') {
            return Err(TypeError::InvalidSourceName(
                "source name must use '/' separators".into(),
            ));
        }

        if name.contains("//") {
            return Err(TypeError::InvalidSourceName(
                "source name cannot contain '//'".into(),
            ));
        }

        for c in name.chars() {
            if c.is_ascii_control() {
                return Err(TypeError::InvalidSourceName(
                    "source name cannot contain control characters".into(),
                ));
            }
        }

        for component in name.split('/') {
            if component == "." || component == ".." {
                return Err(TypeError::InvalidSourceName(format!(
                    "source name cannot contain '{component}' components"
                )));
            }
        }

        Ok(())
    }

    /// Get the source name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SourceName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<SourceName> for String {
    fn from(name: SourceName) -> Self {
        name.0
    }
}

impl AsRef<str> for SourceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SourceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One resolved source unit.
///
/// Produced by the resolver collaborator; immutable for the lifetime of one
/// flatten invocation. `dependencies` preserves the order in which imports
/// were encountered in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    /// Canonical name, unique across the resolved set.
    pub name: SourceName,
    /// Unmodified file contents.
    pub content: String,
    /// Direct dependencies, in declaration order.
    pub dependencies: Vec<SourceName>,
    /// Package version for sources resolved out of a library include root.
    pub version: Option<String>,
}

impl ResolvedSource {
    /// Create a project-local source (no library version).
    pub fn new(
        name: SourceName,
        content: impl Into<String>,
        dependencies: Vec<SourceName>,
    ) -> Self {
        Self {
            name,
            content: content.into(),
            dependencies,
            version: None,
        }
    }

    /// Render the name with its version tag when one is known.
    ///
    /// # Example
    ///
    /// ```
    /// use solflat::core::types::{ResolvedSource, SourceName};
    ///
    /// let mut src = ResolvedSource::new(
    ///     SourceName::new("@openzeppelin/contracts/utils/Context.sol").unwrap(),
    ///     "contract Context {}",
    ///     vec![],
    /// );
    /// assert_eq!(
    ///     src.versioned_name(),
    ///     "@openzeppelin/contracts/utils/Context.sol"
    /// );
    ///
    /// src.version = Some("4.5.0".to_string());
    /// assert_eq!(
    ///     src.versioned_name(),
    ///     "@openzeppelin/contracts/utils/Context.sol@v4.5.0"
    /// );
    /// ```
    pub fn versioned_name(&self) -> String {
        match &self.version {
            Some(version) => format!("{}@v{}", self.name, version),
            None => self.name.to_string(),
        }
    }
}

/// A stable hash over a resolved source set.
///
/// Used for debug reporting and to assert that two invocations saw
/// byte-identical inputs.
///
/// # Example
///
/// ```
/// use solflat::core::types::{SourceFingerprint, SourceName};
///
/// let a = SourceName::new("A.sol").unwrap();
/// let b = SourceName::new("B.sol").unwrap();
///
/// let fp1 = SourceFingerprint::compute([(&a, "contract A {}"), (&b, "contract B {}")]);
/// let fp2 = SourceFingerprint::compute([(&b, "contract B {}"), (&a, "contract A {}")]);
/// assert_eq!(fp1, fp2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceFingerprint(String);

impl SourceFingerprint {
    /// Compute a fingerprint from (name, content) pairs.
    ///
    /// Pairs are sorted by name before hashing so the fingerprint does not
    /// depend on input order.
    pub fn compute<'a>(sources: impl IntoIterator<Item = (&'a SourceName, &'a str)>) -> Self {
        let mut sorted: Vec<_> = sources.into_iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));

        let mut hasher = Sha256::new();
        for (name, content) in sorted {
            hasher.update(name.as_str().as_bytes());
            hasher.update(b"\0");
            hasher.update(content.as_bytes());
            hasher.update(b"\n");
        }

        let result = hasher.finalize();
        Self(hex::encode(result))
    }

    /// Get the fingerprint as a hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SourceFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

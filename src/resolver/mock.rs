//! resolver::mock
//!
//! Mock resolver implementation for deterministic testing.
//!
//! # Design
//!
//! The mock resolver serves a fixed, in-memory source set in a fixed
//! enumeration order, letting pipeline tests exercise ordering and
//! assembly without touching the filesystem. Entry filtering is not
//! simulated; the configured set is returned as-is.
//!
//! # Example
//!
//! ```
//! use solflat::resolver::{MockResolver, SourceResolver};
//! use solflat::core::types::{ResolvedSource, SourceName};
//!
//! let base = SourceName::new("Base.sol").unwrap();
//! let resolver = MockResolver::with_sources(vec![
//!     ResolvedSource::new(base.clone(), "contract Base {}", vec![]),
//! ]);
//!
//! let resolution = resolver.resolve(&[]).unwrap();
//! assert_eq!(resolution.sources.len(), 1);
//! assert_eq!(resolution.sources[0].name, base);
//! ```

use std::path::PathBuf;

use super::{Resolution, ResolveError, SourceResolver};
use crate::core::types::ResolvedSource;

/// Mock resolver serving a fixed source set.
#[derive(Debug, Clone, Default)]
pub struct MockResolver {
    sources: Vec<ResolvedSource>,
}

impl MockResolver {
    /// Create an empty mock resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock resolver serving `sources` in the given order.
    pub fn with_sources(sources: Vec<ResolvedSource>) -> Self {
        Self { sources }
    }

    /// Append a source to the served set.
    pub fn add(&mut self, source: ResolvedSource) {
        self.sources.push(source);
    }
}

impl SourceResolver for MockResolver {
    fn resolve(&self, _entries: &[PathBuf]) -> Result<Resolution, ResolveError> {
        Ok(Resolution {
            sources: self.sources.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::SourceName;

    #[test]
    fn serves_sources_in_configured_order() {
        let mut resolver = MockResolver::new();
        resolver.add(ResolvedSource::new(
            SourceName::new("Z.sol").unwrap(),
            "",
            vec![],
        ));
        resolver.add(ResolvedSource::new(
            SourceName::new("A.sol").unwrap(),
            "",
            vec![],
        ));

        let resolution = resolver.resolve(&[]).unwrap();
        let names: Vec<&str> = resolution
            .sources
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Z.sol", "A.sol"]);
    }

    #[test]
    fn empty_resolver_serves_nothing() {
        let resolution = MockResolver::new().resolve(&[]).unwrap();
        assert!(resolution.sources.is_empty());
    }
}

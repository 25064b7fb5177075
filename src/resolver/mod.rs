//! resolver
//!
//! The module-path resolver collaborator.
//!
//! # Design
//!
//! The [`SourceResolver`] trait is the narrow seam between the flattening
//! core and the filesystem. Given entry files it returns canonical names,
//! raw contents, and direct-dependency edges for every reachable source;
//! given no entries it resolves the project's full discovered source set.
//!
//! The core trusts the resolver to have computed *which* sources exist and
//! how they relate; ordering and text assembly happen downstream.
//!
//! # Implementations
//!
//! - [`FsResolver`] - real filesystem resolution with library include roots
//! - [`MockResolver`] - in-memory fixture sources for deterministic tests

pub mod fs;
pub mod mock;

pub use fs::FsResolver;
pub use mock::MockResolver;

use std::path::PathBuf;
use thiserror::Error;

use crate::core::types::{ResolvedSource, SourceName, TypeError};

/// Errors from source resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A source file could not be read.
    #[error("failed to read source '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configured sources directory is missing.
    #[error("sources directory '{0}' does not exist")]
    MissingSourcesDir(PathBuf),

    /// An import directive named a file that could not be located.
    #[error("import '{import}' in '{from}' could not be resolved")]
    ImportNotFound { from: SourceName, import: String },

    /// An entry or import resolved outside the project and include roots.
    #[error("source '{0}' is outside the project root")]
    OutsideProject(PathBuf),

    /// A path did not form a valid canonical source name.
    #[error(transparent)]
    InvalidName(#[from] TypeError),
}

/// The resolver's output: every reachable source with its edges.
///
/// Source order is the resolver's enumeration order; the sorter uses it as
/// the deterministic tie-break, so it must be stable for identical inputs.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// All reachable sources, in enumeration order.
    pub sources: Vec<ResolvedSource>,
}

/// Trait for source resolution.
///
/// Implementations must be safe for concurrent use; each `resolve` call is
/// independent and shares no mutable state with other calls.
pub trait SourceResolver {
    /// Resolve the transitive closure of `entries`, or the project's full
    /// source set when `entries` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when a file cannot be read or an import
    /// cannot be located. Resolution failures are fatal; no partial
    /// resolution is returned.
    fn resolve(&self, entries: &[PathBuf]) -> Result<Resolution, ResolveError>;
}

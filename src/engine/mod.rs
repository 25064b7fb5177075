//! engine
//!
//! Orchestration of one flatten invocation.
//!
//! # Lifecycle
//!
//! Resolve → Build → Sort → Assemble → (optional) Write. Each invocation
//! builds its own graph and ordering from scratch; there is no shared
//! mutable state across invocations, so concurrent invocations are
//! independent as long as the resolver collaborator is.
//!
//! # Failure model
//!
//! Assembly is fully computed in memory before any write, so a failure at
//! any stage leaves no output file touched. All failures propagate to the
//! invocation boundary unmodified.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::flatten;
use crate::core::graph::{DependencyGraph, GraphError};
use crate::core::types::{ResolvedSource, SourceFingerprint, SourceName};
use crate::resolver::{ResolveError, SourceResolver};
use crate::sink::{ArtifactSink, SinkError};
use crate::ui::output::{self, Verbosity};

/// Execution context derived from global CLI flags.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override (project root).
    pub cwd: Option<PathBuf>,
    /// Enable debug logging.
    pub debug: bool,
    /// Minimal output.
    pub quiet: bool,
}

impl Context {
    /// Output verbosity for this invocation.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// The project root: explicit `--cwd` or the process working directory.
    pub fn project_root(&self) -> PathBuf {
        self.cwd
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }
}

/// Errors from one flatten invocation.
#[derive(Debug, Error)]
pub enum FlattenError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Flatten the transitive closure of `entries` (or the full project source
/// set when empty) into one compilation unit.
///
/// Returns the artifact text, or an empty string when `output` was given
/// and the artifact was written to the sink instead.
///
/// # Errors
///
/// - [`ResolveError`] from the resolver collaborator
/// - [`GraphError::CyclicDependency`] / [`GraphError::UnresolvedReference`]
///   from ordering
/// - [`SinkError`] when the destination cannot be written
pub fn flatten(
    ctx: &Context,
    resolver: &dyn SourceResolver,
    sink: &dyn ArtifactSink,
    entries: &[PathBuf],
    output: Option<&Path>,
) -> Result<String, FlattenError> {
    let ordered = sorted_sources(ctx, resolver, entries)?;
    if ordered.is_empty() {
        return Ok(String::new());
    }

    let artifact = flatten::assemble(&ordered.iter().collect::<Vec<_>>());

    match output {
        Some(path) => {
            sink.write(path, &artifact)?;
            output::debug(
                format!("wrote {} bytes to {}", artifact.len(), path.display()),
                ctx.verbosity(),
            );
            Ok(String::new())
        }
        None => Ok(artifact),
    }
}

/// Compute the dependencies-first source order for `entries` (or the full
/// project source set when empty) without assembling text.
pub fn sorted_names(
    ctx: &Context,
    resolver: &dyn SourceResolver,
    entries: &[PathBuf],
) -> Result<Vec<SourceName>, FlattenError> {
    let ordered = sorted_sources(ctx, resolver, entries)?;
    Ok(ordered.into_iter().map(|s| s.name).collect())
}

/// Resolve, build, and sort; shared by [`flatten`] and [`sorted_names`].
fn sorted_sources(
    ctx: &Context,
    resolver: &dyn SourceResolver,
    entries: &[PathBuf],
) -> Result<Vec<ResolvedSource>, FlattenError> {
    let resolution = resolver.resolve(entries)?;

    let fingerprint = SourceFingerprint::compute(
        resolution
            .sources
            .iter()
            .map(|s| (&s.name, s.content.as_str())),
    );
    output::debug(
        format!(
            "resolved {} sources (fingerprint {})",
            resolution.sources.len(),
            fingerprint
        ),
        ctx.verbosity(),
    );

    let graph = DependencyGraph::build(&resolution.sources);
    let order = graph.topological_order()?;

    let mut by_name: HashMap<SourceName, ResolvedSource> = resolution
        .sources
        .into_iter()
        .map(|s| (s.name.clone(), s))
        .collect();

    // Every name in the order came from the graph's node set, which was
    // built from these sources.
    Ok(order
        .into_iter()
        .filter_map(|name| by_name.remove(&name))
        .collect())
}

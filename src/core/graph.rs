//! core::graph
//!
//! Source dependency graph representation and ordering.
//!
//! # Architecture
//!
//! The dependency graph is a DAG where:
//! - Nodes are resolved sources, keyed by canonical name
//! - Edges point from dependent to dependency
//!
//! # Invariants
//!
//! - Graph must be acyclic; a cycle is a fatal [`GraphError::CyclicDependency`]
//! - Every edge target must exist as a node; a dangling edge is a fatal
//!   [`GraphError::UnresolvedReference`]
//! - Ordering is deterministic: ties among nodes with no relative constraint
//!   follow first-appearance order in the resolver's output

use super::types::{ResolvedSource, SourceName};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors from graph ordering.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// The graph contains a directed cycle through the named source.
    #[error("cyclic dependency detected involving '{0}'")]
    CyclicDependency(SourceName),

    /// An edge points at a source absent from the resolved set.
    #[error("'{from}' depends on '{to}', which is not in the resolved source set")]
    UnresolvedReference { from: SourceName, to: SourceName },
}

/// The dependency graph derived from one resolver invocation.
///
/// Built fresh per invocation; holds no state beyond the node set, the
/// dependency edges, and the input enumeration order used for deterministic
/// tie-breaking.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// Node names in first-appearance order.
    enumeration: Vec<SourceName>,
    /// Direct dependencies per node, in declaration order.
    dependencies: HashMap<SourceName, Vec<SourceName>>,
}

impl DependencyGraph {
    /// Build a graph from the resolver's output.
    ///
    /// A source appearing twice under the same name is coalesced into a
    /// single node; the first occurrence fixes its enumeration position.
    pub fn build(sources: &[ResolvedSource]) -> Self {
        let mut graph = Self::default();
        for source in sources {
            if graph.dependencies.contains_key(&source.name) {
                continue;
            }
            graph.enumeration.push(source.name.clone());
            graph
                .dependencies
                .insert(source.name.clone(), source.dependencies.clone());
        }
        graph
    }

    /// Number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.enumeration.len()
    }

    /// Check whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.enumeration.is_empty()
    }

    /// Get the direct dependencies of a source.
    pub fn dependencies(&self, name: &SourceName) -> Option<&[SourceName]> {
        self.dependencies.get(name).map(Vec::as_slice)
    }

    /// All node names in first-appearance order.
    pub fn sources(&self) -> impl Iterator<Item = &SourceName> {
        self.enumeration.iter()
    }

    /// Compute the dependencies-first ordering of all nodes.
    ///
    /// For every edge "A depends on B", B precedes A in the result. Every
    /// node appears exactly once, including isolated sources nothing depends
    /// on. Ties follow the enumeration order of the resolver output, so the
    /// result is byte-for-byte reproducible for identical inputs.
    ///
    /// # Errors
    ///
    /// - [`GraphError::CyclicDependency`] when the graph contains a directed
    ///   cycle (a self-import counts)
    /// - [`GraphError::UnresolvedReference`] when an edge names a source
    ///   absent from the node set
    ///
    /// # Example
    ///
    /// ```
    /// use solflat::core::graph::DependencyGraph;
    /// use solflat::core::types::{ResolvedSource, SourceName};
    ///
    /// let base = SourceName::new("Base.sol").unwrap();
    /// let child = SourceName::new("Child.sol").unwrap();
    ///
    /// let graph = DependencyGraph::build(&[
    ///     ResolvedSource::new(child.clone(), "", vec![base.clone()]),
    ///     ResolvedSource::new(base.clone(), "", vec![]),
    /// ]);
    ///
    /// let order = graph.topological_order().unwrap();
    /// assert_eq!(order, vec![base, child]);
    /// ```
    pub fn topological_order(&self) -> Result<Vec<SourceName>, GraphError> {
        let mut sorted = Vec::with_capacity(self.enumeration.len());
        let mut visited = HashSet::new();
        let mut path = HashSet::new();

        for name in &self.enumeration {
            self.visit(name, &mut visited, &mut path, &mut sorted)?;
        }

        Ok(sorted)
    }

    /// Depth-first post-order visit: dependencies are emitted before the
    /// node itself, traversed in declaration order.
    fn visit(
        &self,
        name: &SourceName,
        visited: &mut HashSet<SourceName>,
        path: &mut HashSet<SourceName>,
        sorted: &mut Vec<SourceName>,
    ) -> Result<(), GraphError> {
        if visited.contains(name) {
            return Ok(());
        }
        if path.contains(name) {
            return Err(GraphError::CyclicDependency(name.clone()));
        }

        path.insert(name.clone());

        // Node presence is guaranteed for enumeration roots; edge targets
        // are checked before descending.
        if let Some(deps) = self.dependencies.get(name) {
            for dep in deps {
                if !self.dependencies.contains_key(dep) {
                    return Err(GraphError::UnresolvedReference {
                        from: name.clone(),
                        to: dep.clone(),
                    });
                }
                self.visit(dep, visited, path, sorted)?;
            }
        }

        path.remove(name);
        visited.insert(name.clone());
        sorted.push(name.clone());
        Ok(())
    }
}

//! sink
//!
//! The file-system sink collaborator for flattened artifacts.
//!
//! # Design
//!
//! [`ArtifactSink`] persists a fully-assembled artifact. Writes are
//! all-or-nothing from the pipeline's perspective: assembly completes in
//! memory first, and a write failure is fatal and reported verbatim, never
//! retried.
//!
//! # Implementations
//!
//! - [`FsSink`] - writes to the local filesystem
//! - [`MemorySink`] - records writes in memory for tests

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

/// Errors from artifact persistence.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The destination could not be written.
    #[error("failed to write artifact to '{path}': {source}")]
    WriteFailure {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Trait for artifact persistence.
pub trait ArtifactSink {
    /// Write `text` to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::WriteFailure`] carrying the underlying I/O
    /// error when the destination cannot be written.
    fn write(&self, path: &Path, text: &str) -> Result<(), SinkError>;
}

/// Filesystem sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSink;

impl ArtifactSink for FsSink {
    fn write(&self, path: &Path, text: &str) -> Result<(), SinkError> {
        fs::write(path, text).map_err(|source| SinkError::WriteFailure {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// In-memory sink for deterministic testing.
///
/// Thread-safe via an internal mutex; records every write in order.
#[derive(Debug, Default)]
pub struct MemorySink {
    writes: Mutex<Vec<(PathBuf, String)>>,
}

impl MemorySink {
    /// Create an empty memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded writes, in call order.
    pub fn writes(&self) -> Vec<(PathBuf, String)> {
        self.writes.lock().expect("sink mutex poisoned").clone()
    }
}

impl ArtifactSink for MemorySink {
    fn write(&self, path: &Path, text: &str) -> Result<(), SinkError> {
        self.writes
            .lock()
            .expect("sink mutex poisoned")
            .push((path.to_path_buf(), text.to_string()));
        Ok(())
    }
}

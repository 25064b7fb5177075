//! resolver::fs
//!
//! Filesystem-backed source resolution.
//!
//! # Resolution rules
//!
//! - With no entries, every `*.sol` file under the configured sources
//!   directory is an entry; discovery order is path-sorted so enumeration
//!   is deterministic.
//! - Relative imports (`./`, `../`) resolve against the importing file's
//!   directory.
//! - Bare imports resolve against the project root first, then against
//!   each configured include root in order (library packages).
//! - Sources under an include root carry the version of the nearest
//!   enclosing `package.json`, surfaced in versioned header names.

use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use super::{Resolution, ResolveError, SourceResolver};
use crate::core::config::Config;
use crate::core::directives;
use crate::core::types::{ResolvedSource, SourceName};

/// File extension recognized as a source unit.
const SOURCE_EXTENSION: &str = "sol";

/// Filesystem resolver rooted at one project directory.
#[derive(Debug, Clone)]
pub struct FsResolver {
    root: PathBuf,
    sources_dir: PathBuf,
    include_roots: Vec<PathBuf>,
}

impl FsResolver {
    /// Create a resolver for the project at `root` using configured paths.
    pub fn new(root: impl Into<PathBuf>, config: &Config) -> Self {
        let root = root.into();
        let sources_dir = root.join(config.sources());
        let include_roots = config
            .include()
            .iter()
            .map(|inc| root.join(inc))
            .collect();
        Self {
            root,
            sources_dir,
            include_roots,
        }
    }

    /// Discover every source file under the sources directory.
    ///
    /// Results are path-sorted so enumeration order does not depend on
    /// directory iteration order.
    fn discover(&self) -> Result<Vec<PathBuf>, ResolveError> {
        if !self.sources_dir.is_dir() {
            return Err(ResolveError::MissingSourcesDir(self.sources_dir.clone()));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.sources_dir) {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.sources_dir.clone());
                ResolveError::Io {
                    path,
                    source: e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
                }
            })?;
            if entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
            {
                files.push(entry.path().to_path_buf());
            }
        }
        files.sort();
        Ok(files)
    }

    /// Map a file path to its canonical name, plus the include root it was
    /// resolved out of (if any).
    fn name_for(&self, path: &Path) -> Result<(SourceName, Option<PathBuf>), ResolveError> {
        for include in &self.include_roots {
            if let Ok(rel) = path.strip_prefix(include) {
                return Ok((Self::name_from_relative(rel)?, Some(include.clone())));
            }
        }
        if let Ok(rel) = path.strip_prefix(&self.root) {
            return Ok((Self::name_from_relative(rel)?, None));
        }
        Err(ResolveError::OutsideProject(path.to_path_buf()))
    }

    /// Canonical name from a relative path: `/`-joined components.
    fn name_from_relative(rel: &Path) -> Result<SourceName, ResolveError> {
        let joined = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        Ok(SourceName::new(joined)?)
    }

    /// Resolve one import directive to its file, name, and library version.
    fn resolve_import(
        &self,
        importer_path: &Path,
        importer: &SourceName,
        import: &str,
    ) -> Result<(PathBuf, SourceName, Option<String>), ResolveError> {
        let candidate = if import.starts_with("./") || import.starts_with("../") {
            let base = importer_path.parent().unwrap_or_else(|| Path::new(""));
            normalize(&base.join(import))
        } else {
            let project = self.root.join(import);
            if project.is_file() {
                Some(project)
            } else {
                self.include_roots
                    .iter()
                    .map(|inc| inc.join(import))
                    .find(|p| p.is_file())
            }
        };

        let candidate = match candidate {
            Some(path) if path.is_file() => path,
            _ => {
                return Err(ResolveError::ImportNotFound {
                    from: importer.clone(),
                    import: import.to_string(),
                })
            }
        };

        let (name, include_root) = self.name_for(&candidate)?;
        let version = include_root
            .as_deref()
            .and_then(|root| self.library_version(root, &candidate));
        Ok((candidate, name, version))
    }

    /// Version of the nearest `package.json` between `file` and the
    /// include root, exclusive of the root itself.
    fn library_version(&self, include_root: &Path, file: &Path) -> Option<String> {
        let mut dir = file.parent()?;
        while dir.starts_with(include_root) && dir != include_root {
            let manifest = dir.join("package.json");
            if manifest.is_file() {
                let text = fs::read_to_string(&manifest).ok()?;
                let value: serde_json::Value = serde_json::from_str(&text).ok()?;
                return value
                    .get("version")
                    .and_then(|v| v.as_str())
                    .map(str::to_string);
            }
            dir = dir.parent()?;
        }
        None
    }
}

impl SourceResolver for FsResolver {
    fn resolve(&self, entries: &[PathBuf]) -> Result<Resolution, ResolveError> {
        let entry_files = if entries.is_empty() {
            self.discover()?
        } else {
            entries
                .iter()
                .map(|p| {
                    if p.is_absolute() {
                        normalize(p)
                    } else {
                        normalize(&self.root.join(p))
                    }
                    .ok_or_else(|| ResolveError::OutsideProject(p.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?
        };

        let mut queue: VecDeque<(PathBuf, SourceName, Option<String>)> = VecDeque::new();
        let mut seen: HashSet<SourceName> = HashSet::new();
        for path in entry_files {
            let (name, include_root) = self.name_for(&path)?;
            if seen.insert(name.clone()) {
                let version = include_root
                    .as_deref()
                    .and_then(|root| self.library_version(root, &path));
                queue.push_back((path, name, version));
            }
        }

        let mut sources = Vec::new();
        while let Some((path, name, version)) = queue.pop_front() {
            let content = fs::read_to_string(&path).map_err(|source| ResolveError::Io {
                path: path.clone(),
                source,
            })?;

            let mut dependencies = Vec::new();
            for import in directives::import_paths(&content) {
                let (dep_path, dep_name, dep_version) =
                    self.resolve_import(&path, &name, &import)?;
                dependencies.push(dep_name.clone());
                if seen.insert(dep_name.clone()) {
                    queue.push_back((dep_path, dep_name, dep_version));
                }
            }

            sources.push(ResolvedSource {
                name,
                content,
                dependencies,
                version,
            });
        }

        Ok(Resolution { sources })
    }
}

/// Lexically normalize a path, resolving `.` and `..` components.
///
/// Returns `None` when `..` would escape above the path's start.
fn normalize(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return None;
                }
            }
            other => out.push(other),
        }
    }
    Some(out)
}

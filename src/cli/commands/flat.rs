//! flat command - Flatten contracts and their dependencies

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::core::config::Config;
use crate::engine::{self, Context};
use crate::resolver::FsResolver;
use crate::sink::FsSink;
use crate::ui::output;

/// Flatten contracts and their dependencies into one source.
///
/// Prints the flattened source to stdout, or writes it to `output` (and
/// prints nothing of the content) when a destination is given.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `files` - Entry files; empty means the full project source set
/// * `output` - Optional destination path
pub fn flat(ctx: &Context, files: &[PathBuf], output: Option<&Path>) -> Result<()> {
    let root = ctx.project_root();
    let loaded = Config::load(Some(&root)).context("Failed to load configuration")?;
    for warning in &loaded.warnings {
        output::warn(&warning.message, ctx.verbosity());
    }

    let resolver = FsResolver::new(&root, &loaded.config);
    let sink = FsSink;

    let artifact = engine::flatten(ctx, &resolver, &sink, files, output)?;

    if output.is_none() {
        println!("{}", artifact);
    }

    Ok(())
}

//! order command - Print sources in dependencies-first order

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::core::config::Config;
use crate::engine::{self, Context};
use crate::resolver::FsResolver;
use crate::ui::output;

/// Print source names in dependencies-first order, one per line.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `files` - Entry files; empty means the full project source set
pub fn order(ctx: &Context, files: &[PathBuf]) -> Result<()> {
    let root = ctx.project_root();
    let loaded = Config::load(Some(&root)).context("Failed to load configuration")?;
    for warning in &loaded.warnings {
        output::warn(&warning.message, ctx.verbosity());
    }

    let resolver = FsResolver::new(&root, &loaded.config);

    for name in engine::sorted_names(ctx, &resolver, files)? {
        println!("{}", name);
    }

    Ok(())
}

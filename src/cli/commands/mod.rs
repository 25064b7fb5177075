//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads configuration for the project root
//! 2. Calls the engine to execute the command
//! 3. Formats and displays output
//!
//! Handlers do NOT resolve or assemble sources directly.

mod completion;
mod flat;
mod order;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use flat::flat;
pub use order::order;

use crate::cli::args::Command;
use crate::engine::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Flat { files, output } => flat(ctx, &files, output.as_deref()),
        Command::Order { files } => order(ctx, &files),
        Command::Completion { shell } => completion(shell),
    }
}

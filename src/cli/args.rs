//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Solflat - flatten Solidity sources into a single compilation unit
#[derive(Parser, Debug)]
#[command(name = "solflat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if solflat was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Flatten contracts and their dependencies into one source
    #[command(
        name = "flat",
        long_about = "Flatten contracts and their dependencies into one source.\n\n\
            Computes every transitively-reachable dependency of the given files, \
            orders all sources so each appears after everything it depends on, \
            strips import directives, and concatenates the results into a single \
            self-contained compilation unit. Per-file license identifiers are \
            renamed and replaced by one aggregate header; the experimental \
            ABI encoder pragma is kept at most once.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Flatten the whole project to stdout
    solflat flat

    # Flatten one contract and its dependencies
    solflat flat contracts/Market.sol

    # Flatten several entry points into a file for verification upload
    solflat flat contracts/Market.sol contracts/Cashier.sol -o flat/Bundle.sol

READING THE OUTPUT:
    // SPDX-License-Identifier: MIXED   <- single aggregate license header
    // File contracts/IMarket.sol       <- one header line per source
    ...                                 <- import-stripped source body"
    )]
    Flat {
        /// Entry files to flatten (defaults to all project sources)
        files: Vec<PathBuf>,

        /// Write the flattened source to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print sources in dependencies-first order
    #[command(
        name = "order",
        long_about = "Print the project's sources in dependencies-first order.\n\n\
            Shows the exact ordering the flattener would use: for every import \
            edge, the imported source is listed before the importer. Ties are \
            broken by resolver enumeration order, so the listing is stable \
            across runs.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Order of the whole project
    solflat order

    # Order of one contract's dependency closure
    solflat order contracts/Market.sol"
    )]
    Order {
        /// Entry files to order (defaults to all project sources)
        files: Vec<PathBuf>,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for solflat \
            commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    solflat completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    solflat completion zsh >> ~/.zshrc

    # Fish
    solflat completion fish > ~/.config/fish/completions/solflat.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

//! CLI definition for the hookgate command-line interface.
//!
//! This module only depends on `clap` and `std`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Hookgate - gate dispatcher for Claude Code hook events
///
/// With no subcommand, reads one hook event as JSON from stdin, runs the
/// configured gates and writes the decision as JSON to stdout.
#[derive(Parser, Debug)]
#[command(name = "hookgate")]
#[command(version)]
#[command(about = "Gate dispatcher for Claude Code hook events")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Append log output to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load and validate the merged gates.json
    Validate {
        /// Project directory (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        cwd: Option<PathBuf>,
    },
    /// List hook rules and gate definitions
    List {
        /// Project directory (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        cwd: Option<PathBuf>,
        /// Show commands and timeouts
        #[arg(short, long)]
        verbose: bool,
    },
    /// Inspect or reset the session record
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum SessionAction {
    /// Print the session record as JSON
    Show {
        /// Project directory (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        cwd: Option<PathBuf>,
    },
    /// Delete the session record
    Clear {
        /// Project directory (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        cwd: Option<PathBuf>,
    },
}

/// Resolve an optional `--cwd` against the process working directory.
pub fn resolve_cwd(cwd: Option<PathBuf>) -> std::io::Result<PathBuf> {
    match cwd {
        Some(dir) => Ok(dir),
        None => std::env::current_dir(),
    }
}

//! Hookgate - command-line front end for the gate dispatcher.
//!
//! Run with no subcommand as a Claude Code hook: one event is read from
//! stdin and the decision is written to stdout.
//!
//! ```rust,no_run
//! use hookgate::hook::run_hook;
//! use hookgate_common::GateDispatcher;
//!
//! # async fn example() {
//! let dispatcher = GateDispatcher::from_env();
//! let raw = r#"{"hook_event_name": "Stop", "cwd": "/project"}"#;
//! let run = run_hook(raw, &dispatcher).await;
//! if let Some(json) = run.stdout {
//!     println!("{}", json);
//! }
//! std::process::exit(run.exit_code);
//! # }
//! ```

pub mod cli;
pub mod hook;
pub mod list;
pub mod logging;
pub mod session;
pub mod validate;

pub use cli::{Cli, Commands, SessionAction};

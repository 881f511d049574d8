//! Hookgate Common - gate dispatch engine for Claude Code hook events.
//!
//! This crate provides the event types, layered `gates.json` configuration,
//! context file discovery, gate execution and the dispatcher that ties them
//! together. The `hookgate` binary in `hookgate-cli` drives it from stdin.

pub mod chain;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod gate;
pub mod paths;
pub mod session;
pub mod types;

pub use config::{ConfigLoader, GatesConfig, LoadedConfig};
pub use dispatch::{DispatchResult, GateDispatcher};
pub use error::{ConfigError, HookgateError, SessionError};
pub use session::{SessionState, SessionStore};
pub use types::{HookInput, HookOutput, HookType};

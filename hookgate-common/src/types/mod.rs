//! Type definitions for hook inputs, gate results and hook outputs.

mod common;
mod input;
mod output;

pub use common::HookType;
pub use input::HookInput;
pub use output::{Decision, GateResult, HookOutput};

//! Gate Executor: shell commands and built-in checks.

pub mod builtin;
mod executor;
mod shell;

pub use builtin::{BuiltinGate, CommandsGate, GateRegistry, PlanComplianceGate};
pub use executor::{execute_gate, GateOutcome};
pub use shell::{run_shell, ShellOutput, FAILURE_EXIT_CODE, TIMEOUT_EXIT_CODE};

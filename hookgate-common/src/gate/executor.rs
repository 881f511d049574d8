//! Runs one gate and normalizes its outcome.

use std::time::Duration;

use crate::config::GateConfig;
use crate::error::HookgateError;
use crate::types::{GateResult, HookInput};

use super::builtin::GateRegistry;
use super::shell::run_shell;

/// Pass/fail plus the payload a gate produced.
#[derive(Debug, Clone, PartialEq)]
pub struct GateOutcome {
    /// Whether the gate passed.
    pub passed: bool,
    /// Text, block reason or stop message from the gate.
    pub result: GateResult,
}

/// Execute a gate definition against an event.
///
/// Shell gates pass on exit code zero and report their combined output as
/// text. Built-in gates pass unless they request a block or a stop.
pub async fn execute_gate(
    name: &str,
    gate: &GateConfig,
    input: &HookInput,
    registry: &GateRegistry,
) -> Result<GateOutcome, HookgateError> {
    if let Some(command) = gate.shell_command() {
        let timeout = Duration::from_millis(gate.timeout_ms());
        let shell = run_shell(command, input.cwd(), timeout).await;
        return Ok(GateOutcome {
            passed: shell.success(),
            result: GateResult::context(shell.output),
        });
    }

    let builtin = registry.get(name)?;
    let result = builtin.check(input).await?;
    tracing::debug!(gate = name, "Built-in gate finished");
    Ok(GateOutcome {
        passed: !result.is_rejection(),
        result,
    })
}

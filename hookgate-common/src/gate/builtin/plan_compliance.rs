//! Requires sub-agents to end their report with a STATUS line.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use crate::error::HookgateError;
use crate::types::{GateResult, HookInput};

use super::BuiltinGate;

const MISSING_STATUS: &str = "Agent must provide STATUS in completion report. Use STATUS: OK when task complete or STATUS: BLOCKED when plan cannot be followed.";
const BLOCKED_PREFIX: &str = "Agent reported BLOCKED. Review required before proceeding.";
const NO_REASON: &str = "No reason provided";
const STATUS_OK: &str = "Task completed successfully (STATUS: OK)";

static REASON_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"REASON:\s*(.+)").ok());

/// Checks the agent's `output` for `STATUS: OK` / `STATUS: BLOCKED`.
///
/// An empty output passes silently, since the agent may not be executing a
/// plan at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanComplianceGate;

impl PlanComplianceGate {
    fn evaluate(output: &str) -> GateResult {
        if output.is_empty() {
            return GateResult::empty();
        }
        if !output.contains("STATUS:") {
            return GateResult::block(MISSING_STATUS);
        }
        if output.contains("STATUS: BLOCKED") {
            let reason = REASON_PATTERN
                .as_ref()
                .and_then(|re| re.captures(output))
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim())
                .unwrap_or(NO_REASON);
            return GateResult::block(format!("{}\n\n{}", BLOCKED_PREFIX, reason));
        }
        GateResult::context(STATUS_OK)
    }
}

#[async_trait]
impl BuiltinGate for PlanComplianceGate {
    fn name(&self) -> &'static str {
        "plan-compliance"
    }

    async fn check(&self, input: &HookInput) -> Result<GateResult, HookgateError> {
        Ok(Self::evaluate(input.output.as_deref().unwrap_or_default()))
    }
}

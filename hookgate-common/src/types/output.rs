//! Gate results and the JSON decision written to stdout.

use serde::{Deserialize, Serialize};

/// Decision value a gate can return to block the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Block the agent from proceeding.
    Block,
}

/// Payload produced by a single gate.
///
/// A shell gate only ever fills `additional_context`; built-in gates may
/// also request a block or a stop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateResult {
    /// Text to surface alongside the decision.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,

    /// Explicit block decision.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<Decision>,

    /// Reason shown when blocking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// `Some(false)` asks the host to stop entirely.
    #[serde(rename = "continue", skip_serializing_if = "Option::is_none")]
    pub continue_execution: Option<bool>,

    /// Message shown when stopping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GateResult {
    /// An empty result.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A passing result carrying text.
    pub fn context(text: impl Into<String>) -> Self {
        Self {
            additional_context: Some(text.into()),
            ..Default::default()
        }
    }

    /// A blocking result. Built-in gates also clear `continue`.
    pub fn block(reason: impl Into<String>) -> Self {
        Self {
            decision: Some(Decision::Block),
            reason: Some(reason.into()),
            continue_execution: Some(false),
            ..Default::default()
        }
    }

    /// Whether the result signals a block or an explicit stop.
    pub fn is_rejection(&self) -> bool {
        self.decision.is_some() || self.continue_execution == Some(false)
    }
}

/// The JSON object written to stdout for the host.
///
/// Every field is optional; an all-empty output is not written at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    /// Accumulated advisory text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,

    /// `block` when a gate blocked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<Decision>,

    /// Block reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// `false` when a gate stopped the host.
    #[serde(rename = "continue", skip_serializing_if = "Option::is_none")]
    pub continue_execution: Option<bool>,

    /// Stop message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HookOutput {
    /// Error output for fatal failures.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            continue_execution: Some(false),
            message: Some(message.into()),
            ..Default::default()
        }
    }

    /// Whether there is nothing to write.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

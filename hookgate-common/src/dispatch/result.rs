//! The finalized outcome of a dispatch.

use crate::types::{Decision, HookOutput};

/// Accumulated text plus an optional terminal signal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchResult {
    /// Context and gate text, joined by newlines.
    pub context: String,
    /// Set when a gate blocked.
    pub block_reason: Option<String>,
    /// Set when a gate stopped the host.
    pub stop_message: Option<String>,
}

impl DispatchResult {
    /// The no-op result.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the dispatch ended in a block or stop.
    pub fn is_terminal(&self) -> bool {
        self.block_reason.is_some() || self.stop_message.is_some()
    }

    /// Build the wire output; empty fields are omitted.
    pub fn into_output(self) -> HookOutput {
        let mut output = HookOutput::default();
        if !self.context.is_empty() {
            output.additional_context = Some(self.context);
        }
        if let Some(reason) = self.block_reason {
            output.decision = Some(Decision::Block);
            output.reason = Some(reason);
        }
        if let Some(message) = self.stop_message {
            output.continue_execution = Some(false);
            output.message = Some(message);
        }
        output
    }
}

//! Mapping a gate's declared action onto a dispatch effect.

use crate::types::GateResult;

/// Default block reason when a gate supplies none.
pub const DEFAULT_BLOCK_REASON: &str = "Gate failed";

/// Default stop message when a gate supplies none.
pub const DEFAULT_STOP_MESSAGE: &str = "Gate stopped execution";

/// A gate's `on_pass` / `on_fail` action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Keep going; surface any text.
    Continue,
    /// Terminate with a block decision.
    Block,
    /// Terminate and ask the host to stop.
    Stop,
    /// Keep going and run the named gate afterwards.
    Chain(String),
}

impl Action {
    /// Terminal verb spellings.
    pub const VERBS: [&'static str; 3] = ["CONTINUE", "BLOCK", "STOP"];

    /// Parse an action string. Anything that is not a verb names a gate.
    pub fn parse(action: &str) -> Self {
        match action {
            "CONTINUE" => Action::Continue,
            "BLOCK" => Action::Block,
            "STOP" => Action::Stop,
            other => Action::Chain(other.to_string()),
        }
    }

    /// Whether `action` is one of the terminal verbs.
    pub fn is_verb(action: &str) -> bool {
        Self::VERBS.contains(&action)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Continue => write!(f, "CONTINUE"),
            Action::Block => write!(f, "BLOCK"),
            Action::Stop => write!(f, "STOP"),
            Action::Chain(gate) => write!(f, "{}", gate),
        }
    }
}

/// What the dispatcher should do after a gate ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionEffect {
    /// Continue with the remaining queue.
    Continue {
        /// Text to append to the accumulation buffer.
        context: Option<String>,
    },
    /// Terminate with a block.
    Block {
        /// Reason surfaced to the host.
        reason: String,
    },
    /// Terminate with a stop.
    Stop {
        /// Message surfaced to the host.
        message: String,
    },
    /// Continue and enqueue another gate.
    Chain {
        /// Text to append to the accumulation buffer.
        context: Option<String>,
        /// Gate to append to the queue.
        gate: String,
    },
}

/// Resolve an action against the result the gate produced.
///
/// Pure: the same action and result always yield the same effect.
pub fn resolve_action(action: &Action, result: &GateResult) -> ActionEffect {
    match action {
        Action::Continue => ActionEffect::Continue {
            context: result.additional_context.clone(),
        },
        Action::Block => ActionEffect::Block {
            reason: non_empty(&result.reason).unwrap_or_else(|| DEFAULT_BLOCK_REASON.to_string()),
        },
        Action::Stop => ActionEffect::Stop {
            message: non_empty(&result.message)
                .unwrap_or_else(|| DEFAULT_STOP_MESSAGE.to_string()),
        },
        Action::Chain(gate) => ActionEffect::Chain {
            context: result.additional_context.clone(),
            gate: gate.clone(),
        },
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}

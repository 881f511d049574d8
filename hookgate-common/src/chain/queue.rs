//! Bounded work queue for gate chains.

use std::collections::VecDeque;

/// Maximum number of gates executed in one dispatch.
pub const MAX_GATES_PER_DISPATCH: usize = 10;

/// The next step pulled from a [`GateQueue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueStep {
    /// Run the named gate.
    Gate(String),
    /// The execution budget is spent while work remains.
    Exhausted,
}

/// Ordered queue of gate names with an execution counter.
///
/// Chained gates are pushed to the back. Once [`MAX_GATES_PER_DISPATCH`]
/// gates have been recorded as executed, the next pull reports
/// [`QueueStep::Exhausted`] instead of yielding another name, so a cyclic
/// chain always terminates.
#[derive(Debug, Clone)]
pub struct GateQueue {
    pending: VecDeque<String>,
    executed: usize,
    limit: usize,
}

impl GateQueue {
    /// Create a queue seeded with a hook rule's gate list.
    pub fn new<I, S>(gates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_limit(gates, MAX_GATES_PER_DISPATCH)
    }

    /// Create a queue with a custom execution limit.
    pub fn with_limit<I, S>(gates: I, limit: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pending: gates.into_iter().map(Into::into).collect(),
            executed: 0,
            limit,
        }
    }

    /// Pull the next step, or `None` when the queue is drained.
    pub fn next_step(&mut self) -> Option<QueueStep> {
        if self.pending.is_empty() {
            return None;
        }
        if self.executed >= self.limit {
            return Some(QueueStep::Exhausted);
        }
        self.pending.pop_front().map(QueueStep::Gate)
    }

    /// Count one gate execution. Skipped (undefined) gates are not counted.
    pub fn record_execution(&mut self) {
        self.executed += 1;
    }

    /// Append a chained gate.
    pub fn push(&mut self, gate: impl Into<String>) {
        self.pending.push_back(gate.into());
    }

    /// Number of gates executed so far.
    pub fn executed(&self) -> usize {
        self.executed
    }

    /// The execution limit.
    pub fn limit(&self) -> usize {
        self.limit
    }
}

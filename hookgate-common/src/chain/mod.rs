//! Action resolution and the bounded gate chain queue.

mod action;
mod queue;

pub use action::{
    resolve_action, Action, ActionEffect, DEFAULT_BLOCK_REASON, DEFAULT_STOP_MESSAGE,
};
pub use queue::{GateQueue, QueueStep, MAX_GATES_PER_DISPATCH};

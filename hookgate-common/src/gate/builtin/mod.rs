//! In-process gates selected by name.
//!
//! A gate definition without a `command` is resolved through the
//! [`GateRegistry`]. Unknown names are a load error, not a silent pass.

mod commands;
mod plan_compliance;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::HookgateError;
use crate::types::{GateResult, HookInput};

pub use commands::CommandsGate;
pub use plan_compliance::PlanComplianceGate;

/// A check implemented inside the binary.
#[async_trait]
pub trait BuiltinGate: Send + Sync {
    /// The name configuration refers to this gate by.
    fn name(&self) -> &'static str;

    /// Inspect the event and produce a result.
    async fn check(&self, input: &HookInput) -> Result<GateResult, HookgateError>;
}

/// Maps gate names to built-in implementations.
#[derive(Clone)]
pub struct GateRegistry {
    gates: HashMap<&'static str, Arc<dyn BuiltinGate>>,
}

impl std::fmt::Debug for GateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateRegistry")
            .field("gates", &self.names())
            .finish()
    }
}

impl Default for GateRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl GateRegistry {
    /// An empty registry.
    pub fn empty() -> Self {
        Self {
            gates: HashMap::new(),
        }
    }

    /// A registry holding every shipped built-in gate.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register(PlanComplianceGate);
        registry.register(CommandsGate);
        registry
    }

    /// Add or replace a gate.
    pub fn register<G: BuiltinGate + 'static>(&mut self, gate: G) {
        self.gates.insert(gate.name(), Arc::new(gate));
    }

    /// Whether a name resolves.
    pub fn contains(&self, name: &str) -> bool {
        self.gates.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.gates.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Resolve a name, failing with [`HookgateError::GateLoad`] on a miss.
    pub fn get(&self, name: &str) -> Result<Arc<dyn BuiltinGate>, HookgateError> {
        self.gates
            .get(name)
            .cloned()
            .ok_or_else(|| HookgateError::GateLoad {
                gate: name.to_string(),
            })
    }
}

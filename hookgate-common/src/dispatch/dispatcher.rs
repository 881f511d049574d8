//! The per-invocation orchestrator.
//!
//! One dispatch runs these steps in order:
//! 1. best-effort session update
//! 2. load configuration and pick the rule for the event (absent: no-op)
//! 3. allow-list filter (rejected: no-op)
//! 4. context injection
//! 5. the gate loop over a bounded queue
//!
//! Gates run strictly one after another.

use std::path::PathBuf;

use crate::chain::{resolve_action, ActionEffect, GateQueue, QueueStep};
use crate::config::ConfigLoader;
use crate::context::ContextResolver;
use crate::error::HookgateError;
use crate::gate::{execute_gate, GateRegistry};
use crate::paths;
use crate::session::SessionStore;
use crate::types::{HookInput, HookType};

use super::filter::should_process_hook;
use super::result::DispatchResult;
use super::session::update_session_state;

/// Wires configuration, context, gates and session together.
#[derive(Debug, Clone)]
pub struct GateDispatcher {
    loader: ConfigLoader,
    resolver: ContextResolver,
    registry: GateRegistry,
}

impl Default for GateDispatcher {
    fn default() -> Self {
        Self::from_env()
    }
}

impl GateDispatcher {
    /// Create a dispatcher for an explicit plugin root.
    pub fn new(plugin_root: Option<PathBuf>) -> Self {
        Self {
            loader: ConfigLoader::new(plugin_root.clone()),
            resolver: ContextResolver::new(plugin_root),
            registry: GateRegistry::with_builtins(),
        }
    }

    /// Create a dispatcher whose plugin root comes from the environment.
    pub fn from_env() -> Self {
        Self::new(paths::plugin_root())
    }

    /// Replace the built-in gate registry.
    pub fn with_registry(mut self, registry: GateRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Handle one event.
    ///
    /// Configuration and gate-loading failures abort with an error. Missing
    /// configuration, a missing rule, an unknown event kind and a filtered
    /// event all return the empty result.
    pub async fn dispatch(&self, input: &HookInput) -> Result<DispatchResult, HookgateError> {
        update_session_state(input);

        let Some(loaded) = self.loader.load(input.cwd())? else {
            return Ok(DispatchResult::empty());
        };
        let config = loaded.config;

        let Some(hook_type) = input.hook_type() else {
            tracing::debug!("Ignoring unknown hook event '{}'", input.hook_event_name);
            return Ok(DispatchResult::empty());
        };
        let Some(rule) = config.hook(hook_type.as_str()) else {
            tracing::debug!("No rule for {}", hook_type);
            return Ok(DispatchResult::empty());
        };

        if !should_process_hook(hook_type, rule, input) {
            tracing::debug!("{} filtered out by allow-list", hook_type);
            return Ok(DispatchResult::empty());
        }

        let active_scope = self.active_scope(hook_type, input);
        let mut context = self
            .resolver
            .resolve(hook_type, input, active_scope.as_deref())
            .unwrap_or_default();

        let mut queue = GateQueue::new(rule.gate_names().iter().cloned());
        while let Some(step) = queue.next_step() {
            let name = match step {
                QueueStep::Gate(name) => name,
                QueueStep::Exhausted => {
                    tracing::warn!(
                        executed = queue.executed(),
                        "Gate chain depth exceeded for {}",
                        hook_type
                    );
                    return Ok(DispatchResult {
                        context,
                        block_reason: Some(format!(
                            "Exceeded max gate chain depth ({}). Check for circular references.",
                            queue.limit()
                        )),
                        stop_message: None,
                    });
                }
            };

            // Validation rejects undefined names, so a loaded config never takes this branch.
            let Some(gate) = config.gate(&name) else {
                tracing::warn!("Gate '{}' not defined, skipping", name);
                append_line(
                    &mut context,
                    &format!("Warning: Gate '{}' not defined, skipping", name),
                );
                continue;
            };

            queue.record_execution();
            let outcome = execute_gate(&name, gate, input, &self.registry).await?;
            let action = gate.action_for(outcome.passed);
            tracing::debug!(
                gate = %name,
                passed = outcome.passed,
                action = %action,
                "Gate executed"
            );

            match resolve_action(&action, &outcome.result) {
                ActionEffect::Continue { context: text } => {
                    append_text(&mut context, text);
                }
                ActionEffect::Chain { context: text, gate } => {
                    append_text(&mut context, text);
                    queue.push(gate);
                }
                ActionEffect::Block { reason } => {
                    return Ok(DispatchResult {
                        context,
                        block_reason: Some(reason),
                        stop_message: None,
                    });
                }
                ActionEffect::Stop { message } => {
                    return Ok(DispatchResult {
                        context,
                        block_reason: None,
                        stop_message: Some(message),
                    });
                }
            }
        }

        Ok(DispatchResult {
            context,
            ..Default::default()
        })
    }

    /// The active command, else the active skill; only read for SubagentStop.
    fn active_scope(&self, hook_type: HookType, input: &HookInput) -> Option<String> {
        if hook_type != HookType::SubagentStop {
            return None;
        }
        let store = SessionStore::new(input.cwd());
        if !store.exists() {
            return None;
        }
        match store.load() {
            Ok(state) => state.active_command.or(state.active_skill),
            Err(e) => {
                tracing::warn!(
                    cwd = %input.cwd().display(),
                    error = %e,
                    "Failed to read session state"
                );
                None
            }
        }
    }
}

fn append_text(buffer: &mut String, text: Option<String>) {
    if let Some(text) = text.filter(|t| !t.is_empty()) {
        append_line(buffer, &text);
    }
}

fn append_line(buffer: &mut String, line: &str) {
    if !buffer.is_empty() {
        buffer.push('\n');
    }
    buffer.push_str(line);
}

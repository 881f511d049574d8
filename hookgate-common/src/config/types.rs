//! Typed shape of `gates.json`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::chain::Action;

/// Default shell gate timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// A whole configuration layer.
///
/// Hook rules are keyed by raw strings so that unknown event kinds survive
/// parsing and are reported by validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatesConfig {
    /// Hook rules keyed by event kind.
    #[serde(default)]
    pub hooks: BTreeMap<String, HookConfig>,

    /// Gate definitions keyed by gate name.
    #[serde(default)]
    pub gates: BTreeMap<String, GateConfig>,
}

impl GatesConfig {
    /// Overlay `project` on top of `self`, field by field.
    pub fn merge(mut self, project: GatesConfig) -> GatesConfig {
        for (event, rule) in project.hooks {
            match self.hooks.get_mut(&event) {
                Some(base) => base.merge(rule),
                None => {
                    self.hooks.insert(event, rule);
                }
            }
        }
        for (name, gate) in project.gates {
            match self.gates.get_mut(&name) {
                Some(base) => base.merge(gate),
                None => {
                    self.gates.insert(name, gate);
                }
            }
        }
        self
    }

    /// Look up the rule for an event kind.
    pub fn hook(&self, event: &str) -> Option<&HookConfig> {
        self.hooks.get(event)
    }

    /// Look up a gate definition.
    pub fn gate(&self, name: &str) -> Option<&GateConfig> {
        self.gates.get(name)
    }
}

/// Per-event hook rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HookConfig {
    /// Tool names that enable processing of tool events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_tools: Option<Vec<String>>,

    /// Agent names that enable processing of SubagentStop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_agents: Option<Vec<String>>,

    /// Gates to run, in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gates: Option<Vec<String>>,
}

impl HookConfig {
    fn merge(&mut self, overlay: HookConfig) {
        if overlay.enabled_tools.is_some() {
            self.enabled_tools = overlay.enabled_tools;
        }
        if overlay.enabled_agents.is_some() {
            self.enabled_agents = overlay.enabled_agents;
        }
        if overlay.gates.is_some() {
            self.gates = overlay.gates;
        }
    }

    /// The configured gate list, empty when unset.
    pub fn gate_names(&self) -> &[String] {
        self.gates.as_deref().unwrap_or_default()
    }
}

/// A gate definition.
///
/// A definition without `command` names a built-in gate by its key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Shell command to run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Action when the gate passes (default `CONTINUE`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_pass: Option<String>,

    /// Action when the gate fails (default `BLOCK`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_fail: Option<String>,

    /// Shell timeout override in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl GateConfig {
    fn merge(&mut self, overlay: GateConfig) {
        if overlay.command.is_some() {
            self.command = overlay.command;
        }
        if overlay.on_pass.is_some() {
            self.on_pass = overlay.on_pass;
        }
        if overlay.on_fail.is_some() {
            self.on_fail = overlay.on_fail;
        }
        if overlay.timeout_ms.is_some() {
            self.timeout_ms = overlay.timeout_ms;
        }
    }

    /// The shell command, if this is a shell gate.
    pub fn shell_command(&self) -> Option<&str> {
        self.command.as_deref().filter(|c| !c.is_empty())
    }

    /// Whether this gate resolves to a built-in implementation.
    pub fn is_builtin(&self) -> bool {
        self.shell_command().is_none()
    }

    /// Effective shell timeout.
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS)
    }

    /// The action to take for the given outcome.
    pub fn action_for(&self, passed: bool) -> Action {
        let (declared, default) = if passed {
            (&self.on_pass, "CONTINUE")
        } else {
            (&self.on_fail, "BLOCK")
        };
        Action::parse(
            declared
                .as_deref()
                .filter(|a| !a.is_empty())
                .unwrap_or(default),
        )
    }
}

//! Structural invariants of a loaded configuration.

use crate::chain::Action;
use crate::error::ConfigError;
use crate::types::HookType;

use super::types::GatesConfig;

/// Check every invariant, failing on the first violation.
///
/// Checks run in a fixed order: event kinds, then gate references, then
/// actions.
pub fn validate_config(config: &GatesConfig) -> Result<(), ConfigError> {
    for event in config.hooks.keys() {
        if event.parse::<HookType>().is_err() {
            return Err(ConfigError::UnknownHookEvent {
                event: event.clone(),
                known: HookType::known_names(),
            });
        }
    }

    for (hook, rule) in &config.hooks {
        for gate in rule.gate_names() {
            if !config.gates.contains_key(gate) {
                return Err(ConfigError::UndefinedGate {
                    hook: hook.clone(),
                    gate: gate.clone(),
                });
            }
        }
    }

    for (name, gate) in &config.gates {
        for action in [&gate.on_pass, &gate.on_fail].into_iter().flatten() {
            if action.is_empty() || Action::is_verb(action) {
                continue;
            }
            if !config.gates.contains_key(action) {
                return Err(ConfigError::InvalidAction {
                    gate: name.clone(),
                    action: action.clone(),
                });
            }
        }
    }

    Ok(())
}

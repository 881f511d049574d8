//! Allow-list filtering of events against a hook rule.

use crate::config::HookConfig;
use crate::types::{HookInput, HookType};

/// Whether the rule applies to this event.
///
/// Tool events must name a tool in a non-empty `enabled_tools`; SubagentStop
/// must name an agent in a non-empty `enabled_agents`. Every other event,
/// and every rule without the relevant list, passes.
pub fn should_process_hook(hook_type: HookType, rule: &HookConfig, input: &HookInput) -> bool {
    let (allowed, candidate) = if hook_type.is_tool_event() {
        (&rule.enabled_tools, input.tool_name.as_deref())
    } else if hook_type == HookType::SubagentStop {
        (&rule.enabled_agents, input.agent_identifier())
    } else {
        return true;
    };

    match allowed.as_deref() {
        Some(list) if !list.is_empty() => {
            let candidate = candidate.unwrap_or_default();
            list.iter().any(|name| name == candidate)
        }
        _ => true,
    }
}

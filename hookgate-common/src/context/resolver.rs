//! Maps an event to its context file and reads it.

use std::path::{Path, PathBuf};

use crate::types::{HookInput, HookType};

use super::discovery::{discover_agent_context_file, discover_context_file, ContextRoots};

/// Stage used for agent-scoped lookups.
const AGENT_STAGE: &str = "end";

/// The logical `(name, stage)` an event maps to.
///
/// Returns `None` for SubagentStop (which uses the agent-scoped search) and
/// for events missing the field their name comes from.
pub fn context_key(hook_type: HookType, input: &HookInput) -> Option<(String, &'static str)> {
    let (name, stage) = match hook_type {
        HookType::SlashCommandStart => (command_name(input)?, "start"),
        HookType::SlashCommandEnd => (command_name(input)?, "end"),
        HookType::SkillStart => (input.skill.clone()?, "start"),
        HookType::SkillEnd => (input.skill.clone()?, "end"),
        HookType::PreToolUse => (input.tool_name.as_deref()?.to_lowercase(), "pre"),
        HookType::PostToolUse => (input.tool_name.as_deref()?.to_lowercase(), "post"),
        HookType::UserPromptSubmit => ("prompt".to_string(), "submit"),
        HookType::SessionStart => ("session".to_string(), "start"),
        HookType::SessionEnd => ("session".to_string(), "end"),
        HookType::Notification => ("notification".to_string(), "receive"),
        HookType::SubagentStop => return None,
    };
    (!name.is_empty()).then_some((name, stage))
}

fn command_name(input: &HookInput) -> Option<String> {
    let command = input.command.as_deref()?;
    Some(command.trim_start_matches('/').to_string())
}

/// Resolves and reads the context file for an event.
#[derive(Debug, Clone)]
pub struct ContextResolver {
    plugin_root: Option<PathBuf>,
}

impl ContextResolver {
    /// Create a resolver with an optional plugin root.
    pub fn new(plugin_root: Option<PathBuf>) -> Self {
        Self { plugin_root }
    }

    /// Find the context file for an event without reading it.
    ///
    /// `active_scope` is the session's active command or skill, used only
    /// for SubagentStop.
    pub fn discover(
        &self,
        hook_type: HookType,
        input: &HookInput,
        active_scope: Option<&str>,
    ) -> Option<PathBuf> {
        let roots = ContextRoots::new(input.cwd(), self.plugin_root.as_deref());

        if hook_type == HookType::SubagentStop {
            let agent = input.agent_identifier()?;
            return discover_agent_context_file(&roots, agent, active_scope, AGENT_STAGE);
        }

        let (name, stage) = context_key(hook_type, input)?;
        discover_context_file(&roots, &name, stage)
    }

    /// Find and read the context file for an event.
    ///
    /// A file that exists but cannot be read is logged and treated as
    /// absent.
    pub fn resolve(
        &self,
        hook_type: HookType,
        input: &HookInput,
        active_scope: Option<&str>,
    ) -> Option<String> {
        let path = self.discover(hook_type, input, active_scope)?;
        read_context(&path)
    }
}

fn read_context(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            tracing::debug!("Injecting context from {}", path.display());
            Some(content)
        }
        Err(e) => {
            tracing::warn!("Failed to read context file {}: {}", path.display(), e);
            None
        }
    }
}

//! Hook input: the single event description read from stdin.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::common::HookType;

/// One host lifecycle event.
///
/// Only `hook_event_name` and `cwd` are required; every other field is
/// specific to some event kinds and absent otherwise. Unknown fields are
/// ignored so newer hosts can add data without breaking dispatch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HookInput {
    /// The hook event name (kept as a string so unknown kinds are a no-op).
    pub hook_event_name: String,

    /// Working directory of the host session.
    pub cwd: PathBuf,

    /// Host session identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Tool name for PreToolUse/PostToolUse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,

    /// File touched by the tool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,

    /// Raw tool input parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_input: Option<serde_json::Value>,

    /// Agent identifier for SubagentStop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,

    /// Secondary agent identifier, used when `agent_name` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subagent_name: Option<String>,

    /// Free-text agent output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// User prompt text for UserPromptSubmit.
    #[serde(default, alias = "prompt", skip_serializing_if = "Option::is_none")]
    pub user_message: Option<String>,

    /// Slash command name for SlashCommandStart/End.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Skill name for SkillStart/End.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
}

impl HookInput {
    /// Create an input with just the required fields.
    pub fn new(hook_event_name: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            hook_event_name: hook_event_name.into(),
            cwd: cwd.into(),
            ..Default::default()
        }
    }

    /// The parsed event kind, or `None` for kinds outside the known set.
    pub fn hook_type(&self) -> Option<HookType> {
        self.hook_event_name.parse().ok()
    }

    /// Working directory as a path.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Agent identifier, falling back to `subagent_name` when `agent_name` is absent or empty.
    pub fn agent_identifier(&self) -> Option<&str> {
        fn non_empty(name: &Option<String>) -> Option<&str> {
            name.as_deref().filter(|n| !n.is_empty())
        }
        non_empty(&self.agent_name).or_else(|| non_empty(&self.subagent_name))
    }

    /// File edited by the tool, falling back to `tool_input.file_path`.
    pub fn edited_file(&self) -> Option<&str> {
        self.file_path
            .as_deref()
            .or_else(|| {
                self.tool_input
                    .as_ref()
                    .and_then(|input| input.get("file_path"))
                    .and_then(|v| v.as_str())
            })
            .filter(|path| !path.is_empty())
    }
}

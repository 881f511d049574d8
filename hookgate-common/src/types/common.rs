//! Event kinds shared by configuration, inputs and context resolution.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of hook event kinds hookgate understands.
///
/// Configuration keyed by anything else is rejected at validation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookType {
    /// Before tool execution.
    PreToolUse,
    /// After a tool completes.
    PostToolUse,
    /// A sub-agent finished.
    SubagentStop,
    /// User submits a prompt.
    UserPromptSubmit,
    /// A slash command begins.
    SlashCommandStart,
    /// A slash command ends.
    SlashCommandEnd,
    /// A skill begins.
    SkillStart,
    /// A skill ends.
    SkillEnd,
    /// Session begins or resumes.
    SessionStart,
    /// Session terminates.
    SessionEnd,
    /// The host sends a notification.
    Notification,
}

impl HookType {
    /// Every known event kind, in declaration order.
    pub const ALL: [HookType; 11] = [
        HookType::PreToolUse,
        HookType::PostToolUse,
        HookType::SubagentStop,
        HookType::UserPromptSubmit,
        HookType::SlashCommandStart,
        HookType::SlashCommandEnd,
        HookType::SkillStart,
        HookType::SkillEnd,
        HookType::SessionStart,
        HookType::SessionEnd,
        HookType::Notification,
    ];

    /// The wire name of this event kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            HookType::PreToolUse => "PreToolUse",
            HookType::PostToolUse => "PostToolUse",
            HookType::SubagentStop => "SubagentStop",
            HookType::UserPromptSubmit => "UserPromptSubmit",
            HookType::SlashCommandStart => "SlashCommandStart",
            HookType::SlashCommandEnd => "SlashCommandEnd",
            HookType::SkillStart => "SkillStart",
            HookType::SkillEnd => "SkillEnd",
            HookType::SessionStart => "SessionStart",
            HookType::SessionEnd => "SessionEnd",
            HookType::Notification => "Notification",
        }
    }

    /// Comma-separated list of all known names, for error messages.
    pub fn known_names() -> String {
        Self::ALL
            .iter()
            .map(HookType::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Whether this event reports tool usage.
    pub fn is_tool_event(&self) -> bool {
        matches!(self, HookType::PreToolUse | HookType::PostToolUse)
    }
}

impl std::fmt::Display for HookType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HookType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_type_serialization() {
        let json = serde_json::to_string(&HookType::SlashCommandStart).unwrap();
        assert_eq!(json, "\"SlashCommandStart\"");
    }

    #[test]
    fn test_hook_type_round_trips_through_from_str() {
        for kind in HookType::ALL {
            assert_eq!(kind.as_str().parse::<HookType>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        assert!("Stop".parse::<HookType>().is_err());
        assert!("posttooluse".parse::<HookType>().is_err());
    }

    #[test]
    fn test_known_names_lists_every_kind() {
        let names = HookType::known_names();
        assert!(names.starts_with("PreToolUse, PostToolUse"));
        assert!(names.ends_with("Notification"));
    }
}

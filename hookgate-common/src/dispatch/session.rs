//! Best-effort session bookkeeping performed before each dispatch.

use std::path::Path;

use serde_json::Value;

use crate::error::SessionError;
use crate::session::SessionStore;
use crate::types::{HookInput, HookType};

/// Record what the event tells us about the session.
///
/// Only slash command, skill and PostToolUse events touch the record.
/// Failures are logged with the event and working directory and never
/// propagate.
pub fn update_session_state(input: &HookInput) {
    let Some(hook_type) = input.hook_type() else {
        return;
    };
    let store = SessionStore::new(input.cwd());

    if let Err(e) = apply_event(&store, hook_type, input) {
        tracing::warn!(
            hook_event = %hook_type,
            cwd = %input.cwd().display(),
            error = %e,
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "Session state update failed"
        );
    }
}

fn apply_event(
    store: &SessionStore,
    hook_type: HookType,
    input: &HookInput,
) -> Result<(), SessionError> {
    match hook_type {
        HookType::SlashCommandStart => {
            if let Some(command) = input.command.as_deref() {
                store.set("active_command", Value::from(command))?;
            }
        }
        HookType::SlashCommandEnd => store.set("active_command", Value::Null)?,
        HookType::SkillStart => {
            if let Some(skill) = input.skill.as_deref() {
                store.set("active_skill", Value::from(skill))?;
            }
        }
        HookType::SkillEnd => store.set("active_skill", Value::Null)?,
        HookType::PostToolUse => {
            if let Some(file) = input.edited_file() {
                store.update(|state| {
                    state.append("edited_files", file)?;
                    if let Some(ext) = file_extension(file) {
                        state.append("file_extensions", &ext)?;
                    }
                    Ok(())
                })?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Lowercase extension of a path, `None` when it has none.
pub fn file_extension(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tracing_test::traced_test;

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("src/main.RS").as_deref(), Some("rs"));
        assert_eq!(file_extension("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(file_extension("README"), None);
        assert_eq!(file_extension("dir.d/Makefile"), None);
    }

    #[test]
    fn test_slash_command_lifecycle() {
        let dir = TempDir::new().unwrap();
        let mut input = HookInput::new("SlashCommandStart", dir.path());
        input.command = Some("/execute".to_string());
        update_session_state(&input);

        let store = SessionStore::new(dir.path());
        assert_eq!(
            store.load().unwrap().active_command.as_deref(),
            Some("/execute")
        );

        update_session_state(&HookInput::new("SlashCommandEnd", dir.path()));
        assert!(store.load().unwrap().active_command.is_none());
    }

    #[test]
    fn test_skill_lifecycle() {
        let dir = TempDir::new().unwrap();
        let mut input = HookInput::new("SkillStart", dir.path());
        input.skill = Some("tdd".to_string());
        update_session_state(&input);

        let store = SessionStore::new(dir.path());
        assert_eq!(store.load().unwrap().active_skill.as_deref(), Some("tdd"));

        update_session_state(&HookInput::new("SkillEnd", dir.path()));
        assert!(store.load().unwrap().active_skill.is_none());
    }

    #[test]
    fn test_post_tool_use_records_edits() {
        let dir = TempDir::new().unwrap();
        for path in ["src/lib.rs", "src/lib.rs", "README", "web/App.TSX"] {
            let mut input = HookInput::new("PostToolUse", dir.path());
            input.file_path = Some(path.to_string());
            update_session_state(&input);
        }

        let state = SessionStore::new(dir.path()).load().unwrap();
        assert_eq!(
            state.edited_files,
            vec!["src/lib.rs", "README", "web/App.TSX"]
        );
        assert_eq!(state.file_extensions, vec!["rs", "tsx"]);
    }

    #[test]
    fn test_other_events_leave_no_record() {
        let dir = TempDir::new().unwrap();
        let mut input = HookInput::new("PreToolUse", dir.path());
        input.file_path = Some("src/lib.rs".to_string());
        update_session_state(&input);
        update_session_state(&HookInput::new("Bogus", dir.path()));

        assert!(!SessionStore::new(dir.path()).exists());
    }

    #[test]
    #[traced_test]
    fn test_failure_is_logged_not_raised() {
        let dir = TempDir::new().unwrap();
        // A file where the session directory should be makes every update fail
        std::fs::create_dir_all(dir.path().join(".claude")).unwrap();
        std::fs::write(dir.path().join(".claude/session"), "blocker").unwrap();

        update_session_state(&HookInput::new("SkillEnd", dir.path()));
        assert!(logs_contain("Session state update failed"));
    }
}

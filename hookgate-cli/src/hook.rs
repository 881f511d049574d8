//! Hook mode: one JSON event in, at most one JSON decision out.

use hookgate_common::types::{HookInput, HookOutput};
use hookgate_common::GateDispatcher;

/// Exit code for malformed input or a fatal dispatch error.
pub const ERROR_EXIT_CODE: i32 = 1;

/// What hook mode should print and exit with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookRun {
    /// Process exit code.
    pub exit_code: i32,
    /// Decision JSON for stdout, if anything should be written.
    pub stdout: Option<String>,
    /// Error JSON for stderr on malformed input or a fatal error.
    pub stderr: Option<String>,
}

impl HookRun {
    fn silent() -> Self {
        Self {
            exit_code: 0,
            stdout: None,
            stderr: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            exit_code: ERROR_EXIT_CODE,
            stdout: None,
            stderr: serde_json::to_string(&HookOutput::error(message)).ok(),
        }
    }
}

/// Process raw stdin text.
///
/// Empty input and events missing `hook_event_name` or `cwd` exit quietly.
/// Malformed JSON and fatal dispatch errors produce an error object for
/// stderr; stdout only ever carries a decision.
pub async fn run_hook(raw: &str, dispatcher: &GateDispatcher) -> HookRun {
    let raw = raw.trim();
    if raw.is_empty() {
        tracing::warn!("no input provided");
        return HookRun::silent();
    }

    tracing::debug!("Input: {}", raw);

    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!("Invalid JSON input: {}", e);
            return HookRun::error("Invalid JSON input");
        }
    };

    if !has_required_fields(&value) {
        tracing::debug!("Missing hook_event_name or cwd, nothing to do");
        return HookRun::silent();
    }

    let input: HookInput = match serde_json::from_value(value) {
        Ok(input) => input,
        Err(e) => {
            tracing::error!("Invalid hook input: {}", e);
            return HookRun::error("Invalid JSON input");
        }
    };

    match dispatcher.dispatch(&input).await {
        Ok(result) => {
            tracing::debug!(
                hook = %input.hook_event_name,
                terminal = result.is_terminal(),
                "Hook processed"
            );
            let output = result.into_output();
            if output.is_empty() {
                return HookRun::silent();
            }
            match serde_json::to_string(&output) {
                Ok(json) => HookRun {
                    exit_code: 0,
                    stdout: Some(json),
                    stderr: None,
                },
                Err(e) => HookRun::error(format!("Unexpected error: {}", e)),
            }
        }
        Err(e) => {
            tracing::error!("{}", e);
            HookRun::error(format!("Unexpected error: {}", e))
        }
    }
}

fn has_required_fields(value: &serde_json::Value) -> bool {
    let present = |key: &str| {
        value
            .get(key)
            .and_then(|v| v.as_str())
            .is_some_and(|s| !s.is_empty())
    };
    present("hook_event_name") && present("cwd")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn dispatcher() -> GateDispatcher {
        GateDispatcher::new(None)
    }

    #[tokio::test]
    async fn test_empty_input_is_silent() {
        assert_eq!(run_hook("  \n", &dispatcher()).await, HookRun::silent());
    }

    #[tokio::test]
    async fn test_missing_fields_are_silent() {
        let run = run_hook(r#"{"hook_event_name": "PostToolUse"}"#, &dispatcher()).await;
        assert_eq!(run, HookRun::silent());

        let run = run_hook(r#"{"cwd": "/tmp"}"#, &dispatcher()).await;
        assert_eq!(run, HookRun::silent());
    }

    #[tokio::test]
    async fn test_malformed_json_is_error_object() {
        let run = run_hook("{not json", &dispatcher()).await;
        assert_eq!(run.exit_code, ERROR_EXIT_CODE);
        assert!(run.stdout.is_none());
        assert_eq!(
            run.stderr.as_deref(),
            Some(r#"{"continue":false,"message":"Invalid JSON input"}"#)
        );
    }

    #[tokio::test]
    async fn test_decision_is_written() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("gates.json"),
            r#"{"hooks": {"PostToolUse": {"gates": ["a"]}}, "gates": {"a": {"command": "exit 1"}}}"#,
        )
        .unwrap();
        let raw = serde_json::json!({
            "hook_event_name": "PostToolUse",
            "cwd": dir.path(),
            "tool_name": "Edit"
        })
        .to_string();

        let run = run_hook(&raw, &dispatcher()).await;
        assert_eq!(run.exit_code, 0);
        assert!(run.stderr.is_none());
        assert_eq!(
            run.stdout.as_deref(),
            Some(r#"{"decision":"block","reason":"Gate failed"}"#)
        );
    }

    #[tokio::test]
    async fn test_config_error_is_fatal() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("gates.json"), r#"{"hooks": {"Bogus": {}}}"#).unwrap();
        let raw = serde_json::json!({
            "hook_event_name": "PostToolUse",
            "cwd": dir.path()
        })
        .to_string();

        let run = run_hook(&raw, &dispatcher()).await;
        assert_eq!(run.exit_code, ERROR_EXIT_CODE);
        assert!(run.stdout.is_none());
        assert!(run.stderr.unwrap().contains("Unknown hook event: Bogus"));
    }
}

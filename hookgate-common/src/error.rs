//! Error types for the hookgate crate.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for hookgate operations.
///
/// Only configuration and gate-loading failures abort a dispatch. Session
/// failures are caught by the dispatcher and logged; shell timeouts are
/// folded into a failed gate outcome and never reach this type.
#[derive(Debug, Error)]
pub enum HookgateError {
    /// Configuration could not be loaded or violates an invariant.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A gate without a command names no known built-in implementation.
    #[error("Failed to load built-in gate '{gate}': no implementation registered")]
    GateLoad {
        /// The gate name that could not be resolved.
        gate: String,
    },
}

/// Errors raised while loading or validating `gates.json`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file exists but could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        /// The file that failed to read.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// A config file is not valid JSON for the expected shape.
    #[error("failed to parse '{}': {source}", path.display())]
    Parse {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// A hook rule is keyed by an event kind outside the known set.
    #[error("Unknown hook event: {event}. Must be one of: {known}")]
    UnknownHookEvent {
        /// The offending key.
        event: String,
        /// Comma-separated list of accepted event kinds.
        known: String,
    },

    /// A hook rule lists a gate that has no definition.
    #[error("Hook '{hook}' references undefined gate '{gate}'")]
    UndefinedGate {
        /// The hook rule key.
        hook: String,
        /// The missing gate name.
        gate: String,
    },

    /// A gate action is neither a terminal verb nor a defined gate.
    #[error("Gate '{gate}' action '{action}' is not CONTINUE/BLOCK/STOP or valid gate name")]
    InvalidAction {
        /// The gate declaring the action.
        gate: String,
        /// The offending action string.
        action: String,
    },
}

/// Errors from the file-backed session record.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading, writing or locking the session file failed.
    #[error("session IO error at '{}': {source}", path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// The session file holds malformed JSON.
    #[error("session JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The key is not a field of the session record.
    #[error("unknown session key: {0}")]
    UnknownKey(String),

    /// `append`/`contains` was used on a field that is not a list.
    #[error("session key '{0}' is not an array")]
    NotAnArray(String),

    /// The value does not fit the field's type.
    #[error("invalid value for session key '{key}': {reason}")]
    InvalidValue {
        /// The field being written.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl SessionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SessionError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_hook_event_message() {
        let err = ConfigError::UnknownHookEvent {
            event: "Bogus".to_string(),
            known: "PostToolUse, SubagentStop".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown hook event: Bogus. Must be one of: PostToolUse, SubagentStop"
        );
    }

    #[test]
    fn test_config_error_wraps_into_hookgate_error() {
        let err: HookgateError = ConfigError::UndefinedGate {
            hook: "PostToolUse".to_string(),
            gate: "lint".to_string(),
        }
        .into();
        assert!(matches!(err, HookgateError::Config(_)));
        assert!(err.to_string().contains("undefined gate 'lint'"));
    }

    #[test]
    fn test_gate_load_message_names_gate() {
        let err = HookgateError::GateLoad {
            gate: "missing".to_string(),
        };
        assert!(err.to_string().contains("'missing'"));
    }
}

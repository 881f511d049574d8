//! Hookgate Session - Show or clear the per-project session record.

use std::path::Path;

use hookgate_common::{SessionError, SessionStore};

/// The record as pretty JSON, or `None` when nothing has been written.
pub fn show_session(cwd: &Path) -> Result<Option<String>, SessionError> {
    let store = SessionStore::new(cwd);
    if !store.exists() {
        return Ok(None);
    }
    let state = store.load()?;
    Ok(Some(serde_json::to_string_pretty(&state)?))
}

/// Run `session show`.
pub fn run_show(cwd: &Path) -> i32 {
    match show_session(cwd) {
        Ok(Some(json)) => {
            println!("{}", json);
            0
        }
        Ok(None) => {
            println!("No session state for {}", cwd.display());
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

/// Run `session clear`.
pub fn run_clear(cwd: &Path) -> i32 {
    match SessionStore::new(cwd).clear() {
        Ok(()) => {
            println!("Session state cleared");
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_show_without_record() {
        let dir = TempDir::new().unwrap();
        assert!(show_session(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_show_and_clear() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());
        store.append("edited_files", "src/lib.rs").unwrap();

        let json = show_session(dir.path()).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["edited_files"][0], "src/lib.rs");

        assert_eq!(run_clear(dir.path()), 0);
        assert!(show_session(dir.path()).unwrap().is_none());
    }
}

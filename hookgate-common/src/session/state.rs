//! Session record persistence with file locking.
//!
//! One record per working directory, stored as pretty JSON at
//! `<cwd>/.claude/session/state.json`. Every read-modify-write holds an
//! exclusive lock on a sibling `state.json.lock`. Separate updates from
//! concurrent processes are still last-write-wins.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SessionError;
use crate::paths;

/// Name of the session state file.
const STATE_FILE: &str = "state.json";
/// Name of the lock file for the session state.
const STATE_LOCK: &str = "state.json.lock";

/// Keys holding string lists that support `append`/`contains`.
const ARRAY_KEYS: [&str; 2] = ["edited_files", "file_extensions"];

/// Every addressable key of the record.
const KNOWN_KEYS: [&str; 7] = [
    "session_id",
    "started_at",
    "active_command",
    "active_skill",
    "edited_files",
    "file_extensions",
    "metadata",
];

/// Cross-event state for one working directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Opaque identifier, generated on creation.
    pub session_id: String,

    /// When the record was created.
    pub started_at: DateTime<Utc>,

    /// The slash command currently running.
    #[serde(default)]
    pub active_command: Option<String>,

    /// The skill currently running.
    #[serde(default)]
    pub active_skill: Option<String>,

    /// Edited file paths in first-seen order, without duplicates.
    #[serde(default)]
    pub edited_files: Vec<String>,

    /// Lowercase extensions of edited files, without duplicates.
    #[serde(default)]
    pub file_extensions: Vec<String>,

    /// Free-form values.
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

impl SessionState {
    /// A fresh record with a new identifier.
    pub fn new() -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            active_command: None,
            active_skill: None,
            edited_files: Vec::new(),
            file_extensions: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// The value of a field as JSON.
    pub fn get(&self, key: &str) -> Result<Value, SessionError> {
        check_key(key)?;
        let mut object = self.to_object()?;
        Ok(object.remove(key).unwrap_or(Value::Null))
    }

    /// Replace a field. The value must fit the field's type.
    pub fn set(&mut self, key: &str, value: Value) -> Result<(), SessionError> {
        check_key(key)?;
        let mut object = self.to_object()?;
        object.insert(key.to_string(), value);
        *self = serde_json::from_value(Value::Object(object)).map_err(|e| {
            SessionError::InvalidValue {
                key: key.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(())
    }

    /// Append to a list field unless the value is already present.
    ///
    /// Returns whether the value was added.
    pub fn append(&mut self, key: &str, value: &str) -> Result<bool, SessionError> {
        check_array_key(key)?;
        let list = match key {
            "edited_files" => &mut self.edited_files,
            _ => &mut self.file_extensions,
        };
        if list.iter().any(|existing| existing == value) {
            return Ok(false);
        }
        list.push(value.to_string());
        Ok(true)
    }

    /// Whether a list field holds the value.
    pub fn contains(&self, key: &str, value: &str) -> Result<bool, SessionError> {
        check_array_key(key)?;
        let list = match key {
            "edited_files" => &self.edited_files,
            _ => &self.file_extensions,
        };
        Ok(list.iter().any(|existing| existing == value))
    }

    fn to_object(&self) -> Result<serde_json::Map<String, Value>, SessionError> {
        match serde_json::to_value(self)? {
            Value::Object(object) => Ok(object),
            _ => Ok(serde_json::Map::new()),
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

fn check_key(key: &str) -> Result<(), SessionError> {
    if KNOWN_KEYS.contains(&key) {
        Ok(())
    } else {
        Err(SessionError::UnknownKey(key.to_string()))
    }
}

fn check_array_key(key: &str) -> Result<(), SessionError> {
    check_key(key)?;
    if ARRAY_KEYS.contains(&key) {
        Ok(())
    } else {
        Err(SessionError::NotAnArray(key.to_string()))
    }
}

/// File-backed store for the session record of one working directory.
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Directory holding the state file (`.claude/session/`).
    state_dir: PathBuf,
}

impl SessionStore {
    /// Create a store for the given working directory.
    pub fn new(cwd: &Path) -> Self {
        Self {
            state_dir: paths::session_dir(cwd),
        }
    }

    /// Path of the state file.
    pub fn state_path(&self) -> PathBuf {
        self.state_dir.join(STATE_FILE)
    }

    fn lock_path(&self) -> PathBuf {
        self.state_dir.join(STATE_LOCK)
    }

    /// Whether a record has been written.
    pub fn exists(&self) -> bool {
        self.state_path().is_file()
    }

    /// Load the record, or a fresh one if none has been written.
    pub fn load(&self) -> Result<SessionState, SessionError> {
        let _lock = self.acquire_lock()?;
        self.read()
    }

    /// Run a read-modify-write under the lock and persist the result.
    pub fn update<T, F>(&self, f: F) -> Result<T, SessionError>
    where
        F: FnOnce(&mut SessionState) -> Result<T, SessionError>,
    {
        let _lock = self.acquire_lock()?;
        let mut state = self.read()?;
        let out = f(&mut state)?;
        self.write(&state)?;
        Ok(out)
    }

    /// Read one field.
    pub fn get(&self, key: &str) -> Result<Value, SessionError> {
        self.load()?.get(key)
    }

    /// Replace one field.
    pub fn set(&self, key: &str, value: Value) -> Result<(), SessionError> {
        self.update(|state| state.set(key, value))
    }

    /// Append to a list field, skipping duplicates.
    pub fn append(&self, key: &str, value: &str) -> Result<bool, SessionError> {
        self.update(|state| state.append(key, value))
    }

    /// Whether a list field holds the value.
    pub fn contains(&self, key: &str, value: &str) -> Result<bool, SessionError> {
        self.load()?.contains(key, value)
    }

    /// Set one metadata entry.
    pub fn set_metadata(&self, key: &str, value: Value) -> Result<(), SessionError> {
        self.update(|state| {
            state.metadata.insert(key.to_string(), value);
            Ok(())
        })
    }

    /// Delete the record.
    pub fn clear(&self) -> Result<(), SessionError> {
        let state_path = self.state_path();
        let lock_path = self.lock_path();

        let lock = self.acquire_lock()?;
        if state_path.exists() {
            fs::remove_file(&state_path).map_err(|e| SessionError::io(&state_path, e))?;
            tracing::debug!("Cleared session state");
        }
        drop(lock);

        if lock_path.exists() {
            let _ = fs::remove_file(&lock_path);
        }
        Ok(())
    }

    fn read(&self) -> Result<SessionState, SessionError> {
        let state_path = self.state_path();
        if !state_path.exists() {
            return Ok(SessionState::new());
        }
        let content =
            fs::read_to_string(&state_path).map_err(|e| SessionError::io(&state_path, e))?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write(&self, state: &SessionState) -> Result<(), SessionError> {
        let state_path = self.state_path();
        let content = serde_json::to_string_pretty(state)?;
        fs::write(&state_path, content).map_err(|e| SessionError::io(&state_path, e))?;
        tracing::trace!("Saved session state");
        Ok(())
    }

    /// Acquire an exclusive lock; released when the handle drops.
    fn acquire_lock(&self) -> Result<File, SessionError> {
        fs::create_dir_all(&self.state_dir).map_err(|e| SessionError::io(&self.state_dir, e))?;

        let lock_path = self.lock_path();
        let lock_file = File::create(&lock_path).map_err(|e| SessionError::io(&lock_path, e))?;
        lock_file
            .lock_exclusive()
            .map_err(|e| SessionError::io(&lock_path, e))?;

        tracing::trace!("Acquired session state lock");
        Ok(lock_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn setup_test_store() -> (SessionStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path());
        (store, temp_dir)
    }

    #[test]
    fn test_load_nonexistent_returns_fresh_record() {
        let (store, _temp_dir) = setup_test_store();
        let state = store.load().unwrap();
        assert!(uuid::Uuid::parse_str(&state.session_id).is_ok());
        assert!(state.active_command.is_none());
        assert!(state.edited_files.is_empty());
        assert!(!store.exists());
    }

    #[test]
    fn test_set_and_get() {
        let (store, _temp_dir) = setup_test_store();
        store.set("active_command", json!("/execute")).unwrap();
        assert_eq!(store.get("active_command").unwrap(), json!("/execute"));

        store.set("active_command", Value::Null).unwrap();
        assert_eq!(store.get("active_command").unwrap(), Value::Null);
    }

    #[test]
    fn test_identifier_is_stable_across_updates() {
        let (store, _temp_dir) = setup_test_store();
        store.set("active_skill", json!("tdd")).unwrap();
        let first = store.load().unwrap().session_id;
        store.append("edited_files", "src/lib.rs").unwrap();
        assert_eq!(store.load().unwrap().session_id, first);
    }

    #[test]
    fn test_append_is_idempotent() {
        let (store, _temp_dir) = setup_test_store();
        assert!(store.append("edited_files", "a.rs").unwrap());
        assert!(store.append("edited_files", "b.rs").unwrap());
        assert!(!store.append("edited_files", "a.rs").unwrap());

        let state = store.load().unwrap();
        assert_eq!(state.edited_files, vec!["a.rs", "b.rs"]);
        assert!(store.contains("edited_files", "b.rs").unwrap());
        assert!(!store.contains("file_extensions", "rs").unwrap());
    }

    #[test]
    fn test_unknown_and_non_array_keys() {
        let (store, _temp_dir) = setup_test_store();
        assert!(matches!(
            store.get("nope"),
            Err(SessionError::UnknownKey(_))
        ));
        assert!(matches!(
            store.append("active_command", "x"),
            Err(SessionError::NotAnArray(_))
        ));
    }

    #[test]
    fn test_set_rejects_wrong_type() {
        let (store, _temp_dir) = setup_test_store();
        let err = store.set("edited_files", json!("not a list")).unwrap_err();
        assert!(matches!(err, SessionError::InvalidValue { ref key, .. } if key == "edited_files"));
    }

    #[test]
    fn test_metadata() {
        let (store, _temp_dir) = setup_test_store();
        store.set_metadata("phase", json!(2)).unwrap();
        assert_eq!(store.get("metadata").unwrap(), json!({"phase": 2}));
    }

    #[test]
    fn test_clear() {
        let (store, _temp_dir) = setup_test_store();
        store.append("edited_files", "a.rs").unwrap();
        assert!(store.exists());

        store.clear().unwrap();
        assert!(!store.exists());
        assert!(store.load().unwrap().edited_files.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_json_error() {
        let (store, _temp_dir) = setup_test_store();
        fs::create_dir_all(store.state_path().parent().unwrap()).unwrap();
        fs::write(store.state_path(), "not json").unwrap();
        assert!(matches!(store.load(), Err(SessionError::Json(_))));
    }
}

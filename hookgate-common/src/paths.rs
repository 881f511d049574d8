//! Well-known file locations for configuration, context files and session state.
//!
//! Project files live under `<cwd>/.claude/`. Plugin defaults live under the
//! plugin root, which comes from `CLAUDE_PLUGIN_ROOT` or, failing that, from
//! the location of the running binary (`<plugin-root>/bin/hookgate`).

use std::path::{Path, PathBuf};

/// Environment variable naming the plugin root directory.
pub const PLUGIN_ROOT_ENV: &str = "CLAUDE_PLUGIN_ROOT";

/// Project-level configuration directory.
pub const CLAUDE_DIR: &str = ".claude";

/// Configuration file name, used by every layer.
pub const GATES_FILE: &str = "gates.json";

/// Subdirectory of the plugin root holding the default configuration.
pub const PLUGIN_HOOKS_DIR: &str = "hooks";

/// Context directory name, under `.claude/` and under the plugin root.
pub const CONTEXT_DIR: &str = "context";

/// Session directory under `.claude/`.
pub const SESSION_DIR: &str = "session";

/// Resolve the plugin root.
///
/// Returns `None` when neither the environment variable nor the executable
/// location yields a directory; the plugin layer is then skipped.
pub fn plugin_root() -> Option<PathBuf> {
    match std::env::var(PLUGIN_ROOT_ENV) {
        Ok(root) if !root.is_empty() => Some(PathBuf::from(root)),
        _ => plugin_root_from_exe(),
    }
}

fn plugin_root_from_exe() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let root = exe.parent()?.parent()?;
    tracing::debug!("{} not set, using {}", PLUGIN_ROOT_ENV, root.display());
    Some(root.to_path_buf())
}

/// Project configuration candidates, highest priority first.
pub fn project_config_candidates(cwd: &Path) -> [PathBuf; 2] {
    [cwd.join(CLAUDE_DIR).join(GATES_FILE), cwd.join(GATES_FILE)]
}

/// Plugin default configuration path.
pub fn plugin_config_path(plugin_root: &Path) -> PathBuf {
    plugin_root.join(PLUGIN_HOOKS_DIR).join(GATES_FILE)
}

/// Project context root: `<cwd>/.claude/context`.
pub fn project_context_dir(cwd: &Path) -> PathBuf {
    cwd.join(CLAUDE_DIR).join(CONTEXT_DIR)
}

/// Plugin context root: `<plugin-root>/context`.
pub fn plugin_context_dir(plugin_root: &Path) -> PathBuf {
    plugin_root.join(CONTEXT_DIR)
}

/// Session directory: `<cwd>/.claude/session`.
pub fn session_dir(cwd: &Path) -> PathBuf {
    cwd.join(CLAUDE_DIR).join(SESSION_DIR)
}

//! Context file discovery across the project and plugin roots.
//!
//! Generic search order for a `(name, stage)` pair, under each root:
//! 1. `{name}-{stage}.md`
//! 2. `slash-command/{name}-{stage}.md`
//! 3. `slash-command/{name}/{stage}.md`
//! 4. `skill/{name}-{stage}.md`
//! 5. `skill/{name}/{stage}.md`
//!
//! All five are tried under the project root before any plugin path.

use std::path::{Path, PathBuf};

use crate::paths;

const CONTEXT_EXT: &str = "md";
const SLASH_COMMAND_DIR: &str = "slash-command";
const SKILL_DIR: &str = "skill";

/// The directories searched for context files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextRoots {
    /// `<cwd>/.claude/context`.
    pub project: PathBuf,
    /// `<plugin-root>/context`, when a plugin root is known.
    pub plugin: Option<PathBuf>,
}

impl ContextRoots {
    /// Roots for a working directory and optional plugin root.
    pub fn new(cwd: &Path, plugin_root: Option<&Path>) -> Self {
        Self {
            project: paths::project_context_dir(cwd),
            plugin: plugin_root.map(paths::plugin_context_dir),
        }
    }

    fn iter(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.project.as_path()).chain(self.plugin.as_deref())
    }
}

fn file_name(parts: &[&str]) -> String {
    format!("{}.{}", parts.join("-"), CONTEXT_EXT)
}

/// Candidate paths relative to a context root, highest priority first.
pub fn candidate_paths(name: &str, stage: &str) -> [PathBuf; 5] {
    let flat = file_name(&[name, stage]);
    let nested = file_name(&[stage]);
    [
        PathBuf::from(&flat),
        Path::new(SLASH_COMMAND_DIR).join(&flat),
        Path::new(SLASH_COMMAND_DIR).join(name).join(&nested),
        Path::new(SKILL_DIR).join(&flat),
        Path::new(SKILL_DIR).join(name).join(&nested),
    ]
}

/// Find the context file for `(name, stage)`.
pub fn discover_context_file(roots: &ContextRoots, name: &str, stage: &str) -> Option<PathBuf> {
    let candidates = candidate_paths(name, stage);
    roots.iter().find_map(|root| {
        candidates
            .iter()
            .map(|candidate| root.join(candidate))
            .find(|path| path.is_file())
    })
}

/// Drop a namespace prefix (`plugin:name` becomes `name`) and a leading `/`.
pub fn strip_namespace(name: &str) -> &str {
    let name = name.split_once(':').map_or(name, |(_, rest)| rest);
    name.trim_start_matches('/')
}

/// Find a context file scoped to an agent.
///
/// Tries `{agent}-{scope}-{stage}.md` then `{agent}-{stage}.md`, each under
/// the project root then the plugin root. Falls back to the generic search
/// keyed by `scope` (the active command or skill) when nothing agent-scoped
/// exists.
pub fn discover_agent_context_file(
    roots: &ContextRoots,
    agent: &str,
    scope: Option<&str>,
    stage: &str,
) -> Option<PathBuf> {
    let agent = strip_namespace(agent);
    if agent.is_empty() {
        return None;
    }
    let scope = scope.map(strip_namespace).filter(|s| !s.is_empty());

    let mut candidates = Vec::with_capacity(2);
    if let Some(scope) = scope {
        candidates.push(file_name(&[agent, scope, stage]));
    }
    candidates.push(file_name(&[agent, stage]));

    let scoped = candidates.iter().find_map(|candidate| {
        roots
            .iter()
            .map(|root| root.join(candidate))
            .find(|path| path.is_file())
    });

    scoped.or_else(|| scope.and_then(|scope| discover_context_file(roots, scope, stage)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "context").unwrap();
    }

    fn roots(project: &TempDir, plugin: &TempDir) -> ContextRoots {
        ContextRoots::new(project.path(), Some(plugin.path()))
    }

    #[test]
    fn test_candidate_order() {
        let candidates = candidate_paths("execute", "start");
        assert_eq!(candidates[0], PathBuf::from("execute-start.md"));
        assert_eq!(
            candidates[1],
            PathBuf::from("slash-command/execute-start.md")
        );
        assert_eq!(
            candidates[2],
            PathBuf::from("slash-command/execute/start.md")
        );
        assert_eq!(candidates[3], PathBuf::from("skill/execute-start.md"));
        assert_eq!(candidates[4], PathBuf::from("skill/execute/start.md"));
    }

    #[test]
    fn test_flat_wins_over_nested() {
        let project = TempDir::new().unwrap();
        let plugin = TempDir::new().unwrap();
        let roots = roots(&project, &plugin);
        touch(&roots.project.join("slash-command/plan/end.md"));
        touch(&roots.project.join("plan-end.md"));

        assert_eq!(
            discover_context_file(&roots, "plan", "end"),
            Some(roots.project.join("plan-end.md"))
        );
    }

    #[test]
    fn test_project_beats_plugin_even_when_less_specific() {
        let project = TempDir::new().unwrap();
        let plugin = TempDir::new().unwrap();
        let roots = roots(&project, &plugin);
        touch(&roots.plugin.clone().unwrap().join("tdd-start.md"));
        touch(&roots.project.join("skill/tdd/start.md"));

        assert_eq!(
            discover_context_file(&roots, "tdd", "start"),
            Some(roots.project.join("skill/tdd/start.md"))
        );
    }

    #[test]
    fn test_plugin_fallback_and_miss() {
        let project = TempDir::new().unwrap();
        let plugin = TempDir::new().unwrap();
        let roots = roots(&project, &plugin);
        let plugin_file = roots.plugin.clone().unwrap().join("session-start.md");
        touch(&plugin_file);

        assert_eq!(
            discover_context_file(&roots, "session", "start"),
            Some(plugin_file)
        );
        assert_eq!(discover_context_file(&roots, "session", "end"), None);
    }

    #[test]
    fn test_strip_namespace() {
        assert_eq!(
            strip_namespace("cipherpowers:code-reviewer"),
            "code-reviewer"
        );
        assert_eq!(strip_namespace("/execute"), "execute");
        assert_eq!(strip_namespace("plain"), "plain");
        assert_eq!(strip_namespace("outer:inner:name"), "inner:name");
    }

    #[test]
    fn test_agent_scoped_most_specific_first() {
        let project = TempDir::new().unwrap();
        let plugin = TempDir::new().unwrap();
        let roots = roots(&project, &plugin);
        let plugin_specific = roots
            .plugin
            .clone()
            .unwrap()
            .join("code-reviewer-execute-end.md");
        touch(&plugin_specific);
        touch(&roots.project.join("code-reviewer-end.md"));

        assert_eq!(
            discover_agent_context_file(
                &roots,
                "plugin:code-reviewer",
                Some("/execute"),
                "end"
            ),
            Some(plugin_specific)
        );
    }

    #[test]
    fn test_agent_scoped_without_scope() {
        let project = TempDir::new().unwrap();
        let plugin = TempDir::new().unwrap();
        let roots = roots(&project, &plugin);
        touch(&roots.project.join("rust-engineer-end.md"));

        assert_eq!(
            discover_agent_context_file(&roots, "rust-engineer", None, "end"),
            Some(roots.project.join("rust-engineer-end.md"))
        );
    }

    #[test]
    fn test_agent_scoped_falls_back_to_scope_context() {
        let project = TempDir::new().unwrap();
        let plugin = TempDir::new().unwrap();
        let roots = roots(&project, &plugin);
        touch(&roots.project.join("slash-command/execute/end.md"));

        assert_eq!(
            discover_agent_context_file(&roots, "rust-engineer", Some("execute"), "end"),
            Some(roots.project.join("slash-command/execute/end.md"))
        );
        assert_eq!(
            discover_agent_context_file(&roots, "rust-engineer", None, "end"),
            None
        );
    }
}

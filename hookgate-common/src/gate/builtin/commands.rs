//! Injects project commands from `CLAUDE.md` front matter on request.
//!
//! The user's prompt is scanned for canonical phrases such as
//! "run project test command". Matching is plain substring containment on
//! the lowercased prompt, so "Run project test commands" also matches.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;

use crate::error::HookgateError;
use crate::types::{GateResult, HookInput};

use super::BuiltinGate;

/// Command types in the order they are reported.
const COMMAND_TYPES: [&str; 4] = ["test", "check", "build", "run"];

static FRONT_MATTER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^---\s*\n([\s\S]*?)\n---").ok());

#[derive(Debug, Default, Deserialize)]
struct ClaudeMdFrontMatter {
    #[serde(default)]
    commands: BTreeMap<String, String>,
}

/// Answers "run project X command" prompts with the configured command.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandsGate;

/// Commands declared in `<cwd>/CLAUDE.md`, empty when missing or malformed.
pub async fn project_commands(cwd: &Path) -> BTreeMap<String, String> {
    let path = cwd.join("CLAUDE.md");
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => parse_front_matter(&content),
        Err(e) => {
            tracing::debug!("No commands from {}: {}", path.display(), e);
            BTreeMap::new()
        }
    }
}

fn parse_front_matter(content: &str) -> BTreeMap<String, String> {
    let Some(yaml) = FRONT_MATTER
        .as_ref()
        .and_then(|re| re.captures(content))
        .and_then(|caps| caps.get(1))
    else {
        return BTreeMap::new();
    };

    match serde_yaml_ng::from_str::<ClaudeMdFrontMatter>(yaml.as_str()) {
        Ok(front_matter) => front_matter.commands,
        Err(e) => {
            tracing::debug!("Ignoring malformed CLAUDE.md front matter: {}", e);
            BTreeMap::new()
        }
    }
}

/// Command types requested by the prompt, in canonical order.
pub fn requested_command_types(message: &str) -> Vec<&'static str> {
    let lower = message.to_lowercase();
    COMMAND_TYPES
        .into_iter()
        .filter(|kind| lower.contains(&format!("run project {} command", kind)))
        .collect()
}

fn render(requested: &[&str], commands: &BTreeMap<String, String>) -> String {
    let mut lines = vec!["<project_commands>".to_string()];
    for kind in requested {
        if let Some(command) = commands.get(*kind).filter(|c| !c.is_empty()) {
            lines.push(format!("  <{kind}>{command}</{kind}>"));
        }
    }
    lines.push("</project_commands>".to_string());
    lines.join("\n")
}

#[async_trait]
impl BuiltinGate for CommandsGate {
    fn name(&self) -> &'static str {
        "commands"
    }

    async fn check(&self, input: &HookInput) -> Result<GateResult, HookgateError> {
        let requested = requested_command_types(input.user_message.as_deref().unwrap_or_default());
        if requested.is_empty() {
            return Ok(GateResult::empty());
        }
        let commands = project_commands(input.cwd()).await;
        Ok(GateResult::context(render(&requested, &commands)))
    }
}

//! Hookgate List - Show hook rules and gate definitions.
//!
//! Prints two tables: one row per hook rule and one row per gate, each with
//! the layer (plugin or project) that last defined it.

use std::path::Path;

use comfy_table::{presets::UTF8_FULL, Table};
use hookgate_common::config::{ConfigLoader, ConfigSource, GateConfig, LoadedConfig};
use hookgate_common::gate::GateRegistry;

/// Maximum length for a command in table display before truncation.
const MAX_COMMAND_LENGTH: usize = 50;

/// Run the list command.
///
/// Exit code: 0 on success, 1 when the configuration is invalid.
pub fn run_list(loader: &ConfigLoader, cwd: &Path, verbose: bool) -> i32 {
    let loaded = match loader.load(cwd) {
        Ok(Some(loaded)) => loaded,
        Ok(None) => {
            println!("No gates.json found.");
            return 0;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    println!("{}", hooks_table(&loaded));
    println!();
    println!("{}", gates_table(&loaded, &GateRegistry::with_builtins(), verbose));
    println!();
    println!(
        "{} hook rule(s), {} gate(s)",
        loaded.config.hooks.len(),
        loaded.config.gates.len()
    );
    0
}

/// Table of hook rules.
pub fn hooks_table(loaded: &LoadedConfig) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Event", "Gates", "Enabled For", "Source"]);

    for (event, rule) in &loaded.config.hooks {
        let enabled = rule
            .enabled_tools
            .iter()
            .chain(rule.enabled_agents.iter())
            .flatten()
            .cloned()
            .collect::<Vec<_>>();
        let enabled = if enabled.is_empty() {
            "all".to_string()
        } else {
            enabled.join(", ")
        };
        table.add_row(vec![
            event.clone(),
            rule.gate_names().join(" → "),
            enabled,
            source_label(loaded.hook_source(event)),
        ]);
    }
    table
}

/// Table of gate definitions.
pub fn gates_table(loaded: &LoadedConfig, registry: &GateRegistry, verbose: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    let mut header = vec!["Gate", "Kind"];
    if verbose {
        header.extend(["Command", "Timeout"]);
    }
    header.extend(["On Pass", "On Fail", "Source"]);
    table.set_header(header);

    for (name, gate) in &loaded.config.gates {
        let mut row = vec![name.clone(), gate_kind(name, gate, registry)];
        if verbose {
            let command = gate
                .shell_command()
                .map(|c| truncate(c, MAX_COMMAND_LENGTH))
                .unwrap_or_default();
            let timeout = if gate.is_builtin() {
                String::new()
            } else {
                format!("{}ms", gate.timeout_ms())
            };
            row.extend([command, timeout]);
        }
        row.extend([
            gate.action_for(true).to_string(),
            gate.action_for(false).to_string(),
            source_label(loaded.gate_source(name)),
        ]);
        table.add_row(row);
    }
    table
}

fn gate_kind(name: &str, gate: &GateConfig, registry: &GateRegistry) -> String {
    if !gate.is_builtin() {
        "🐚 Shell".to_string()
    } else if registry.contains(name) {
        "📦 Built-in".to_string()
    } else {
        "⚠️ Unknown built-in".to_string()
    }
}

fn source_label(source: Option<ConfigSource>) -> String {
    match source {
        Some(ConfigSource::Plugin) => "🔌 Plugin".to_string(),
        Some(ConfigSource::Project) => "📁 Project".to_string(),
        None => String::new(),
    }
}

/// Truncate text to max characters with ellipsis.
fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

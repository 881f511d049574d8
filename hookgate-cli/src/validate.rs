//! Hookgate Validate - Check the merged configuration for a project.

use std::path::Path;

use hookgate_common::config::{ConfigLoader, LoadedConfig};
use hookgate_common::ConfigError;

/// Load and validate, returning a printable summary.
///
/// `Ok(None)` means no configuration exists in any layer.
pub fn validate_project(
    loader: &ConfigLoader,
    cwd: &Path,
) -> Result<Option<String>, ConfigError> {
    Ok(loader.load(cwd)?.map(|loaded| summarize(&loaded)))
}

fn summarize(loaded: &LoadedConfig) -> String {
    let mut lines = Vec::new();
    for layer in &loaded.layers {
        lines.push(format!("{}: {}", layer.source, layer.path.display()));
    }
    lines.push(format!(
        "Configuration valid: {} hook rule(s), {} gate(s)",
        loaded.config.hooks.len(),
        loaded.config.gates.len()
    ));
    lines.join("\n")
}

/// Run the validate command.
///
/// Exit code: 0 when valid or absent, 1 on a configuration error.
pub fn run_validate(loader: &ConfigLoader, cwd: &Path) -> i32 {
    match validate_project(loader, cwd) {
        Ok(Some(summary)) => {
            println!("{}", summary);
            0
        }
        Ok(None) => {
            println!("No gates.json found for {}", cwd.display());
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

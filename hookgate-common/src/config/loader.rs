//! Layered loading of `gates.json`.
//!
//! Two layers are consulted:
//! 1. Plugin defaults (`<plugin-root>/hooks/gates.json`) - lowest precedence
//! 2. Project overrides (`<cwd>/.claude/gates.json`, else `<cwd>/gates.json`)
//!
//! When both exist the project layer is merged over the plugin layer field
//! by field. The merged result is validated before it is returned.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::paths;

use super::types::GatesConfig;
use super::validate::validate_config;

/// Which layer a configuration file or entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Plugin defaults.
    Plugin,
    /// Project overrides.
    Project,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Plugin => write!(f, "plugin"),
            ConfigSource::Project => write!(f, "project"),
        }
    }
}

/// A configuration file that took part in a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLayer {
    /// The layer kind.
    pub source: ConfigSource,
    /// The file read.
    pub path: PathBuf,
}

/// A merged, validated configuration and where its entries came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The effective configuration.
    pub config: GatesConfig,
    /// Files read, lowest precedence first.
    pub layers: Vec<ConfigLayer>,
    hook_sources: BTreeMap<String, ConfigSource>,
    gate_sources: BTreeMap<String, ConfigSource>,
}

impl LoadedConfig {
    /// The layer that last touched a hook rule.
    pub fn hook_source(&self, event: &str) -> Option<ConfigSource> {
        self.hook_sources.get(event).copied()
    }

    /// The layer that last touched a gate definition.
    pub fn gate_source(&self, gate: &str) -> Option<ConfigSource> {
        self.gate_sources.get(gate).copied()
    }
}

/// Finds, parses, merges and validates configuration layers.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    plugin_root: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader with an explicit plugin root.
    pub fn new(plugin_root: Option<PathBuf>) -> Self {
        Self { plugin_root }
    }

    /// Create a loader whose plugin root comes from the environment.
    pub fn from_env() -> Self {
        Self::new(paths::plugin_root())
    }

    /// The project file that would be used for `cwd`, if any exists.
    pub fn project_config_path(&self, cwd: &Path) -> Option<PathBuf> {
        paths::project_config_candidates(cwd)
            .into_iter()
            .find(|path| path.is_file())
    }

    /// The plugin file that would be used, if it exists.
    pub fn plugin_config_path(&self) -> Option<PathBuf> {
        self.plugin_root
            .as_deref()
            .map(paths::plugin_config_path)
            .filter(|path| path.is_file())
    }

    /// Load the effective configuration for `cwd`.
    ///
    /// Returns `Ok(None)` when no configuration file exists in any layer.
    pub fn load(&self, cwd: &Path) -> Result<Option<LoadedConfig>, ConfigError> {
        let mut layers = Vec::new();
        let mut hook_sources = BTreeMap::new();
        let mut gate_sources = BTreeMap::new();
        let mut merged: Option<GatesConfig> = None;

        let found = [
            (ConfigSource::Plugin, self.plugin_config_path()),
            (ConfigSource::Project, self.project_config_path(cwd)),
        ];

        for (source, path) in found {
            let Some(path) = path else { continue };
            let layer = read_layer(&path)?;
            tracing::debug!("Loaded {} config from {}", source, path.display());

            for event in layer.hooks.keys() {
                hook_sources.insert(event.clone(), source);
            }
            for gate in layer.gates.keys() {
                gate_sources.insert(gate.clone(), source);
            }

            merged = Some(match merged {
                Some(base) => base.merge(layer),
                None => layer,
            });
            layers.push(ConfigLayer { source, path });
        }

        let Some(config) = merged else {
            tracing::debug!("No gates.json found for {}", cwd.display());
            return Ok(None);
        };

        validate_config(&config)?;

        Ok(Some(LoadedConfig {
            config,
            layers,
            hook_sources,
            gate_sources,
        }))
    }
}

fn read_layer(path: &Path) -> Result<GatesConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_no_config_is_none() {
        let project = TempDir::new().unwrap();
        let plugin = TempDir::new().unwrap();
        let loader = ConfigLoader::new(Some(plugin.path().to_path_buf()));
        assert!(loader.load(project.path()).unwrap().is_none());
    }

    #[test]
    fn test_claude_dir_beats_project_root() {
        let project = TempDir::new().unwrap();
        write(
            &project.path().join(".claude/gates.json"),
            r#"{"gates": {"preferred": {"command": "true"}}}"#,
        );
        write(
            &project.path().join("gates.json"),
            r#"{"gates": {"ignored": {"command": "true"}}}"#,
        );

        let loaded = ConfigLoader::new(None).load(project.path()).unwrap().unwrap();
        assert!(loaded.config.gate("preferred").is_some());
        assert!(loaded.config.gate("ignored").is_none());
        assert_eq!(loaded.layers.len(), 1);
    }

    #[test]
    fn test_plugin_only() {
        let project = TempDir::new().unwrap();
        let plugin = TempDir::new().unwrap();
        write(
            &plugin.path().join("hooks/gates.json"),
            r#"{"gates": {"plan-compliance": {}}}"#,
        );

        let loader = ConfigLoader::new(Some(plugin.path().to_path_buf()));
        let loaded = loader.load(project.path()).unwrap().unwrap();
        assert_eq!(
            loaded.gate_source("plan-compliance"),
            Some(ConfigSource::Plugin)
        );
    }

    #[test]
    fn test_project_merges_over_plugin() {
        let project = TempDir::new().unwrap();
        let plugin = TempDir::new().unwrap();
        write(
            &plugin.path().join("hooks/gates.json"),
            r#"{
                "hooks": {"SubagentStop": {"gates": ["plan-compliance"]}},
                "gates": {"plan-compliance": {"on_fail": "BLOCK"}, "fmt": {"command": "cargo fmt"}}
            }"#,
        );
        write(
            &project.path().join("gates.json"),
            r#"{"gates": {"fmt": {"timeout_ms": 5000}}}"#,
        );

        let loader = ConfigLoader::new(Some(plugin.path().to_path_buf()));
        let loaded = loader.load(project.path()).unwrap().unwrap();

        assert!(loaded.config.hook("SubagentStop").is_some());
        let fmt = loaded.config.gate("fmt").unwrap();
        assert_eq!(fmt.shell_command(), Some("cargo fmt"));
        assert_eq!(fmt.timeout_ms(), 5000);
        assert_eq!(loaded.gate_source("fmt"), Some(ConfigSource::Project));
        assert_eq!(
            loaded.gate_source("plan-compliance"),
            Some(ConfigSource::Plugin)
        );
        assert_eq!(loaded.layers[0].source, ConfigSource::Plugin);
        assert_eq!(loaded.layers[1].source, ConfigSource::Project);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let project = TempDir::new().unwrap();
        write(&project.path().join("gates.json"), "{ not json");

        let err = ConfigLoader::new(None).load(project.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_merged_config_is_validated() {
        let project = TempDir::new().unwrap();
        write(
            &project.path().join("gates.json"),
            r#"{"hooks": {"PostToolUse": {"gates": ["absent"]}}}"#,
        );

        let err = ConfigLoader::new(None).load(project.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UndefinedGate { .. }));
    }
}

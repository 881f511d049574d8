//! Config Store: loading, merging and validating `gates.json`.

mod loader;
mod types;
mod validate;

pub use loader::{ConfigLayer, ConfigLoader, ConfigSource, LoadedConfig};
pub use types::{GateConfig, GatesConfig, HookConfig, DEFAULT_TIMEOUT_MS};
pub use validate::validate_config;

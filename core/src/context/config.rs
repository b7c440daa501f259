//! Host configuration
//!
//! Re-exports the shared `HostConfig` record from tickgate-types and adds
//! platform defaults and persistence through confy.

pub use tickgate_types::HostConfig;

use super::error::ConfigError;

const APP_NAME: &str = "tickgate";
const CONFIG_NAME: &str = "config";

/// `~/.config/tickgate/timers.toml` (or platform equivalent)
pub fn default_definitions_path() -> String {
    dirs::config_dir()
        .map(|p| p.join(APP_NAME).join("timers.toml"))
        .and_then(|p| p.to_str().map(String::from))
        .unwrap_or_default()
}

/// Extension trait for HostConfig persistence
pub trait HostConfigExt: Sized {
    /// Load the stored config, falling back to defaults on any error
    fn load() -> Self;
    fn try_load() -> Result<Self, ConfigError>;
    fn load_with_defaults() -> Self;
    fn save(&self) -> Result<(), ConfigError>;
}

impl HostConfigExt for HostConfig {
    fn load() -> Self {
        Self::try_load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Using default host configuration");
            Self::load_with_defaults()
        })
    }

    fn try_load() -> Result<Self, ConfigError> {
        let config: HostConfig = confy::load(APP_NAME, CONFIG_NAME)?;
        if config.has_definitions_path() {
            Ok(config)
        } else {
            Ok(HostConfig {
                definitions_path: default_definitions_path(),
                ..config
            })
        }
    }

    fn load_with_defaults() -> Self {
        HostConfig::with_definitions_path(default_definitions_path())
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }
}

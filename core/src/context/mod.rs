mod config;
mod error;

pub use config::{HostConfig, HostConfigExt, default_definitions_path};
pub use error::ConfigError;

//! Timer definition loading
//!
//! Definition files are TOML with one `[[timer]]` table per timer:
//!
//! ```toml
//! [[timer]]
//! name = "eat_food"
//! cooldown = 3
//!
//! [[timer]]
//! name = "bank_run"
//! cooldown = 30000
//! basis = "wall_clock"
//! ```
//!
//! Hosts that attach extra per-timer data (scripted guards, actions) use
//! their own record type and implement [`Definition`] for it.

use std::fs;
use std::path::Path;

use hashbrown::HashSet;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tickgate_types::TimerSettings;

use super::error::TimerError;

/// A record that can appear as a `[[timer]]` entry
pub trait Definition: DeserializeOwned {
    fn settings(&self) -> &TimerSettings;
}

impl Definition for TimerSettings {
    fn settings(&self) -> &TimerSettings {
        self
    }
}

#[derive(Debug, Deserialize)]
struct DefinitionFile<D> {
    #[serde(default = "Vec::new", rename = "timer")]
    timers: Vec<D>,
}

/// Load timer definitions from a TOML file
pub fn load_definitions_from_file<D: Definition>(path: &Path) -> Result<Vec<D>, TimerError> {
    let content = fs::read_to_string(path).map_err(|source| TimerError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let definitions = parse_definitions(&content, path)?;
    tracing::info!(path = %path.display(), count = definitions.len(), "Loaded timer definitions");
    Ok(definitions)
}

/// Parse timer definitions from TOML text. `path` is only used in errors.
pub fn parse_definitions<D: Definition>(content: &str, path: &Path) -> Result<Vec<D>, TimerError> {
    let file: DefinitionFile<D> = toml::from_str(content).map_err(|source| TimerError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;

    validate(&file.timers, path)?;
    Ok(file.timers)
}

fn validate<D: Definition>(definitions: &[D], path: &Path) -> Result<(), TimerError> {
    let mut seen = HashSet::new();

    for def in definitions {
        let name = def.settings().name.trim();
        if name.is_empty() {
            return Err(TimerError::InvalidDefinition {
                path: path.to_path_buf(),
                reason: "timer name is empty".to_string(),
            });
        }
        if !seen.insert(name) {
            return Err(TimerError::InvalidDefinition {
                path: path.to_path_buf(),
                reason: format!("duplicate timer name '{}'", name),
            });
        }
    }

    Ok(())
}

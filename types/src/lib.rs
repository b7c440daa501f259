//! Shared configuration types for tickgate
//!
//! This crate contains serializable records shared between the timer core
//! (tickgate-core) and hosts that drive it (tickgate-cli).

use serde::{Deserialize, Serialize};
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Time Basis
// ─────────────────────────────────────────────────────────────────────────────

/// Unit a timer measures its cooldown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBasis {
    /// Discrete host ticks (one per game frame)
    #[default]
    Ticks,
    /// Wall-clock milliseconds
    WallClock,
}

impl TimeBasis {
    /// Short unit suffix for display ("t" or "ms")
    pub fn unit(&self) -> &'static str {
        match self {
            TimeBasis::Ticks => "t",
            TimeBasis::WallClock => "ms",
        }
    }
}

impl fmt::Display for TimeBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeBasis::Ticks => f.write_str("ticks"),
            TimeBasis::WallClock => f.write_str("wall_clock"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Timer Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Data half of a timer's configuration record.
///
/// Guard and action are code and get attached by the host when the record is
/// turned into a running timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Identity used in log output
    pub name: String,

    /// Minimum elapsed units between two successful triggers (0 = no cooldown)
    pub cooldown: u64,

    /// Which clock the cooldown is measured against
    #[serde(default)]
    pub basis: TimeBasis,
}

impl TimerSettings {
    pub fn new(name: impl Into<String>, cooldown: u64) -> Self {
        Self {
            name: name.into(),
            cooldown,
            basis: TimeBasis::default(),
        }
    }

    pub fn with_basis(mut self, basis: TimeBasis) -> Self {
        self.basis = basis;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Host Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Persisted settings for a host polling loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Timer definitions file loaded at startup (empty = none)
    #[serde(default)]
    pub definitions_path: String,

    /// Delay between loop iterations for paced runs
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Energy regained by the simulated player each tick
    #[serde(default = "default_energy_regen")]
    pub energy_regen: u32,

    /// Energy cap for the simulated player
    #[serde(default = "default_max_energy")]
    pub max_energy: u32,
}

fn default_tick_interval_ms() -> u64 {
    600
}

fn default_energy_regen() -> u32 {
    5
}

fn default_max_energy() -> u32 {
    100
}

impl HostConfig {
    /// Create a config pointing at the given definitions file.
    /// Other fields use their default values.
    pub fn with_definitions_path(definitions_path: String) -> Self {
        Self {
            definitions_path,
            tick_interval_ms: default_tick_interval_ms(),
            energy_regen: default_energy_regen(),
            max_energy: default_max_energy(),
        }
    }

    pub fn has_definitions_path(&self) -> bool {
        !self.definitions_path.trim().is_empty()
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self::with_definitions_path(String::new())
    }
}

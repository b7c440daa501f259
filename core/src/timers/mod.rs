//! Cooldown timer system
//!
//! This module provides:
//! - **Specs**: Configuration records (name, cooldown, basis, guard, action)
//! - **Timers**: `CooldownTimer`, the runtime gate a host polls every cycle
//! - **Clocks**: Tick and wall-clock time sources shared with the host
//! - **Loader**: TOML definition files for hosts that configure timers from data
//!
//! # Time Bases
//!
//! A timer measures its cooldown either in host ticks (one per game frame)
//! or in wall-clock milliseconds. The basis decides which clock reading the
//! cooldown is compared against.

mod clock;
mod cooldown;
mod error;
pub mod loader;
mod spec;

#[cfg(test)]
mod cooldown_tests;

pub use clock::{Clock, HostClock, ManualClock, SharedClock};
pub use cooldown::{Attempt, CooldownTimer};
pub use error::TimerError;
pub use loader::{Definition, load_definitions_from_file, parse_definitions};
pub use spec::{Action, ActionOutcome, Guard, TimerSpec};

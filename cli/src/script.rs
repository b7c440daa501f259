//! Scripted guards and actions for definition files
//!
//! Closures cannot live in TOML, so each `[[timer]]` entry names one of a
//! few built-in behaviours that operate on the simulated [`HostState`]:
//!
//! ```toml
//! [[timer]]
//! name = "cast_heal"
//! cooldown = 4
//! guard = { type = "energy_at_least", amount = 30 }
//! action = { type = "spend", energy = 30 }
//! ```
//!
//! An entry without a `guard` never fires on its own; it can still be
//! forced with `force --skip guard`.

use serde::Deserialize;
use tickgate_core::timers::Definition;
use tickgate_core::{ActionOutcome, TimerSettings, TimerSpec};

use crate::context::HostState;

/// Built-in eligibility checks
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum GuardScript {
    Always,
    Never,
    /// Passes on ticks divisible by `n`
    EveryNth { n: u64 },
    /// Passes while the player has at least `amount` energy
    EnergyAtLeast { amount: u32 },
}

/// Built-in effects
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ActionScript {
    /// Completes on the first attempt
    Instant,
    /// Stays pending for `cycles - 1` attempts, completes on the last
    Channel { cycles: u32 },
    /// Completes if the player can pay `energy`, fails otherwise
    Spend { energy: u32 },
    /// Never reports completion
    NoopPending,
}

/// One `[[timer]]` entry of a host definitions file
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptedTimer {
    #[serde(flatten)]
    pub settings: TimerSettings,
    #[serde(default)]
    pub guard: Option<GuardScript>,
    pub action: ActionScript,
}

impl Definition for ScriptedTimer {
    fn settings(&self) -> &TimerSettings {
        &self.settings
    }
}

impl ScriptedTimer {
    /// Build the timer configuration record for this entry
    pub fn to_spec(&self) -> TimerSpec<HostState> {
        let spec = TimerSpec::from_settings(&self.settings);
        let spec = match &self.guard {
            Some(guard) => spec.guard(guard_fn(guard.clone())),
            None => spec,
        };
        spec.action(action_fn(self.settings.name.clone(), self.action.clone()))
    }
}

fn guard_fn(guard: GuardScript) -> impl Fn(&HostState) -> bool + Send + 'static {
    move |state: &HostState| match guard {
        GuardScript::Always => true,
        GuardScript::Never => false,
        GuardScript::EveryNth { n } => n > 0 && state.tick % n == 0,
        GuardScript::EnergyAtLeast { amount } => state.energy >= amount,
    }
}

fn action_fn(
    name: String,
    action: ActionScript,
) -> impl FnMut(&mut HostState) -> ActionOutcome + Send + 'static {
    let mut progress = 0u32;

    move |state: &mut HostState| match action {
        ActionScript::Instant => {
            state.record(format!("{} done", name));
            ActionOutcome::Completed
        }
        ActionScript::Channel { cycles } => {
            progress += 1;
            if progress >= cycles {
                progress = 0;
                state.record(format!("{} finished channel", name));
                ActionOutcome::Completed
            } else {
                state.record(format!("{} channeling {}/{}", name, progress, cycles));
                ActionOutcome::Pending
            }
        }
        ActionScript::Spend { energy } => {
            if state.spend(energy) {
                state.record(format!("{} spent {} energy", name, energy));
                ActionOutcome::Completed
            } else {
                ActionOutcome::Failed
            }
        }
        ActionScript::NoopPending => ActionOutcome::Pending,
    }
}

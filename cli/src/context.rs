use std::path::Path;
use std::sync::Arc;

use tickgate_core::context::{HostConfig, HostConfigExt};
use tickgate_core::timers::load_definitions_from_file;
use tickgate_core::{Attempt, CooldownTimer, HostClock, SharedClock, TimerError};

use crate::script::ScriptedTimer;

/// Journal lines kept for `status`
const JOURNAL_LIMIT: usize = 32;

/// Simulated game state handed to every guard and action.
#[derive(Debug, Clone, Default)]
pub struct HostState {
    pub tick: u64,
    pub energy: u32,
    pub max_energy: u32,
    pub journal: Vec<String>,
}

impl HostState {
    pub fn new(max_energy: u32) -> Self {
        Self {
            tick: 0,
            energy: max_energy,
            max_energy,
            journal: Vec::new(),
        }
    }

    pub fn regen(&mut self, amount: u32) {
        self.energy = self.energy.saturating_add(amount).min(self.max_energy);
    }

    /// Deduct `amount` energy if available
    pub fn spend(&mut self, amount: u32) -> bool {
        if self.energy < amount {
            return false;
        }
        self.energy -= amount;
        true
    }

    pub fn record(&mut self, line: String) {
        tracing::debug!(tick = self.tick, "{}", line);
        self.journal.push(line);
        if self.journal.len() > JOURNAL_LIMIT {
            let excess = self.journal.len() - JOURNAL_LIMIT;
            self.journal.drain(..excess);
        }
    }
}

/// Outcome of one polling-loop iteration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub tick: u64,
    pub fired: Vec<String>,
    pub pending: Vec<String>,
    pub failed: Vec<String>,
}

/// Holds all state for the CLI host loop.
pub struct CliContext {
    pub config: HostConfig,
    pub clock: Arc<HostClock>,
    pub timers: Vec<CooldownTimer<HostState>>,
    pub state: HostState,
}

impl CliContext {
    pub fn new() -> Self {
        Self::with_config(HostConfig::load())
    }

    pub fn with_config(config: HostConfig) -> Self {
        let state = HostState::new(config.max_energy);
        Self {
            config,
            clock: Arc::new(HostClock::new()),
            timers: Vec::new(),
            state,
        }
    }

    fn shared_clock(&self) -> SharedClock {
        self.clock.clone()
    }

    /// Replace the loaded timers with those defined in `path`.
    /// On error the current timers are kept.
    pub fn load_definitions(&mut self, path: &Path) -> Result<usize, TimerError> {
        let definitions: Vec<ScriptedTimer> = load_definitions_from_file(path)?;

        let timers = definitions
            .iter()
            .map(|def| CooldownTimer::new(Some(def.to_spec()), self.shared_clock()))
            .collect::<Result<Vec<_>, _>>()?;

        self.timers = timers;
        Ok(self.timers.len())
    }

    pub fn timer_mut(&mut self, name: &str) -> Option<&mut CooldownTimer<HostState>> {
        self.timers.iter_mut().find(|t| t.name() == name)
    }

    /// Advance one tick and give every timer a chance to fire.
    pub fn run_cycle(&mut self) -> CycleReport {
        let tick = self.clock.advance();
        self.state.tick = tick;
        self.state.regen(self.config.energy_regen);

        let mut report = CycleReport {
            tick,
            ..Default::default()
        };

        for timer in &mut self.timers {
            let attempt = timer.attempt(&mut self.state);
            if attempt.is_gated() {
                continue;
            }
            let name = timer.name().to_string();
            match attempt {
                Attempt::Fired => report.fired.push(name),
                Attempt::Failed => report.failed.push(name),
                _ => report.pending.push(name),
            }
        }

        report
    }
}

impl Default for CliContext {
    fn default() -> Self {
        Self::new()
    }
}

//! Cooldown-gated action trigger
//!
//! A `CooldownTimer` answers "should this run now?" for one action inside a
//! host polling loop. It fires when its cooldown has elapsed and its guard
//! passes, and only starts a new cooldown window once the action reports
//! that it completed.
//!
//! # Lifecycle
//!
//! 1. Built from a [`TimerSpec`] → never triggered
//! 2. Host calls [`CooldownTimer::execute`] every cycle
//! 3. Action completes → `last_triggered_at` recorded, cooldown window starts
//! 4. [`CooldownTimer::reset`] or [`CooldownTimer::reconfigure`] → never triggered again

use tickgate_types::TimeBasis;

use super::clock::SharedClock;
use super::error::TimerError;
use super::spec::{Action, ActionOutcome, Guard, TimerSpec};

/// What happened on a single trigger attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    /// Action completed and the cooldown window restarted
    Fired,
    /// Still cooling down; `remaining` is in the timer's basis unit
    OnCooldown { remaining: u64 },
    /// Guard rejected the payload; the action was not invoked
    GuardBlocked,
    /// Action ran but is not finished yet
    Pending,
    /// Action ran and reported failure
    Failed,
}

impl Attempt {
    pub fn fired(&self) -> bool {
        matches!(self, Attempt::Fired)
    }

    /// True if the action was never invoked
    pub fn is_gated(&self) -> bool {
        matches!(self, Attempt::OnCooldown { .. } | Attempt::GuardBlocked)
    }
}

/// Named, cooldown-gated action trigger.
///
/// `Ctx` is the payload handed to both guard and action on every call; use
/// `()` when the closures need nothing from the host.
pub struct CooldownTimer<Ctx = ()> {
    name: String,
    cooldown: u64,
    basis: TimeBasis,
    guard: Guard<Ctx>,
    action: Action<Ctx>,
    last_triggered_at: Option<u64>,
    clock: SharedClock,
}

impl<Ctx: 'static> TimerSpec<Ctx> {
    /// Shorthand for `CooldownTimer::new(Some(spec), clock)`
    pub fn build(self, clock: SharedClock) -> Result<CooldownTimer<Ctx>, TimerError> {
        CooldownTimer::new(Some(self), clock)
    }
}

impl<Ctx: 'static> CooldownTimer<Ctx> {
    /// Create a timer from its configuration record.
    ///
    /// A missing record is fatal ([`TimerError::is_fatal`]); a record without
    /// an action is rejected here instead of failing on the first execute.
    pub fn new(spec: Option<TimerSpec<Ctx>>, clock: SharedClock) -> Result<Self, TimerError> {
        let Some(spec) = spec else {
            tracing::error!("timer constructed without configuration, session should end");
            return Err(TimerError::ConfigurationMissing);
        };
        let parts = spec.into_parts()?;

        tracing::debug!(
            timer = %parts.name,
            cooldown = parts.cooldown,
            basis = %parts.basis,
            "Timer created"
        );

        Ok(Self {
            name: parts.name,
            cooldown: parts.cooldown,
            basis: parts.basis,
            guard: parts.guard,
            action: parts.action,
            last_triggered_at: None,
            clock,
        })
    }

    /// Replace name, cooldown, basis, guard and action, and forget the
    /// previous trigger time. On error the timer is left untouched.
    pub fn reconfigure(&mut self, spec: TimerSpec<Ctx>) -> Result<(), TimerError> {
        let parts = spec.into_parts()?;
        tracing::info!(from = %self.name, to = %parts.name, "Timer reconfigured");

        self.name = parts.name;
        self.cooldown = parts.cooldown;
        self.basis = parts.basis;
        self.guard = parts.guard;
        self.action = parts.action;
        self.last_triggered_at = None;
        Ok(())
    }
}

impl<Ctx> CooldownTimer<Ctx> {
    // ─── Gating ─────────────────────────────────────────────────────────────

    /// Evaluate the guard against `ctx`
    pub fn guard_satisfied(&self, ctx: &Ctx) -> bool {
        (self.guard)(ctx)
    }

    /// Whether at least `cooldown` units have passed since the last trigger.
    /// A timer that never fired is always off cooldown.
    pub fn off_cooldown(&self) -> bool {
        match self.last_triggered_at {
            None => true,
            Some(last) => self.now().saturating_sub(last) >= self.cooldown,
        }
    }

    /// Cooldown first, then guard
    pub fn can_trigger(&self, ctx: &Ctx) -> bool {
        self.off_cooldown() && self.guard_satisfied(ctx)
    }

    /// Units left until the timer is off cooldown (0 when ready)
    pub fn remaining(&self) -> u64 {
        match self.last_triggered_at {
            None => 0,
            Some(last) => self
                .cooldown
                .saturating_sub(self.now().saturating_sub(last)),
        }
    }

    // ─── Execution ──────────────────────────────────────────────────────────

    /// Run the action if the timer can trigger. Returns true only when the
    /// action completed.
    pub fn execute(&mut self, ctx: &mut Ctx) -> bool {
        self.attempt(ctx).fired()
    }

    /// Like [`execute`](Self::execute) but reports why the timer did or did
    /// not fire.
    pub fn attempt(&mut self, ctx: &mut Ctx) -> Attempt {
        if !self.off_cooldown() {
            let remaining = self.remaining();
            tracing::debug!(timer = %self.name, remaining, "On cooldown");
            return Attempt::OnCooldown { remaining };
        }
        if !self.guard_satisfied(ctx) {
            tracing::debug!(timer = %self.name, "Guard blocked");
            return Attempt::GuardBlocked;
        }
        self.run_action(ctx)
    }

    /// Fire on cooldown state alone, skipping the guard
    pub fn trigger_ignoring_guard(&mut self, ctx: &mut Ctx) -> bool {
        if !self.off_cooldown() {
            return false;
        }
        self.run_action(ctx).fired()
    }

    /// Fire on the guard alone, skipping the cooldown. A completed action
    /// still starts a new cooldown window.
    pub fn trigger_ignoring_cooldown(&mut self, ctx: &mut Ctx) -> bool {
        if !self.guard_satisfied(ctx) {
            return false;
        }
        self.run_action(ctx).fired()
    }

    /// Forget the last trigger so the timer is immediately off cooldown
    pub fn reset(&mut self) {
        self.last_triggered_at = None;
    }

    fn run_action(&mut self, ctx: &mut Ctx) -> Attempt {
        match (self.action)(ctx) {
            ActionOutcome::Completed => {
                let now = self.now();
                // Never move the baseline backwards
                let at = self.last_triggered_at.map_or(now, |last| last.max(now));
                self.last_triggered_at = Some(at);
                tracing::debug!(timer = %self.name, at, unit = self.basis.unit(), "Timer fired");
                Attempt::Fired
            }
            ActionOutcome::Pending => {
                tracing::debug!(timer = %self.name, "Action pending");
                Attempt::Pending
            }
            ActionOutcome::Failed => {
                tracing::warn!(timer = %self.name, "Action failed");
                Attempt::Failed
            }
        }
    }

    fn now(&self) -> u64 {
        self.clock.now(self.basis)
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn cooldown(&self) -> u64 {
        self.cooldown
    }

    pub fn set_cooldown(&mut self, cooldown: u64) {
        self.cooldown = cooldown;
    }

    pub fn basis(&self) -> TimeBasis {
        self.basis
    }

    /// Switch the time basis. The stored trigger time is in the old unit, so
    /// an actual change also resets the timer.
    pub fn set_basis(&mut self, basis: TimeBasis) {
        if basis == self.basis {
            return;
        }
        tracing::debug!(timer = %self.name, from = %self.basis, to = %basis, "Basis changed, resetting");
        self.basis = basis;
        self.reset();
    }

    /// Time of the last completed action in the basis unit (0 = never)
    pub fn last_triggered_at(&self) -> u64 {
        self.last_triggered_at.unwrap_or(0)
    }

    pub fn has_triggered(&self) -> bool {
        self.last_triggered_at.is_some()
    }
}

impl<Ctx> std::fmt::Debug for CooldownTimer<Ctx> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CooldownTimer")
            .field("name", &self.name)
            .field("cooldown", &self.cooldown)
            .field("basis", &self.basis)
            .field("last_triggered_at", &self.last_triggered_at)
            .finish_non_exhaustive()
    }
}

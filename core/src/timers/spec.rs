//! Timer configuration records
//!
//! A [`TimerSpec`] bundles the data half of a timer (name, cooldown, basis)
//! with the guard and action closures that make it useful.

use tickgate_types::{TimeBasis, TimerSettings};

use super::error::TimerError;

/// Result reported by a timer's action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action finished; the cooldown window starts now
    Completed,
    /// The action is still in progress and should be retried next cycle
    Pending,
    /// The action gave up this cycle. Retried next cycle like `Pending`
    Failed,
}

impl From<bool> for ActionOutcome {
    fn from(done: bool) -> Self {
        if done {
            ActionOutcome::Completed
        } else {
            ActionOutcome::Pending
        }
    }
}

/// Eligibility predicate over the timer's payload
pub type Guard<Ctx> = Box<dyn Fn(&Ctx) -> bool + Send>;

/// Effect run when the timer fires
pub type Action<Ctx> = Box<dyn FnMut(&mut Ctx) -> ActionOutcome + Send>;

/// Configuration record for a [`CooldownTimer`](super::CooldownTimer).
///
/// `name`, `cooldown` and an action are required. The basis defaults to
/// ticks and the guard to a predicate that never passes.
pub struct TimerSpec<Ctx> {
    pub name: String,
    pub cooldown: u64,
    pub basis: TimeBasis,
    guard: Option<Guard<Ctx>>,
    action: Option<Action<Ctx>>,
}

/// Validated pieces of a spec, ready to be moved into a timer
pub(crate) struct SpecParts<Ctx> {
    pub name: String,
    pub cooldown: u64,
    pub basis: TimeBasis,
    pub guard: Guard<Ctx>,
    pub action: Action<Ctx>,
}

impl<Ctx: 'static> TimerSpec<Ctx> {
    pub fn new(name: impl Into<String>, cooldown: u64) -> Self {
        Self {
            name: name.into(),
            cooldown,
            basis: TimeBasis::default(),
            guard: None,
            action: None,
        }
    }

    /// Seed a spec from a deserialized settings record
    pub fn from_settings(settings: &TimerSettings) -> Self {
        Self::new(settings.name.clone(), settings.cooldown).basis(settings.basis)
    }

    pub fn basis(mut self, basis: TimeBasis) -> Self {
        self.basis = basis;
        self
    }

    pub fn guard<G>(mut self, guard: G) -> Self
    where
        G: Fn(&Ctx) -> bool + Send + 'static,
    {
        self.guard = Some(Box::new(guard));
        self
    }

    /// Attach the action. Closures may return `bool` or [`ActionOutcome`].
    pub fn action<A, O>(mut self, mut action: A) -> Self
    where
        A: FnMut(&mut Ctx) -> O + Send + 'static,
        O: Into<ActionOutcome> + 'static,
    {
        self.action = Some(Box::new(move |ctx: &mut Ctx| -> ActionOutcome {
            action(ctx).into()
        }));
        self
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    pub(crate) fn into_parts(self) -> Result<SpecParts<Ctx>, TimerError> {
        let Some(action) = self.action else {
            return Err(TimerError::MissingAction { name: self.name });
        };

        let never: Guard<Ctx> = Box::new(|_: &Ctx| false);
        Ok(SpecParts {
            name: self.name,
            cooldown: self.cooldown,
            basis: self.basis,
            guard: self.guard.unwrap_or(never),
            action,
        })
    }
}

impl<Ctx> std::fmt::Debug for TimerSpec<Ctx> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerSpec")
            .field("name", &self.name)
            .field("cooldown", &self.cooldown)
            .field("basis", &self.basis)
            .field("has_guard", &self.guard.is_some())
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

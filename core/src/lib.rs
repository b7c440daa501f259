pub mod context;
pub mod timers;

// Re-exports for convenience
pub use tickgate_types::{TimeBasis, TimerSettings};
pub use timers::{
    ActionOutcome, Attempt, Clock, CooldownTimer, HostClock, ManualClock, SharedClock,
    TimerError, TimerSpec,
};

//! Tests for CooldownTimer gating and execution
//!
//! Verifies that:
//! - Cooldown windows open and close on the right tick / millisecond
//! - Guards block the action entirely
//! - Incomplete actions never start a cooldown window
//! - Bypass, reset and reconfigure behave as documented

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tickgate_types::{TimeBasis, TimerSettings};

use super::{ActionOutcome, Attempt, CooldownTimer, ManualClock, SharedClock, TimerError, TimerSpec};

// ═══════════════════════════════════════════════════════════════════════════
// Test Helpers
// ═══════════════════════════════════════════════════════════════════════════

fn clock_at(ticks: u64, millis: u64) -> (Arc<ManualClock>, SharedClock) {
    let clock = Arc::new(ManualClock::at(ticks, millis));
    let shared: SharedClock = clock.clone();
    (clock, shared)
}

/// Guard and action always succeed
fn ready_timer(cooldown: u64, basis: TimeBasis, clock: SharedClock) -> CooldownTimer {
    TimerSpec::new("ready", cooldown)
        .basis(basis)
        .guard(|_: &()| true)
        .action(|_: &mut ()| true)
        .build(clock)
        .unwrap()
}

/// Timer whose action bumps a counter and reports `outcome`
fn counting_timer(
    guard: bool,
    outcome: ActionOutcome,
    clock: SharedClock,
) -> (CooldownTimer, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let timer = TimerSpec::new("counting", 5)
        .guard(move |_: &()| guard)
        .action(move |_: &mut ()| {
            counter.fetch_add(1, Ordering::SeqCst);
            outcome
        })
        .build(clock)
        .unwrap();
    (timer, calls)
}

// ═══════════════════════════════════════════════════════════════════════════
// Construction
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_missing_configuration_is_fatal() {
    let (_, shared) = clock_at(0, 0);
    let err = CooldownTimer::<()>::new(None, shared).unwrap_err();
    assert!(matches!(err, TimerError::ConfigurationMissing));
    assert!(err.is_fatal());
}

#[test]
fn test_missing_action_rejected_at_construction() {
    let (_, shared) = clock_at(0, 0);
    let spec = TimerSpec::<()>::new("no_action", 3).guard(|_| true);
    assert!(!spec.has_action());

    let err = spec.build(shared).unwrap_err();
    assert!(matches!(err, TimerError::MissingAction { ref name } if name == "no_action"));
    assert!(!err.is_fatal());
}

#[test]
fn test_new_timer_has_never_triggered() {
    let (_, shared) = clock_at(50, 0);
    let timer = ready_timer(100, TimeBasis::Ticks, shared);
    assert_eq!(timer.last_triggered_at(), 0);
    assert!(!timer.has_triggered());
    assert!(timer.off_cooldown());
    assert_eq!(timer.remaining(), 0);
}

#[test]
fn test_default_guard_never_passes() {
    let (_, shared) = clock_at(0, 0);
    let mut timer = TimerSpec::new("unguarded", 0)
        .action(|_: &mut ()| true)
        .build(shared)
        .unwrap();

    assert!(!timer.guard_satisfied(&()));
    assert!(!timer.can_trigger(&()));
    assert_eq!(timer.attempt(&mut ()), Attempt::GuardBlocked);
}

#[test]
fn test_spec_from_settings() {
    let (_, shared) = clock_at(0, 0);
    let settings = TimerSettings::new("bank", 3000).with_basis(TimeBasis::WallClock);
    let timer = TimerSpec::from_settings(&settings)
        .action(|_: &mut ()| true)
        .build(shared)
        .unwrap();

    assert_eq!(timer.name(), "bank");
    assert_eq!(timer.cooldown(), 3000);
    assert_eq!(timer.basis(), TimeBasis::WallClock);
}

// ═══════════════════════════════════════════════════════════════════════════
// Cooldown windows
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_tick_scenario() {
    let (clock, shared) = clock_at(10, 0);
    let mut timer = ready_timer(2, TimeBasis::Ticks, shared);

    assert!(timer.execute(&mut ()));
    assert_eq!(timer.last_triggered_at(), 10);

    clock.set_ticks(11);
    assert!(!timer.can_trigger(&()));
    assert_eq!(timer.remaining(), 1);

    clock.set_ticks(12);
    assert!(timer.can_trigger(&()));
    assert!(timer.execute(&mut ()));
    assert_eq!(timer.last_triggered_at(), 12);
}

#[test]
fn test_wall_clock_scenario() {
    let (clock, shared) = clock_at(0, 1000);
    let mut timer = ready_timer(3000, TimeBasis::WallClock, shared);

    assert!(timer.execute(&mut ()));
    assert_eq!(timer.last_triggered_at(), 1000);

    clock.set_millis(3500);
    assert!(!timer.can_trigger(&()));
    assert_eq!(timer.remaining(), 500);

    clock.set_millis(4200);
    assert!(timer.can_trigger(&()));
}

#[test]
fn test_window_closed_for_every_tick_before_cooldown() {
    let start = 40;
    let cooldown = 7;
    let (clock, shared) = clock_at(start, 0);
    let mut timer = ready_timer(cooldown, TimeBasis::Ticks, shared);
    assert!(timer.execute(&mut ()));

    for tick in start + 1..start + cooldown {
        clock.set_ticks(tick);
        assert!(!timer.can_trigger(&()), "tick {} should be on cooldown", tick);
        assert!(!timer.execute(&mut ()));
    }

    clock.set_ticks(start + cooldown);
    assert!(timer.can_trigger(&()));
}

#[test]
fn test_wall_clock_timer_ignores_ticks() {
    let (clock, shared) = clock_at(0, 100);
    let mut timer = ready_timer(1000, TimeBasis::WallClock, shared);
    assert!(timer.execute(&mut ()));

    clock.advance_ticks(1_000_000);
    assert!(!timer.off_cooldown());

    clock.advance_millis(1000);
    assert!(timer.off_cooldown());
}

#[test]
fn test_zero_cooldown_always_ready() {
    let (_, shared) = clock_at(3, 0);
    let mut timer = ready_timer(0, TimeBasis::Ticks, shared);

    for _ in 0..5 {
        assert!(timer.execute(&mut ()));
    }
    assert_eq!(timer.last_triggered_at(), 3);
}

#[test]
fn test_trigger_at_time_zero_still_starts_cooldown() {
    let (clock, shared) = clock_at(0, 0);
    let mut timer = ready_timer(2, TimeBasis::Ticks, shared);

    assert!(timer.execute(&mut ()));
    assert!(timer.has_triggered());
    assert!(!timer.off_cooldown());

    clock.set_ticks(2);
    assert!(timer.off_cooldown());
}

#[test]
fn test_queries_do_not_change_state() {
    let (clock, shared) = clock_at(5, 0);
    let mut timer = ready_timer(3, TimeBasis::Ticks, shared);
    assert!(timer.execute(&mut ()));
    clock.set_ticks(6);

    for _ in 0..10 {
        assert!(!timer.off_cooldown());
        assert!(!timer.can_trigger(&()));
    }
    assert_eq!(timer.last_triggered_at(), 5);
}

// ═══════════════════════════════════════════════════════════════════════════
// Guards and action outcomes
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_false_guard_never_invokes_action() {
    let (_, shared) = clock_at(10, 0);
    let (mut timer, calls) = counting_timer(false, ActionOutcome::Completed, shared);

    for _ in 0..5 {
        assert!(!timer.execute(&mut ()));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(!timer.has_triggered());
}

#[test]
fn test_incomplete_action_never_records_trigger() {
    let (clock, shared) = clock_at(10, 0);
    let (mut timer, calls) = counting_timer(true, ActionOutcome::Pending, shared);

    for _ in 0..4 {
        assert!(!timer.execute(&mut ()));
        clock.advance_ticks(1);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert_eq!(timer.last_triggered_at(), 0);
}

#[test]
fn test_failed_action_retried_next_cycle() {
    let (_, shared) = clock_at(10, 0);
    let (mut timer, calls) = counting_timer(true, ActionOutcome::Failed, shared);

    assert_eq!(timer.attempt(&mut ()), Attempt::Failed);
    assert_eq!(timer.attempt(&mut ()), Attempt::Failed);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(timer.off_cooldown());
}

#[test]
fn test_multi_cycle_action_starts_cooldown_on_completion() {
    let (clock, shared) = clock_at(1, 0);
    let mut timer = TimerSpec::new("channel", 4)
        .guard(|_: &u32| true)
        .action(|progress: &mut u32| {
            *progress += 1;
            *progress >= 3
        })
        .build(shared)
        .unwrap();

    let mut progress = 0;
    assert_eq!(timer.attempt(&mut progress), Attempt::Pending);
    clock.set_ticks(2);
    assert_eq!(timer.attempt(&mut progress), Attempt::Pending);
    clock.set_ticks(3);
    assert_eq!(timer.attempt(&mut progress), Attempt::Fired);
    assert_eq!(timer.last_triggered_at(), 3);

    clock.set_ticks(5);
    assert_eq!(timer.attempt(&mut progress), Attempt::OnCooldown { remaining: 2 });
    assert_eq!(progress, 3);
}

#[test]
fn test_guard_and_action_share_payload() {
    struct Player {
        hp: u32,
        potions: u32,
    }

    let (_, shared) = clock_at(0, 0);
    let mut timer = TimerSpec::new("drink", 0)
        .guard(|p: &Player| p.hp < 50 && p.potions > 0)
        .action(|p: &mut Player| {
            p.potions -= 1;
            p.hp = 100;
            ActionOutcome::Completed
        })
        .build(shared)
        .unwrap();

    let mut player = Player { hp: 80, potions: 1 };
    assert!(!timer.execute(&mut player));

    player.hp = 20;
    assert!(timer.execute(&mut player));
    assert_eq!(player.hp, 100);
    assert_eq!(player.potions, 0);

    player.hp = 10;
    assert!(!timer.can_trigger(&player));
}

// ═══════════════════════════════════════════════════════════════════════════
// Bypass operations
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_trigger_ignoring_guard() {
    let (clock, shared) = clock_at(10, 0);
    let (mut timer, calls) = counting_timer(false, ActionOutcome::Completed, shared);

    assert!(!timer.execute(&mut ()));
    assert!(timer.trigger_ignoring_guard(&mut ()));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(timer.last_triggered_at(), 10);

    // Still respects the cooldown
    clock.set_ticks(12);
    assert!(!timer.trigger_ignoring_guard(&mut ()));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_trigger_ignoring_cooldown() {
    let (clock, shared) = clock_at(10, 0);
    let (mut timer, calls) = counting_timer(true, ActionOutcome::Completed, shared);

    assert!(timer.execute(&mut ()));
    clock.set_ticks(11);
    assert!(!timer.execute(&mut ()));

    assert!(timer.trigger_ignoring_cooldown(&mut ()));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(timer.last_triggered_at(), 11);
}

#[test]
fn test_trigger_ignoring_cooldown_respects_guard() {
    let (_, shared) = clock_at(10, 0);
    let (mut timer, calls) = counting_timer(false, ActionOutcome::Completed, shared);

    assert!(!timer.trigger_ignoring_cooldown(&mut ()));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

// ═══════════════════════════════════════════════════════════════════════════
// Reset and repurposing
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_reset_makes_timer_ready() {
    let (clock, shared) = clock_at(100, 0);
    let mut timer = ready_timer(1_000_000, TimeBasis::Ticks, shared);
    assert!(timer.execute(&mut ()));
    clock.advance_ticks(1);
    assert!(!timer.can_trigger(&()));

    timer.reset();
    assert!(timer.can_trigger(&()));
    assert_eq!(timer.last_triggered_at(), 0);
}

#[test]
fn test_reconfigure_replaces_fields_and_resets() {
    let (clock, shared) = clock_at(20, 0);
    let (mut timer, first_calls) = counting_timer(true, ActionOutcome::Completed, shared);
    assert!(timer.execute(&mut ()));
    clock.advance_ticks(1);

    let second_calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&second_calls);
    timer
        .reconfigure(
            TimerSpec::new("repurposed", 10)
                .basis(TimeBasis::WallClock)
                .guard(|_: &()| true)
                .action(move |_: &mut ()| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    true
                }),
        )
        .unwrap();

    assert_eq!(timer.name(), "repurposed");
    assert_eq!(timer.cooldown(), 10);
    assert_eq!(timer.basis(), TimeBasis::WallClock);
    assert!(!timer.has_triggered());

    assert!(timer.execute(&mut ()));
    assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    assert_eq!(second_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_reconfigure_without_action_keeps_timer() {
    let (_, shared) = clock_at(20, 0);
    let mut timer = ready_timer(5, TimeBasis::Ticks, shared);
    assert!(timer.execute(&mut ()));

    let err = timer.reconfigure(TimerSpec::new("broken", 1)).unwrap_err();
    assert!(matches!(err, TimerError::MissingAction { .. }));
    assert_eq!(timer.name(), "ready");
    assert_eq!(timer.last_triggered_at(), 20);
}

#[test]
fn test_basis_change_resets_trigger_time() {
    let (_, shared) = clock_at(10, 5000);
    let mut timer = ready_timer(100, TimeBasis::Ticks, shared);
    assert!(timer.execute(&mut ()));

    timer.set_basis(TimeBasis::Ticks);
    assert_eq!(timer.last_triggered_at(), 10);

    timer.set_basis(TimeBasis::WallClock);
    assert!(!timer.has_triggered());
    assert!(timer.execute(&mut ()));
    assert_eq!(timer.last_triggered_at(), 5000);
}

#[test]
fn test_renaming_and_cooldown_change_keep_history() {
    let (clock, shared) = clock_at(10, 0);
    let mut timer = ready_timer(10, TimeBasis::Ticks, shared);
    assert!(timer.execute(&mut ()));

    timer.set_name("renamed");
    timer.set_cooldown(2);
    clock.set_ticks(12);

    assert_eq!(timer.name(), "renamed");
    assert_eq!(timer.last_triggered_at(), 10);
    assert!(timer.off_cooldown());
}

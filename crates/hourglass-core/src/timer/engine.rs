//! Countdown engine implementation.
//!
//! The engine is a caller-driven state machine. It does not use internal
//! threads or read the clock -- the tick source delivers one heartbeat per
//! second and the caller forwards it to `tick()`.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Paused | Completed) -> Idle
//! ```
//!
//! Commands return `Some(Event)` when accepted and `None` when rejected;
//! there is no error path out of the engine.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::duration::Hms;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Core countdown state machine.
///
/// Owns the configured duration and the remaining time; nothing else holds
/// an authoritative copy. Mutated only through the command methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownEngine {
    /// Duration chosen by the user; restored by `reset()` and re-armed by
    /// `start()` from Completed.
    configured: Hms,
    /// Remaining time for the current run.
    remaining: Hms,
    state: RunState,
}

impl Default for CountdownEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CountdownEngine {
    /// Create an engine with a zero duration in the `Idle` state.
    pub fn new() -> Self {
        Self {
            configured: Hms::ZERO,
            remaining: Hms::ZERO,
            state: RunState::Idle,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn configured(&self) -> Hms {
        self.configured
    }

    pub fn remaining(&self) -> Hms {
        self.remaining
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining.total_seconds()
    }

    pub fn total_secs(&self) -> u64 {
        self.configured.total_seconds()
    }

    /// 0.0 .. 1.0 progress through the configured duration.
    pub fn progress(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs() as f64 / total as f64)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            remaining: self.remaining,
            remaining_secs: self.remaining_secs(),
            total_secs: self.total_secs(),
            progress: self.progress(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Configure a new duration. Rejected while a countdown is live
    /// (Running or Paused); the setup surface is hidden then, and an
    /// invisible mid-run change would be surprising.
    pub fn set_duration(&mut self, duration: Hms) -> Option<Event> {
        match self.state {
            RunState::Idle | RunState::Completed => {
                self.configured = duration;
                self.remaining = duration;
                self.state = RunState::Idle;
                Some(Event::TimerSet {
                    duration,
                    total_secs: duration.total_seconds(),
                    at: Utc::now(),
                })
            }
            RunState::Running | RunState::Paused => None,
        }
    }

    /// Arm the countdown. Rejected while already live, and rejected for a
    /// zero duration so an instantly-complete timer never enters Running.
    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            RunState::Idle | RunState::Completed => {
                if self.configured.is_zero() {
                    return None;
                }
                self.remaining = self.configured;
                self.state = RunState::Running;
                Some(Event::TimerStarted {
                    duration: self.configured,
                    total_secs: self.total_secs(),
                    at: Utc::now(),
                })
            }
            RunState::Running | RunState::Paused => None,
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        match self.state {
            RunState::Running => {
                self.state = RunState::Paused;
                Some(Event::TimerPaused {
                    remaining: self.remaining,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn resume(&mut self) -> Option<Event> {
        match self.state {
            RunState::Paused => {
                self.state = RunState::Running;
                Some(Event::TimerResumed {
                    remaining: self.remaining,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Return to Idle from any state, restoring the configured duration.
    pub fn reset(&mut self) -> Option<Event> {
        self.state = RunState::Idle;
        self.remaining = self.configured;
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Apply one heartbeat. Returns `Some(Event::TimerCompleted)` when the
    /// decrement lands on zero; the transition to Completed is atomic with
    /// the decrement, so Running is never observable with zero remaining.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != RunState::Running {
            return None;
        }
        self.remaining.decrement();
        if self.remaining.is_zero() {
            self.state = RunState::Completed;
            return Some(Event::TimerCompleted { at: Utc::now() });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn armed(h: u32, m: u32, s: u32) -> CountdownEngine {
        let mut engine = CountdownEngine::new();
        assert!(engine.set_duration(Hms::new(h, m, s).unwrap()).is_some());
        assert!(engine.start().is_some());
        engine
    }

    #[test]
    fn starts_idle_with_zero_duration() {
        let engine = CountdownEngine::new();
        assert_eq!(engine.state(), RunState::Idle);
        assert!(engine.remaining().is_zero());
    }

    #[test]
    fn start_with_zero_duration_is_rejected() {
        let mut engine = CountdownEngine::new();
        assert!(engine.start().is_none());
        assert_eq!(engine.state(), RunState::Idle);
    }

    #[test]
    fn start_pause_resume() {
        let mut engine = armed(0, 25, 0);
        assert_eq!(engine.state(), RunState::Running);

        assert!(engine.pause().is_some());
        assert_eq!(engine.state(), RunState::Paused);

        assert!(engine.resume().is_some());
        assert_eq!(engine.state(), RunState::Running);
    }

    #[test]
    fn pause_resume_without_ticks_preserves_remaining() {
        let mut engine = armed(0, 25, 0);
        let before = engine.remaining();
        engine.pause();
        engine.resume();
        assert_eq!(engine.remaining(), before);
        assert_eq!(engine.state(), RunState::Running);
    }

    #[test]
    fn set_duration_rejected_while_live() {
        let mut engine = armed(0, 10, 0);
        assert!(engine.set_duration(Hms::new(0, 5, 0).unwrap()).is_none());
        engine.pause();
        assert!(engine.set_duration(Hms::new(0, 5, 0).unwrap()).is_none());
        assert_eq!(engine.configured(), Hms::new(0, 10, 0).unwrap());
    }

    #[test]
    fn tick_outside_running_is_noop() {
        let mut engine = CountdownEngine::new();
        engine.set_duration(Hms::new(0, 0, 5).unwrap());
        assert!(engine.tick().is_none());
        assert_eq!(engine.remaining(), Hms::new(0, 0, 5).unwrap());

        engine.start();
        engine.pause();
        assert!(engine.tick().is_none());
        assert_eq!(engine.remaining(), Hms::new(0, 0, 5).unwrap());
    }

    #[test]
    fn reset_restores_configured_duration_from_any_state() {
        let mut engine = armed(0, 0, 5);
        engine.tick();
        engine.tick();
        assert_eq!(engine.remaining(), Hms::new(0, 0, 3).unwrap());

        engine.reset();
        assert_eq!(engine.state(), RunState::Idle);
        assert_eq!(engine.remaining(), Hms::new(0, 0, 5).unwrap());

        // Reset from Completed clears the completion flag.
        engine.start();
        for _ in 0..5 {
            engine.tick();
        }
        assert_eq!(engine.state(), RunState::Completed);
        engine.reset();
        assert_eq!(engine.state(), RunState::Idle);
        assert_eq!(engine.remaining(), Hms::new(0, 0, 5).unwrap());
    }

    #[test]
    fn three_second_countdown_completes_exactly_once() {
        let mut engine = armed(0, 0, 3);
        assert!(engine.tick().is_none());
        assert!(engine.tick().is_none());
        let completed = engine.tick();
        assert!(matches!(completed, Some(Event::TimerCompleted { .. })));
        assert_eq!(engine.state(), RunState::Completed);
        assert!(engine.remaining().is_zero());

        // Further ticks change nothing.
        assert!(engine.tick().is_none());
        assert_eq!(engine.state(), RunState::Completed);
    }

    #[test]
    fn ninety_second_countdown_with_pause_in_the_middle() {
        let mut engine = armed(0, 1, 30);
        assert!(engine.tick().is_none());
        assert_eq!(engine.remaining(), Hms::new(0, 1, 29).unwrap());

        engine.pause();
        engine.resume();

        for _ in 0..88 {
            assert!(engine.tick().is_none());
        }
        assert!(matches!(engine.tick(), Some(Event::TimerCompleted { .. })));
        assert!(engine.remaining().is_zero());
    }

    #[test]
    fn restart_from_completed_rearms_the_configured_duration() {
        let mut engine = armed(0, 0, 2);
        engine.tick();
        engine.tick();
        assert_eq!(engine.state(), RunState::Completed);

        assert!(engine.start().is_some());
        assert_eq!(engine.state(), RunState::Running);
        assert_eq!(engine.remaining(), Hms::new(0, 0, 2).unwrap());
    }

    #[test]
    fn set_duration_from_completed_returns_to_idle() {
        let mut engine = armed(0, 0, 1);
        engine.tick();
        assert_eq!(engine.state(), RunState::Completed);

        assert!(engine.set_duration(Hms::new(0, 0, 9).unwrap()).is_some());
        assert_eq!(engine.state(), RunState::Idle);
        assert_eq!(engine.remaining(), Hms::new(0, 0, 9).unwrap());
    }

    #[test]
    fn progress_runs_zero_to_one() {
        let mut engine = armed(0, 0, 4);
        assert_eq!(engine.progress(), 0.0);
        engine.tick();
        assert_eq!(engine.progress(), 0.25);
        engine.tick();
        engine.tick();
        engine.tick();
        assert_eq!(engine.progress(), 1.0);
    }

    proptest! {
        /// Exactly total_seconds ticks drive Running to Completed, with the
        /// remaining duration hitting zero on the final tick and not before.
        #[test]
        fn completes_on_exactly_the_last_tick(h in 0u32..2, m in 0u32..60, s in 0u32..60) {
            prop_assume!(h + m + s > 0);
            let duration = Hms::new(h, m, s).unwrap();
            let mut engine = CountdownEngine::new();
            engine.set_duration(duration).unwrap();
            engine.start().unwrap();

            let total = duration.total_seconds();
            for _ in 1..total {
                prop_assert!(engine.tick().is_none());
                prop_assert_eq!(engine.state(), RunState::Running);
                prop_assert!(!engine.remaining().is_zero());
            }
            let completed = matches!(engine.tick(), Some(Event::TimerCompleted { .. }));
            prop_assert!(completed);
            prop_assert_eq!(engine.state(), RunState::Completed);
            prop_assert!(engine.remaining().is_zero());
        }
    }
}

//! Timer engine implementation.
//!
//! The engine is a synchronous state machine. It does not use internal
//! threads or timers - the caller is responsible for calling `tick()`
//! once per second while the engine is running.
//!
//! ## State
//!
//! ```text
//! (Work | Break) x (Running | Paused)
//! ```
//!
//! When the countdown for the current phase is exhausted, the phase flips
//! and the counter resets to the new phase's duration within the same
//! `tick()` call. The engine stays Running across the flip.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(Durations::default());
//! engine.toggle_pause(); // start
//! // Once per second:
//! engine.tick(); // Returns Some(Event::PhaseSwitched) on exhaustion
//! ```

use chrono::Utc;
use serde::Serialize;

use super::format::format_time;
use super::phase::{Durations, TimerPhase, TimerRunState};
use crate::events::Event;

/// Point-in-time view of the engine, built for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    pub phase_label: &'static str,
    pub run_state: TimerRunState,
    pub remaining_secs: u64,
    /// Countdown ceiling for the current phase.
    pub total_secs: u64,
    /// Remaining time pre-formatted as `MM:SS`.
    pub display: String,
}

/// Core timer engine.
///
/// Counts down the current phase one second per `tick()` call and flips
/// between Work and Break on exhaustion or on request.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    durations: Durations,
    phase: TimerPhase,
    run_state: TimerRunState,
    remaining_secs: u64,
}

impl TimerEngine {
    /// Create a new engine: paused, Work phase, full duration remaining.
    pub fn new(durations: Durations) -> Self {
        Self {
            durations,
            phase: TimerPhase::Work,
            run_state: TimerRunState::Paused,
            remaining_secs: durations.for_phase(TimerPhase::Work),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn run_state(&self) -> TimerRunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == TimerRunState::Running
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn durations(&self) -> Durations {
        self.durations
    }

    /// Countdown ceiling for the current phase.
    pub fn total_secs(&self) -> u64 {
        self.durations.for_phase(self.phase)
    }

    /// Build a full state snapshot for rendering.
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            phase_label: self.phase.label(),
            run_state: self.run_state,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs(),
            display: format_time(self.remaining_secs),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Flip between Running and Paused.
    pub fn toggle_pause(&mut self) -> Event {
        self.run_state = self.run_state.toggled();
        match self.run_state {
            TimerRunState::Running => Event::TimerResumed {
                remaining_secs: self.remaining_secs,
                at: Utc::now(),
            },
            TimerRunState::Paused => Event::TimerPaused {
                remaining_secs: self.remaining_secs,
                at: Utc::now(),
            },
        }
    }

    /// Flip the phase and reset the countdown to the new phase's
    /// duration. Run state is untouched; callable in any state.
    pub fn switch_phase(&mut self) -> Event {
        self.phase = self.phase.other();
        self.remaining_secs = self.durations.for_phase(self.phase);
        Event::PhaseSwitched {
            phase: self.phase,
            duration_secs: self.remaining_secs,
            at: Utc::now(),
        }
    }

    /// Advance the countdown by one second.
    ///
    /// Returns `None` while paused. While running, exhaustion flips the
    /// phase atomically within this call and the engine stays Running;
    /// the counter never goes negative.
    pub fn tick(&mut self) -> Option<Event> {
        if self.run_state != TimerRunState::Running {
            return None;
        }
        if self.remaining_secs <= 1 {
            return Some(self.switch_phase());
        }
        self.remaining_secs -= 1;
        Some(Event::Tick {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }
}

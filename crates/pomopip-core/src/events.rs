use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerPhase;

/// Every state change in the engine produces an Event.
/// The GUI re-renders from the snapshot carried alongside; events exist
/// so observers can distinguish what happened from what the state is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Phase flipped, either manually or by countdown exhaustion.
    PhaseSwitched {
        phase: TimerPhase,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// One second elapsed while running.
    Tick {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
}

mod engine;
mod format;
mod phase;

pub use engine::{TimerEngine, TimerSnapshot};
pub use format::format_time;
pub use phase::{Durations, TimerPhase, TimerRunState};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Work,
    Break,
}

impl TimerPhase {
    /// The opposite phase.
    pub fn other(self) -> Self {
        match self {
            TimerPhase::Work => TimerPhase::Break,
            TimerPhase::Break => TimerPhase::Work,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimerPhase::Work => "Work",
            TimerPhase::Break => "Break",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerRunState {
    Running,
    Paused,
}

impl TimerRunState {
    pub fn toggled(self) -> Self {
        match self {
            TimerRunState::Running => TimerRunState::Paused,
            TimerRunState::Paused => TimerRunState::Running,
        }
    }
}

/// Per-phase countdown ceilings in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Durations {
    pub work_secs: u64,
    pub break_secs: u64,
}

impl Durations {
    pub fn new(work_secs: u64, break_secs: u64) -> Self {
        Self {
            work_secs,
            break_secs,
        }
    }

    /// Countdown ceiling for the given phase.
    pub fn for_phase(&self, phase: TimerPhase) -> u64 {
        match phase {
            TimerPhase::Work => self.work_secs,
            TimerPhase::Break => self.break_secs,
        }
    }
}

impl Default for Durations {
    /// 50 minutes of work, 10 minutes of break.
    fn default() -> Self {
        Self {
            work_secs: 50 * 60,
            break_secs: 10 * 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_flips_both_ways() {
        assert_eq!(TimerPhase::Work.other(), TimerPhase::Break);
        assert_eq!(TimerPhase::Break.other(), TimerPhase::Work);
    }

    #[test]
    fn default_durations() {
        let d = Durations::default();
        assert_eq!(d.for_phase(TimerPhase::Work), 3000);
        assert_eq!(d.for_phase(TimerPhase::Break), 600);
    }
}

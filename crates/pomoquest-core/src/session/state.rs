//! Session phase bookkeeping.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Work -> (ShortBreak | LongBreak) -> Work -> ...
//!   ^______________ reset from anywhere ______________|
//! ```
//!
//! The state machine never counts seconds. It records which phase is active,
//! how long work and break phases last, and how many work sessions finished.
//! `epoch` is bumped whenever a running countdown must be thrown away.

use serde::{Deserialize, Serialize};

use super::durations::{self, DEFAULT_WORK_SECS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn is_break(self) -> bool {
        matches!(self, Phase::ShortBreak | Phase::LongBreak)
    }

    /// Headline shown next to the countdown.
    pub fn status_message(self) -> &'static str {
        match self {
            Phase::Work => "Time to Focus!",
            Phase::ShortBreak => "Take a Short Break",
            Phase::LongBreak => "Take a Long Break",
            Phase::Idle => "Ready to Start?",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Phase::Idle => "idle",
            Phase::Work => "work",
            Phase::ShortBreak => "short break",
            Phase::LongBreak => "long break",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: Phase,
    pub sessions_completed: u32,
    pub epoch: u64,
    pub work_duration_secs: u32,
    /// Always `durations::break_for(work_duration_secs)` once a work session
    /// has completed; seeded from the same table at construction.
    pub break_duration_secs: u32,
}

impl SessionState {
    /// A fresh idle session. Zero is replaced by the default work duration.
    pub fn new(work_duration_secs: u32) -> Self {
        let work = if work_duration_secs == 0 {
            DEFAULT_WORK_SECS
        } else {
            work_duration_secs
        };
        Self {
            phase: Phase::Idle,
            sessions_completed: 0,
            epoch: 0,
            work_duration_secs: work,
            break_duration_secs: durations::break_for(work),
        }
    }

    pub fn start_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Record a finished work session and return the coins it earned.
    ///
    /// The phase is left alone; the caller chains the break itself.
    pub fn complete_work(&mut self) -> u64 {
        self.sessions_completed = self.sessions_completed.saturating_add(1);
        self.break_duration_secs = durations::break_for(self.work_duration_secs);
        durations::coins_for(self.work_duration_secs)
    }

    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Returns false (and changes nothing) for a zero duration.
    pub fn set_work_duration(&mut self, secs: u32) -> bool {
        if secs == 0 {
            return false;
        }
        self.work_duration_secs = secs;
        self.epoch = self.epoch.wrapping_add(1);
        true
    }

    /// Length of `phase` in seconds under the current configuration.
    pub fn duration_of(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Work | Phase::Idle => self.work_duration_secs,
            Phase::ShortBreak => self.break_duration_secs,
            Phase::LongBreak => durations::LONG_BREAK_SECS,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(DEFAULT_WORK_SECS)
    }
}

/// Break that follows the work session bringing the total to `completed`.
///
/// An interval of zero never schedules a long break.
pub fn break_after(completed: u32, long_break_interval: u32) -> Phase {
    if long_break_interval != 0 && completed != 0 && completed % long_break_interval == 0 {
        Phase::LongBreak
    } else {
        Phase::ShortBreak
    }
}

//! Advisory countdown for the active phase.
//!
//! Wall-clock based, no internal threads: the host calls `tick()` roughly
//! once a second. The countdown mirrors a [`SessionState`] and throws its
//! progress away whenever the session's epoch or phase moves on.
//!
//! ## Usage
//!
//! ```ignore
//! let mut countdown = Countdown::new(&snapshot.session);
//! countdown.start();
//! // every second:
//! if let Some(finished) = countdown.tick() {
//!     for action in follow_up(&snapshot.session, finished, interval) {
//!         store.dispatch(action);
//!     }
//!     countdown.sync(&store.snapshot().session);
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::state::{break_after, Phase, SessionState};
use crate::action::Action;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Countdown {
    phase: Phase,
    epoch: u64,
    total_ms: u64,
    remaining_ms: u64,
    running: bool,
    /// Timestamp (ms since epoch) of the last flush while running.
    #[serde(default)]
    last_tick_epoch_ms: Option<u64>,
    /// Set once `tick` has handed out the finished phase.
    #[serde(default)]
    reported: bool,
}

impl Countdown {
    pub fn new(session: &SessionState) -> Self {
        let total_ms = phase_ms(session, session.phase);
        Self {
            phase: session.phase,
            epoch: session.epoch,
            total_ms,
            remaining_ms: total_ms,
            running: false,
            last_tick_epoch_ms: None,
            reported: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_ms.div_ceil(1000)
    }

    /// 0.0 .. 1.0 progress within the phase.
    pub fn progress(&self) -> f64 {
        if self.total_ms == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_ms as f64 / self.total_ms as f64)
    }

    /// `MM:SS` rendering of the remaining time.
    pub fn display(&self) -> String {
        let secs = self.remaining_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Re-read the session. A new epoch or phase discards the current
    /// countdown and leaves it stopped at the full phase length.
    /// Returns true if the countdown was reinitialised.
    pub fn sync(&mut self, session: &SessionState) -> bool {
        if session.epoch == self.epoch && session.phase == self.phase {
            return false;
        }
        *self = Self::new(session);
        true
    }

    pub fn start(&mut self) -> bool {
        if self.running || self.remaining_ms == 0 {
            return false;
        }
        self.running = true;
        self.last_tick_epoch_ms = Some(now_ms());
        true
    }

    pub fn pause(&mut self) -> bool {
        self.pause_at(now_ms())
    }

    /// Start if paused, pause if running. Returns the new running state.
    pub fn toggle(&mut self) -> bool {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
        self.running
    }

    /// Call periodically. Returns the phase that just ran out, exactly once.
    ///
    /// A countdown paused after its deadline still reports on the next tick.
    pub fn tick(&mut self) -> Option<Phase> {
        self.tick_at(now_ms())
    }

    pub(crate) fn tick_at(&mut self, now: u64) -> Option<Phase> {
        if self.running {
            self.flush_elapsed(now);
        }
        if self.remaining_ms > 0 || self.reported {
            return None;
        }
        self.running = false;
        self.last_tick_epoch_ms = None;
        self.reported = true;
        Some(self.phase)
    }

    fn pause_at(&mut self, now: u64) -> bool {
        if !self.running {
            return false;
        }
        self.flush_elapsed(now);
        self.running = false;
        self.last_tick_epoch_ms = None;
        true
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn flush_elapsed(&mut self, now: u64) {
        if let Some(last) = self.last_tick_epoch_ms {
            let elapsed = now.saturating_sub(last);
            self.remaining_ms = self.remaining_ms.saturating_sub(elapsed);
            self.last_tick_epoch_ms = Some(now);
        }
    }
}

/// Actions to dispatch once the countdown for `finished` reaches zero.
///
/// Work chains into a break (long every `long_break_interval` sessions),
/// breaks chain back into work. Idle never finishes a countdown.
pub fn follow_up(session: &SessionState, finished: Phase, long_break_interval: u32) -> Vec<Action> {
    match finished {
        Phase::Work => {
            let completed = session.sessions_completed.saturating_add(1);
            vec![
                Action::CompleteWorkSession,
                Action::StartPhase {
                    phase: break_after(completed, long_break_interval),
                },
            ]
        }
        Phase::ShortBreak | Phase::LongBreak => vec![Action::StartPhase { phase: Phase::Work }],
        Phase::Idle => Vec::new(),
    }
}

/// Actions to dispatch when the user presses start.
pub fn start_actions(session: &SessionState) -> Vec<Action> {
    if session.phase == Phase::Idle {
        vec![Action::StartPhase { phase: Phase::Work }]
    } else {
        Vec::new()
    }
}

fn phase_ms(session: &SessionState, phase: Phase) -> u64 {
    u64::from(session.duration_of(phase)).saturating_mul(1000)
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

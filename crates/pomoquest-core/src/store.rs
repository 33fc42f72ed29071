//! Holder of the current snapshot.
//!
//! Transitions are applied one at a time under a lock and the snapshot is
//! swapped wholesale, so readers only ever see complete states.

use std::sync::{Mutex, MutexGuard};

use crate::action::Action;
use crate::events::Event;
use crate::reducer;
use crate::snapshot::Snapshot;

#[derive(Debug, Default)]
pub struct Store {
    state: Mutex<Snapshot>,
}

impl Store {
    pub fn new(initial: Snapshot) -> Self {
        Self {
            state: Mutex::new(initial),
        }
    }

    /// Copy of the current snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.lock().clone()
    }

    /// Apply `action` and return the events it produced.
    pub fn dispatch(&self, action: Action) -> Vec<Event> {
        let name = action.name();
        let mut state = self.lock();
        let transition = reducer::transition(&state, action);
        *state = transition.snapshot;
        drop(state);

        for event in &transition.events {
            match event {
                Event::Rejected { reason, .. } => {
                    tracing::debug!(action = name, %reason, "action rejected");
                }
                Event::TaskBonusAwarded { bonus, balance } => {
                    tracing::info!(bonus, balance, "task goal reached");
                }
                Event::SessionCompleted {
                    sessions_completed,
                    coins_earned,
                    ..
                } => {
                    tracing::info!(sessions_completed, coins_earned, "work session completed");
                }
                other => tracing::debug!(action = name, event = ?other, "applied"),
            }
        }
        transition.events
    }

    /// Apply several actions in order, collecting all events.
    pub fn dispatch_all(&self, actions: impl IntoIterator<Item = Action>) -> Vec<Event> {
        actions
            .into_iter()
            .flat_map(|action| self.dispatch(action))
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Snapshot> {
        // A panic mid-dispatch cannot leave a torn snapshot: the swap is a
        // single assignment.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{follow_up, Phase};

    #[test]
    fn dispatch_replaces_snapshot() {
        let store = Store::default();
        let events = store.dispatch(Action::EarnCoins { amount: 5 });
        assert_eq!(events, vec![Event::CoinsEarned { amount: 5, balance: 55 }]);
        assert_eq!(store.snapshot().coins, 55);
    }

    #[test]
    fn work_completion_chain() {
        let store = Store::default();
        store.dispatch(Action::StartPhase { phase: Phase::Work });
        let actions = follow_up(&store.snapshot().session, Phase::Work, 4);
        store.dispatch_all(actions);

        let state = store.snapshot();
        assert_eq!(state.session.phase, Phase::ShortBreak);
        assert_eq!(state.session.sessions_completed, 1);
        assert_eq!(state.coins, 65);
    }
}

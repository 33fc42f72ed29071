//! The single transition function over [`Snapshot`].
//!
//! `transition` is total and pure: the same snapshot and action always give
//! the same result, and a rejected action returns a snapshot equal to its
//! input alongside an [`Event::Rejected`].

use crate::action::Action;
use crate::events::{Event, RejectReason};
use crate::ledger;
use crate::snapshot::Snapshot;

/// Result of applying one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub snapshot: Snapshot,
    pub events: Vec<Event>,
}

impl Transition {
    fn applied(snapshot: Snapshot, events: Vec<Event>) -> Self {
        Self { snapshot, events }
    }

    fn rejected(state: &Snapshot, action: &'static str, reason: RejectReason) -> Self {
        Self {
            snapshot: state.clone(),
            events: vec![Event::Rejected {
                action: action.to_string(),
                reason,
            }],
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.events.iter().any(Event::is_rejection)
    }
}

/// Apply `action` to `state`, returning only the next snapshot.
pub fn reduce(state: &Snapshot, action: Action) -> Snapshot {
    transition(state, action).snapshot
}

/// Apply `action` to `state`.
pub fn transition(state: &Snapshot, action: Action) -> Transition {
    let name = action.name();
    let mut next = state.clone();

    match action {
        // ── Session ──────────────────────────────────────────────────
        Action::StartPhase { phase } => {
            next.session.start_phase(phase);
            Transition::applied(next, vec![Event::PhaseStarted { phase }])
        }
        Action::CompleteWorkSession => {
            let earned = next.session.complete_work();
            next.coins = ledger::credit(next.coins, earned);
            let events = vec![
                Event::SessionCompleted {
                    sessions_completed: next.session.sessions_completed,
                    coins_earned: earned,
                    break_duration_secs: next.session.break_duration_secs,
                },
                Event::CoinsEarned {
                    amount: earned,
                    balance: next.coins,
                },
            ];
            Transition::applied(next, events)
        }
        Action::ResetSession => {
            next.session.reset();
            let epoch = next.session.epoch;
            Transition::applied(next, vec![Event::SessionReset { epoch }])
        }
        Action::SetWorkDuration { secs } => {
            if !next.session.set_work_duration(secs) {
                return Transition::rejected(state, name, RejectReason::ZeroValue);
            }
            let event = Event::WorkDurationChanged {
                work_duration_secs: secs,
                epoch: next.session.epoch,
            };
            Transition::applied(next, vec![event])
        }

        // ── Coins ────────────────────────────────────────────────────
        Action::EarnCoins { amount } => {
            next.coins = ledger::credit(next.coins, amount);
            let balance = next.coins;
            Transition::applied(next, vec![Event::CoinsEarned { amount, balance }])
        }
        Action::SpendCoins { amount } => match ledger::debit(next.coins, amount) {
            Ok(balance) => {
                next.coins = balance;
                Transition::applied(next, vec![Event::CoinsSpent { amount, balance }])
            }
            Err(short) => Transition::rejected(state, name, insufficient(short)),
        },
        Action::ChargeForQuest { cost } => match ledger::debit(next.coins, cost) {
            Ok(balance) => {
                next.coins = balance;
                Transition::applied(next, vec![Event::QuestCharged { cost, balance }])
            }
            Err(short) => Transition::rejected(state, name, insufficient(short)),
        },
        Action::Invest { company_id, cost } => match ledger::debit(next.coins, cost) {
            Ok(balance) => {
                next.coins = balance;
                let shares = next.holdings.entry(company_id.clone()).or_insert(0);
                *shares = shares.saturating_add(1);
                let shares = *shares;
                Transition::applied(
                    next,
                    vec![Event::Invested {
                        company_id,
                        shares,
                        balance,
                    }],
                )
            }
            Err(short) => Transition::rejected(state, name, insufficient(short)),
        },

        // ── Tasks ────────────────────────────────────────────────────
        Action::AddTask { task } => {
            if state.task(task.id).is_some() {
                return Transition::rejected(state, name, RejectReason::DuplicateId { id: task.id });
            }
            let id = task.id;
            next.tasks.push(task);
            Transition::applied(next, vec![Event::TaskAdded { id }])
        }
        Action::ToggleTask { id } => {
            let Some(task) = next.tasks.iter_mut().find(|t| t.id == id) else {
                return Transition::rejected(state, name, RejectReason::UnknownId { id });
            };
            let was_completed = task.completed;
            task.completed = !was_completed;

            let mut events = Vec::with_capacity(2);
            if !was_completed {
                let step =
                    ledger::advance_progress(next.task_reward_progress, next.task_reward_threshold);
                next.task_reward_progress = step.progress;
                if step.bonus > 0 {
                    next.coins = ledger::credit(next.coins, step.bonus);
                    events.push(Event::TaskBonusAwarded {
                        bonus: step.bonus,
                        balance: next.coins,
                    });
                }
            }
            events.insert(
                0,
                Event::TaskToggled {
                    id,
                    completed: !was_completed,
                    progress: next.task_reward_progress,
                },
            );
            Transition::applied(next, events)
        }
        Action::RemoveTask { id } => {
            if state.task(id).is_none() {
                return Transition::rejected(state, name, RejectReason::UnknownId { id });
            }
            next.tasks.retain(|t| t.id != id);
            Transition::applied(next, vec![Event::TaskRemoved { id }])
        }
        Action::SetTaskRewardThreshold { threshold } => {
            if threshold == 0 {
                return Transition::rejected(state, name, RejectReason::ZeroValue);
            }
            next.task_reward_threshold = threshold;
            next.task_reward_progress = 0;
            Transition::applied(next, vec![Event::TaskRewardThresholdChanged { threshold }])
        }

        // ── Quests ───────────────────────────────────────────────────
        Action::AddQuest { quest } => {
            if state.quest(quest.id).is_some() {
                return Transition::rejected(state, name, RejectReason::DuplicateId { id: quest.id });
            }
            if quest.reward == 0 {
                return Transition::rejected(state, name, RejectReason::ZeroValue);
            }
            let event = Event::QuestAdded {
                id: quest.id,
                reward: quest.reward,
            };
            next.quests.push(quest);
            Transition::applied(next, vec![event])
        }
        Action::CompleteQuest { id } => {
            let Some(quest) = state.quest(id) else {
                return Transition::rejected(state, name, RejectReason::UnknownId { id });
            };
            let reward = quest.reward;
            next.coins = ledger::credit(next.coins, u64::from(reward));
            next.quests.retain(|q| q.id != id);
            let balance = next.coins;
            Transition::applied(
                next,
                vec![Event::QuestCompleted {
                    id,
                    reward,
                    balance,
                }],
            )
        }

        // ── Preferences & shortcuts ──────────────────────────────────
        Action::ToggleTheme => {
            next.theme = next.theme.toggled();
            let theme = next.theme;
            Transition::applied(next, vec![Event::ThemeChanged { theme }])
        }
        Action::AddShortcut { shortcut } => {
            if state.shortcut(shortcut.id).is_some() {
                return Transition::rejected(
                    state,
                    name,
                    RejectReason::DuplicateId { id: shortcut.id },
                );
            }
            let id = shortcut.id;
            next.shortcuts.push(shortcut);
            Transition::applied(next, vec![Event::ShortcutAdded { id }])
        }
        Action::UpdateShortcut { id, edit } => {
            let Some(current) = state.shortcut(id) else {
                return Transition::rejected(state, name, RejectReason::UnknownId { id });
            };
            let Some(updated) = current.edited(&edit) else {
                return Transition::rejected(
                    state,
                    name,
                    RejectReason::DocumentContentLocked { id },
                );
            };
            next.shortcuts = next
                .shortcuts
                .into_iter()
                .map(|s| if s.id == id { updated.clone() } else { s })
                .collect();
            Transition::applied(next, vec![Event::ShortcutUpdated { id }])
        }
        Action::RemoveShortcut { id } => {
            if state.shortcut(id).is_none() {
                return Transition::rejected(state, name, RejectReason::UnknownId { id });
            }
            next.shortcuts.retain(|s| s.id != id);
            Transition::applied(next, vec![Event::ShortcutRemoved { id }])
        }
    }
}

fn insufficient(short: ledger::Shortfall) -> RejectReason {
    RejectReason::InsufficientFunds {
        cost: short.cost,
        balance: short.balance,
    }
}

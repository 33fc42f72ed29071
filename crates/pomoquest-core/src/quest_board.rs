//! Paid quest generation.
//!
//! Each attempt is charged before the provider runs and is not refunded.
//! Only one attempt runs at a time per board.

use std::sync::Arc;

use crate::action::Action;
use crate::events::{Event, RejectReason};
use crate::flight::FlightGate;
use crate::ids::{next_id, EntityId};
use crate::provider::ContentProvider;
use crate::quest::Quest;
use crate::store::Store;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestRequest {
    Delivered(Quest),
    /// Another request on this board has not finished yet.
    InFlight,
    Unaffordable { cost: u64, balance: u64 },
}

pub struct QuestBoard {
    store: Arc<Store>,
    provider: Arc<dyn ContentProvider>,
    cost: u64,
    gate: FlightGate,
}

impl QuestBoard {
    pub fn new(store: Arc<Store>, provider: Arc<dyn ContentProvider>, cost: u64) -> Self {
        Self {
            store,
            provider,
            cost,
            gate: FlightGate::new(),
        }
    }

    pub fn cost(&self) -> u64 {
        self.cost
    }

    pub fn is_generating(&self) -> bool {
        self.gate.is_busy()
    }

    pub async fn request_quest(&self) -> QuestRequest {
        let Some(_permit) = self.gate.try_acquire() else {
            tracing::debug!("quest request suppressed, generation already in flight");
            return QuestRequest::InFlight;
        };

        let charged = self.store.dispatch(Action::ChargeForQuest { cost: self.cost });
        if let Some(Event::Rejected { reason, .. }) = charged.first() {
            let balance = match reason {
                RejectReason::InsufficientFunds { balance, .. } => *balance,
                _ => self.store.snapshot().coins,
            };
            return QuestRequest::Unaffordable {
                cost: self.cost,
                balance,
            };
        }

        let draft = self.provider.generate_quest().await;
        let quest = draft.into_quest(next_id());
        self.store.dispatch(Action::AddQuest {
            quest: quest.clone(),
        });
        tracing::info!(
            id = quest.id,
            reward = quest.reward,
            provider = self.provider.name(),
            "quest delivered"
        );
        QuestRequest::Delivered(quest)
    }

    /// Pay out and remove a quest.
    pub fn complete(&self, id: EntityId) -> Vec<Event> {
        self.store.dispatch(Action::CompleteQuest { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::OfflineProvider;
    use crate::snapshot::Snapshot;

    fn board(coins: u64) -> (Arc<Store>, QuestBoard) {
        let store = Arc::new(Store::new(Snapshot {
            coins,
            ..Snapshot::default()
        }));
        let board = QuestBoard::new(store.clone(), Arc::new(OfflineProvider), 10);
        (store, board)
    }

    #[tokio::test]
    async fn delivered_quest_is_charged_and_listed() {
        let (store, board) = board(50);
        let QuestRequest::Delivered(quest) = board.request_quest().await else {
            panic!("Expected a delivered quest");
        };
        let state = store.snapshot();
        assert_eq!(state.coins, 40);
        assert_eq!(state.quests, vec![quest.clone()]);

        board.complete(quest.id);
        let state = store.snapshot();
        assert!(state.quests.is_empty());
        assert_eq!(state.coins, 40 + u64::from(quest.reward));
    }

    #[tokio::test]
    async fn short_balance_is_unaffordable() {
        let (store, board) = board(9);
        assert_eq!(
            board.request_quest().await,
            QuestRequest::Unaffordable { cost: 10, balance: 9 }
        );
        assert_eq!(store.snapshot().coins, 9);
        assert!(!board.is_generating());
    }
}

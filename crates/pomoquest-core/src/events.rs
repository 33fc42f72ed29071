use serde::{Deserialize, Serialize};

use crate::ids::EntityId;
use crate::session::Phase;
use crate::snapshot::Theme;

/// Every applied action reports what it did as one or more events.
/// Hosts render them as feedback; the store logs them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    PhaseStarted {
        phase: Phase,
    },
    SessionCompleted {
        sessions_completed: u32,
        coins_earned: u64,
        break_duration_secs: u32,
    },
    SessionReset {
        epoch: u64,
    },
    WorkDurationChanged {
        work_duration_secs: u32,
        epoch: u64,
    },
    CoinsEarned {
        amount: u64,
        balance: u64,
    },
    CoinsSpent {
        amount: u64,
        balance: u64,
    },
    TaskAdded {
        id: EntityId,
    },
    TaskToggled {
        id: EntityId,
        completed: bool,
        progress: u32,
    },
    /// Task progress hit the threshold and was reset.
    TaskBonusAwarded {
        bonus: u64,
        balance: u64,
    },
    TaskRemoved {
        id: EntityId,
    },
    TaskRewardThresholdChanged {
        threshold: u32,
    },
    QuestCharged {
        cost: u64,
        balance: u64,
    },
    QuestAdded {
        id: EntityId,
        reward: u32,
    },
    QuestCompleted {
        id: EntityId,
        reward: u32,
        balance: u64,
    },
    ThemeChanged {
        theme: Theme,
    },
    Invested {
        company_id: String,
        shares: u32,
        balance: u64,
    },
    ShortcutAdded {
        id: EntityId,
    },
    ShortcutUpdated {
        id: EntityId,
    },
    ShortcutRemoved {
        id: EntityId,
    },
    /// The action was a no-op; the snapshot is unchanged.
    Rejected {
        action: String,
        reason: RejectReason,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectReason {
    InsufficientFunds { cost: u64, balance: u64 },
    UnknownId { id: EntityId },
    DuplicateId { id: EntityId },
    DocumentContentLocked { id: EntityId },
    ZeroValue,
}

impl Event {
    pub fn is_rejection(&self) -> bool {
        matches!(self, Event::Rejected { .. })
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::InsufficientFunds { cost, balance } => {
                write!(f, "not enough coins ({balance} < {cost})")
            }
            RejectReason::UnknownId { id } => write!(f, "no entry with id {id}"),
            RejectReason::DuplicateId { id } => write!(f, "id {id} already exists"),
            RejectReason::DocumentContentLocked { id } => {
                write!(f, "document {id} content cannot be edited")
            }
            RejectReason::ZeroValue => f.write_str("value must be greater than zero"),
        }
    }
}

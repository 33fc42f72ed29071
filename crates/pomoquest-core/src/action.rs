//! The closed set of transitions a [`crate::Snapshot`] accepts.
//!
//! Actions carry everything the reducer needs, ids included, so applying one
//! is deterministic. The `*_from_input` helpers validate raw form input and
//! stamp a fresh id; invalid input never becomes an action.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ids::{self, EntityId};
use crate::quest::{Quest, QuestDraft};
use crate::session::Phase;
use crate::shortcut::{Shortcut, ShortcutEdit};
use crate::task::Task;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    StartPhase { phase: Phase },
    CompleteWorkSession,
    ResetSession,
    SetWorkDuration { secs: u32 },
    EarnCoins { amount: u64 },
    SpendCoins { amount: u64 },
    AddTask { task: Task },
    ToggleTask { id: EntityId },
    RemoveTask { id: EntityId },
    SetTaskRewardThreshold { threshold: u32 },
    AddQuest { quest: Quest },
    CompleteQuest { id: EntityId },
    ChargeForQuest { cost: u64 },
    ToggleTheme,
    Invest { company_id: String, cost: u64 },
    AddShortcut { shortcut: Shortcut },
    UpdateShortcut { id: EntityId, edit: ShortcutEdit },
    RemoveShortcut { id: EntityId },
}

impl Action {
    /// Stable tag used in logs and rejection events.
    pub fn name(&self) -> &'static str {
        match self {
            Action::StartPhase { .. } => "start_phase",
            Action::CompleteWorkSession => "complete_work_session",
            Action::ResetSession => "reset_session",
            Action::SetWorkDuration { .. } => "set_work_duration",
            Action::EarnCoins { .. } => "earn_coins",
            Action::SpendCoins { .. } => "spend_coins",
            Action::AddTask { .. } => "add_task",
            Action::ToggleTask { .. } => "toggle_task",
            Action::RemoveTask { .. } => "remove_task",
            Action::SetTaskRewardThreshold { .. } => "set_task_reward_threshold",
            Action::AddQuest { .. } => "add_quest",
            Action::CompleteQuest { .. } => "complete_quest",
            Action::ChargeForQuest { .. } => "charge_for_quest",
            Action::ToggleTheme => "toggle_theme",
            Action::Invest { .. } => "invest",
            Action::AddShortcut { .. } => "add_shortcut",
            Action::UpdateShortcut { .. } => "update_shortcut",
            Action::RemoveShortcut { .. } => "remove_shortcut",
        }
    }

    pub fn task_from_input(text: &str) -> Result<Self, ValidationError> {
        Ok(Action::AddTask {
            task: Task::new(ids::next_id(), text)?,
        })
    }

    pub fn link_from_input(name: &str, url: &str) -> Result<Self, ValidationError> {
        Ok(Action::AddShortcut {
            shortcut: Shortcut::link(ids::next_id(), name, url)?,
        })
    }

    pub fn document_from_input(name: &str, payload: String) -> Result<Self, ValidationError> {
        Ok(Action::AddShortcut {
            shortcut: Shortcut::document(ids::next_id(), name, payload)?,
        })
    }

    pub fn quest_from_draft(draft: QuestDraft) -> Self {
        Action::AddQuest {
            quest: draft.into_quest(ids::next_id()),
        }
    }

    /// Work duration picked from the minute menu.
    pub fn work_minutes(minutes: u32) -> Result<Self, ValidationError> {
        if minutes == 0 {
            return Err(ValidationError::InvalidValue {
                field: "duration",
                message: "must be at least one minute".into(),
            });
        }
        Ok(Action::SetWorkDuration {
            secs: minutes.saturating_mul(60),
        })
    }
}

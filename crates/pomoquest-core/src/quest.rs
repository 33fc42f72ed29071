//! Quests: short real-world challenges paid out in coins.
//!
//! A quest is born from provider output ([`QuestDraft`]), stamped with an id
//! and removed when completed. It is never edited in between.

use serde::{Deserialize, Serialize};

use crate::ids::EntityId;

/// Coins debited for each quest generation attempt.
pub const DEFAULT_QUEST_COST: u64 = 10;

/// Reward bounds the remote generator must respect.
pub const MIN_GENERATED_REWARD: u32 = 10;
pub const MAX_GENERATED_REWARD: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: EntityId,
    pub text: String,
    pub reward: u32,
}

/// Provider output before it gets an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestDraft {
    pub text: String,
    pub reward: u32,
}

impl QuestDraft {
    pub fn into_quest(self, id: EntityId) -> Quest {
        Quest {
            id,
            text: self.text,
            reward: self.reward,
        }
    }
}

/// Built-in quests served when the remote generator is unavailable.
pub const OFFLINE_QUESTS: &[(&str, u32)] = &[
    ("Organize your desktop files.", 20),
    ("Stretch for 5 minutes.", 10),
    ("Drink a glass of water.", 5),
    ("Write down 3 things you're grateful for.", 15),
    ("Read a chapter of a book.", 25),
    ("Plan your tasks for tomorrow.", 20),
    ("Do 10 push-ups or squats.", 15),
    ("Tidy up your workspace for 10 minutes.", 20),
    ("Unsubscribe from 5 email newsletters.", 15),
    ("Listen to one new song.", 5),
    ("Complete one Pomodoro work session.", 25),
    ("Review today's notes for 15 minutes.", 20),
    ("Read an article related to your field.", 30),
    ("Spend 20 minutes learning a new skill online.", 25),
    ("Do a 10-minute meditation to clear your mind.", 15),
    ("Go for a 15-minute walk without your phone.", 20),
    ("Write down three specific goals for tomorrow.", 20),
    ("Summarize a chapter you read in your own words.", 35),
];

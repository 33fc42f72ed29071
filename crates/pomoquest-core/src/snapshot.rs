use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ledger::{DEFAULT_STARTING_COINS, DEFAULT_TASK_REWARD_THRESHOLD};
use crate::quest::Quest;
use crate::session::SessionState;
use crate::shortcut::Shortcut;
use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// The whole game at one point in time.
///
/// Only [`crate::reducer::transition`] produces new snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub coins: u64,
    pub session: SessionState,
    pub tasks: Vec<Task>,
    pub task_reward_progress: u32,
    pub task_reward_threshold: u32,
    pub quests: Vec<Quest>,
    pub shortcuts: Vec<Shortcut>,
    pub theme: Theme,
    /// Company id -> shares owned.
    pub holdings: BTreeMap<String, u32>,
}

impl Snapshot {
    pub fn task(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn quest(&self, id: u64) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id == id)
    }

    pub fn shortcut(&self, id: u64) -> Option<&Shortcut> {
        self.shortcuts.iter().find(|s| s.id == id)
    }

    pub fn shares(&self, company_id: &str) -> u32 {
        self.holdings.get(company_id).copied().unwrap_or(0)
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            coins: DEFAULT_STARTING_COINS,
            session: SessionState::default(),
            tasks: Vec::new(),
            task_reward_progress: 0,
            task_reward_threshold: DEFAULT_TASK_REWARD_THRESHOLD,
            quests: Vec::new(),
            shortcuts: Vec::new(),
            theme: Theme::Dark,
            holdings: BTreeMap::new(),
        }
    }
}

//! # Pomoquest Core Library
//!
//! Game logic for Pomoquest, a pomodoro timer that pays out coins for
//! finished work sessions and completed tasks, and lets the player spend them
//! on generated quests and pretend investments.
//!
//! ## Architecture
//!
//! - **Reducer**: a pure `(Snapshot, Action) -> Snapshot` function. Every
//!   change to the game state goes through it; refusals are reported as
//!   events and leave the snapshot untouched
//! - **Store**: holds the current snapshot and applies actions one at a time
//! - **Countdown**: a wall-clock timer the caller ticks; when a phase runs
//!   out it yields the follow-up actions to dispatch
//! - **Providers**: quest and news generation, remote with an offline
//!   fallback, behind single-flight gates
//!
//! ## Key Components
//!
//! - [`Snapshot`]: the whole game state
//! - [`Action`]: closed set of state changes
//! - [`Store`]: current snapshot plus dispatch
//! - [`QuestBoard`] / [`InvestmentDesk`]: paid, single-flight generation
//! - [`Config`]: TOML configuration

pub mod action;
pub mod attachment;
pub mod config;
pub mod credentials;
pub mod desk;
pub mod error;
pub mod events;
pub mod flight;
pub mod ids;
pub mod journal;
pub mod ledger;
pub mod market;
pub mod provider;
pub mod quest;
pub mod quest_board;
pub mod reducer;
pub mod session;
pub mod shortcut;
pub mod snapshot;
pub mod store;
pub mod task;

pub use action::Action;
pub use config::Config;
pub use desk::{Investment, InvestmentDesk};
pub use error::{
    AttachmentError, ConfigError, CoreError, JournalError, ProviderError, ValidationError,
};
pub use events::{Event, RejectReason};
pub use ids::EntityId;
pub use journal::JournalEntry;
pub use market::{Company, COMPANIES};
pub use provider::ContentProvider;
pub use quest::{Quest, QuestDraft};
pub use quest_board::{QuestBoard, QuestRequest};
pub use reducer::{reduce, transition, Transition};
pub use session::{Countdown, Phase, SessionState};
pub use shortcut::{Shortcut, ShortcutEdit, ShortcutKind};
pub use snapshot::{Snapshot, Theme};
pub use store::Store;
pub use task::Task;

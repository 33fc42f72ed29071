//! Coin arithmetic and the task reward ratchet.
//!
//! Balances are unsigned, so a debit that would go below zero is refused
//! instead of clamped. Task progress only ever moves forward: un-completing a
//! task does not take progress or a paid bonus back.

use serde::{Deserialize, Serialize};

/// Bonus paid when task progress reaches the threshold.
pub const TASK_BONUS_COINS: u64 = 10;

/// Threshold a fresh game starts with.
pub const DEFAULT_TASK_REWARD_THRESHOLD: u32 = 5;

/// Thresholds the user cycles through.
pub const TASK_REWARD_PRESETS: [u32; 3] = [5, 10, 15];

/// Coins a fresh game starts with.
pub const DEFAULT_STARTING_COINS: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    pub cost: u64,
    pub balance: u64,
}

/// Balance after paying `cost`, or the shortfall if it cannot be paid.
pub fn debit(balance: u64, cost: u64) -> Result<u64, Shortfall> {
    balance.checked_sub(cost).ok_or(Shortfall { cost, balance })
}

pub fn credit(balance: u64, amount: u64) -> u64 {
    balance.saturating_add(amount)
}

/// Outcome of one incomplete -> complete flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatchetStep {
    pub progress: u32,
    pub bonus: u64,
}

/// Advance task progress by one completion.
pub fn advance_progress(progress: u32, threshold: u32) -> RatchetStep {
    let progress = progress.saturating_add(1);
    if progress >= threshold {
        RatchetStep {
            progress: 0,
            bonus: TASK_BONUS_COINS,
        }
    } else {
        RatchetStep { progress, bonus: 0 }
    }
}

/// Preset following `current`; unknown values restart the cycle.
pub fn next_threshold(current: u32) -> u32 {
    let next = TASK_REWARD_PRESETS
        .iter()
        .position(|t| *t == current)
        .map(|i| (i + 1) % TASK_REWARD_PRESETS.len())
        .unwrap_or(0);
    TASK_REWARD_PRESETS[next]
}

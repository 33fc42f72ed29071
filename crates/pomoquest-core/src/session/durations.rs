//! Fixed duration tables for work and break phases.

/// Work durations offered to the user, in minutes.
pub const WORK_DURATION_MENU_MIN: [u32; 4] = [5, 15, 25, 50];

/// Work duration a fresh session starts with.
pub const DEFAULT_WORK_SECS: u32 = 15 * 60;

/// Break used when the work duration has no entry in the table.
pub const SHORT_BREAK_DEFAULT_SECS: u32 = 5 * 60;

/// Long breaks never consult the table.
pub const LONG_BREAK_SECS: u32 = 15 * 60;

/// A long break follows every N-th completed work session.
pub const DEFAULT_LONG_BREAK_INTERVAL: u32 = 4;

/// Work seconds -> break seconds.
const BREAK_TABLE: [(u32, u32); 4] = [
    (5 * 60, 60),
    (15 * 60, 3 * 60),
    (25 * 60, 5 * 60),
    (50 * 60, 10 * 60),
];

/// Break duration paired with `work_secs`, falling back to the short-break
/// default for durations outside the menu.
pub fn break_for(work_secs: u32) -> u32 {
    BREAK_TABLE
        .iter()
        .find(|(work, _)| *work == work_secs)
        .map(|(_, brk)| *brk)
        .unwrap_or(SHORT_BREAK_DEFAULT_SECS)
}

/// Coins paid out for one completed work session: whole minutes only.
pub fn coins_for(work_secs: u32) -> u64 {
    u64::from(work_secs / 60)
}

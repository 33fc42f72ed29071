//! Time-derived entity ids.
//!
//! Ids are milliseconds since the Unix epoch, bumped past the last id handed
//! out so two entities created in the same millisecond still differ.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

pub type EntityId = u64;

static LAST_ID: AtomicU64 = AtomicU64::new(0);

/// Next unique id, strictly greater than every id returned before it in
/// this process.
pub fn next_id() -> EntityId {
    let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
    let mut prev = LAST_ID.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(prev.saturating_add(1));
        match LAST_ID.compare_exchange_weak(prev, candidate, Ordering::AcqRel, Ordering::Relaxed) {
            Ok(_) => return candidate,
            Err(actual) => prev = actual,
        }
    }
}

//! Single-flight gates.
//!
//! A gate admits one holder at a time. A second caller is turned away rather
//! than queued; the permit reopens the gate when dropped.

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct FlightGate {
    busy: AtomicBool,
}

/// Held while an operation is in flight.
#[derive(Debug)]
#[must_use = "the gate reopens as soon as the permit is dropped"]
pub struct FlightPermit<'a> {
    gate: &'a FlightGate,
}

impl FlightGate {
    pub const fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    /// `None` if another operation holds the gate.
    pub fn try_acquire(&self) -> Option<FlightPermit<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| FlightPermit { gate: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for FlightPermit<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_is_refused() {
        let gate = FlightGate::new();
        let permit = gate.try_acquire();
        assert!(permit.is_some());
        assert!(gate.is_busy());
        assert!(gate.try_acquire().is_none());
        drop(permit);
        assert!(!gate.is_busy());
        assert!(gate.try_acquire().is_some());
    }
}

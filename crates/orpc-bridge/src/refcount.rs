//! Remote reference counting
//!
//! One count per exported stub, shared by every remote holder of the
//! interface. The contract: the count starts at 1 (the exporter's own
//! reference), `acquire` and `release` are atomic and may race freely, and
//! the release that reaches zero reports it exactly once. The owner
//! performs teardown on that signal, nothing is torn down implicitly.

use std::sync::atomic::{AtomicU32, Ordering};

/// Atomic reference count for one exported interface
#[derive(Debug)]
pub struct RefCount {
    count: AtomicU32,
}

impl RefCount {
    /// Create a count holding the exporter's initial reference
    pub fn new() -> Self {
        Self {
            count: AtomicU32::new(1),
        }
    }

    /// Add `n` references, returning the new count
    pub fn acquire(&self, n: u32) -> u32 {
        self.count.fetch_add(n, Ordering::AcqRel).saturating_add(n)
    }

    /// Drop `n` references, returning `(remaining, released)`
    ///
    /// `released` is true only for the single call that took the count to
    /// zero. Releasing below zero saturates; the count never wraps.
    pub fn release(&self, n: u32) -> (u32, bool) {
        let prev = self
            .count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some(current.saturating_sub(n))
            })
            .unwrap_or(0);

        let remaining = prev.saturating_sub(n);
        (remaining, prev > 0 && remaining == 0)
    }

    /// Current count
    pub fn count(&self) -> u32 {
        self.count.load(Ordering::Acquire)
    }
}

impl Default for RefCount {
    fn default() -> Self {
        Self::new()
    }
}

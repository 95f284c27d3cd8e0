//! Min-heap of pending expirations
//!
//! Entries name the version they expire by logical identity
//! (key, field, timestamp) instead of by slot handle. The queue may lag
//! behind the store, so an entry can outlive the version it names; the
//! store resolves each popped entry against its current state and drops
//! the ones that no longer resolve.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::sync::Arc;

/// A scheduled expiration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryEntry {
    /// Logical time at which the version stops being visible.
    pub expiry_time: i64,
    /// Key owning the version.
    pub key: Arc<str>,
    /// Field owning the version.
    pub field: Arc<str>,
    /// Write timestamp identifying the version within its field.
    pub timestamp: i64,
}

impl Ord for ExpiryEntry {
    // Expiry time decides; the identity only breaks ties so sweeps are
    // deterministic.
    fn cmp(&self, other: &Self) -> Ordering {
        self.expiry_time
            .cmp(&other.expiry_time)
            .then_with(|| self.key.cmp(&other.key))
            .then_with(|| self.field.cmp(&other.field))
            .then_with(|| self.timestamp.cmp(&other.timestamp))
    }
}

impl PartialOrd for ExpiryEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Expiration scheduler ordered by ascending expiry time.
#[derive(Debug, Default)]
pub struct ExpiryQueue {
    heap: BinaryHeap<Reverse<ExpiryEntry>>,
}

impl ExpiryQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a version for expiry.
    pub fn schedule(&mut self, expiry_time: i64, key: Arc<str>, field: Arc<str>, timestamp: i64) {
        self.heap.push(Reverse(ExpiryEntry {
            expiry_time,
            key,
            field,
            timestamp,
        }));
    }

    /// Pop the earliest entry if it is due at `now`.
    pub fn pop_due(&mut self, now: i64) -> Option<ExpiryEntry> {
        match self.heap.peek() {
            Some(Reverse(entry)) if entry.expiry_time <= now => {
                self.heap.pop().map(|Reverse(entry)| entry)
            }
            _ => None,
        }
    }

    /// Expiry time of the earliest pending entry.
    pub fn peek_expiry(&self) -> Option<i64> {
        self.heap.peek().map(|Reverse(entry)| entry.expiry_time)
    }

    /// Number of pending entries, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

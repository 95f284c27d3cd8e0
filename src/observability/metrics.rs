//! Metrics registry for aerokv
//!
//! - Counters only
//! - Monotonic increase
//! - Reset only when the store is created

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for one store instance
///
/// Counters are atomics so they can be read through `&Store` while the
/// store itself is only ever mutated by its single owner.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Versions appended
    inserts_accepted: AtomicU64,
    /// Inserts refused
    inserts_rejected: AtomicU64,
    /// Keys stored without a prefix index entry
    keys_unindexable: AtomicU64,
    /// Versions removed by sweeps
    versions_expired: AtomicU64,
    /// Queue entries that no longer named a live version
    stale_expiries: AtomicU64,
    /// Fields dropped after their last version expired
    fields_evicted: AtomicU64,
    /// Keys dropped after their last field expired
    keys_evicted: AtomicU64,
    /// Prefix scans served
    scans: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    // Write metrics

    pub fn increment_inserts_accepted(&self) {
        self.inserts_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_inserts_rejected(&self) {
        self.inserts_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_keys_unindexable(&self) {
        self.keys_unindexable.fetch_add(1, Ordering::Relaxed);
    }

    // Expiry metrics

    pub fn add_versions_expired(&self, count: u64) {
        self.versions_expired.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_stale_expiries(&self, count: u64) {
        self.stale_expiries.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_fields_evicted(&self, count: u64) {
        self.fields_evicted.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_keys_evicted(&self, count: u64) {
        self.keys_evicted.fetch_add(count, Ordering::Relaxed);
    }

    // Read metrics

    pub fn increment_scans(&self) {
        self.scans.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            inserts_accepted: self.inserts_accepted.load(Ordering::Relaxed),
            inserts_rejected: self.inserts_rejected.load(Ordering::Relaxed),
            keys_unindexable: self.keys_unindexable.load(Ordering::Relaxed),
            versions_expired: self.versions_expired.load(Ordering::Relaxed),
            stale_expiries: self.stale_expiries.load(Ordering::Relaxed),
            fields_evicted: self.fields_evicted.load(Ordering::Relaxed),
            keys_evicted: self.keys_evicted.load(Ordering::Relaxed),
            scans: self.scans.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub inserts_accepted: u64,
    pub inserts_rejected: u64,
    pub keys_unindexable: u64,
    pub versions_expired: u64,
    pub stale_expiries: u64,
    pub fields_evicted: u64,
    pub keys_evicted: u64,
    pub scans: u64,
}

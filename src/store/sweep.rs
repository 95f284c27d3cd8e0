//! Expiry sweep and cascading cleanup
//!
//! A sweep drains every queue entry due at `now`. Each entry is resolved
//! through key -> field -> timestamp; an entry that no longer resolves is
//! stale and skipped. A resolved version is unlinked, and the removal
//! cascades upward:
//!
//! 1. version removed from its chain and timestamp lookup
//! 2. field entry dropped once its chain is empty
//! 3. key record dropped once it has no fields, together with its
//!    prefix index entry

use serde::Serialize;

use super::Store;
use crate::expiry::ExpiryEntry;
use crate::observability::{Event, Severity};

/// What one sweep removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Versions unlinked
    pub versions_expired: usize,
    /// Field entries dropped
    pub fields_evicted: usize,
    /// Key records dropped (and removed from the prefix index)
    pub keys_evicted: usize,
    /// Queue entries that named an already-removed version
    pub stale_entries: usize,
}

impl SweepReport {
    /// Returns true if the sweep popped nothing.
    pub fn is_empty(&self) -> bool {
        self.versions_expired == 0 && self.stale_entries == 0
    }
}

/// How far one expiry cascaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cascade {
    Stale,
    Version,
    Field,
    Key,
}

impl Store {
    /// Drain every expiration due at `now` and cascade the cleanup.
    ///
    /// `insert` and `scan_by_prefix` call this first; calling it directly
    /// is only needed to reclaim memory without issuing an operation.
    pub fn sweep(&mut self, now: i64) -> SweepReport {
        let mut report = SweepReport::default();

        while let Some(entry) = self.expiry.pop_due(now) {
            match self.expire(&entry) {
                Cascade::Stale => report.stale_entries += 1,
                Cascade::Version => report.versions_expired += 1,
                Cascade::Field => {
                    report.versions_expired += 1;
                    report.fields_evicted += 1;
                }
                Cascade::Key => {
                    report.versions_expired += 1;
                    report.fields_evicted += 1;
                    report.keys_evicted += 1;
                }
            }
        }

        if !report.is_empty() {
            self.record_sweep(now, &report);
        }
        report
    }

    pub(crate) fn expire(&mut self, entry: &ExpiryEntry) -> Cascade {
        let Some(record) = self.keys.get_mut(&*entry.key) else {
            return Cascade::Stale;
        };
        let Some(field_entry) = record.get_mut(&*entry.field) else {
            return Cascade::Stale;
        };
        if field_entry.remove_at(entry.timestamp).is_none() {
            return Cascade::Stale;
        }

        if self.logger.enabled(Severity::Trace) {
            let timestamp = entry.timestamp.to_string();
            let expiry_time = entry.expiry_time.to_string();
            self.logger.event(
                Event::VersionExpired,
                &[
                    ("key", &*entry.key),
                    ("field", &*entry.field),
                    ("timestamp", timestamp.as_str()),
                    ("expiry_time", expiry_time.as_str()),
                ],
            );
        }

        if !field_entry.is_empty() {
            return Cascade::Version;
        }
        record.remove(&*entry.field);
        if !record.is_empty() {
            return Cascade::Field;
        }
        self.keys.remove(&*entry.key);
        self.index.remove(&entry.key);

        if self.logger.enabled(Event::KeyEvicted.severity()) {
            self.logger.event(Event::KeyEvicted, &[("key", &*entry.key)]);
        }
        Cascade::Key
    }

    fn record_sweep(&self, now: i64, report: &SweepReport) {
        if self.config.metrics_enabled {
            self.metrics.add_versions_expired(report.versions_expired as u64);
            self.metrics.add_stale_expiries(report.stale_entries as u64);
            self.metrics.add_fields_evicted(report.fields_evicted as u64);
            self.metrics.add_keys_evicted(report.keys_evicted as u64);
        }
        if self.logger.enabled(Severity::Trace) {
            let now = now.to_string();
            let versions_expired = report.versions_expired.to_string();
            let fields_evicted = report.fields_evicted.to_string();
            let keys_evicted = report.keys_evicted.to_string();
            let stale_entries = report.stale_entries.to_string();
            self.logger.event(
                Event::SweepComplete,
                &[
                    ("now", now.as_str()),
                    ("versions_expired", versions_expired.as_str()),
                    ("fields_evicted", fields_evicted.as_str()),
                    ("keys_evicted", keys_evicted.as_str()),
                    ("stale_entries", stale_entries.as_str()),
                ],
            );
        }
    }
}

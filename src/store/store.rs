//! Store orchestrator
//!
//! Owns every structure and keeps them consistent:
//! - key -> field -> `FieldEntry` maps
//! - the prefix index over keys
//! - the expiration queue
//!
//! # Invariants
//!
//! - A key record exists iff it holds at least one field entry, and a field
//!   entry exists iff its chain holds at least one version
//! - An indexable key is present in the prefix index iff it has a key record
//! - Every operation sweeps due expirations before doing its own work

use std::collections::HashMap;
use std::sync::Arc;

use super::errors::{StoreError, StoreResult};
use super::scan::ScanEntry;
use crate::chain::{FieldEntry, Version};
use crate::config::StoreConfig;
use crate::expiry::ExpiryQueue;
use crate::observability::{Event, Logger, MetricsRegistry, MetricsSnapshot, Severity};
use crate::trie::PrefixIndex;

/// Fields of one key.
pub(crate) type KeyRecord = HashMap<Arc<str>, FieldEntry>;

/// In-memory key/field/value store with per-field version history and
/// lazy TTL expiry.
///
/// Time is a plain input: every operation takes the caller's current
/// timestamp and expires whatever is due at that time before running.
/// Nothing happens between calls.
///
/// # Example
///
/// ```rust
/// use aerokv::{Store, StoreConfig};
///
/// let mut store = Store::with_config(StoreConfig::quiet());
/// assert!(store.insert("user1", "name", "Alice", 100, None));
/// assert!(store.insert("user1", "age", "30", 101, None));
/// assert!(store.insert("user2", "name", "Bob", 90, None));
///
/// let rows = store.scan_by_prefix("user", 150);
/// assert_eq!(rows, vec![
///     ("user1", "age", "30"),
///     ("user1", "name", "Alice"),
///     ("user2", "name", "Bob"),
/// ]);
/// ```
#[derive(Debug)]
pub struct Store {
    pub(crate) keys: HashMap<Arc<str>, KeyRecord>,
    pub(crate) index: PrefixIndex,
    pub(crate) expiry: ExpiryQueue,
    pub(crate) config: StoreConfig,
    pub(crate) logger: Logger,
    pub(crate) metrics: MetricsRegistry,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Creates an empty store with the default configuration.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates an empty store.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            keys: HashMap::new(),
            index: PrefixIndex::new(),
            expiry: ExpiryQueue::new(),
            logger: Logger::new(config.log_level),
            metrics: MetricsRegistry::new(),
            config,
        }
    }

    /// Insert a version, reporting only success.
    ///
    /// Returns false, leaving the store unchanged, when `try_insert` would
    /// return an error.
    pub fn insert(
        &mut self,
        key: &str,
        field: &str,
        record: &str,
        timestamp: i64,
        ttl: Option<i64>,
    ) -> bool {
        self.try_insert(key, field, record, timestamp, ttl).is_ok()
    }

    /// Insert a version of `field` under `key` written at `timestamp`.
    ///
    /// Rejected without touching the store (not even sweeping) if `key`,
    /// `field` or `record` is empty, or `timestamp` is negative. After
    /// sweeping at `timestamp`, rejected if the field already has a version
    /// at `timestamp`.
    ///
    /// Any `ttl` is accepted. A negative one yields a version that is
    /// already expired: no scan at or after `timestamp` returns it, and the
    /// next sweep removes it.
    ///
    /// The version becomes the field's latest regardless of how its
    /// timestamp compares to earlier ones. A key containing characters
    /// outside the index alphabet is stored but never appears in scans.
    pub fn try_insert(
        &mut self,
        key: &str,
        field: &str,
        record: &str,
        timestamp: i64,
        ttl: Option<i64>,
    ) -> StoreResult<()> {
        let result = validate(key, field, record, timestamp).and_then(|()| {
            self.sweep(timestamp);
            self.append(key, field, Version::new(record, timestamp, ttl))
        });

        match &result {
            Ok(()) => {
                if self.config.metrics_enabled {
                    self.metrics.increment_inserts_accepted();
                }
                if self.logger.enabled(Severity::Trace) {
                    let timestamp = timestamp.to_string();
                    self.logger.event(
                        Event::InsertAccepted,
                        &[("key", key), ("field", field), ("timestamp", timestamp.as_str())],
                    );
                }
            }
            Err(err) => {
                if self.config.metrics_enabled {
                    self.metrics.increment_inserts_rejected();
                }
                if self.logger.enabled(Severity::Info) {
                    let reason = err.to_string();
                    self.logger.event(
                        Event::InsertRejected,
                        &[("code", err.code()), ("reason", reason.as_str())],
                    );
                }
            }
        }
        result
    }

    fn append(&mut self, key: &str, field: &str, version: Version) -> StoreResult<()> {
        let timestamp = version.timestamp();
        let expiry_time = version.expiry_time();

        // Check before creating containers so a rejection leaves no empty
        // key record or field entry behind.
        if self
            .keys
            .get(key)
            .and_then(|fields| fields.get(field))
            .is_some_and(|entry| entry.contains(timestamp))
        {
            return Err(StoreError::duplicate(key, field, timestamp));
        }

        let (key_arc, new_key) = match self.keys.get_key_value(key) {
            Some((existing, _)) => (Arc::clone(existing), false),
            None => (Arc::<str>::from(key), true),
        };
        let fields = self.keys.entry(Arc::clone(&key_arc)).or_default();

        let field_arc = match fields.get_key_value(field) {
            Some((existing, _)) => Arc::clone(existing),
            None => Arc::<str>::from(field),
        };
        fields
            .entry(Arc::clone(&field_arc))
            .or_default()
            .append(version)
            .map_err(|_| StoreError::duplicate(key, field, timestamp))?;

        if new_key {
            self.index_key(&key_arc);
        }
        if let Some(expiry_time) = expiry_time {
            self.expiry.schedule(expiry_time, key_arc, field_arc, timestamp);
        }
        Ok(())
    }

    fn index_key(&mut self, key: &Arc<str>) {
        if let Err(err) = self.index.insert(Arc::clone(key)) {
            if self.config.metrics_enabled {
                self.metrics.increment_keys_unindexable();
            }
            if self.config.warn_on_unindexable_keys && self.logger.enabled(Severity::Warn) {
                let reason = err.to_string();
                self.logger.event(
                    Event::KeyUnindexable,
                    &[("key", &**key), ("code", err.code()), ("reason", reason.as_str())],
                );
            }
        }
    }

    /// Latest live record of every field of every key starting with
    /// `prefix`, sorted by key, field, then record.
    ///
    /// Sweeps at `timestamp` first. An empty prefix yields nothing. The
    /// result is an owned snapshot.
    pub fn scan_by_prefix(&mut self, prefix: &str, timestamp: i64) -> Vec<ScanEntry> {
        self.sweep(timestamp);

        let mut results = Vec::new();
        if !prefix.is_empty() {
            for key in self.index.words_with_prefix(prefix) {
                let Some(fields) = self.keys.get(&*key) else {
                    continue;
                };
                for (field, entry) in fields {
                    let Some(latest) = entry.latest() else {
                        continue;
                    };
                    // A sweep at an earlier time may have left this behind
                    if latest.is_expired_at(timestamp) {
                        continue;
                    }
                    results.push(ScanEntry::new(&*key, &**field, latest.record()));
                }
            }
            results.sort();
        }

        if self.config.metrics_enabled {
            self.metrics.increment_scans();
        }
        if self.logger.enabled(Severity::Trace) {
            let timestamp = timestamp.to_string();
            let rows = results.len().to_string();
            self.logger.event(
                Event::ScanComplete,
                &[("prefix", prefix), ("timestamp", timestamp.as_str()), ("rows", rows.as_str())],
            );
        }
        results
    }

    /// Returns true if `key` has at least one field.
    ///
    /// Read-only: does not sweep, so versions already due may still count.
    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    /// Number of keys holding at least one field.
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Number of fields under `key`.
    pub fn field_count(&self, key: &str) -> usize {
        self.keys.get(key).map_or(0, HashMap::len)
    }

    /// Number of live versions of `field` under `key`.
    pub fn version_count(&self, key: &str, field: &str) -> usize {
        self.field_entry(key, field).map_or(0, FieldEntry::len)
    }

    /// Most recently inserted live version of `field` under `key`.
    pub fn latest(&self, key: &str, field: &str) -> Option<&Version> {
        self.field_entry(key, field)?.latest()
    }

    /// Live versions of `field` under `key`, oldest inserted first.
    pub fn history(&self, key: &str, field: &str) -> Vec<&Version> {
        self.field_entry(key, field)
            .map(|entry| entry.history().collect())
            .unwrap_or_default()
    }

    /// Number of queued expirations, including ones that may be stale.
    pub fn pending_expirations(&self) -> usize {
        self.expiry.len()
    }

    /// Earliest time at which a sweep would remove something.
    pub fn next_expiry(&self) -> Option<i64> {
        self.expiry.peek_expiry()
    }

    /// Number of keys present in the prefix index.
    pub fn indexed_key_count(&self) -> usize {
        self.index.len()
    }

    /// Current operation counters.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// The configuration this store was created with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn field_entry(&self, key: &str, field: &str) -> Option<&FieldEntry> {
        self.keys.get(key)?.get(field)
    }
}

fn validate(key: &str, field: &str, record: &str, timestamp: i64) -> StoreResult<()> {
    if key.is_empty() {
        return Err(StoreError::EmptyKey);
    }
    if field.is_empty() {
        return Err(StoreError::EmptyField);
    }
    if record.is_empty() {
        return Err(StoreError::EmptyRecord);
    }
    if timestamp < 0 {
        return Err(StoreError::NegativeTimestamp(timestamp));
    }
    Ok(())
}

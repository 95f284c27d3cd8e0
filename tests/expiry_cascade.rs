//! Expiry Cascade Tests
//!
//! Tests for lazy expiration:
//! - Expiry is driven only by caller timestamps
//! - Removal cascades version -> field -> key -> prefix index
//! - Queue entries that no longer resolve are dropped silently

use aerokv::{Store, StoreConfig, SweepReport};

fn store() -> Store {
    Store::with_config(StoreConfig::quiet())
}

// =============================================================================
// Boundary Tests
// =============================================================================

/// Visible at expiry - 1, gone at expiry.
#[test]
fn test_expiry_boundary() {
    let mut store = store();
    store.insert("k", "f", "v", 100, Some(25));

    assert_eq!(store.scan_by_prefix("k", 124).len(), 1);
    assert!(store.scan_by_prefix("k", 125).is_empty());
}

/// TTL of zero is never visible to a scan at or after its timestamp.
#[test]
fn test_zero_ttl() {
    let mut store = store();
    assert!(store.insert("k", "f", "v", 10, Some(0)));

    assert!(store.scan_by_prefix("k", 10).is_empty());
    assert!(!store.contains_key("k"));
}

/// A negative TTL is accepted and the version is born expired.
#[test]
fn test_negative_ttl() {
    let mut store = store();
    assert!(store.insert("k", "f", "v", 10, Some(-3)));
    assert!(store.insert("k", "g", "w", 11, None));

    assert_eq!(store.scan_by_prefix("k", 11), vec![("k", "g", "w")]);
    assert_eq!(store.version_count("k", "f"), 0);
    assert_eq!(store.metrics().inserts_rejected, 0);
}

/// Without a sweep nothing is removed, however much "time" passes.
#[test]
fn test_no_background_expiry() {
    let mut store = store();
    store.insert("k", "f", "v", 0, Some(1));

    assert!(store.contains_key("k"));
    assert_eq!(store.pending_expirations(), 1);
}

/// A huge TTL does not overflow.
#[test]
fn test_huge_ttl() {
    let mut store = store();
    assert!(store.insert("k", "f", "v", 10, Some(i64::MAX)));

    assert_eq!(store.next_expiry(), Some(i64::MAX));
    assert_eq!(store.scan_by_prefix("k", i64::MAX - 1).len(), 1);
}

// =============================================================================
// Cascade Tests
// =============================================================================

/// Once every field of a key has expired the key is gone everywhere.
#[test]
fn test_full_key_cascade() {
    let mut store = store();
    store.insert("user1", "name", "Alice", 0, Some(10));
    store.insert("user1", "age", "30", 1, Some(20));
    store.insert("user1", "name", "Alicia", 2, Some(5));

    // "Alicia" expired at 7, so "Alice" is the latest name again
    assert_eq!(
        store.scan_by_prefix("user", 8),
        vec![("user1", "age", "30"), ("user1", "name", "Alice")]
    );
    assert_eq!(store.field_count("user1"), 2);

    let rows = store.scan_by_prefix("user", 21);

    assert!(rows.is_empty());
    assert!(!store.contains_key("user1"));
    assert_eq!(store.indexed_key_count(), 0);
    assert_eq!(store.pending_expirations(), 0);
}

/// A fully expired key accepts a fresh insert at a reused timestamp.
#[test]
fn test_fresh_insert_after_cascade() {
    let mut store = store();
    store.insert("k", "f", "old", 0, Some(1));
    store.scan_by_prefix("k", 50);

    assert!(store.insert("k", "f", "new", 0, None));
    assert_eq!(store.scan_by_prefix("k", 60), vec![("k", "f", "new")]);
    assert_eq!(store.indexed_key_count(), 1);
}

/// Expiring one key leaves its prefix siblings in place.
#[test]
fn test_sibling_keys_survive() {
    let mut store = store();
    store.insert("user1", "f", "a", 0, Some(5));
    store.insert("user10", "f", "b", 0, None);
    store.insert("user2", "f", "c", 0, None);

    let rows = store.scan_by_prefix("user", 5);

    assert_eq!(rows, vec![("user10", "f", "b"), ("user2", "f", "c")]);
    assert_eq!(store.scan_by_prefix("user1", 5), vec![("user10", "f", "b")]);
}

/// Inserts sweep too, not only scans.
#[test]
fn test_insert_triggers_sweep() {
    let mut store = store();
    store.insert("a", "f", "v", 0, Some(5));

    store.insert("b", "f", "v", 5, None);

    assert!(!store.contains_key("a"));
    assert_eq!(store.metrics().keys_evicted, 1);
}

/// A scan at an earlier time than previous operations sees what is still
/// live at that earlier time among the survivors.
#[test]
fn test_scan_at_earlier_time() {
    let mut store = store();
    store.insert("k", "f", "v", 0, Some(10));
    store.insert("k", "g", "w", 20, None);

    // Sweep at 20 removed "f"; an earlier scan cannot bring it back
    assert_eq!(store.scan_by_prefix("k", 3), vec![("k", "g", "w")]);
}

/// Many expirations resolved in one sweep.
#[test]
fn test_batch_sweep() {
    let mut store = store();
    for i in 0..50 {
        store.insert(&format!("key{}", i), "f", "v", 0, Some(i + 1));
    }
    store.insert("keep", "f", "v", 0, None);

    let report = store.sweep(30);

    assert_eq!(
        report,
        SweepReport {
            versions_expired: 30,
            fields_evicted: 30,
            keys_evicted: 30,
            stale_entries: 0,
        }
    );
    assert_eq!(store.key_count(), 21);
    assert!(store.scan_by_prefix("key", 100).is_empty());
    assert_eq!(store.key_count(), 1);
    assert!(store.contains_key("keep"));
}

/// Expired versions in the middle of a history are unlinked in place.
#[test]
fn test_middle_of_history_expires() {
    let mut store = store();
    store.insert("k", "f", "a", 1, None);
    store.insert("k", "f", "b", 2, Some(3));
    store.insert("k", "f", "c", 3, None);

    store.sweep(5);

    let records: Vec<&str> = store.history("k", "f").iter().map(|v| v.record()).collect();
    assert_eq!(records, vec!["a", "c"]);
}

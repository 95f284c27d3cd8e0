//! Version - Immutable field version
//!
//! - A version is one value a field held at a caller-supplied timestamp
//! - Optionally carries a time-to-live relative to that timestamp
//! - Once created, never changes
//!
//! This is a PURE TYPE with NO behavior beyond construction and access.

/// A single immutable field version.
///
/// All fields are private to enforce immutability.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Version {
    /// The stored value.
    record: String,
    /// Logical time at which the value was written.
    timestamp: i64,
    /// Lifetime in logical time units, if the version expires.
    ttl: Option<i64>,
}

impl Version {
    /// Creates a new version.
    ///
    /// After construction, the version cannot be modified.
    pub fn new(record: impl Into<String>, timestamp: i64, ttl: Option<i64>) -> Self {
        Self {
            record: record.into(),
            timestamp,
            ttl,
        }
    }

    /// Creates a version that never expires.
    pub fn permanent(record: impl Into<String>, timestamp: i64) -> Self {
        Self::new(record, timestamp, None)
    }

    /// Returns the stored value.
    #[inline]
    pub fn record(&self) -> &str {
        &self.record
    }

    /// Returns the write timestamp.
    #[inline]
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Returns the time-to-live, if any.
    #[inline]
    pub fn ttl(&self) -> Option<i64> {
        self.ttl
    }

    /// Logical time at which this version stops being visible.
    ///
    /// Saturates instead of overflowing for very large TTLs.
    #[inline]
    pub fn expiry_time(&self) -> Option<i64> {
        self.ttl.map(|ttl| self.timestamp.saturating_add(ttl))
    }

    /// Returns true if the version is no longer visible at `now`.
    #[inline]
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expiry_time().is_some_and(|expiry| now >= expiry)
    }
}

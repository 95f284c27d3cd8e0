//! Observability events for aerokv
//!
//! Every line the store logs names one of these events.

use std::fmt;

use super::logger::Severity;

/// Observable events in aerokv
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Write operations
    /// Version appended
    InsertAccepted,
    /// Insert refused by validation or the duplicate guard
    InsertRejected,
    /// Key stored but left out of the prefix index
    KeyUnindexable,

    // Expiry
    /// A version was removed by a sweep
    VersionExpired,
    /// The last field of a key expired and the key was dropped
    KeyEvicted,
    /// A sweep removed at least one entry from the queue
    SweepComplete,

    // Read operations
    /// Prefix scan finished
    ScanComplete,

    // Server operations
    /// CLI request loop is reading stdin
    Serving,
    /// CLI request could not be decoded
    RequestRejected,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "KV_CONFIG_LOADED",
            Event::InsertAccepted => "KV_INSERT_ACCEPTED",
            Event::InsertRejected => "KV_INSERT_REJECTED",
            Event::KeyUnindexable => "KV_KEY_UNINDEXABLE",
            Event::VersionExpired => "KV_VERSION_EXPIRED",
            Event::KeyEvicted => "KV_KEY_EVICTED",
            Event::SweepComplete => "KV_SWEEP_COMPLETE",
            Event::ScanComplete => "KV_SCAN_COMPLETE",
            Event::Serving => "KV_SERVING",
            Event::RequestRejected => "KV_REQUEST_REJECTED",
        }
    }

    /// Severity the event is logged at unless the caller overrides it
    pub fn severity(&self) -> Severity {
        match self {
            Event::KeyUnindexable | Event::RequestRejected => Severity::Warn,
            Event::ConfigLoaded | Event::InsertRejected | Event::KeyEvicted | Event::Serving => {
                Severity::Info
            }
            Event::InsertAccepted
            | Event::VersionExpired
            | Event::SweepComplete
            | Event::ScanComplete => Severity::Trace,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

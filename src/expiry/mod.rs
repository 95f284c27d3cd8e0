//! Expiration Scheduler
//!
//! Time-ordered queue driving lazy TTL deletion. Nothing runs in the
//! background: entries are only drained when the store sweeps at a
//! caller-supplied time.

mod queue;

pub use queue::{ExpiryEntry, ExpiryQueue};

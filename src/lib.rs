//! aerokv - An embeddable, deterministic key/field/value store
//!
//! Keeps a chronological version history per (key, field) and expires
//! versions lazily by time-to-live. Time is always supplied by the caller;
//! nothing happens in the background.
//!
//! - `trie` - prefix index over keys
//! - `chain` - per-field version history
//! - `expiry` - min-heap of pending expirations
//! - `store` - orchestrator keeping the three consistent

pub mod chain;
pub mod cli;
pub mod config;
pub mod expiry;
pub mod observability;
pub mod store;
pub mod trie;

pub use config::{ConfigError, StoreConfig};
pub use observability::LogLevel;
pub use store::{ScanEntry, Store, StoreError, StoreResult, SweepReport};

//! Observability subsystem for aerokv
//!
//! This module provides:
//! - Structured logging (JSON lines on stderr)
//! - Monotonic operation counters
//! - Typed events
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on store behavior
//! 3. No background threads
//! 4. Deterministic output

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{render, LogLevel, Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

//! Version chain domain types
//!
//! This module provides:
//! - `Version` - Immutable field value with timestamp and optional TTL
//! - `VersionChain` - Sentinel-bounded, arena-backed version history
//! - `FieldEntry` - Version chain plus timestamp-to-slot lookup

mod field_entry;
mod version;
mod version_chain;

pub use field_entry::FieldEntry;
pub use version::Version;
pub use version_chain::{Iter, SlotId, VersionChain};

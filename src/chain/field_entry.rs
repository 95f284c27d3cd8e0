//! FieldEntry - Version chain plus timestamp lookup for one field
//!
//! The lookup resolves a logical (timestamp) identity to the chain slot
//! holding it, so expiry can unlink a version in O(1) without scanning.
//!
//! # Invariants
//!
//! - `chain.len() == by_timestamp.len()` at all times
//! - At most one version per timestamp

use std::collections::HashMap;

use super::{SlotId, Version, VersionChain};

/// Per-field container owning the version history.
#[derive(Clone, Debug, Default)]
pub struct FieldEntry {
    chain: VersionChain,
    by_timestamp: HashMap<i64, SlotId>,
}

impl FieldEntry {
    /// Creates an empty field entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a version at the newest end of the chain.
    ///
    /// If a version with the same timestamp already exists the new version
    /// is handed back untouched and nothing changes.
    pub fn append(&mut self, version: Version) -> Result<SlotId, Version> {
        if self.by_timestamp.contains_key(&version.timestamp()) {
            return Err(version);
        }
        let timestamp = version.timestamp();
        let slot = self.chain.insert_at_end(version);
        self.by_timestamp.insert(timestamp, slot);
        Ok(slot)
    }

    /// Unlinks the version written at `timestamp`, if it is still live.
    pub fn remove_at(&mut self, timestamp: i64) -> Option<Version> {
        let slot = self.by_timestamp.remove(&timestamp)?;
        self.chain.delete_node(slot)
    }

    /// Returns true if a live version was written at `timestamp`.
    pub fn contains(&self, timestamp: i64) -> bool {
        self.by_timestamp.contains_key(&timestamp)
    }

    /// The version written at `timestamp`.
    pub fn get(&self, timestamp: i64) -> Option<&Version> {
        self.chain.get(*self.by_timestamp.get(&timestamp)?)
    }

    /// The most recently appended live version.
    pub fn latest(&self) -> Option<&Version> {
        self.chain.latest_version()
    }

    /// Number of live versions.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Returns true once every version has been removed.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Read access to the underlying chain.
    pub fn chain(&self) -> &VersionChain {
        &self.chain
    }

    /// Live versions from oldest to newest.
    pub fn history(&self) -> impl Iterator<Item = &Version> {
        self.chain.iter()
    }
}

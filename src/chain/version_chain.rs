//! VersionChain - Chronological history of one (key, field) pair
//!
//! A doubly linked list stored in a slot arena. Links are slot indices, so
//! there is no manual lifetime management and every splice is O(1).
//!
//! - Slot 0 is the head sentinel, slot 1 the tail sentinel
//! - Sentinels never hold a version and are never exposed as data
//! - Appends always link immediately before the tail sentinel, so "latest"
//!   means most recently appended, not largest timestamp
//! - Freed slots are recycled through a free list

use super::Version;

/// Stable handle to a slot in a `VersionChain`.
///
/// A handle stays valid until the slot it names is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(u32);

impl SlotId {
    const HEAD: SlotId = SlotId(0);
    const TAIL: SlotId = SlotId(1);

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Slot {
    prev: SlotId,
    next: SlotId,
    /// `None` for sentinels and vacant slots.
    version: Option<Version>,
}

/// Sentinel-bounded, arena-backed version list.
#[derive(Clone, Debug)]
pub struct VersionChain {
    slots: Vec<Slot>,
    free: Vec<SlotId>,
    len: usize,
}

impl Default for VersionChain {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionChain {
    /// Creates an empty chain: head and tail sentinels linked to each other.
    pub fn new() -> Self {
        let head = Slot {
            prev: SlotId::HEAD,
            next: SlotId::TAIL,
            version: None,
        };
        let tail = Slot {
            prev: SlotId::HEAD,
            next: SlotId::TAIL,
            version: None,
        };
        Self {
            slots: vec![head, tail],
            free: Vec::new(),
            len: 0,
        }
    }

    /// Returns the number of versions in this chain.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if this chain has no versions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Links a version at the newest end. O(1).
    pub fn insert_at_end(&mut self, version: Version) -> SlotId {
        let prev = self.slots[SlotId::TAIL.index()].prev;
        let slot = Slot {
            prev,
            next: SlotId::TAIL,
            version: Some(version),
        };

        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id.index()] = slot;
                id
            }
            None => {
                let id = SlotId(self.slots.len() as u32);
                self.slots.push(slot);
                id
            }
        };

        self.slots[prev.index()].next = id;
        self.slots[SlotId::TAIL.index()].prev = id;
        self.len += 1;
        id
    }

    /// Unlinks a version and hands it back. O(1).
    ///
    /// Returns `None` for sentinels, vacant slots and out-of-range handles.
    pub fn delete_node(&mut self, id: SlotId) -> Option<Version> {
        if self.is_dummy(id) {
            return None;
        }
        let slot = self.slots.get_mut(id.index())?;
        let version = slot.version.take()?;
        let (prev, next) = (slot.prev, slot.next);

        self.slots[prev.index()].next = next;
        self.slots[next.index()].prev = prev;
        self.free.push(id);
        self.len -= 1;
        Some(version)
    }

    /// The most recently appended slot, or the head sentinel if empty.
    #[inline]
    pub fn latest(&self) -> SlotId {
        self.slots[SlotId::TAIL.index()].prev
    }

    /// The least recently appended slot, or the tail sentinel if empty.
    #[inline]
    pub fn oldest(&self) -> SlotId {
        self.slots[SlotId::HEAD.index()].next
    }

    /// Returns true if `id` names one of the two sentinels.
    #[inline]
    pub fn is_dummy(&self, id: SlotId) -> bool {
        id == SlotId::HEAD || id == SlotId::TAIL
    }

    /// The version held in a slot, if the slot is live.
    #[inline]
    pub fn get(&self, id: SlotId) -> Option<&Version> {
        self.slots.get(id.index())?.version.as_ref()
    }

    /// The most recently appended version.
    pub fn latest_version(&self) -> Option<&Version> {
        self.get(self.latest())
    }

    /// The least recently appended version.
    pub fn oldest_version(&self) -> Option<&Version> {
        self.get(self.oldest())
    }

    /// Walks versions from oldest to newest.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            chain: self,
            cursor: self.oldest(),
        }
    }
}

/// Oldest-to-newest iterator over a `VersionChain`.
pub struct Iter<'a> {
    chain: &'a VersionChain,
    cursor: SlotId,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Version;

    fn next(&mut self) -> Option<Self::Item> {
        if self.chain.is_dummy(self.cursor) {
            return None;
        }
        let slot = &self.chain.slots[self.cursor.index()];
        self.cursor = slot.next;
        slot.version.as_ref()
    }
}

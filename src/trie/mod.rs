//! Prefix Index subsystem for aerokv
//!
//! A trie over the 63-symbol key alphabet that enumerates every stored key
//! sharing a prefix in time proportional to the prefix plus the answer.
//!
//! # Design Principles
//!
//! - Derived state: the index mirrors the keys held by the store
//! - Arena-backed: nodes addressed by index, no recursion on delete
//! - Un-indexable keys are rejected without touching the index
//!
//! # Invariants
//!
//! - A key is present iff its terminal node is marked end-of-word
//! - Removing the last word of a branch prunes the branch

mod alphabet;
mod errors;
mod prefix_index;

pub use alphabet::{is_indexable, symbol_index, ALPHABET_SIZE};
pub use errors::{TrieError, TrieResult};
pub use prefix_index::PrefixIndex;

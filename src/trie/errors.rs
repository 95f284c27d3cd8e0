//! Prefix index error types
//!
//! Error codes:
//! - AERO_KV_KEY_UNINDEXABLE (WARN)
//!
//! An un-indexable key is never fatal. The store keeps the data and simply
//! leaves the key out of prefix scans.

use thiserror::Error;

/// Result type for prefix index operations
pub type TrieResult<T> = Result<T, TrieError>;

/// Prefix index errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrieError {
    #[error("Key '{word}' is not indexable: '{character}' at position {position} is outside the key alphabet")]
    Unindexable {
        word: String,
        character: char,
        position: usize,
    },
}

impl TrieError {
    /// Create an un-indexable key error
    pub fn unindexable(word: &str, character: char, position: usize) -> Self {
        TrieError::Unindexable {
            word: word.to_string(),
            character,
            position,
        }
    }

    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            TrieError::Unindexable { .. } => "AERO_KV_KEY_UNINDEXABLE",
        }
    }

    /// The offending character
    pub fn character(&self) -> char {
        match self {
            TrieError::Unindexable { character, .. } => *character,
        }
    }

    /// Character position of the offending character
    pub fn position(&self) -> usize {
        match self {
            TrieError::Unindexable { position, .. } => *position,
        }
    }
}

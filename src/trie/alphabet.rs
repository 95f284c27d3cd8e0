//! Key alphabet for the prefix index
//!
//! The index only understands 63 symbols:
//! - `a-z` map to 0..26
//! - `A-Z` map to 26..52
//! - `0-9` map to 52..62
//! - `-` maps to 62
//!
//! Any other character makes a key un-indexable.

use super::errors::{TrieError, TrieResult};

/// Number of symbols a trie node can branch on.
pub const ALPHABET_SIZE: usize = 63;

/// Map a character to its child slot, or `None` if it is outside the alphabet.
#[inline]
pub fn symbol_index(c: char) -> Option<usize> {
    match c {
        'a'..='z' => Some(c as usize - 'a' as usize),
        'A'..='Z' => Some(c as usize - 'A' as usize + 26),
        '0'..='9' => Some(c as usize - '0' as usize + 52),
        '-' => Some(62),
        _ => None,
    }
}

/// Translate a whole word into child slots.
///
/// Fails on the first character outside the alphabet, reporting its
/// character position.
pub fn encode(word: &str) -> TrieResult<Vec<usize>> {
    word.chars()
        .enumerate()
        .map(|(position, c)| {
            symbol_index(c).ok_or_else(|| TrieError::unindexable(word, c, position))
        })
        .collect()
}

/// Returns true if every character of `word` is part of the alphabet.
pub fn is_indexable(word: &str) -> bool {
    word.chars().all(|c| symbol_index(c).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_ranges() {
        assert_eq!(symbol_index('a'), Some(0));
        assert_eq!(symbol_index('z'), Some(25));
        assert_eq!(symbol_index('A'), Some(26));
        assert_eq!(symbol_index('Z'), Some(51));
        assert_eq!(symbol_index('0'), Some(52));
        assert_eq!(symbol_index('9'), Some(61));
        assert_eq!(symbol_index('-'), Some(62));
    }

    #[test]
    fn test_symbols_are_distinct_and_in_bounds() {
        let mut seen = [false; ALPHABET_SIZE];
        let all = ('a'..='z').chain('A'..='Z').chain('0'..='9').chain(['-']);
        for c in all {
            let idx = symbol_index(c).unwrap();
            assert!(!seen[idx], "slot {} assigned twice", idx);
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_outside_alphabet() {
        for c in ['_', ':', ' ', '.', 'é', '/', '\n'] {
            assert_eq!(symbol_index(c), None);
        }
    }

    #[test]
    fn test_encode_reports_position() {
        let err = encode("user:1").unwrap_err();
        assert_eq!(err.character(), ':');
        assert_eq!(err.position(), 4);
    }

    #[test]
    fn test_encode_empty_word() {
        assert_eq!(encode("").unwrap(), Vec::<usize>::new());
        assert!(is_indexable(""));
    }

    #[test]
    fn test_is_indexable() {
        assert!(is_indexable("user-42"));
        assert!(!is_indexable("user_42"));
    }
}

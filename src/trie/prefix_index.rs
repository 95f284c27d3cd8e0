//! Arena-backed trie over stored keys
//!
//! Every node caches the set of complete keys passing through it, so a
//! prefix lookup costs one walk of `|prefix|` steps plus the size of the
//! answer. Nodes live in a `Vec` and refer to each other by `NodeId`;
//! freed slots are recycled through a free list.
//!
//! # Invariants
//!
//! - The root is slot 0 and is never freed
//! - A non-root node's key-set holds exactly the terminal words whose path
//!   passes through it
//! - After `remove`, no node is left with no children, an empty key-set and
//!   no terminal flag

use std::collections::HashSet;
use std::sync::Arc;

use super::alphabet::{encode, symbol_index, ALPHABET_SIZE};
use super::errors::TrieResult;

/// Index of a node inside the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct NodeId(u32);

impl NodeId {
    const ROOT: NodeId = NodeId(0);

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
struct TrieNode {
    children: [Option<NodeId>; ALPHABET_SIZE],
    is_end_of_word: bool,
    keys: HashSet<Arc<str>>,
}

impl TrieNode {
    fn new() -> Self {
        Self {
            children: [None; ALPHABET_SIZE],
            is_end_of_word: false,
            keys: HashSet::new(),
        }
    }

    #[inline]
    fn has_children(&self) -> bool {
        self.children.iter().any(Option::is_some)
    }

    #[inline]
    fn is_prunable(&self) -> bool {
        !self.has_children() && self.keys.is_empty() && !self.is_end_of_word
    }
}

/// Prefix index mapping key prefixes to the stored keys that share them.
#[derive(Debug)]
pub struct PrefixIndex {
    /// Node arena; `None` marks a freed slot awaiting reuse.
    nodes: Vec<Option<TrieNode>>,
    /// Freed slots.
    free: Vec<NodeId>,
    /// Number of terminal words.
    words: usize,
}

impl Default for PrefixIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixIndex {
    /// Creates an index holding only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(TrieNode::new())],
            free: Vec::new(),
            words: 0,
        }
    }

    /// Number of words currently marked present.
    pub fn len(&self) -> usize {
        self.words
    }

    /// Returns true if no word is present.
    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Index a word.
    ///
    /// A word containing a character outside the alphabet is rejected with
    /// `TrieError::Unindexable` and leaves the index untouched. Inserting a
    /// word that is already present is a no-op.
    pub fn insert(&mut self, word: impl Into<Arc<str>>) -> TrieResult<()> {
        let word: Arc<str> = word.into();
        let symbols = encode(&word)?;

        if self.search(&word) {
            return Ok(());
        }

        let mut curr = NodeId::ROOT;
        for symbol in symbols {
            curr = match self.node(curr).children[symbol] {
                Some(child) => child,
                None => {
                    let child = self.alloc();
                    self.node_mut(curr).children[symbol] = Some(child);
                    child
                }
            };
            self.node_mut(curr).keys.insert(Arc::clone(&word));
        }

        self.node_mut(curr).is_end_of_word = true;
        self.words += 1;
        Ok(())
    }

    /// Returns true if `word` is present as a complete key.
    pub fn search(&self, word: &str) -> bool {
        self.walk(word)
            .map(|id| self.node(id).is_end_of_word)
            .unwrap_or(false)
    }

    /// Returns true if some present key starts with `prefix`.
    pub fn is_prefix(&self, prefix: &str) -> bool {
        self.walk(prefix).is_some()
    }

    /// All present keys starting with `prefix`, in no particular order.
    ///
    /// The empty prefix resolves to the root, whose key-set is never
    /// populated, so it yields nothing.
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<Arc<str>> {
        match self.walk(prefix) {
            Some(id) => self.node(id).keys.iter().cloned().collect(),
            None => Vec::new(),
        }
    }

    /// Remove a word, pruning the branch it leaves behind.
    ///
    /// Returns false if the word was not present.
    pub fn remove(&mut self, word: &str) -> bool {
        if !self.search(word) {
            return false;
        }

        // Record the path as (parent, symbol, child) so pruning can run
        // bottom-up without recursion.
        let mut path: Vec<(NodeId, usize, NodeId)> = Vec::with_capacity(word.len());
        let mut curr = NodeId::ROOT;
        for c in word.chars() {
            // search() succeeded, so every symbol and child exists
            let Some(symbol) = symbol_index(c) else {
                return false;
            };
            let Some(child) = self.node(curr).children[symbol] else {
                return false;
            };
            path.push((curr, symbol, child));
            curr = child;
        }

        self.node_mut(curr).is_end_of_word = false;
        self.words -= 1;

        for &(_, _, id) in &path {
            self.node_mut(id).keys.remove(word);
        }

        for &(parent, symbol, id) in path.iter().rev() {
            if !self.node(id).is_prunable() {
                break;
            }
            self.node_mut(parent).children[symbol] = None;
            self.release(id);
        }

        true
    }

    fn walk(&self, prefix: &str) -> Option<NodeId> {
        let mut curr = NodeId::ROOT;
        for c in prefix.chars() {
            let symbol = symbol_index(c)?;
            curr = self.node(curr).children[symbol]?;
        }
        Some(curr)
    }

    fn alloc(&mut self) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.index()] = Some(TrieNode::new());
                id
            }
            None => {
                let id = NodeId(self.nodes.len() as u32);
                self.nodes.push(Some(TrieNode::new()));
                id
            }
        }
    }

    fn release(&mut self, id: NodeId) {
        debug_assert_ne!(id, NodeId::ROOT);
        self.nodes[id.index()] = None;
        self.free.push(id);
    }

    // Only ids reachable from the root are ever dereferenced, and those are
    // always live.
    #[inline]
    fn node(&self, id: NodeId) -> &TrieNode {
        match &self.nodes[id.index()] {
            Some(node) => node,
            None => unreachable!("trie link to freed node {}", id.0),
        }
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut TrieNode {
        match &mut self.nodes[id.index()] {
            Some(node) => node,
            None => unreachable!("trie link to freed node {}", id.0),
        }
    }
}

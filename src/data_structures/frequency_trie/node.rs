// Copyright (c) 2025 MPC Autocomplete Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Node implementation for the frequency trie.
//!
//! Each node exclusively owns its children, so the trie is a strict tree.

use std::fmt;
use std::mem;

use fnv::FnvHashMap;

/// A node in the frequency trie.
///
/// A node carries a frequency only when the path from the root to it spells
/// a stored key.
#[derive(Default)]
pub(crate) struct TrieNode {
    /// Map of characters to child nodes
    pub children: FnvHashMap<char, TrieNode>,

    /// Frequency of the key ending here, if any
    pub frequency: Option<u64>,
}

impl TrieNode {
    /// Creates a new empty trie node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a stored key ends at this node.
    pub fn is_terminal(&self) -> bool {
        self.frequency.is_some()
    }

    /// Children ordered by character, for deterministic traversal.
    pub fn sorted_children(&self) -> Vec<(char, &TrieNode)> {
        let mut children: Vec<(char, &TrieNode)> =
            self.children.iter().map(|(&ch, node)| (ch, node)).collect();
        children.sort_unstable_by_key(|&(ch, _)| ch);
        children
    }

    /// Number of nodes in the subtree rooted here, this node included.
    pub fn subtree_size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.values());
        }
        count
    }
}

// Keys have no length limit, so nothing below may recurse per character.
impl Drop for TrieNode {
    fn drop(&mut self) {
        let mut stack: Vec<TrieNode> = mem::take(&mut self.children).into_values().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(mem::take(&mut node.children).into_values());
        }
    }
}

impl fmt::Debug for TrieNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrieNode")
            .field("frequency", &self.frequency)
            .field("children", &self.children.len())
            .finish()
    }
}

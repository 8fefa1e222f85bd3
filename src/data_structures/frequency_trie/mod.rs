// Copyright (c) 2025 MPC Autocomplete Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Frequency Trie Implementation
//!
//! This module provides a character trie mapping complete strings to their
//! observed frequencies, with exact lookup and prefix enumeration. It is the
//! storage half of the Most-Popular-Completion index; ordering the matches
//! is left to [`crate::model::ranking`].
//!
//! The trie is built once, then read concurrently. Mutation requires
//! `&mut self`, so a trie shared behind an `Arc` is read-only by
//! construction.
//!
//! # Example
//!
//! ```
//! use mpc_autocomplete_lib::data_structures::frequency_trie::FrequencyTrie;
//!
//! let mut trie = FrequencyTrie::new();
//! trie.insert("How can I help you?", 4).unwrap();
//! trie.insert("How are you?", 2).unwrap();
//!
//! assert_eq!(trie.get("How are you?"), Some(2));
//! assert_eq!(trie.lookup_prefix("How").len(), 2);
//! assert!(trie.lookup_prefix("").is_empty());
//! ```

mod alphabet;
pub mod codec;
mod error;
mod node;

pub use alphabet::Alphabet;
pub use error::{IndexError, InvalidKeyReason};
use node::TrieNode;

/// Result type for frequency trie operations
pub type IndexResult<T> = Result<T, IndexError>;

/// A completion string paired with its observed frequency.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    /// The complete string.
    pub key: String,

    /// How many times it was observed.
    pub frequency: u64,
}

impl Entry {
    /// Creates a new entry.
    pub fn new<K: Into<String>>(key: K, frequency: u64) -> Self {
        Self {
            key: key.into(),
            frequency,
        }
    }
}

/// Character trie storing `(key, frequency)` pairs.
///
/// Key features:
/// * Last-write-wins insertion (frequencies are never summed)
/// * Prefix enumeration proportional to the matched subtree
/// * Optional alphabet restriction checked at insertion
#[derive(Debug, Default)]
pub struct FrequencyTrie {
    /// The root node of the trie
    root: TrieNode,

    /// Number of stored keys
    len: usize,

    /// Characters accepted in keys
    alphabet: Alphabet,
}

impl FrequencyTrie {
    /// Creates a new empty trie accepting any Unicode key.
    pub fn new() -> Self {
        Self::with_alphabet(Alphabet::Unicode)
    }

    /// Creates a new empty trie restricted to `alphabet`.
    pub fn with_alphabet(alphabet: Alphabet) -> Self {
        Self {
            root: TrieNode::new(),
            len: 0,
            alphabet,
        }
    }

    /// Creates a trie and populates it from `entries`.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid key; see [`FrequencyTrie::insert`].
    pub fn from_entries<I, K>(alphabet: Alphabet, entries: I) -> IndexResult<Self>
    where
        I: IntoIterator<Item = (K, u64)>,
        K: AsRef<str>,
    {
        let mut trie = Self::with_alphabet(alphabet);
        trie.build(entries)?;
        Ok(trie)
    }

    /// The alphabet this trie validates keys against.
    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Inserts a key with its frequency, replacing any previous frequency.
    ///
    /// # Arguments
    ///
    /// * `key` - The complete string to store.
    /// * `frequency` - Its observed frequency.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(previous))` - The key existed and its frequency was replaced.
    /// * `Ok(None)` - The key is new.
    /// * `Err(IndexError::InvalidKey)` - The key is empty or outside the alphabet.
    pub fn insert<K>(&mut self, key: K, frequency: u64) -> IndexResult<Option<u64>>
    where
        K: AsRef<str>,
    {
        let key = key.as_ref();
        if key.is_empty() {
            return Err(IndexError::InvalidKey {
                key: String::new(),
                reason: InvalidKeyReason::Empty,
            });
        }
        self.alphabet.validate(key)?;

        let mut node = &mut self.root;
        for ch in key.chars() {
            node = node.children.entry(ch).or_default();
        }

        let previous = node.frequency.replace(frequency);
        if previous.is_none() {
            self.len += 1;
        }
        Ok(previous)
    }

    /// Inserts every `(key, frequency)` pair in order.
    ///
    /// Not transactional: on failure the pairs before the bad one stay
    /// inserted, and the caller is expected to rebuild from scratch.
    ///
    /// # Returns
    ///
    /// The number of pairs applied.
    pub fn build<I, K>(&mut self, entries: I) -> IndexResult<usize>
    where
        I: IntoIterator<Item = (K, u64)>,
        K: AsRef<str>,
    {
        let mut applied = 0;
        for (key, frequency) in entries {
            self.insert(key, frequency)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Returns the frequency stored for `key`, if any.
    pub fn get<K>(&self, key: K) -> Option<u64>
    where
        K: AsRef<str>,
    {
        let key = key.as_ref();
        if key.is_empty() {
            return None;
        }
        self.find_node(key).and_then(|node| node.frequency)
    }

    /// Checks if a key is stored in the trie.
    pub fn contains<K>(&self, key: K) -> bool
    where
        K: AsRef<str>,
    {
        self.get(key).is_some()
    }

    /// Returns every entry whose key starts with `prefix`, in no particular
    /// order.
    ///
    /// An empty prefix matches nothing: it never dumps the whole index.
    pub fn lookup_prefix<P>(&self, prefix: P) -> Vec<Entry>
    where
        P: AsRef<str>,
    {
        let prefix = prefix.as_ref();
        if prefix.is_empty() {
            return Vec::new();
        }

        let Some(node) = self.find_node(prefix) else {
            return Vec::new();
        };

        let mut result = Vec::new();
        let mut path = prefix.to_string();
        Self::collect_entries(node, &mut path, &mut result);
        result
    }

    /// Returns all stored entries sorted by key.
    pub fn entries(&self) -> Vec<Entry> {
        let mut result = Vec::with_capacity(self.len);
        let mut path = String::new();
        Self::collect_entries(&self.root, &mut path, &mut result);
        result.sort_unstable_by(|a, b| a.key.cmp(&b.key));
        result
    }

    /// Returns the number of keys in the trie.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Checks if the trie holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.root.subtree_size()
    }

    pub(crate) fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Walks the path spelled by `key`.
    fn find_node(&self, key: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for ch in key.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }

    /// Depth-first collection of the entries below `node`; `path` spells
    /// the key of `node` and is restored before returning.
    fn collect_entries(node: &TrieNode, path: &mut String, result: &mut Vec<Entry>) {
        let base = path.len();
        if let Some(frequency) = node.frequency {
            result.push(Entry::new(path.as_str(), frequency));
        }

        let mut stack = vec![(node.children.iter(), base)];
        while let Some((children, parent_len)) = stack.last_mut() {
            let parent_len = *parent_len;
            let Some((&ch, child)) = children.next() else {
                stack.pop();
                continue;
            };

            path.truncate(parent_len);
            path.push(ch);
            if let Some(frequency) = child.frequency {
                result.push(Entry::new(path.as_str(), frequency));
            }
            stack.push((child.children.iter(), path.len()));
        }

        path.truncate(base);
    }
}

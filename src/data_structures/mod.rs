// Copyright (c) 2025 MPC Autocomplete Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Data structures for the MPC autocomplete server.
//!
//! The frequency trie is a plain, single-owner tree: built once, persisted
//! with its binary codec, then shared read-only between request handlers.

pub mod frequency_trie;

// Re-export common data structures
pub use frequency_trie::{
    Alphabet, Entry, FrequencyTrie, IndexError, IndexResult, InvalidKeyReason,
};

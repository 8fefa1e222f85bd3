// Copyright (c) 2025 MPC Autocomplete Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Top-K ranking of prefix matches.
//!
//! Matches are ordered by frequency, highest first, and ties are broken by
//! the key in ascending lexicographic order. The order is total, so for a
//! given index and prefix the result of `k` is always a prefix of the
//! result of `k + 1`.

use std::cmp::Ordering;

use crate::data_structures::{Entry, FrequencyTrie, IndexError, IndexResult};

/// A validated, non-negative number of completions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CompletionLimit(usize);

impl CompletionLimit {
    /// Wraps an already non-negative limit.
    pub fn new(limit: usize) -> Self {
        Self(limit)
    }

    /// The limit as a count.
    pub fn get(self) -> usize {
        self.0
    }
}

impl TryFrom<i64> for CompletionLimit {
    type Error = IndexError;

    fn try_from(limit: i64) -> Result<Self, Self::Error> {
        usize::try_from(limit).map(Self).map_err(|_| {
            IndexError::Config(format!(
                "completion limit must be non-negative, got {limit}"
            ))
        })
    }
}

/// Ranking comparator: frequency descending, then key ascending.
pub fn compare_entries(a: &Entry, b: &Entry) -> Ordering {
    b.frequency
        .cmp(&a.frequency)
        .then_with(|| a.key.cmp(&b.key))
}

/// Orders `matches` with [`compare_entries`] and keeps the first `k`.
pub fn rank(mut matches: Vec<Entry>, k: usize) -> Vec<Entry> {
    if k == 0 {
        return Vec::new();
    }
    if matches.len() > k {
        matches.select_nth_unstable_by(k - 1, compare_entries);
        matches.truncate(k);
    }
    matches.sort_unstable_by(compare_entries);
    matches
}

/// The `k` best entries starting with `prefix`, frequencies included.
pub fn top_k_entries(index: &FrequencyTrie, prefix: &str, k: usize) -> Vec<Entry> {
    if prefix.is_empty() || k == 0 {
        return Vec::new();
    }
    rank(index.lookup_prefix(prefix), k)
}

/// The `k` best completions of `prefix`.
///
/// An empty prefix, or a prefix nothing starts with, yields an empty list.
pub fn top_k(index: &FrequencyTrie, prefix: &str, k: usize) -> Vec<String> {
    top_k_entries(index, prefix, k)
        .into_iter()
        .map(|entry| entry.key)
        .collect()
}

/// [`top_k`] with a signed limit, as received from configuration or a
/// request.
///
/// # Errors
///
/// Returns [`IndexError::Config`] if `limit` is negative.
pub fn top_k_checked(index: &FrequencyTrie, prefix: &str, limit: i64) -> IndexResult<Vec<String>> {
    let limit = CompletionLimit::try_from(limit)?;
    Ok(top_k(index, prefix, limit.get()))
}

// Copyright (c) 2025 MPC Autocomplete Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Most Popular Completion model (Bar-Yossef and Kraus, 2011).
//!
//! Completions for a prefix are the stored strings starting with it,
//! ordered by how often they were observed.

use std::path::Path;

use tracing::{debug, info, warn};

use super::ranking::{self, CompletionLimit};
use super::{CompletionModel, ModelKind};
use crate::data_structures::frequency_trie::codec;
use crate::data_structures::{Alphabet, Entry, FrequencyTrie, IndexResult};

/// Frequency-ranked completion model backed by a [`FrequencyTrie`].
#[derive(Debug)]
pub struct MostPopularCompletionModel {
    trie: FrequencyTrie,
    max_completions: usize,
}

impl MostPopularCompletionModel {
    /// Completions returned when no limit is configured.
    pub const DEFAULT_MAX_COMPLETIONS: usize = 5;

    /// Creates an empty model accepting any Unicode key.
    pub fn new(max_completions: usize) -> Self {
        Self::with_alphabet(max_completions, Alphabet::Unicode)
    }

    /// Creates an empty model restricted to `alphabet`.
    pub fn with_alphabet(max_completions: usize, alphabet: Alphabet) -> Self {
        Self::from_trie(FrequencyTrie::with_alphabet(alphabet), max_completions)
    }

    /// Wraps an existing trie.
    pub fn from_trie(trie: FrequencyTrie, max_completions: usize) -> Self {
        Self {
            trie,
            max_completions,
        }
    }

    /// Loads a model from an index file.
    pub fn open<P: AsRef<Path>>(path: P, max_completions: usize) -> IndexResult<Self> {
        Ok(Self::from_trie(codec::load(path)?, max_completions))
    }

    /// The underlying trie.
    pub fn trie(&self) -> &FrequencyTrie {
        &self.trie
    }
}

impl Default for MostPopularCompletionModel {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_COMPLETIONS)
    }
}

impl CompletionModel for MostPopularCompletionModel {
    fn kind(&self) -> ModelKind {
        ModelKind::Mpc
    }

    fn build(&mut self, entries: Vec<Entry>) -> IndexResult<usize> {
        info!(entries = entries.len(), "Start inserting into trie...");
        // Build off to the side so a failed build leaves the model as it was.
        let mut trie = FrequencyTrie::with_alphabet(self.trie.alphabet());
        let applied = trie.build(entries.into_iter().map(|e| (e.key, e.frequency)))?;
        self.trie = trie;
        info!(
            keys = self.trie.len(),
            nodes = self.trie.node_count(),
            "Finished inserting into trie"
        );
        Ok(applied)
    }

    fn complete(&self, prefix: &str) -> Vec<String> {
        self.complete_with_limit(prefix, CompletionLimit::new(self.max_completions))
    }

    fn complete_with_limit(&self, prefix: &str, limit: CompletionLimit) -> Vec<String> {
        let completions = ranking::top_k(&self.trie, prefix, limit.get());
        debug!(
            prefix,
            limit = limit.get(),
            returned = completions.len(),
            "Generated completions"
        );
        completions
    }

    fn save(&self, path: &Path) -> IndexResult<()> {
        info!(path = %path.display(), "Saving trie");
        codec::save(&self.trie, path)
    }

    fn load(&mut self, path: &Path) -> IndexResult<usize> {
        info!(path = %path.display(), "Loading trie");
        let trie = codec::load(path)?;
        if trie.alphabet() != self.trie.alphabet() {
            warn!(
                configured = %self.trie.alphabet(),
                stored = %trie.alphabet(),
                "Index file alphabet differs from the configured one, using the stored alphabet"
            );
        }
        self.trie = trie;
        Ok(self.trie.len())
    }

    fn len(&self) -> usize {
        self.trie.len()
    }

    fn max_completions(&self) -> usize {
        self.max_completions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::IndexError;
    use tempfile::tempdir;

    fn conversation_entries() -> Vec<Entry> {
        vec![
            Entry::new("How can I help you?", 4),
            Entry::new("Have a great day Wernzio", 3),
            Entry::new("Hello Werner how may I help you today?", 2),
            Entry::new("Happy to help", 1),
            Entry::new("I am sorry for the inconveniences.", 2),
        ]
    }

    #[test]
    fn test_model_init() {
        let model = MostPopularCompletionModel::default();
        assert_eq!(model.max_completions(), 5);
        assert!(model.is_empty());
        assert!(model.complete("H").is_empty());
    }

    #[test]
    fn test_completions_respect_max() {
        let mut model = MostPopularCompletionModel::new(3);
        model.build(conversation_entries()).unwrap();

        assert_eq!(
            model.complete("H"),
            vec![
                "How can I help you?",
                "Have a great day Wernzio",
                "Hello Werner how may I help you today?",
            ]
        );
        assert_eq!(model.complete("How can"), vec!["How can I help you?"]);
        assert!(model.complete("").is_empty());
        assert_eq!(model.trie().get("How can I help you?"), Some(4));
    }

    #[test]
    fn test_failed_build_keeps_previous_contents() {
        let mut model = MostPopularCompletionModel::with_alphabet(3, Alphabet::Printable);
        model.build(conversation_entries()).unwrap();

        let err = model
            .build(vec![Entry::new("ok", 1), Entry::new("caf\u{e9}", 1)])
            .unwrap_err();
        assert!(matches!(err, IndexError::InvalidKey { .. }));
        assert_eq!(model.len(), 5);
        assert!(!model.trie().contains("ok"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.mpct");

        let mut model = MostPopularCompletionModel::new(2);
        model.build(conversation_entries()).unwrap();
        model.save(&path).unwrap();

        let mut reloaded = MostPopularCompletionModel::new(2);
        assert_eq!(reloaded.load(&path).unwrap(), 5);
        assert_eq!(reloaded.complete("H"), model.complete("H"));

        let opened = MostPopularCompletionModel::open(&path, 1).unwrap();
        assert_eq!(opened.complete("H"), vec!["How can I help you?"]);
    }

    #[test]
    fn test_load_adopts_stored_alphabet() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("printable.mpct");

        let mut model = MostPopularCompletionModel::with_alphabet(3, Alphabet::Printable);
        model.build(vec![Entry::new("abc", 1)]).unwrap();
        model.save(&path).unwrap();

        let mut reloaded = MostPopularCompletionModel::new(3);
        reloaded.load(&path).unwrap();
        assert_eq!(reloaded.trie().alphabet(), Alphabet::Printable);
    }
}

// Copyright (c) 2025 MPC Autocomplete Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Conversation corpus ingestion.
//!
//! Reads a JSON corpus of support conversations, splits agent messages into
//! sentences and counts how often each sentence occurs. The resulting
//! entries feed [`crate::model::CompletionModel::build`].
//!
//! ```json
//! {"Issues": [{"IssueId": 1, "CompanyGroupId": 7,
//!              "Messages": [{"IsFromCustomer": false, "Text": "How can I help you?"}]}]}
//! ```

mod sentences;

use std::fs;
use std::io;
use std::path::Path;

use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::data_structures::{Alphabet, Entry};
use crate::error::corpus::CorpusError;

pub use sentences::split_sentences;

/// Result type for corpus operations.
pub type CorpusResult<T> = Result<T, CorpusError>;

/// A whole corpus file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    /// Conversations in the corpus
    #[serde(rename = "Issues", default)]
    pub issues: Vec<Issue>,
}

/// One support conversation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Issue {
    /// Conversation identifier
    #[serde(rename = "IssueId", default)]
    pub issue_id: Option<serde_json::Value>,

    /// Company group the conversation belongs to
    #[serde(rename = "CompanyGroupId", default)]
    pub company_group_id: Option<serde_json::Value>,

    /// Messages in order
    #[serde(rename = "Messages", default)]
    pub messages: Vec<Message>,
}

/// One message of a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Whether the customer (rather than the agent) wrote it
    #[serde(rename = "IsFromCustomer")]
    pub is_from_customer: bool,

    /// Message body
    #[serde(rename = "Text")]
    pub text: String,
}

/// Options controlling which sentences become entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestOptions {
    /// Count customer messages as well as agent messages
    pub include_customer_messages: bool,

    /// Sentences with characters outside this alphabet are skipped
    pub alphabet: Alphabet,
}

/// Reads and parses a corpus file.
///
/// # Errors
///
/// * [`CorpusError::FileNotFound`] - `path` does not exist.
/// * [`CorpusError::FileReadError`] - The file could not be read.
/// * [`CorpusError::ParseError`] - The file is not corpus JSON.
pub fn read_corpus<P: AsRef<Path>>(path: P) -> CorpusResult<Corpus> {
    let path = path.as_ref();
    info!(path = %path.display(), "Start reading corpus");

    let raw = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CorpusError::FileNotFound(path.to_path_buf()),
        _ => CorpusError::FileReadError(format!("{}: {e}", path.display())),
    })?;
    let corpus = parse_corpus(&raw)?;

    info!(issues = corpus.issues.len(), "Finished reading corpus");
    Ok(corpus)
}

/// Parses corpus JSON held in memory.
pub fn parse_corpus(raw: &str) -> CorpusResult<Corpus> {
    serde_json::from_str(raw).map_err(|e| CorpusError::ParseError(e.to_string()))
}

/// Counts sentence occurrences across the selected messages.
///
/// The entries are sorted by sentence so repeated builds over the same
/// corpus insert keys in the same order.
pub fn sentence_frequencies(corpus: &Corpus, options: &IngestOptions) -> Vec<Entry> {
    let mut counts: FnvHashMap<&str, u64> = FnvHashMap::default();
    let mut messages = 0usize;
    let mut skipped = 0usize;

    let selected = corpus
        .issues
        .iter()
        .flat_map(|issue| issue.messages.iter())
        .filter(|message| options.include_customer_messages || !message.is_from_customer);

    for message in selected {
        messages += 1;
        for sentence in split_sentences(&message.text) {
            if sentence.chars().all(|ch| options.alphabet.allows(ch)) {
                *counts.entry(sentence).or_insert(0) += 1;
            } else {
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!(
            skipped,
            alphabet = %options.alphabet,
            "Skipped sentences with characters outside the alphabet"
        );
    }

    let mut entries: Vec<Entry> = counts
        .into_iter()
        .map(|(sentence, count)| Entry::new(sentence, count))
        .collect();
    entries.sort_unstable_by(|a, b| a.key.cmp(&b.key));

    info!(
        messages,
        distinct_sentences = entries.len(),
        "Counted sentence frequencies"
    );
    entries
}

/// Reads a corpus file and returns its sentence frequencies.
pub fn load_entries<P: AsRef<Path>>(path: P, options: &IngestOptions) -> CorpusResult<Vec<Entry>> {
    let corpus = read_corpus(path)?;
    Ok(sentence_frequencies(&corpus, options))
}

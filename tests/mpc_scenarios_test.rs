// Copyright (c) 2025 MPC Autocomplete Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! End-to-end scenarios through the public API.

use std::fs;

use mpc_autocomplete_lib::corpus::{parse_corpus, sentence_frequencies, IngestOptions};
use mpc_autocomplete_lib::data_structures::frequency_trie::codec;
use mpc_autocomplete_lib::data_structures::{Alphabet, Entry, FrequencyTrie, IndexError};
use mpc_autocomplete_lib::model::ranking::{top_k, top_k_checked};
use mpc_autocomplete_lib::model::{
    create_model, CompletionLimit, CompletionModel, ModelKind, MostPopularCompletionModel,
};

fn greetings() -> FrequencyTrie {
    FrequencyTrie::from_entries(
        Alphabet::Unicode,
        [
            ("How can I help you?", 4),
            ("How are you?", 2),
            ("Have a great day", 1),
        ],
    )
    .unwrap()
}

#[test]
fn test_ranked_by_frequency() {
    assert_eq!(
        top_k(&greetings(), "H", 3),
        vec!["How can I help you?", "How are you?", "Have a great day"]
    );
}

#[test]
fn test_unknown_prefix_is_empty() {
    assert!(top_k(&greetings(), "1234$!@#", 5).is_empty());
}

#[test]
fn test_ties_broken_by_key() {
    let trie =
        FrequencyTrie::from_entries(Alphabet::Unicode, [("cat", 5), ("car", 5), ("cab", 3)])
            .unwrap();
    assert_eq!(top_k(&trie, "ca", 2), vec!["car", "cat"]);
}

#[test]
fn test_empty_prefix_is_empty() {
    assert!(top_k(&greetings(), "", 10).is_empty());
}

#[test]
fn test_negative_limit_rejected() {
    assert!(matches!(
        top_k_checked(&greetings(), "H", -1),
        Err(IndexError::Config(_))
    ));
    assert_eq!(top_k_checked(&greetings(), "H", 0).unwrap(), Vec::<String>::new());
}

#[test]
fn test_corrupted_file_detected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("greetings.mpct");
    codec::save(&greetings(), &path).unwrap();

    let mut bytes = fs::read(&path).unwrap();
    let middle = bytes.len() / 2;
    bytes[middle] ^= 0x20;
    fs::write(&path, &bytes).unwrap();

    assert!(matches!(codec::load(&path), Err(IndexError::CorruptFile(_))));
}

#[test]
fn test_corpus_to_completions() {
    let corpus = parse_corpus(
        r#"{"Issues": [
            {"IssueId": 1, "CompanyGroupId": 1, "Messages": [
                {"IsFromCustomer": false, "Text": "How can I help you? Thanks for waiting."},
                {"IsFromCustomer": false, "Text": "How can I help you?"},
                {"IsFromCustomer": true, "Text": "How do I reset my password?"}
            ]},
            {"IssueId": 2, "CompanyGroupId": 1, "Messages": [
                {"IsFromCustomer": false, "Text": "Hello! How are you?"}
            ]}
        ]}"#,
    )
    .unwrap();

    let entries = sentence_frequencies(&corpus, &IngestOptions::default());
    let mut model = create_model(ModelKind::Mpc, CompletionLimit::new(3), Alphabet::Unicode);
    model.build(entries).unwrap();

    assert_eq!(model.complete("How"), vec!["How can I help you?", "How are you?"]);
    assert_eq!(model.complete("Hel"), vec!["Hello!"]);
}

#[test]
fn test_rebuild_replaces_contents() {
    let mut model = MostPopularCompletionModel::new(5);
    model.build(vec![Entry::new("old phrase", 1)]).unwrap();
    model
        .build(vec![Entry::new("new phrase", 2), Entry::new("new words", 3)])
        .unwrap();

    assert_eq!(model.len(), 2);
    assert!(model.complete("old").is_empty());
    assert_eq!(model.complete("new"), vec!["new words", "new phrase"]);
}

#[test]
fn test_printable_alphabet_rejects_unicode() {
    let mut model = MostPopularCompletionModel::with_alphabet(5, Alphabet::Printable);
    let result = model.build(vec![Entry::new("ok", 1), Entry::new("caf\u{e9}", 1)]);
    assert!(matches!(result, Err(IndexError::InvalidKey { .. })));
}

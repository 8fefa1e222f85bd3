// Copyright (c) 2025 MPC Autocomplete Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Rule-based sentence splitting.
//!
//! A sentence ends at a run of `.`, `!` or `?` (optionally followed by
//! closing quotes or brackets) that is followed by whitespace or the end of
//! the text. Abbreviations are not recognised.

fn is_terminal(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

fn is_closing(ch: char) -> bool {
    matches!(ch, '"' | '\'' | ')' | ']' | '\u{201d}' | '\u{2019}')
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, candidate: &'a str) {
    let sentence = candidate.trim();
    if !sentence.is_empty() {
        sentences.push(sentence);
    }
}

/// Splits `text` into trimmed, non-empty sentences.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, ch)) = chars.next() {
        if !is_terminal(ch) {
            continue;
        }

        let mut end = text.len();
        while let Some(&(idx, next)) = chars.peek() {
            if is_terminal(next) || is_closing(next) {
                chars.next();
            } else {
                end = idx;
                break;
            }
        }

        if end == text.len() || text[end..].starts_with(char::is_whitespace) {
            push_trimmed(&mut sentences, &text[start..end]);
            start = end;
        }
    }

    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

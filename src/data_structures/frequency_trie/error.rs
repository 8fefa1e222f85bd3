// Copyright (c) 2025 MPC Autocomplete Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the frequency trie, its ranking queries and its codec.

use std::fmt;
use std::path::PathBuf;

use super::alphabet::Alphabet;

/// Why a key was rejected at insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidKeyReason {
    /// The key has no characters.
    Empty,

    /// The key contains a character the index alphabet does not accept.
    OutsideAlphabet {
        /// The first rejected character.
        ch: char,
        /// The alphabet that rejected it.
        alphabet: Alphabet,
    },
}

impl fmt::Display for InvalidKeyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty key not allowed"),
            Self::OutsideAlphabet { ch, alphabet } => {
                write!(f, "character {ch:?} is outside the {alphabet} alphabet")
            }
        }
    }
}

/// Errors that can occur in index operations.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The key is empty or contains an unsupported character.
    #[error("Invalid key {key:?}: {reason}")]
    InvalidKey {
        /// The rejected key.
        key: String,
        /// What was wrong with it.
        reason: InvalidKeyReason,
    },

    /// A query parameter is out of range (for example a negative result limit).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading or writing an index file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file being read or written.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The bytes do not form a valid index.
    #[error("Corrupt index file: {0}")]
    CorruptFile(String),

    /// The index file does not exist.
    #[error("Index file not found: {}", .0.display())]
    FileNotFound(PathBuf),
}

impl IndexError {
    pub(crate) fn corrupt<S: Into<String>>(message: S) -> Self {
        Self::CorruptFile(message.into())
    }

    pub(crate) fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

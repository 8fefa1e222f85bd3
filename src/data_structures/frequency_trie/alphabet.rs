// Copyright (c) 2025 MPC Autocomplete Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Character alphabets accepted by a frequency trie.
//!
//! The trie itself stores any Unicode scalar value. An alphabet is an
//! optional validation layer applied to keys before they reach the trie.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{IndexError, InvalidKeyReason};
use super::IndexResult;

/// Set of characters a frequency trie accepts in its keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alphabet {
    /// Any Unicode scalar value.
    #[default]
    Unicode,

    /// Printable ASCII: digits, letters, punctuation and the whitespace
    /// characters space, tab, newline, carriage return, vertical tab and
    /// form feed.
    Printable,
}

impl Alphabet {
    /// Returns `true` if `ch` may appear in a key.
    pub fn allows(self, ch: char) -> bool {
        match self {
            Self::Unicode => true,
            Self::Printable => {
                ch.is_ascii_graphic() || matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
            }
        }
    }

    /// Checks every character of `key`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidKey`] naming the first rejected character.
    pub fn validate(self, key: &str) -> IndexResult<()> {
        match key.chars().find(|&ch| !self.allows(ch)) {
            Some(ch) => Err(IndexError::InvalidKey {
                key: key.to_string(),
                reason: InvalidKeyReason::OutsideAlphabet { ch, alphabet: self },
            }),
            None => Ok(()),
        }
    }

    /// Code stored in the index file header.
    pub(crate) fn code(self) -> u8 {
        match self {
            Self::Unicode => 0,
            Self::Printable => 1,
        }
    }

    /// Inverse of [`Alphabet::code`].
    pub(crate) fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Unicode),
            1 => Some(Self::Printable),
            _ => None,
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unicode => write!(f, "unicode"),
            Self::Printable => write!(f, "printable"),
        }
    }
}

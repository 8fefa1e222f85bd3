// Copyright (c) 2025 MPC Autocomplete Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Autocomplete models.
//!
//! A model turns a prefix into an ordered list of completions. Every model
//! implements [`CompletionModel`]; which one is used is decided once, at
//! construction time, from [`ModelKind`]. The Most-Popular-Completion model
//! is the only variant today.

mod mpc;
pub mod ranking;
mod shared;

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data_structures::{Alphabet, Entry, IndexResult};

pub use mpc::MostPopularCompletionModel;
pub use ranking::CompletionLimit;
pub use shared::SharedModel;

/// Capabilities shared by every autocomplete model.
///
/// Implementations are built (or loaded) while exclusively owned, then
/// shared read-only through a [`SharedModel`].
pub trait CompletionModel: Send + Sync {
    /// Which variant this is.
    fn kind(&self) -> ModelKind;

    /// Replaces the model contents with `entries`.
    ///
    /// # Returns
    ///
    /// The number of entries applied.
    fn build(&mut self, entries: Vec<Entry>) -> IndexResult<usize>;

    /// Completions for `prefix`, at most [`CompletionModel::max_completions`].
    fn complete(&self, prefix: &str) -> Vec<String>;

    /// Completions for `prefix`, at most `limit`.
    fn complete_with_limit(&self, prefix: &str, limit: CompletionLimit) -> Vec<String>;

    /// Persists the model to `path`.
    fn save(&self, path: &Path) -> IndexResult<()>;

    /// Replaces the model contents with the ones stored at `path`.
    ///
    /// # Returns
    ///
    /// The number of entries loaded.
    fn load(&mut self, path: &Path) -> IndexResult<usize>;

    /// Number of stored completions.
    fn len(&self) -> usize;

    /// Whether the model holds no completions.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Default number of completions returned by [`CompletionModel::complete`].
    fn max_completions(&self) -> usize;
}

/// Available model variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Most Popular Completion: rank by observed frequency
    #[default]
    Mpc,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mpc => write!(f, "mpc"),
        }
    }
}

/// Constructs an empty model of the requested kind.
pub fn create_model(
    kind: ModelKind,
    max_completions: CompletionLimit,
    alphabet: Alphabet,
) -> Box<dyn CompletionModel> {
    match kind {
        ModelKind::Mpc => Box::new(MostPopularCompletionModel::with_alphabet(
            max_completions.get(),
            alphabet,
        )),
    }
}

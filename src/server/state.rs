// Copyright (c) 2025 MPC Autocomplete Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Application state shared across handlers.

use std::path::{Path, PathBuf};

use crate::config::model::ModelConfig;
use crate::data_structures::{Alphabet, IndexResult};
use crate::model::{create_model, CompletionLimit, CompletionModel, ModelKind, SharedModel};

/// Everything a handler needs: the live model and how to rebuild it.
#[derive(Debug)]
pub struct AppState {
    /// Model answering queries
    pub model: SharedModel,
    /// Index file reloaded by `POST /admin/reload`
    pub index_path: PathBuf,
    /// Completions returned when a request does not pass `k`
    pub max_completions: CompletionLimit,
    /// Variant constructed on reload
    pub kind: ModelKind,
    /// Alphabet of freshly constructed models
    pub alphabet: Alphabet,
}

impl AppState {
    /// State serving `model`, reloading according to `config`.
    pub fn new(model: SharedModel, config: &ModelConfig) -> IndexResult<Self> {
        Ok(Self {
            model,
            index_path: config.index_path.clone(),
            max_completions: config.limit()?,
            kind: config.kind,
            alphabet: config.alphabet,
        })
    }

    /// Constructs a model of the configured kind and loads `path` into it.
    ///
    /// Blocking; callers on the runtime use `spawn_blocking`.
    pub fn load_model(&self, path: &Path) -> IndexResult<Box<dyn CompletionModel>> {
        load_model(self.kind, self.max_completions, self.alphabet, path)
    }
}

/// Constructs a model of `kind` and loads the index at `path` into it.
pub fn load_model(
    kind: ModelKind,
    max_completions: CompletionLimit,
    alphabet: Alphabet,
    path: &Path,
) -> IndexResult<Box<dyn CompletionModel>> {
    let mut model = create_model(kind, max_completions, alphabet);
    model.load(path)?;
    Ok(model)
}

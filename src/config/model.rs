//! Completion model configuration module.

use std::path::PathBuf;

use super::ConfigResult;
use super::Validate;
use crate::data_structures::{Alphabet, IndexResult};
use crate::error::config::ConfigError;
use crate::model::{CompletionLimit, ModelKind};
use serde::{Deserialize, Serialize};

/// Completion model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Which completion model to construct
    pub kind: ModelKind,

    /// Completions returned when a request does not ask for a count.
    ///
    /// Signed so that a negative value in a file or the environment is
    /// reported by validation instead of failing deserialization.
    pub max_completions: i64,

    /// Characters allowed in completion keys
    pub alphabet: Alphabet,

    /// Location of the persisted index
    pub index_path: PathBuf,
}

impl ModelConfig {
    /// The configured maximum as a [`CompletionLimit`].
    pub fn limit(&self) -> IndexResult<CompletionLimit> {
        CompletionLimit::try_from(self.max_completions)
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            kind: ModelKind::default(),
            max_completions: 3,
            alphabet: Alphabet::default(),
            index_path: PathBuf::from("data/completions.mpct"),
        }
    }
}

impl Validate for ModelConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_completions < 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "model.max_completions".to_string(),
                message: format!("must be >= 0, got {}", self.max_completions),
            });
        }

        if self.index_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "index_path cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

//! Corpus ingestion configuration module.

use serde::{Deserialize, Serialize};

use crate::corpus::IngestOptions;
use crate::data_structures::Alphabet;

/// Corpus ingestion configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Count customer messages in addition to agent messages
    pub include_customer_messages: bool,
}

impl CorpusConfig {
    /// Ingestion options for a model using `alphabet`.
    pub fn ingest_options(&self, alphabet: Alphabet) -> IngestOptions {
        IngestOptions {
            include_customer_messages: self.include_customer_messages,
            alphabet,
        }
    }
}

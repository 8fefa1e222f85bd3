//! MPC Autocomplete Library
//!
//! Most-Popular-Completion autocomplete: a frequency-annotated trie over
//! observed sentences, top-K ranking by frequency, a checksummed binary file
//! format, corpus ingestion, and an HTTP façade serving completions.
//!
//! # Architecture
//!
//! - [`data_structures`] holds the [`FrequencyTrie`](data_structures::FrequencyTrie)
//!   and its codec.
//! - [`model`] ranks prefix matches and wraps the trie as a
//!   [`CompletionModel`](model::CompletionModel), shared by readers through a
//!   swappable [`SharedModel`](model::SharedModel).
//! - [`corpus`] turns conversation transcripts into weighted entries.
//! - [`server`] exposes the model over HTTP.
//! - [`config`] and [`error`] are the ambient layers used by all of the above.

pub mod config;
pub mod corpus;
pub mod data_structures;
pub mod error;
pub mod model;
pub mod server;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for the MPC autocomplete server.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Installs the tracing-backed error reporter.
pub fn init() {
    error::set_error_reporter(std::sync::Arc::new(error::TracingErrorReporter));
}

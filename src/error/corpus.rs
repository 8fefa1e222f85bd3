//! Corpus error module.
//!
//! This module defines error types that may occur while reading and parsing
//! a conversation corpus.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during corpus ingestion.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// Error when the corpus file is missing.
    #[error("Corpus file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Error when the corpus file cannot be read.
    #[error("Failed to read corpus file: {0}")]
    FileReadError(String),

    /// Error when the corpus file is not valid corpus JSON.
    #[error("Failed to parse corpus file: {0}")]
    ParseError(String),
}

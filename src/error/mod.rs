//! Error module for the MPC autocomplete server.
//!
//! Component errors (index, corpus, configuration) are defined next to the
//! code that raises them and converge here into [`MpcError`], which the CLI
//! and the HTTP façade report through an [`ErrorReporter`].

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use thiserror::Error;

pub use crate::data_structures::IndexError;

pub mod config;
pub mod corpus;

/// Result type alias used throughout the MPC autocomplete server.
pub type MpcResult<T> = Result<T, MpcError>;

/// Core error enum for the MPC autocomplete server.
#[derive(Error, Debug)]
pub enum MpcError {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Errors raised by the completion index, its ranking or its codec.
    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    /// Errors raised while reading a conversation corpus.
    #[error("Corpus error: {0}")]
    Corpus(#[from] corpus::CorpusError),

    /// IO errors outside of index files (sockets, generated config files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Custom error with message for cases where specific error types are not defined.
    #[error("{0}")]
    Custom(String),
}

/// An error together with where it happened.
#[derive(Debug)]
pub struct ErrorContext {
    /// The error that occurred.
    pub error: MpcError,

    /// The component where the error occurred.
    pub component: String,

    /// Additional context information to help with debugging.
    pub details: Option<String>,
}

impl ErrorContext {
    /// Creates a new error context with the given error and component.
    ///
    /// # Arguments
    ///
    /// * `error` - The error that occurred
    /// * `component` - The component where the error occurred
    pub fn new<E, S>(error: E, component: S) -> Self
    where
        E: Into<MpcError>,
        S: Into<String>,
    {
        Self {
            error: error.into(),
            component: component.into(),
            details: None,
        }
    }

    /// Adds detail information to the error context.
    pub fn with_details<S: Into<String>>(mut self, details: S) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl Display for ErrorContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error in {}: {}", self.component, self.error)?;
        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }
        Ok(())
    }
}

/// Error reporter trait for reporting errors to various sinks.
pub trait ErrorReporter: Send + Sync + std::fmt::Debug {
    /// Report an error with context.
    fn report(&self, context: &ErrorContext);
}

/// Reports errors as `tracing` events.
#[derive(Default, Debug)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, context: &ErrorContext) {
        tracing::error!(
            error = %context.error,
            component = %context.component,
            details = context.details.as_deref().unwrap_or("None"),
            "Error reported"
        );
    }
}

static ERROR_REPORTER: Lazy<RwLock<Option<Arc<dyn ErrorReporter>>>> =
    Lazy::new(|| RwLock::new(None));

/// Install the process-wide error reporter, replacing any previous one.
pub fn set_error_reporter(reporter: Arc<dyn ErrorReporter>) {
    *ERROR_REPORTER.write() = Some(reporter);
}

/// Report an error through the installed reporter.
///
/// Falls back to standard error when no reporter is installed.
pub fn report_error(context: &ErrorContext) {
    let reporter = ERROR_REPORTER.read().clone();
    match reporter {
        Some(reporter) => reporter.report(context),
        None => eprintln!("Error: {context}"),
    }
}

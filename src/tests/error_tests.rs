//! Tests for the error module.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::corpus::parse_corpus;
use crate::data_structures::{IndexError, InvalidKeyReason};
use crate::error::config::ConfigError;
use crate::error::corpus::CorpusError;
use crate::error::{
    report_error, set_error_reporter, ErrorContext, ErrorReporter, MpcError, MpcResult,
    TracingErrorReporter,
};

/// Test that error context can be created and displayed properly.
#[test]
fn test_error_context_display() {
    let error = MpcError::Custom("test error".to_string());
    let context = ErrorContext::new(error, "test_component").with_details("additional details");

    let display_string = format!("{context}");
    assert!(display_string.contains("test error"));
    assert!(display_string.contains("test_component"));
    assert!(display_string.contains("additional details"));
}

#[test]
fn test_component_errors_convert() {
    fn fails_with_index() -> MpcResult<()> {
        let result: Result<(), IndexError> = Err(IndexError::InvalidKey {
            key: String::new(),
            reason: InvalidKeyReason::Empty,
        });
        result?;
        Ok(())
    }

    fn fails_with_config() -> MpcResult<()> {
        let result: Result<(), ConfigError> = Err(ConfigError::ValidationError("bad".to_string()));
        result?;
        Ok(())
    }

    fn fails_with_corpus() -> MpcResult<()> {
        let result: Result<(), CorpusError> =
            Err(CorpusError::FileNotFound(PathBuf::from("corpus.json")));
        result?;
        Ok(())
    }

    assert!(matches!(fails_with_index(), Err(MpcError::Index(_))));
    assert!(matches!(fails_with_config(), Err(MpcError::Config(_))));

    let error = fails_with_corpus().unwrap_err();
    assert!(matches!(error, MpcError::Corpus(_)));
    assert!(error.to_string().contains("corpus.json"));
}

/// Test that nested errors work correctly.
#[test]
fn test_nested_errors() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let index_error = IndexError::Io {
        path: PathBuf::from("/data/index.mpct"),
        source: io_error,
    };

    let rendered = MpcError::from(index_error).to_string();
    assert!(rendered.contains("/data/index.mpct"));
    assert!(rendered.contains("denied"));
}

/// Mock error reporter for testing.
#[derive(Debug, Default)]
struct CountingErrorReporter {
    reported_count: AtomicUsize,
}

impl ErrorReporter for CountingErrorReporter {
    fn report(&self, _context: &ErrorContext) {
        self.reported_count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Test that the global error reporter works correctly.
#[test]
fn test_global_error_reporter() {
    let reporter = Arc::new(CountingErrorReporter::default());
    set_error_reporter(reporter.clone());

    let context = ErrorContext::new(MpcError::Custom("test error".to_string()), "test_component");
    report_error(&context);

    assert!(reporter.reported_count.load(Ordering::SeqCst) >= 1);
}

/// Test that the default tracing error reporter can be created.
#[test]
fn test_tracing_error_reporter() {
    let reporter = TracingErrorReporter;
    let context = ErrorContext::new(
        IndexError::CorruptFile("checksum mismatch".to_string()),
        "test_component",
    );

    // Just make sure this doesn't panic
    reporter.report(&context);
}

#[test]
fn test_corpus_json_errors_surface_as_corpus_errors() {
    fn parse(raw: &str) -> MpcResult<usize> {
        Ok(parse_corpus(raw)?.issues.len())
    }

    assert_eq!(parse(r#"{"Issues": []}"#).unwrap(), 0);

    let error = parse("{not json").unwrap_err();
    assert!(matches!(error, MpcError::Corpus(CorpusError::ParseError(_))));
    assert!(error.to_string().starts_with("Corpus error"));
}

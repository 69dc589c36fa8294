//! Error types for the textvis application.
//!
//! A small hierarchical taxonomy using `thiserror`. Domain errors compose
//! into [`AppError`] via `From`, so the `?` operator propagates context
//! without manual mapping.
//!
//! Stringification of a value is intentionally absent from this taxonomy: a
//! panicking `Display` impl indicates a defect in the value's own text
//! representation and propagates out of the ingestion path unhandled.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read values from the upstream source.
    ///
    /// Fatal: the visualizer cannot proceed without an input stream.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Failed to initialize logging.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Failed to load or parse configuration.
    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Terminal I/O failure during setup, rendering, or teardown.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Display surface failure while running the event loop.
    #[error("Display error: {0}")]
    Display(#[from] crate::view::TuiError),
}

/// Errors reading from the upstream value source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// No input available: no file argument and stdin is an interactive
    /// terminal, so nothing would ever arrive.
    #[error("No input: provide a file path or pipe data to stdin")]
    NoInput,

    /// The input file does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Underlying I/O failure while reading the source.
    #[error("I/O error reading source: {0}")]
    Io(#[from] std::io::Error),
}

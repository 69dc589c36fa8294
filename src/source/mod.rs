//! Upstream value sources.
//!
//! The visualizer core accepts any stream of timestamped values; the binary
//! instantiates it with line-oriented sources:
//! - File loading for read-once file input
//! - Stdin for piped input (live streaming)
//! - Unified [`ValueSource`] enum over both
//!
//! Each polled line becomes one [`TimestampedValue`] stamped at arrival,
//! either as raw text or parsed as JSON depending on [`ValueMode`].

use crate::model::{SourceError, TimestampedValue};
use std::fmt;
use std::path::PathBuf;

pub mod file;
pub mod stdin;

pub use file::FileSource;
pub use stdin::StdinSource;

/// How polled lines are interpreted as values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueMode {
    /// Each line is a plain text value.
    #[default]
    Text,
    /// Each line is parsed as JSON; lines that fail to parse fall back to
    /// plain text (a malformed line is data, not an error).
    Json,
}

/// A value delivered by the upstream source.
///
/// Demonstrates the arbitrarily-typed contract: the ingestion pipeline only
/// sees these through their `Display` representation.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamValue {
    /// A plain text line.
    Text(String),
    /// A parsed JSON document.
    Json(serde_json::Value),
}

impl fmt::Display for StreamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamValue::Text(s) => f.write_str(s),
            // Compact JSON form; may still contain escapes worth sanitizing.
            StreamValue::Json(v) => write!(f, "{v}"),
        }
    }
}

/// Unified upstream source for line-oriented value streams.
#[derive(Debug)]
pub enum ValueSource {
    /// Read-once file input.
    File(FileSource),
    /// Piped stdin input (live streaming).
    Stdin(StdinSource),
}

impl ValueSource {
    /// Poll for values that arrived since the last call.
    ///
    /// Non-blocking; returns an empty batch when nothing arrived. Arrival
    /// order within the batch is preserved and significant.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` for I/O failures.
    pub fn poll(&mut self, mode: ValueMode) -> Result<Vec<TimestampedValue<StreamValue>>, SourceError> {
        let lines = match self {
            ValueSource::File(f) => f.drain_lines(),
            ValueSource::Stdin(s) => s.poll()?,
        };
        Ok(lines
            .into_iter()
            .map(|line| TimestampedValue::new(interpret(line, mode)))
            .collect())
    }

    /// Whether more data may still arrive.
    ///
    /// Files are read-once and never live; stdin is live until EOF.
    pub fn is_live(&self) -> bool {
        match self {
            ValueSource::File(_) => false,
            ValueSource::Stdin(s) => !s.is_complete(),
        }
    }
}

/// Interpret one raw line according to the value mode.
fn interpret(line: String, mode: ValueMode) -> StreamValue {
    match mode {
        ValueMode::Text => StreamValue::Text(line),
        ValueMode::Json => match serde_json::from_str(&line) {
            Ok(value) => StreamValue::Json(value),
            Err(_) => StreamValue::Text(line),
        },
    }
}

/// Detect and create the appropriate source.
///
/// A file path wins when provided; otherwise piped stdin is used.
///
/// # Errors
///
/// Returns `SourceError::NoInput` if no file is given and stdin is an
/// interactive terminal, `SourceError::FileNotFound` for a missing file, and
/// `SourceError::Io` for read failures.
pub fn detect_source(file: Option<PathBuf>) -> Result<ValueSource, SourceError> {
    match file {
        Some(path) => Ok(ValueSource::File(FileSource::new(path)?)),
        None => Ok(ValueSource::Stdin(StdinSource::new()?)),
    }
}

//! Timestamped values and the stringification capability.
//!
//! The ingestion path never inspects values structurally; everything it needs
//! is the [`DisplayText`] capability, which any `Display` type provides.

use chrono::{DateTime, Utc};
use std::fmt;

/// Capability for converting an arbitrary value into raw display text.
///
/// This is the only interface the ingestion pipeline requires of upstream
/// values. The blanket implementation covers every `Display` type, which is
/// the default fallback for opaque/unknown types.
///
/// A failing `Display` implementation (a panic during formatting) is a defect
/// in the value itself and deliberately propagates out of the ingestion path
/// rather than being caught here.
pub trait DisplayText {
    /// Produce the raw text representation of this value.
    ///
    /// The result is fed to the active sanitize policy before display; it may
    /// contain control characters and line breaks.
    fn display_text(&self) -> String;
}

impl<T: fmt::Display + ?Sized> DisplayText for T {
    fn display_text(&self) -> String {
        self.to_string()
    }
}

/// Stringify an optional value, mapping absence to the empty string.
///
/// A missing value is never an error; it simply displays as an empty line.
pub fn display_text_or_empty<T: DisplayText + ?Sized>(value: Option<&T>) -> String {
    value.map_or_else(String::new, DisplayText::display_text)
}

/// An opaque value paired with its arrival timestamp.
///
/// The core borrows these for the duration of normalization and never takes
/// ownership of the inner value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampedValue<T> {
    value: T,
    timestamp: DateTime<Utc>,
}

impl<T> TimestampedValue<T> {
    /// Wrap a value with the current arrival time.
    pub fn new(value: T) -> Self {
        Self {
            value,
            timestamp: Utc::now(),
        }
    }

    /// Wrap a value with an explicit arrival time.
    pub fn with_timestamp(value: T, timestamp: DateTime<Utc>) -> Self {
        Self { value, timestamp }
    }

    /// The wrapped value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Arrival time of the value.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl<T: DisplayText> TimestampedValue<T> {
    /// Raw display text of the wrapped value.
    pub fn display_text(&self) -> String {
        self.value.display_text()
    }
}

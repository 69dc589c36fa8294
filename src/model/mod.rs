//! Domain model types (pure).
//!
//! Timestamped values, the stringification capability, and the error
//! taxonomy. Nothing in here touches I/O or the terminal.

pub mod error;
pub mod value;

pub use error::{AppError, SourceError};
pub use value::{display_text_or_empty, DisplayText, TimestampedValue};

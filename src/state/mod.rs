//! Display state: the rolling window, its thread-safe owner, and the
//! ingestion scheduler.

pub mod scheduler;
pub mod shared;
pub mod window;

pub use scheduler::IngestionScheduler;
pub use shared::SharedDisplay;
pub use window::{RollingWindow, LINE_SEPARATOR};

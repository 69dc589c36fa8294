//! textvis: terminal visualizer for high-frequency value streams.
//!
//! A real-time display adapter between an arbitrarily-typed value stream
//! and a slow, fixed-capacity text viewport. Arriving values are
//! stringified, sanitized to single display lines, absorbed into a bounded
//! rolling window whose capacity tracks the live viewport geometry, and
//! rendered from immutable snapshots at a fixed ~30 Hz cadence.
//!
//! The pipeline, leaf first: [`sanitize`] turns raw text into single-line
//! display text, [`state::RollingWindow`] owns the bounded buffer and its
//! eviction policy, [`state::SharedDisplay`] publishes immutable snapshots
//! across threads, [`state::IngestionScheduler`] routes both delivery modes
//! (batched-periodic and single-immediate) through the pipeline, and
//! [`view`] renders snapshots and feeds viewport geometry back into the
//! window capacity.

pub mod config;
pub mod logging;
pub mod model;
pub mod sanitize;
pub mod source;
pub mod state;
pub mod view;

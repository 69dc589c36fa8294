//! Ingestion scheduler routing both delivery modes into the window.
//!
//! Two entry points converge on the same sanitize → window → snapshot
//! pipeline: [`batch_push`](IngestionScheduler::batch_push) runs once per
//! fixed ~33 ms tick with everything accumulated since the previous tick,
//! and [`single_push`](IngestionScheduler::single_push) bypasses batching
//! for immediate mode. Both are cooperative: the host guarantees they are
//! never invoked concurrently with themselves or each other. Clearing and
//! capacity resizes may interleave from other scheduling contexts; the
//! shared display's critical section makes that safe.

use crate::model::{DisplayText, TimestampedValue};
use crate::sanitize::SanitizePolicy;
use crate::state::SharedDisplay;
use std::sync::Arc;
use tracing::debug;

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;

/// Routes arriving values through the active sanitize policy into the
/// shared rolling window, publishing one snapshot per ingestion cycle.
pub struct IngestionScheduler {
    display: Arc<SharedDisplay>,
    policy: Box<dyn SanitizePolicy + Send + Sync>,
}

impl std::fmt::Debug for IngestionScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestionScheduler")
            .field("policy", &self.policy.name())
            .finish_non_exhaustive()
    }
}

impl IngestionScheduler {
    /// Create a scheduler feeding the given display through the given
    /// sanitize policy.
    pub fn new(display: Arc<SharedDisplay>, policy: Box<dyn SanitizePolicy + Send + Sync>) -> Self {
        Self { display, policy }
    }

    /// The shared display this scheduler feeds.
    pub fn display(&self) -> &Arc<SharedDisplay> {
        &self.display
    }

    /// Name of the active sanitize policy.
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Ingest one tick's worth of values, in arrival order.
    ///
    /// Only the trailing `min(values.len(), capacity)` values can remain
    /// visible after eviction, so the earlier values are neither stringified
    /// nor sanitized; skipping them matches the steady-state eviction
    /// outcome exactly. Publishes one snapshot and signals redraw.
    ///
    /// An empty batch is a complete no-op: no snapshot republish, no redraw.
    pub fn batch_push<T: DisplayText>(&self, values: &[TimestampedValue<T>]) {
        if values.is_empty() {
            return;
        }

        self.display.mutate_and_publish(|window| {
            let skipped = values.len().saturating_sub(window.capacity());
            if skipped > 0 {
                debug!(skipped, batch = values.len(), "discarding batch prefix");
            }
            for value in &values[skipped..] {
                window.push(self.policy.sanitize(&value.display_text()));
            }
        });
    }

    /// Ingest exactly one value, publishing a snapshot and signalling
    /// redraw synchronously. The immediate/live delivery mode.
    pub fn single_push<T: DisplayText>(&self, value: &TimestampedValue<T>) {
        let entry = self.policy.sanitize(&value.display_text());
        self.display.mutate_and_publish(|window| window.push(entry));
    }

    /// Reset the window and publish an empty snapshot.
    ///
    /// Runs under the same critical section as pushes, so interleaving with
    /// a concurrent ingestion cycle can never leave the window partially
    /// cleared or resurrect pre-clear entries.
    pub fn clear(&self) {
        debug!("clearing display window");
        self.display.mutate_and_publish(|window| window.clear());
    }
}

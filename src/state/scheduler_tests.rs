//! Unit tests for the ingestion scheduler.

use super::*;
use crate::sanitize::{PolicyKind, SpaceCollapse};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Wraps a policy and counts sanitize calls, for verifying that discarded
/// batch prefixes never reach the sanitizer.
struct CountingPolicy {
    inner: SpaceCollapse,
    calls: Arc<AtomicUsize>,
}

impl SanitizePolicy for CountingPolicy {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn sanitize_into(&self, raw: &str, out: &mut String) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.sanitize_into(raw, out);
    }
}

fn counting_scheduler(capacity: usize) -> (IngestionScheduler, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let display = Arc::new(SharedDisplay::new());
    display.resize(capacity);
    let policy = Box::new(CountingPolicy {
        inner: SpaceCollapse,
        calls: Arc::clone(&calls),
    });
    (IngestionScheduler::new(display, policy), calls)
}

fn default_scheduler(capacity: usize) -> IngestionScheduler {
    let display = Arc::new(SharedDisplay::new());
    display.resize(capacity);
    IngestionScheduler::new(display, PolicyKind::SpaceCollapse.build())
}

fn batch(values: &[&str]) -> Vec<TimestampedValue<String>> {
    values
        .iter()
        .map(|s| TimestampedValue::new((*s).to_string()))
        .collect()
}

// ===== batch_push =====

#[test]
fn batch_push_retains_trailing_subset_in_order() {
    let scheduler = default_scheduler(3);
    scheduler.batch_push(&batch(&["a", "b", "c", "d"]));
    assert_eq!(&*scheduler.display().snapshot(), "b\nc\nd");
}

#[test]
fn batch_push_smaller_than_capacity_keeps_everything() {
    let scheduler = default_scheduler(10);
    scheduler.batch_push(&batch(&["a", "b"]));
    assert_eq!(&*scheduler.display().snapshot(), "a\nb");
}

#[test]
fn batch_push_discarded_prefix_never_reaches_sanitizer() {
    let (scheduler, calls) = counting_scheduler(3);
    scheduler.batch_push(&batch(&["a", "b", "c", "d", "e", "f"]));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(&*scheduler.display().snapshot(), "d\ne\nf");
}

#[test]
fn batch_push_with_zero_capacity_sanitizes_nothing() {
    let (scheduler, calls) = counting_scheduler(0);
    scheduler.batch_push(&batch(&["a", "b"]));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(scheduler.display().is_empty());
}

#[test]
fn empty_batch_is_a_complete_noop() {
    let scheduler = default_scheduler(3);
    scheduler.batch_push(&batch(&["a"]));
    let _ = scheduler.display().take_redraw();

    scheduler.batch_push(&batch(&[]));
    assert!(
        !scheduler.display().take_redraw(),
        "empty batch must not signal redraw"
    );
    assert_eq!(&*scheduler.display().snapshot(), "a");
}

#[test]
fn batch_push_signals_redraw() {
    let scheduler = default_scheduler(3);
    scheduler.batch_push(&batch(&["a"]));
    assert!(scheduler.display().take_redraw());
}

#[test]
fn batch_push_sanitizes_entries() {
    let scheduler = default_scheduler(5);
    scheduler.batch_push(&batch(&["line1\nline2", "x\r\ny"]));
    assert_eq!(&*scheduler.display().snapshot(), "line1 line2\nx y");
}

#[test]
fn successive_batches_evict_across_tick_boundaries() {
    let scheduler = default_scheduler(3);
    scheduler.batch_push(&batch(&["a", "b"]));
    scheduler.batch_push(&batch(&["c", "d"]));
    assert_eq!(&*scheduler.display().snapshot(), "b\nc\nd");
}

// ===== single_push =====

#[test]
fn single_push_appends_one_sanitized_entry() {
    let scheduler = default_scheduler(3);
    scheduler.single_push(&TimestampedValue::new("a\tb\x01c".to_string()));
    assert_eq!(&*scheduler.display().snapshot(), "a\tb\u{FFFD}c");
    assert!(scheduler.display().take_redraw());
}

#[test]
fn single_push_evicts_when_full() {
    let scheduler = default_scheduler(2);
    for s in ["a", "b", "c"] {
        scheduler.single_push(&TimestampedValue::new(s.to_string()));
    }
    assert_eq!(&*scheduler.display().snapshot(), "b\nc");
}

#[test]
fn single_push_after_capacity_shrink_settles_window() {
    let scheduler = default_scheduler(5);
    scheduler.batch_push(&batch(&["a", "b", "c", "d", "e"]));
    scheduler.display().resize(2);
    assert_eq!(scheduler.display().len(), 5, "lazy trim: no eager eviction");

    scheduler.single_push(&TimestampedValue::new("f".to_string()));
    assert_eq!(scheduler.display().len(), 2);
    assert_eq!(&*scheduler.display().snapshot(), "e\nf");
}

#[test]
fn single_push_accepts_non_string_values() {
    let scheduler = default_scheduler(3);
    scheduler.single_push(&TimestampedValue::new(12345u64));
    scheduler.single_push(&TimestampedValue::new(serde_json::json!({"k": [1, 2]})));
    assert_eq!(&*scheduler.display().snapshot(), "12345\n{\"k\":[1,2]}");
}

// ===== clear =====

#[test]
fn clear_publishes_empty_snapshot() {
    let scheduler = default_scheduler(3);
    scheduler.batch_push(&batch(&["a", "b"]));
    scheduler.clear();
    assert_eq!(&*scheduler.display().snapshot(), "");
    assert!(scheduler.display().is_empty());
}

#[test]
fn clear_between_batches_never_resurrects_old_entries() {
    let scheduler = default_scheduler(5);
    scheduler.batch_push(&batch(&["old1", "old2"]));
    scheduler.clear();
    scheduler.batch_push(&batch(&["new1"]));

    let snapshot = scheduler.display().snapshot();
    assert_eq!(&*snapshot, "new1");
    assert!(!snapshot.contains("old"));
}

#[test]
fn snapshot_stays_empty_after_clear_until_next_push() {
    let scheduler = default_scheduler(3);
    scheduler.batch_push(&batch(&["a"]));
    scheduler.clear();
    for _ in 0..3 {
        assert_eq!(&*scheduler.display().snapshot(), "");
    }
    scheduler.single_push(&TimestampedValue::new("b".to_string()));
    assert_eq!(&*scheduler.display().snapshot(), "b");
}

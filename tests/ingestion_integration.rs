//! End-to-end tests of the ingestion pipeline through the public API:
//! source → sanitize → rolling window → published snapshot.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use textvis::model::TimestampedValue;
use textvis::sanitize::{PolicyKind, SanitizePolicy, SpaceCollapse};
use textvis::source::{detect_source, ValueMode};
use textvis::state::{IngestionScheduler, SharedDisplay};

fn scheduler_with_capacity(capacity: usize) -> IngestionScheduler {
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

// ===== Source to snapshot =====

#[test]
fn file_source_flows_through_to_snapshot() {
    let path = std::env::temp_dir().join("textvis_it_pipeline.txt");
    std::fs::write(&path, "alpha\nbeta\ngamma\ndelta\n").unwrap();

    let mut source = detect_source(Some(path.clone())).unwrap();
    let _ = std::fs::remove_file(&path);

    let scheduler = scheduler_with_capacity(3);
    let values = source.poll(ValueMode::Text).unwrap();
    scheduler.batch_push(&values);

    // Capacity 3: only the trailing three lines survive.
    assert_eq!(&*scheduler.display().snapshot(), "beta\ngamma\ndelta");
}

#[test]
fn multiline_payloads_stay_on_one_display_line() {
    let scheduler = scheduler_with_capacity(5);
    let json_ish = "{\n  \"key\": \"value\"\n}";
    scheduler.single_push(&TimestampedValue::new(json_ish.to_string()));

    let snapshot = scheduler.display().snapshot();
    assert_eq!(&*snapshot, "{   \"key\": \"value\" }");
    assert_eq!(snapshot.lines().count(), 1);
}

// ===== Delivery mode reconciliation =====

#[test]
fn batched_and_immediate_modes_converge_on_the_same_window_state() {
    let batched = scheduler_with_capacity(3);
    batched.batch_push(&batch(&["a", "b", "c", "d"]));

    let immediate = scheduler_with_capacity(3);
    for value in batch(&["a", "b", "c", "d"]) {
        immediate.single_push(&value);
    }

    // Same trailing window, whichever path delivered it.
    assert_eq!(
        &*batched.display().snapshot(),
        &*immediate.display().snapshot()
    );
    assert_eq!(&*batched.display().snapshot(), "b\nc\nd");
}

#[test]
fn interleaved_modes_preserve_arrival_order() {
    let scheduler = scheduler_with_capacity(10);
    scheduler.batch_push(&batch(&["tick1-a", "tick1-b"]));
    scheduler.single_push(&TimestampedValue::new("live".to_string()));
    scheduler.batch_push(&batch(&["tick2-a"]));

    assert_eq!(
        &*scheduler.display().snapshot(),
        "tick1-a\ntick1-b\nlive\ntick2-a"
    );
}

// ===== Sanitizer economy =====

struct CountingPolicy {
    calls: Arc<AtomicUsize>,
}

impl SanitizePolicy for CountingPolicy {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn sanitize_into(&self, raw: &str, out: &mut String) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        SpaceCollapse.sanitize_into(raw, out);
    }
}

#[test]
fn sanitizer_runs_only_for_values_that_can_remain_visible() {
    let calls = Arc::new(AtomicUsize::new(0));
    let display = Arc::new(SharedDisplay::new());
    display.resize(2);
    let scheduler = IngestionScheduler::new(
        display,
        Box::new(CountingPolicy {
            calls: Arc::clone(&calls),
        }),
    );

    // Three ticks of five values each against capacity 2.
    for tick in 0..3 {
        let values: Vec<_> = (0..5)
            .map(|i| TimestampedValue::new(format!("t{tick}-v{i}")))
            .collect();
        scheduler.batch_push(&values);
    }

    assert_eq!(
        calls.load(Ordering::SeqCst),
        6,
        "2 sanitize calls per tick, never 5"
    );
    assert_eq!(&*scheduler.display().snapshot(), "t2-v3\nt2-v4");
}

// ===== Clear vs. ingestion =====

#[test]
fn clear_racing_ingestion_never_leaves_partial_state() {
    let display = Arc::new(SharedDisplay::new());
    display.resize(6);
    let scheduler = Arc::new(IngestionScheduler::new(
        Arc::clone(&display),
        PolicyKind::SpaceCollapse.build(),
    ));
    let stop = Arc::new(AtomicBool::new(false));

    // Single ingestion thread (the cooperative contract) pushing batches.
    let ingester = {
        let scheduler = Arc::clone(&scheduler);
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            let mut i = 0u32;
            while !stop.load(Ordering::Relaxed) {
                let values: Vec<_> = (0..3)
                    .map(|j| TimestampedValue::new(format!("b{i}-{j}")))
                    .collect();
                scheduler.batch_push(&values);
                i += 1;
            }
        })
    };

    // Concurrent user-gesture clears from this thread.
    for _ in 0..50 {
        scheduler.clear();
        // Every observable snapshot is a fully-formed join of whole entries.
        let snapshot = scheduler.display().snapshot();
        for line in snapshot.lines() {
            assert!(
                line.starts_with('b') && line.contains('-'),
                "partial entry leaked into snapshot: {line:?}"
            );
        }
    }

    stop.store(true, Ordering::Relaxed);
    ingester.join().expect("ingestion thread");

    // Settled: published snapshot matches the window exactly.
    let joined = display.with_window(|w| w.snapshot());
    assert_eq!(&*display.snapshot(), joined.as_str());
}

#[test]
fn clear_effects_are_final_for_prior_entries() {
    let scheduler = scheduler_with_capacity(5);
    scheduler.batch_push(&batch(&["pre-1", "pre-2", "pre-3"]));
    scheduler.clear();

    // Once the clear is visible to the ingestion path, no later cycle can
    // republish pre-clear entries.
    scheduler.batch_push(&batch(&["post-1"]));
    scheduler.single_push(&TimestampedValue::new("post-2".to_string()));

    let snapshot = scheduler.display().snapshot();
    assert!(!snapshot.contains("pre-"));
    assert_eq!(&*snapshot, "post-1\npost-2");
}

// ===== Capacity lifecycle =====

#[test]
fn values_before_first_geometry_estimate_are_discarded() {
    // Load starts at capacity zero; nothing is retained until the first
    // geometry-driven resize.
    let display = Arc::new(SharedDisplay::new());
    let scheduler = IngestionScheduler::new(Arc::clone(&display), PolicyKind::SpaceCollapse.build());

    scheduler.batch_push(&batch(&["too", "early"]));
    assert_eq!(&*display.snapshot(), "");

    display.resize(4);
    scheduler.batch_push(&batch(&["on", "time"]));
    assert_eq!(&*display.snapshot(), "on\ntime");
}

#[test]
fn capacity_shrink_trims_lazily_then_settles() {
    let scheduler = scheduler_with_capacity(5);
    scheduler.batch_push(&batch(&["e0", "e1", "e2", "e3", "e4"]));

    scheduler.display().resize(2);
    assert_eq!(scheduler.display().len(), 5, "no eager trim on shrink");

    scheduler.single_push(&TimestampedValue::new("e5".to_string()));
    assert_eq!(scheduler.display().len(), 2);
    assert_eq!(&*scheduler.display().snapshot(), "e4\ne5");
}

//! Shared display state bridging the ingestion and render threads.
//!
//! The window is mutated from the ingestion path (push), the render thread
//! (capacity resize) and user input (clear), so all window access goes
//! through one critical section. The rendered snapshot crosses to the render
//! thread through a separately locked slot holding an `Arc<str>` that is
//! only ever replaced wholesale, never mutated in place: a reader always
//! observes either the prior fully-formed snapshot or the new one.
//!
//! Lock order: `window` before `published`. The published slot is never
//! locked while waiting for the window lock.

use super::window::RollingWindow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

#[cfg(test)]
#[path = "shared_tests.rs"]
mod tests;

/// Thread-safe owner of the rolling window and its published snapshot.
#[derive(Debug)]
pub struct SharedDisplay {
    window: Mutex<RollingWindow>,
    published: Mutex<Arc<str>>,
    redraw: AtomicBool,
}

impl Default for SharedDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedDisplay {
    /// Create an empty display with a zero-capacity window and an empty
    /// published snapshot.
    pub fn new() -> Self {
        Self {
            window: Mutex::new(RollingWindow::new()),
            published: Mutex::new(Arc::from("")),
            redraw: AtomicBool::new(false),
        }
    }

    /// Run `f` against the window as a single critical section.
    ///
    /// Push, resize and clear must all happen under this lock since they are
    /// invoked from different scheduling contexts.
    pub fn with_window<R>(&self, f: impl FnOnce(&mut RollingWindow) -> R) -> R {
        f(&mut self.lock_window())
    }

    /// Mutate the window and publish a fresh snapshot of the result as one
    /// atomic step, then raise the redraw signal.
    ///
    /// The snapshot string is fully constructed before the published slot is
    /// touched, and the window lock is held across the publication so a
    /// concurrent `clear` cannot interleave between mutation and publish.
    pub fn mutate_and_publish<R>(&self, f: impl FnOnce(&mut RollingWindow) -> R) -> R {
        let mut window = self.lock_window();
        let result = f(&mut window);
        let snapshot: Arc<str> = Arc::from(window.snapshot().as_str());
        *self.lock_published() = snapshot;
        self.redraw.store(true, Ordering::Release);
        result
    }

    /// Latest published snapshot.
    ///
    /// Cheap: clones the `Arc`, not the text. The returned snapshot is
    /// immutable and self-consistent even if a newer one is published
    /// immediately after.
    pub fn snapshot(&self) -> Arc<str> {
        Arc::clone(&self.lock_published())
    }

    /// Set the window's target capacity (lazy trim; see
    /// [`RollingWindow::resize`]).
    ///
    /// Called from the render thread after each geometry estimate. Does not
    /// republish: the visible text only changes on the next push.
    pub fn resize(&self, capacity: usize) {
        self.lock_window().resize(capacity);
    }

    /// Current window capacity.
    pub fn capacity(&self) -> usize {
        self.lock_window().capacity()
    }

    /// Current window entry count.
    pub fn len(&self) -> usize {
        self.lock_window().len()
    }

    /// True when the window holds no entries.
    pub fn is_empty(&self) -> bool {
        self.lock_window().is_empty()
    }

    /// Consume the redraw signal, returning whether it was raised since the
    /// last call.
    pub fn take_redraw(&self) -> bool {
        self.redraw.swap(false, Ordering::AcqRel)
    }

    /// Teardown: empty the window, reset capacity to zero and publish an
    /// empty snapshot. No state survives into a subsequent load.
    pub fn unload(&self) {
        self.mutate_and_publish(|w| {
            w.clear();
            w.resize(0);
        });
    }

    fn lock_window(&self) -> MutexGuard<'_, RollingWindow> {
        self.window.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_published(&self) -> MutexGuard<'_, Arc<str>> {
        self.published.lock().unwrap_or_else(|e| e.into_inner())
    }
}

//! Bounded rolling window of sanitized display lines.

use std::collections::VecDeque;

#[cfg(test)]
#[path = "window_tests.rs"]
mod tests;

/// Separator used when joining window entries into a snapshot.
pub const LINE_SEPARATOR: &str = "\n";

/// A bounded FIFO of sanitized single-line entries.
///
/// Insertion order equals arrival order. The capacity is mutable and derived
/// externally from viewport geometry; it starts at zero because no geometry
/// estimate exists before the first draw.
///
/// # Lazy trimming
///
/// [`resize`](Self::resize) never trims eagerly. After a capacity shrink the
/// window may transiently hold more entries than the current capacity; the
/// surplus is evicted on the next [`push`](Self::push). This keeps eviction
/// work on the ingestion path only. The size invariant `len <= capacity` is
/// therefore eventual: it holds after any push completes.
#[derive(Debug, Clone, Default)]
pub struct RollingWindow {
    /// Oldest entry at the front, newest at the back.
    entries: VecDeque<String>,
    capacity: usize,
}

impl RollingWindow {
    /// Create an empty window with zero capacity.
    ///
    /// All pushes evict immediately until the first geometry-driven
    /// [`resize`](Self::resize).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty window with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an entry, evicting the oldest entries first while the window
    /// is at or above capacity.
    ///
    /// A loop rather than a single eviction because the capacity may have
    /// shrunk since the last push. With zero capacity the window stays
    /// empty: evicting from an empty window is a no-op, and the entry is
    /// discarded rather than appended.
    pub fn push(&mut self, entry: String) {
        while self.entries.len() >= self.capacity {
            if self.entries.pop_front().is_none() {
                // Capacity is zero: nothing can ever be retained.
                return;
            }
        }
        self.entries.push_back(entry);
    }

    /// Set the target capacity without trimming existing entries.
    ///
    /// Surplus entries after a shrink are evicted lazily by the next push.
    pub fn resize(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    /// Drop all entries. Independent of capacity.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in arrival order joined by the line separator.
    ///
    /// O(len); does not mutate the window.
    pub fn snapshot(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            if !out.is_empty() {
                out.push_str(LINE_SEPARATOR);
            }
            out.push_str(entry);
        }
        out
    }

    /// Current number of entries.
    ///
    /// May transiently exceed [`capacity`](Self::capacity) between a
    /// capacity shrink and the next push.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the window holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current target capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate over entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

//! Tab Selection
//!
//! Generic single-active-of-N state, used by both the variation tabs and
//! the platform tabs. Exactly one item is active at a time (none when the
//! collection is empty); selecting out of range is a silent no-op, and
//! replacing the collection resets the selection to the first item.

use serde::{Deserialize, Serialize};

/// Single-select-of-N exclusivity state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabSelection {
    active: usize,
    len: usize,
}

impl TabSelection {
    /// Create a selection over `len` items, with the first item active
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self { active: 0, len }
    }

    /// Index of the active item, or `None` for an empty collection
    #[must_use]
    pub fn active(&self) -> Option<usize> {
        (self.len > 0).then_some(self.active)
    }

    /// Number of items under selection
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the collection is empty (no tab ever active)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Activate the item at `idx`
    ///
    /// Out-of-range indices are ignored. Returns `true` when the active
    /// index actually changed.
    pub fn select(&mut self, idx: usize) -> bool {
        if idx >= self.len || idx == self.active {
            return false;
        }
        self.active = idx;
        true
    }

    /// Replace the owning collection: new length, selection back to 0
    pub fn replace(&mut self, len: usize) {
        self.active = 0;
        self.len = len;
    }

    /// One-hot visibility projection: `flags[i]` is `true` only for the
    /// active item. O(N), which is fine for the handful of tabs we render.
    #[must_use]
    pub fn visibility_flags(&self) -> Vec<bool> {
        (0..self.len).map(|i| Some(i) == self.active()).collect()
    }
}

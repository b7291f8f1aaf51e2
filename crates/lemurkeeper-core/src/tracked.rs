//! Revision-tracked value cells.
//!
//! Each cell carries a revision so derived computations can tell whether an
//! input changed since they last ran. Revisions come from one process-wide
//! counter, so no two cells (or two states of one cell) ever share one.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

fn next_revision() -> u64 {
    NEXT_REVISION.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone)]
pub struct Tracked<T> {
    value: T,
    revision: u64,
}

impl<T> Tracked<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            revision: next_revision(),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Substitute the value and take a fresh revision unconditionally.
    pub fn replace(&mut self, value: T) {
        self.value = value;
        self.revision = next_revision();
    }
}

impl<T: PartialEq> Tracked<T> {
    /// Substitute the value, taking a fresh revision only if it differs.
    ///
    /// Returns whether the value changed.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.replace(value);
        true
    }
}

impl<T: Default> Default for Tracked<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

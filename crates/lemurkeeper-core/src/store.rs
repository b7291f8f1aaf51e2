//! Record store: the full, unfiltered lemur collection for the session.

use tracing::debug;

use crate::lemur::Lemur;
use crate::tracked::Tracked;

/// Holds the current collection in fetch-response order.
///
/// The collection is only ever replaced wholesale; there is no
/// element-wise mutation.
#[derive(Debug, Default)]
pub struct RecordStore {
    lemurs: Tracked<Vec<Lemur>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lemurs(&self) -> &[Lemur] {
        self.lemurs.get()
    }

    pub fn len(&self) -> usize {
        self.lemurs.get().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemurs.get().is_empty()
    }

    /// Revision of the collection; fresh on every [`replace`](Self::replace)
    /// and unique across stores.
    pub fn revision(&self) -> u64 {
        self.lemurs.revision()
    }

    /// Atomically substitute the entire collection.
    ///
    /// A re-fetch of identical content still counts as a new collection.
    pub fn replace(&mut self, lemurs: Vec<Lemur>) {
        debug!(count = lemurs.len(), "replacing lemur collection");
        self.lemurs.replace(lemurs);
    }
}

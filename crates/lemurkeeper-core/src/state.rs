//! Session state: the record store, the filter criteria, and the derived
//! view, owned together and passed explicitly to whoever renders them.

use tracing::warn;

use crate::criteria::FilterCriteria;
use crate::lemur::{Lemur, malformed};
use crate::pipeline::{Pipeline, PipelineStats};
use crate::store::RecordStore;

#[derive(Debug, Default)]
pub struct AppState {
    store: RecordStore,
    criteria: FilterCriteria,
    pipeline: Pipeline,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Install a freshly fetched collection, replacing the previous one.
    ///
    /// Filter criteria are left untouched. Records missing fields the filter
    /// reads are kept and reported; returns how many there were.
    pub fn replace_lemurs(&mut self, lemurs: Vec<Lemur>) -> usize {
        let bad = malformed(&lemurs);
        for err in &bad {
            warn!(id = %err.id, field = err.field, "malformed lemur record");
        }
        self.store.replace(lemurs);
        bad.len()
    }

    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        self.criteria.set_query(query)
    }

    pub fn set_category(&mut self, category: impl Into<String>) -> bool {
        self.criteria.set_category(category)
    }

    /// The filtered view, recomputed only for inputs that changed.
    pub fn visible(&mut self) -> Vec<&Lemur> {
        let lemurs = self.store.lemurs();
        self.pipeline
            .run(&self.store, &self.criteria)
            .iter()
            .map(|&i| &lemurs[i])
            .collect()
    }

    pub fn pipeline_stats(&self) -> PipelineStats {
        self.pipeline.stats()
    }
}

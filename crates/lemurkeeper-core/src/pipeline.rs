//! Derived filter pipeline.
//!
//! Two strictly ordered stages over the record store:
//!
//! 1. **Name**: case-insensitive, unanchored substring match of the query
//!    against `name`. An empty query passes everything.
//! 2. **Category**: exact, case-sensitive match of `sex` against the chosen
//!    category. The [`CATEGORY_ALL`] sentinel passes everything.
//!
//! Stages work on indices into the store so results are always an
//! order-preserving subsequence of the collection.
//!
//! A record missing `name` fails every non-empty query, and one missing
//! `sex` fails every category except the sentinel.

use crate::criteria::{CATEGORY_ALL, FilterCriteria};
use crate::lemur::Lemur;
use crate::store::RecordStore;

/// Stage 1: indices of lemurs whose name contains `query`, ignoring case.
pub fn filter_by_name(lemurs: &[Lemur], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..lemurs.len()).collect();
    }
    let needle = query.to_lowercase();
    lemurs
        .iter()
        .enumerate()
        .filter(|(_, l)| {
            l.name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .map(|(i, _)| i)
        .collect()
}

/// Stage 2: the subset of `candidates` whose `sex` equals `category` exactly.
pub fn filter_by_category(lemurs: &[Lemur], candidates: &[usize], category: &str) -> Vec<usize> {
    if category == CATEGORY_ALL {
        return candidates.to_vec();
    }
    candidates
        .iter()
        .copied()
        .filter(|&i| lemurs[i].sex.as_deref() == Some(category))
        .collect()
}

/// Run both stages without memoisation.
pub fn filter_lemurs<'a>(lemurs: &'a [Lemur], query: &str, category: &str) -> Vec<&'a Lemur> {
    let by_name = filter_by_name(lemurs, query);
    filter_by_category(lemurs, &by_name, category)
        .into_iter()
        .map(|i| &lemurs[i])
        .collect()
}

/// How many times each stage actually ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub name_runs: u64,
    pub category_runs: u64,
}

#[derive(Debug)]
struct Memo<K> {
    key: K,
    indices: Vec<usize>,
}

/// Memoising pipeline keyed on input revisions.
///
/// Revisions are unique per cell, so one pipeline may be run against
/// different stores or criteria without serving another input's result.
///
/// Stage 1 reruns only when the store or the query changed; stage 2 reruns
/// only when stage 1 did or the category changed.
#[derive(Debug, Default)]
pub struct Pipeline {
    by_name: Option<Memo<(u64, u64)>>,
    by_category: Option<Memo<(u64, u64, u64)>>,
    stats: PipelineStats,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    /// Indices into `store.lemurs()` that pass both stages.
    pub fn run(&mut self, store: &RecordStore, criteria: &FilterCriteria) -> &[usize] {
        let name_key = (store.revision(), criteria.query_revision());
        if self.by_name.as_ref().is_none_or(|m| m.key != name_key) {
            self.by_name = Some(Memo {
                key: name_key,
                indices: filter_by_name(store.lemurs(), criteria.query()),
            });
            self.stats.name_runs += 1;
        }

        let category_key = (name_key.0, name_key.1, criteria.category_revision());
        if self.by_category.as_ref().is_none_or(|m| m.key != category_key) {
            let candidates = self.by_name.as_ref().map_or(&[][..], |m| m.indices.as_slice());
            let indices = filter_by_category(store.lemurs(), candidates, criteria.category());
            self.by_category = Some(Memo {
                key: category_key,
                indices,
            });
            self.stats.category_runs += 1;
        }

        self.by_category
            .as_ref()
            .map_or(&[][..], |m| m.indices.as_slice())
    }
}

//! # Views
//!
//! The consumers of the shared filter state. Each view is mounted with a handle
//! to the session's [`FilterStore`], receives its own dataset snapshot (see
//! [`crate::loader`]) and derives its filtered result on demand.
//!
//! - [`catalog::CatalogView`]: the browsing list with a raw cursor.
//! - [`detail::DetailView`]: a single item, tracked by identity.
//!
//! Views are plain single-threaded state; mount them as `Rc<RefCell<_>>` so a
//! pending load can hold a `Weak` handle, and unmount them by dropping.

use crate::filters::FilterStore;
use crate::model::Dataset;
use crate::projector::{project, FilteredResult};

pub mod catalog;
pub mod detail;

/// Memoized projection, keyed on the dataset snapshot and the filter revision.
#[derive(Debug)]
pub(crate) struct ProjectionCache {
    key: Option<(Dataset, u64)>,
    result: FilteredResult,
}

impl Default for ProjectionCache {
    fn default() -> Self {
        Self {
            key: None,
            result: FilteredResult::empty(),
        }
    }
}

impl ProjectionCache {
    /// Re-projects if the dataset or criteria changed. Returns whether it did.
    pub(crate) fn refresh(&mut self, dataset: &Dataset, filters: &FilterStore) -> bool {
        let revision = filters.revision();
        let fresh = self
            .key
            .as_ref()
            .is_some_and(|(d, r)| d.same_snapshot(dataset) && *r == revision);
        if fresh {
            return false;
        }

        self.result = filters.read(|criteria| project(dataset, criteria));
        self.key = Some((dataset.clone(), revision));
        tracing::debug!(
            revision,
            total = dataset.len(),
            shown = self.result.len(),
            "filtered result recomputed"
        );
        true
    }

    pub(crate) fn result(&self) -> &FilteredResult {
        &self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures;

    #[test]
    fn test_recomputes_only_on_dataset_or_revision_change() {
        let filters = FilterStore::new();
        let dataset = Dataset::new(fixtures::museum_items());
        let mut cache = ProjectionCache::default();

        assert!(cache.refresh(&dataset, &filters));
        assert!(!cache.refresh(&dataset, &filters));

        filters.toggle_sculptor("Martos");
        assert!(cache.refresh(&dataset, &filters));
        assert_eq!(cache.result().len(), 2);

        let reloaded = Dataset::new(fixtures::museum_items());
        assert!(cache.refresh(&reloaded, &filters));
        assert!(!cache.refresh(&reloaded, &filters));
    }
}

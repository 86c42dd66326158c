use super::ProjectionCache;
use crate::filters::FilterStore;
use crate::loader::DatasetConsumer;
use crate::model::{CatalogItem, Dataset, ItemId};
use crate::navigation::NavigationSink;
use crate::position::Cursor;
use crate::projector::FilteredResult;

/// The catalog page: the filtered list plus the arrow cursor over it.
#[derive(Debug)]
pub struct CatalogView {
    filters: FilterStore,
    dataset: Dataset,
    loaded: bool,
    cache: ProjectionCache,
    cursor: Cursor,
}

impl CatalogView {
    pub fn new(filters: FilterStore) -> Self {
        Self {
            filters,
            dataset: Dataset::empty(),
            loaded: false,
            cache: ProjectionCache::default(),
            cursor: Cursor::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn filters(&self) -> &FilterStore {
        &self.filters
    }

    /// The list as it should be shown now.
    pub fn filtered(&mut self) -> &FilteredResult {
        self.refresh();
        self.cache.result()
    }

    pub fn cursor(&mut self) -> Option<usize> {
        self.refresh();
        self.cursor.selected()
    }

    pub fn current(&mut self) -> Option<&CatalogItem> {
        self.refresh();
        let index = self.cursor.selected()?;
        self.cache.result().get(index)
    }

    pub fn can_go_next(&mut self) -> bool {
        self.refresh();
        self.cursor.can_go_next(self.cache.result().len())
    }

    pub fn can_go_previous(&mut self) -> bool {
        self.refresh();
        self.cursor.can_go_previous()
    }

    pub fn next_item(&mut self) -> bool {
        self.refresh();
        self.cursor.next(self.cache.result().len())
    }

    pub fn previous_item(&mut self) -> bool {
        self.refresh();
        self.cursor.previous()
    }

    /// Opens the item under the cursor.
    pub fn open_current(&mut self, sink: &mut impl NavigationSink) -> Option<ItemId> {
        let id = self.current()?.id;
        sink.go_to(id);
        Some(id)
    }

    /// Opens a listed item by identity (a click on its card).
    pub fn open(&mut self, id: ItemId, sink: &mut impl NavigationSink) -> bool {
        self.refresh();
        if self.cache.result().index_of(id).is_none() {
            return false;
        }
        sink.go_to(id);
        true
    }

    fn refresh(&mut self) {
        if self.cache.refresh(&self.dataset, &self.filters) {
            self.cursor.reconcile(self.cache.result().len());
        }
    }
}

impl DatasetConsumer for CatalogView {
    fn receive(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        self.loaded = true;
    }
}

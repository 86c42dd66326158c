use super::ProjectionCache;
use crate::filters::FilterStore;
use crate::gallery::{text_pages, PhotoCarousel, TextPager};
use crate::loader::DatasetConsumer;
use crate::model::{CatalogItem, Dataset, ItemId};
use crate::navigation::{Adjacent, DetailBrowser, DetailState, NavigationSink};
use crate::position::{resolve, Position};

/// What the detail page can show for its current identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailLookup<'a> {
    Closed,
    Loading,
    NotFound(ItemId),
    Found(&'a CatalogItem),
}

/// The detail page: one item, tracked by identity, with prev/next over the
/// filtered catalog and its own text and photo paging.
#[derive(Debug)]
pub struct DetailView {
    filters: FilterStore,
    dataset: Dataset,
    loaded: bool,
    cache: ProjectionCache,
    browser: DetailBrowser,
    pager: TextPager,
    carousel: PhotoCarousel,
}

impl DetailView {
    pub fn new(filters: FilterStore) -> Self {
        Self {
            filters,
            dataset: Dataset::empty(),
            loaded: false,
            cache: ProjectionCache::default(),
            browser: DetailBrowser::new(),
            pager: TextPager::default(),
            carousel: PhotoCarousel::default(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn state(&self) -> DetailState {
        self.browser.state()
    }

    pub fn current_id(&self) -> Option<ItemId> {
        self.browser.current()
    }

    pub fn open(&mut self, id: ItemId) {
        if self.browser.current() != Some(id) {
            self.reset_paging();
        }
        self.browser.open(id);
    }

    pub fn close(&mut self) {
        self.browser.close();
        self.reset_paging();
    }

    /// The current item, looked up in the whole catalog: an item hidden by
    /// the filters can still be displayed, it just has no neighbours.
    pub fn item(&self) -> DetailLookup<'_> {
        let Some(id) = self.browser.current() else {
            return DetailLookup::Closed;
        };
        if !self.loaded {
            return DetailLookup::Loading;
        }
        match self.dataset.find(id) {
            Some(item) => DetailLookup::Found(item),
            None => DetailLookup::NotFound(id),
        }
    }

    /// Where the current item sits among the filtered items.
    pub fn position(&mut self) -> Position {
        self.cache.refresh(&self.dataset, &self.filters);
        resolve(self.cache.result(), self.browser.current())
    }

    /// Number of items in the current selection.
    pub fn shown(&mut self) -> usize {
        self.cache.refresh(&self.dataset, &self.filters);
        self.cache.result().len()
    }

    pub fn adjacent(&mut self) -> Adjacent<'_> {
        self.cache.refresh(&self.dataset, &self.filters);
        self.browser.adjacent(self.cache.result())
    }

    pub fn next(&mut self, sink: &mut impl NavigationSink) -> Option<ItemId> {
        self.cache.refresh(&self.dataset, &self.filters);
        let target = self.browser.next(self.cache.result(), sink)?;
        self.reset_paging();
        Some(target)
    }

    pub fn previous(&mut self, sink: &mut impl NavigationSink) -> Option<ItemId> {
        self.cache.refresh(&self.dataset, &self.filters);
        let target = self.browser.previous(self.cache.result(), sink)?;
        self.reset_paging();
        Some(target)
    }

    /// Current text page and its "i / n" counter.
    pub fn text_page(&self) -> Option<(&str, String)> {
        let DetailLookup::Found(item) = self.item() else {
            return None;
        };
        let pages = text_pages(item);
        let page = pages.get(self.pager.index()).copied().unwrap_or("");
        Some((page, self.pager.counter(pages.len())))
    }

    pub fn next_text(&mut self) -> bool {
        let pages = self.page_count();
        self.pager.next(pages)
    }

    pub fn previous_text(&mut self) -> bool {
        self.pager.previous()
    }

    /// Current photo reference and its "i / n" counter.
    pub fn photo(&self) -> Option<(&str, String)> {
        let DetailLookup::Found(item) = self.item() else {
            return None;
        };
        let photo = item.photos.get(self.carousel.index())?;
        Some((photo.as_str(), self.carousel.counter(item.photos.len())))
    }

    pub fn next_photo(&mut self) {
        let photos = self.photo_count();
        self.carousel.next(photos);
    }

    pub fn previous_photo(&mut self) {
        let photos = self.photo_count();
        self.carousel.previous(photos);
    }

    fn page_count(&self) -> usize {
        match self.item() {
            DetailLookup::Found(item) => text_pages(item).len(),
            _ => 0,
        }
    }

    fn photo_count(&self) -> usize {
        match self.item() {
            DetailLookup::Found(item) => item.photos.len(),
            _ => 0,
        }
    }

    fn reset_paging(&mut self) {
        self.pager.reset();
        self.carousel.reset();
    }
}

impl DatasetConsumer for DetailView {
    fn receive(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        self.loaded = true;
        self.reset_paging();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures;

    fn mounted(filters: &FilterStore, id: i64) -> DetailView {
        let mut view = DetailView::new(filters.clone());
        view.open(ItemId(id));
        view.receive(Dataset::new(fixtures::museum_items()));
        view
    }

    #[test]
    fn test_reports_loading_then_found() {
        let mut view = DetailView::new(FilterStore::new());
        assert_eq!(view.item(), DetailLookup::Closed);

        view.open(ItemId(2));
        assert_eq!(view.item(), DetailLookup::Loading);

        view.receive(Dataset::new(fixtures::museum_items()));
        assert!(matches!(view.item(), DetailLookup::Found(item) if item.id == ItemId(2)));
    }

    #[test]
    fn test_unknown_identity_is_not_found() {
        let view = mounted(&FilterStore::new(), 77);
        assert_eq!(view.item(), DetailLookup::NotFound(ItemId(77)));
        assert!(view.text_page().is_none());
    }

    #[test]
    fn test_neighbours_follow_the_shared_filters() {
        let filters = FilterStore::new();
        let mut view = mounted(&filters, 5);
        assert_eq!(view.adjacent().previous_id(), Some(ItemId(4)));

        filters.toggle_sculptor("Martos");
        assert_eq!(view.shown(), 2);
        assert_eq!(view.position(), Position::Found(1));
        assert_eq!(view.adjacent().previous_id(), Some(ItemId(2)));
        assert_eq!(view.adjacent().next_id(), None);
    }

    #[test]
    fn test_filtered_out_item_is_shown_without_neighbours() {
        let filters = FilterStore::new();
        let mut view = mounted(&filters, 3);
        filters.toggle_sculptor("Martos");

        assert!(matches!(view.item(), DetailLookup::Found(_)));
        assert_eq!(view.position().sentinel(), -1);

        let mut sink = |_: ItemId| panic!("no navigation expected");
        assert_eq!(view.next(&mut sink), None);
        assert_eq!(view.previous(&mut sink), None);
    }

    #[test]
    fn test_navigation_moves_identity_and_resets_paging() {
        let filters = FilterStore::new();
        let mut view = mounted(&filters, 1);
        assert!(view.next_text());
        view.next_photo();
        assert_eq!(view.text_page().map(|(_, c)| c), Some("2 / 2".to_string()));

        let mut visited = Vec::new();
        let mut sink = |id: ItemId| visited.push(id);
        assert_eq!(view.next(&mut sink), Some(ItemId(2)));
        assert_eq!(view.current_id(), Some(ItemId(2)));
        assert_eq!(view.text_page().map(|(_, c)| c), Some("1 / 1".to_string()));
        assert!(view.photo().is_none());
        assert_eq!(visited, vec![ItemId(2)]);
    }

    #[test]
    fn test_text_pages_clamp_and_photos_wrap() {
        let mut view = mounted(&FilterStore::new(), 1);
        assert_eq!(
            view.text_page(),
            Some(("Carved from Carrara marble.", "1 / 2".to_string()))
        );
        assert!(view.next_text());
        assert!(!view.next_text());
        assert!(view.previous_text());

        view.previous_photo();
        assert_eq!(
            view.photo(),
            Some(("lomonosov-2.png", "2 / 2".to_string()))
        );
        view.next_photo();
        assert_eq!(view.photo().map(|(p, _)| p), Some("lomonosov-1.png"));
    }

    #[test]
    fn test_close_returns_to_no_selection() {
        let mut view = mounted(&FilterStore::new(), 4);
        view.close();
        assert_eq!(view.state(), DetailState::NoItemSelected);
        assert_eq!(view.item(), DetailLookup::Closed);
        assert!(view.adjacent().next.is_none());
    }
}

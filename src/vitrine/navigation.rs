use crate::model::{CatalogItem, ItemId};
use crate::position::{resolve, Position};
use crate::projector::FilteredResult;

/// Where the UI goes when the visitor moves to another item.
pub trait NavigationSink {
    fn go_to(&mut self, id: ItemId);
}

impl<F: FnMut(ItemId)> NavigationSink for F {
    fn go_to(&mut self, id: ItemId) {
        self(id)
    }
}

/// Neighbours of the current item inside a filtered result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjacent<'a> {
    pub previous: Option<&'a CatalogItem>,
    pub next: Option<&'a CatalogItem>,
}

impl Adjacent<'_> {
    pub fn previous_id(&self) -> Option<ItemId> {
        self.previous.map(|item| item.id)
    }

    pub fn next_id(&self) -> Option<ItemId> {
        self.next.map(|item| item.id)
    }
}

/// Previous/next of `current` in `result`. An absent or filtered-out current
/// item has neither.
pub fn compute_adjacent(result: &FilteredResult, current: Option<ItemId>) -> Adjacent<'_> {
    match resolve(result, current) {
        Position::Found(index) => Adjacent {
            previous: index.checked_sub(1).and_then(|i| result.get(i)),
            next: result.get(index + 1),
        },
        Position::NotFound => Adjacent {
            previous: None,
            next: None,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailState {
    #[default]
    NoItemSelected,
    ItemSelected(ItemId),
}

/// State machine of a detail-browsing session.
///
/// Only the identity is kept; the index within the filtered list is derived
/// again from it whenever it is needed.
#[derive(Debug, Clone, Default)]
pub struct DetailBrowser {
    state: DetailState,
}

impl DetailBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DetailState {
        self.state
    }

    pub fn current(&self) -> Option<ItemId> {
        match self.state {
            DetailState::ItemSelected(id) => Some(id),
            DetailState::NoItemSelected => None,
        }
    }

    pub fn open(&mut self, id: ItemId) {
        self.state = DetailState::ItemSelected(id);
    }

    pub fn close(&mut self) {
        self.state = DetailState::NoItemSelected;
    }

    pub fn adjacent<'a>(&self, result: &'a FilteredResult) -> Adjacent<'a> {
        compute_adjacent(result, self.current())
    }

    /// Moves to the next item, if there is one, and tells `sink`.
    pub fn next(
        &mut self,
        result: &FilteredResult,
        sink: &mut impl NavigationSink,
    ) -> Option<ItemId> {
        let target = self.adjacent(result).next_id()?;
        self.transition(target, sink);
        Some(target)
    }

    /// Moves to the previous item, if there is one, and tells `sink`.
    pub fn previous(
        &mut self,
        result: &FilteredResult,
        sink: &mut impl NavigationSink,
    ) -> Option<ItemId> {
        let target = self.adjacent(result).previous_id()?;
        self.transition(target, sink);
        Some(target)
    }

    fn transition(&mut self, target: ItemId, sink: &mut impl NavigationSink) {
        tracing::debug!(from = ?self.current(), to = %target, "detail transition");
        self.state = DetailState::ItemSelected(target);
        sink.go_to(target);
    }
}

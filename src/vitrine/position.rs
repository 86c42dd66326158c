//! Tracking "which item am I on" across re-projections.
//!
//! Two flavours exist, matching the two kinds of browsing context:
//!
//! - [`Cursor`]: a raw position in the filtered list (the catalog page arrows).
//!   It cannot follow an item, so after every re-projection it is clamped into
//!   the new bounds.
//! - Identity resolution ([`resolve`]): a context that is *about* a specific
//!   item (the detail page) re-derives its index from the item's id on every
//!   render. If the item is filtered out the answer is [`Position::NotFound`],
//!   never some unrelated neighbour.

use crate::model::ItemId;
use crate::projector::FilteredResult;

/// Where an identity currently sits within a filtered result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Found(usize),
    NotFound,
}

impl Position {
    /// The index, or `-1` when not found.
    pub fn sentinel(&self) -> isize {
        match self {
            Position::Found(index) => *index as isize,
            Position::NotFound => -1,
        }
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Position::Found(index) => Some(*index),
            Position::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Position::Found(_))
    }
}

/// Resolves `id` against `result`. Absence is a value, not an error.
pub fn resolve(result: &FilteredResult, id: Option<ItemId>) -> Position {
    id.and_then(|id| result.index_of(id))
        .map_or(Position::NotFound, Position::Found)
}

/// A raw index into a filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    selected: Option<usize>,
}

impl Default for Cursor {
    fn default() -> Self {
        Self { selected: Some(0) }
    }
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Brings the cursor back into `0..len` after the list changed.
    ///
    /// An empty list clears the selection; once items reappear the cursor
    /// restarts at the first one.
    pub fn reconcile(&mut self, len: usize) {
        self.selected = match (self.selected, len) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(current), len) => Some(current.min(len - 1)),
        };
    }

    pub fn can_go_next(&self, len: usize) -> bool {
        self.selected.is_some_and(|i| i + 1 < len)
    }

    pub fn can_go_previous(&self) -> bool {
        self.selected.is_some_and(|i| i > 0)
    }

    /// Moves forward; returns whether the cursor moved.
    pub fn next(&mut self, len: usize) -> bool {
        if !self.can_go_next(len) {
            return false;
        }
        self.selected = self.selected.map(|i| i + 1);
        true
    }

    /// Moves back; returns whether the cursor moved.
    pub fn previous(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.selected = self.selected.map(|i| i - 1);
        true
    }
}

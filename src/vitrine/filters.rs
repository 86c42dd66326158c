//! # Shared Filter State
//!
//! A kiosk session has exactly one set of filter criteria, shared by every view
//! that is currently mounted (the catalog list, the detail page header, ...).
//! [`FilterStore`] is that single logical instance: an explicit handle that is
//! created with the session and handed to each view, never looked up ambiently.
//!
//! ## Contract
//!
//! - **Read**: [`FilterStore::snapshot`] / [`FilterStore::read`] always observe
//!   the latest criteria.
//! - **Write**: each mutator applies one whole change to one dimension. There is
//!   no intermediate state another reader could observe.
//! - **Revision**: every effective change bumps [`FilterStore::revision`]. Views
//!   use it, together with their dataset snapshot, to decide when to re-project.
//! - **Subscribe**: callbacks registered with [`FilterStore::subscribe`] run
//!   after each effective change with the new criteria.
//!
//! The store is session-scoped and single-threaded (`Rc<RefCell<_>>`); nothing
//! here is persisted.

use crate::era::Era;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// The conjunctive constraints applied to the catalog.
/// An empty set or blank query leaves its dimension unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    pub sculptors: BTreeSet<String>,
    pub eras: BTreeSet<Era>,
    pub materials: BTreeSet<String>,
    pub query: String,
}

impl FilterCriteria {
    /// The search query, or `None` when blank.
    pub fn query(&self) -> Option<&str> {
        let trimmed = self.query.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    pub fn active_dimensions(&self) -> usize {
        [
            !self.sculptors.is_empty(),
            !self.eras.is_empty(),
            !self.materials.is_empty(),
            self.query().is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn is_unconstrained(&self) -> bool {
        self.active_dimensions() == 0
    }
}

/// One of the four filter dimensions, as named in user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Sculptor,
    Era,
    Material,
    Search,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Sculptor => "sculptor",
            Dimension::Era => "era",
            Dimension::Material => "material",
            Dimension::Search => "search",
        };
        f.write_str(name)
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sculptor" | "sculptors" => Ok(Dimension::Sculptor),
            "era" | "eras" => Ok(Dimension::Era),
            "material" | "materials" => Ok(Dimension::Material),
            "search" | "query" => Ok(Dimension::Search),
            other => Err(format!("Unknown filter dimension: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Rc<dyn Fn(&FilterCriteria)>;

#[derive(Default)]
struct Inner {
    criteria: FilterCriteria,
    revision: u64,
    next_subscription: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
}

/// Session-wide filter criteria. Clones are handles to the same state.
#[derive(Clone, Default)]
pub struct FilterStore {
    inner: Rc<RefCell<Inner>>,
}

impl fmt::Debug for FilterStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("FilterStore")
            .field("criteria", &inner.criteria)
            .field("revision", &inner.revision)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> FilterCriteria {
        self.inner.borrow().criteria.clone()
    }

    pub fn read<R>(&self, f: impl FnOnce(&FilterCriteria) -> R) -> R {
        f(&self.inner.borrow().criteria)
    }

    pub fn revision(&self) -> u64 {
        self.inner.borrow().revision
    }

    pub fn subscribe(&self, callback: impl Fn(&FilterCriteria) + 'static) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_subscription);
        inner.next_subscription += 1;
        inner.subscribers.push((id, Rc::new(callback)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.subscribers.len();
        inner.subscribers.retain(|(sid, _)| *sid != id);
        inner.subscribers.len() != before
    }

    // --- sculptors ---

    pub fn set_sculptors<I, T>(&self, values: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        self.mutate(Dimension::Sculptor, |c| replace(&mut c.sculptors, values));
    }

    pub fn toggle_sculptor(&self, value: impl Into<String>) {
        let value = value.into();
        self.mutate(Dimension::Sculptor, |c| toggle(&mut c.sculptors, value));
    }

    pub fn reset_sculptors(&self) {
        self.mutate(Dimension::Sculptor, |c| {
            replace(&mut c.sculptors, BTreeSet::new())
        });
    }

    // --- eras ---

    pub fn set_eras(&self, values: impl IntoIterator<Item = Era>) {
        let values: BTreeSet<Era> = values.into_iter().collect();
        self.mutate(Dimension::Era, |c| replace(&mut c.eras, values));
    }

    pub fn toggle_era(&self, value: Era) {
        self.mutate(Dimension::Era, |c| toggle(&mut c.eras, value));
    }

    pub fn reset_eras(&self) {
        self.mutate(Dimension::Era, |c| replace(&mut c.eras, BTreeSet::new()));
    }

    // --- materials ---

    pub fn set_materials<I, T>(&self, values: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        self.mutate(Dimension::Material, |c| replace(&mut c.materials, values));
    }

    pub fn toggle_material(&self, value: impl Into<String>) {
        let value = value.into();
        self.mutate(Dimension::Material, |c| toggle(&mut c.materials, value));
    }

    pub fn reset_materials(&self) {
        self.mutate(Dimension::Material, |c| {
            replace(&mut c.materials, BTreeSet::new())
        });
    }

    // --- search ---

    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.mutate(Dimension::Search, |c| replace(&mut c.query, query));
    }

    pub fn reset_query(&self) {
        self.mutate(Dimension::Search, |c| replace(&mut c.query, String::new()));
    }

    pub fn reset(&self, dimension: Dimension) {
        match dimension {
            Dimension::Sculptor => self.reset_sculptors(),
            Dimension::Era => self.reset_eras(),
            Dimension::Material => self.reset_materials(),
            Dimension::Search => self.reset_query(),
        }
    }

    pub fn reset_all(&self) {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            let changed = inner.criteria != FilterCriteria::default();
            if changed {
                inner.criteria = FilterCriteria::default();
                inner.revision += 1;
            }
            changed
        };
        if changed {
            tracing::debug!("filters reset");
            self.notify();
        }
    }

    fn mutate(&self, dimension: Dimension, apply: impl FnOnce(&mut FilterCriteria) -> bool) {
        let revision = {
            let mut inner = self.inner.borrow_mut();
            if !apply(&mut inner.criteria) {
                return;
            }
            inner.revision += 1;
            inner.revision
        };
        tracing::debug!(%dimension, revision, "filter criteria changed");
        self.notify();
    }

    fn notify(&self) {
        // Callbacks run without the borrow held so they may read or write the store.
        let (criteria, subscribers): (FilterCriteria, Vec<Subscriber>) = {
            let inner = self.inner.borrow();
            (
                inner.criteria.clone(),
                inner.subscribers.iter().map(|(_, s)| s.clone()).collect(),
            )
        };
        for subscriber in subscribers {
            subscriber(&criteria);
        }
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) -> bool {
    if !set.remove(&value) {
        set.insert(value);
    }
    true
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

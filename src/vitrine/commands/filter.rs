use crate::era::Era;
use crate::filters::{FilterCriteria, FilterStore};

/// A full set of criteria given up front (command-line flags), applied to the
/// session store one dimension at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub sculptors: Vec<String>,
    pub eras: Vec<Era>,
    pub materials: Vec<String>,
    pub search: Option<String>,
}

impl FilterSelection {
    pub fn apply(&self, store: &FilterStore) {
        store.set_sculptors(self.sculptors.iter().cloned());
        store.set_eras(self.eras.iter().copied());
        store.set_materials(self.materials.iter().cloned());
        store.set_query(self.search.clone().unwrap_or_default());
    }
}

/// One line per active dimension, for display.
pub fn describe(criteria: &FilterCriteria) -> Vec<String> {
    let mut lines = Vec::new();
    if !criteria.sculptors.is_empty() {
        lines.push(format!("sculptor: {}", join(criteria.sculptors.iter())));
    }
    if !criteria.eras.is_empty() {
        lines.push(format!("era: {}", join(criteria.eras.iter())));
    }
    if !criteria.materials.is_empty() {
        let materials = criteria
            .materials
            .iter()
            .map(|m| if m.is_empty() { "(none)" } else { m.as_str() });
        lines.push(format!("material: {}", join(materials)));
    }
    if let Some(query) = criteria.query() {
        lines.push(format!("search: \"{}\"", query));
    }
    lines
}

fn join<T: std::fmt::Display>(values: impl Iterator<Item = T>) -> String {
    values.map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
}

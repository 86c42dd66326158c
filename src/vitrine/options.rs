use crate::era::Era;
use crate::model::CatalogItem;
use serde::Serialize;

/// Values offered to the visitor for each filter dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub sculptors: Vec<String>,
    pub eras: Vec<Era>,
    pub materials: Vec<String>,
}

/// Unique non-empty sculptors, in the order they first appear.
pub fn sculptor_options(items: &[CatalogItem]) -> Vec<String> {
    let mut seen = Vec::new();
    for sculptor in items.iter().filter_map(|item| item.sculptor.as_deref()) {
        if !sculptor.is_empty() && !seen.iter().any(|s: &String| s == sculptor) {
            seen.push(sculptor.to_string());
        }
    }
    seen
}

pub fn filter_options(items: &[CatalogItem], materials: &[String]) -> FilterOptions {
    FilterOptions {
        sculptors: sculptor_options(items),
        eras: Era::ALL.to_vec(),
        materials: materials.to_vec(),
    }
}

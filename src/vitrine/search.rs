use crate::model::CatalogItem;

/// Text the free-text search runs against: name, title, sculptor, location,
/// creation time and every text page, skipping absent or empty values.
pub fn searchable_text(item: &CatalogItem) -> String {
    let fields = [
        item.name.as_deref(),
        item.title.as_deref(),
        item.sculptor.as_deref(),
        item.location.as_deref(),
        item.creation_time.as_deref(),
    ];

    fields
        .into_iter()
        .flatten()
        .chain(item.texts.iter().map(String::as_str))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Case-insensitive substring match of the trimmed query.
/// A missing or blank query matches everything.
pub fn matches(item: &CatalogItem, query: Option<&str>) -> bool {
    let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) else {
        return true;
    };
    searchable_text(item)
        .to_lowercase()
        .contains(&query.to_lowercase())
}

use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;

/// Stable identity of a catalog item, as stored in the catalog file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(ItemId)
            .map_err(|_| format!("Invalid item id: {}", s))
    }
}

/// A museum item as loaded from the catalog.
///
/// Every descriptive field is optional: records in the wild are sparse and a
/// missing field must never make an item unusable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: ItemId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub sculptor: Option<String>,
    #[serde(default)]
    pub creation_time: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub texts: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub photos: Vec<String>,
}

/// A list of strings; `null` or any other non-list value reads as empty.
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum List {
        Strings(Vec<String>),
        Other(IgnoredAny),
    }

    Ok(match List::deserialize(deserializer)? {
        List::Strings(values) => values,
        List::Other(_) => Vec::new(),
    })
}

impl CatalogItem {
    pub fn new(id: i64) -> Self {
        Self {
            id: ItemId(id),
            name: None,
            title: None,
            sculptor: None,
            creation_time: None,
            material: None,
            location: None,
            description: None,
            texts: Vec::new(),
            photos: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_sculptor(mut self, sculptor: impl Into<String>) -> Self {
        self.sculptor = Some(sculptor.into());
        self
    }

    pub fn with_creation_time(mut self, creation_time: impl Into<String>) -> Self {
        self.creation_time = Some(creation_time.into());
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_texts<I, T>(mut self, texts: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.texts = texts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_photos<I, T>(mut self, photos: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.photos = photos.into_iter().map(Into::into).collect();
        self
    }

    /// Display label: name, then title, then empty.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.title.as_deref())
            .unwrap_or("")
    }

    /// Material with absence normalized to the empty string.
    pub fn material_or_empty(&self) -> &str {
        self.material.as_deref().unwrap_or("")
    }
}

/// An immutable snapshot of the whole catalog.
///
/// Clones share the same allocation; two handles are the "same dataset" iff
/// [`Dataset::same_snapshot`] holds.
#[derive(Debug, Clone)]
pub struct Dataset {
    items: Arc<[CatalogItem]>,
    loaded_at: DateTime<Utc>,
}

impl Dataset {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self {
            items: items.into(),
            loaded_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn same_snapshot(&self, other: &Dataset) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }

    pub fn find(&self, id: ItemId) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

impl Deref for Dataset {
    type Target = [CatalogItem];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_sparse_record() {
        let item: CatalogItem = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(item.id, ItemId(7));
        assert!(item.sculptor.is_none());
        assert!(item.texts.is_empty());
        assert_eq!(item.material_or_empty(), "");
    }

    #[test]
    fn test_non_list_texts_and_photos_read_as_empty() {
        let item: CatalogItem =
            serde_json::from_str(r#"{"id": 5, "texts": null, "photos": "front.png"}"#).unwrap();
        assert!(item.texts.is_empty());
        assert!(item.photos.is_empty());
    }

    #[test]
    fn test_reads_camel_case_creation_time() {
        let item: CatalogItem =
            serde_json::from_str(r#"{"id": 1, "creationTime": "1789 year"}"#).unwrap();
        assert_eq!(item.creation_time.as_deref(), Some("1789 year"));
    }

    #[test]
    fn test_label_prefers_name_over_title() {
        let mut item = CatalogItem::new(1);
        item.title = Some("Title".into());
        assert_eq!(item.label(), "Title");
        item.name = Some("Name".into());
        assert_eq!(item.label(), "Name");
    }

    #[test]
    fn test_clones_share_snapshot() {
        let a = Dataset::new(vec![CatalogItem::new(1)]);
        let b = a.clone();
        let c = Dataset::new(vec![CatalogItem::new(1)]);
        assert!(a.same_snapshot(&b));
        assert!(!a.same_snapshot(&c));
    }

    #[test]
    fn test_parses_item_id() {
        assert_eq!("42".parse::<ItemId>(), Ok(ItemId(42)));
        assert!("abc".parse::<ItemId>().is_err());
    }
}

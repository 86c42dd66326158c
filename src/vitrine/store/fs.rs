use super::CatalogSource;
use crate::error::{Result, VitrineError};
use crate::model::CatalogItem;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Items of a catalog payload. Non-array payloads hold nothing; records that
/// do not describe an item are skipped.
pub fn parse_catalog(payload: Value) -> Vec<CatalogItem> {
    let Value::Array(records) = payload else {
        tracing::warn!("catalog payload is not an array, treating as empty");
        return Vec::new();
    };

    records
        .into_iter()
        .enumerate()
        .filter_map(|(position, record)| match serde_json::from_value(record) {
            Ok(item) => Some(item),
            Err(err) => {
                tracing::warn!(position, %err, "skipping malformed catalog record");
                None
            }
        })
        .collect()
}

impl CatalogSource for FileSource {
    fn fetch(&self) -> Result<Vec<CatalogItem>> {
        let content = fs::read_to_string(&self.path).map_err(VitrineError::Io)?;
        let payload: Value = serde_json::from_str(&content).map_err(VitrineError::Serialization)?;
        let items = parse_catalog(payload);
        tracing::debug!(path = %self.path.display(), count = items.len(), "catalog read");
        Ok(items)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

use super::CatalogSource;
use crate::error::{Result, VitrineError};
use crate::model::CatalogItem;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// In-memory catalog for testing and development.
#[derive(Default)]
pub struct InMemorySource {
    items: Mutex<Vec<CatalogItem>>,
    failing: AtomicBool,
    fetches: AtomicUsize,
}

impl InMemorySource {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self {
            items: Mutex::new(items),
            ..Self::default()
        }
    }

    /// Swap the catalog contents, as if the file changed on disk.
    pub fn replace(&self, items: Vec<CatalogItem>) {
        *self.items.lock().unwrap_or_else(PoisonError::into_inner) = items;
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of fetches served so far, failed ones included.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl CatalogSource for InMemorySource {
    fn fetch(&self) -> Result<Vec<CatalogItem>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(VitrineError::Source("in-memory source set to fail".into()));
        }
        Ok(self
            .items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn describe(&self) -> String {
        "in-memory catalog".to_string()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    /// A small museum covering every filter dimension.
    ///
    /// | id | sculptor | year | material |
    /// |----|----------|------|----------|
    /// | 1  | Shubin   | 1789 | Marble   |
    /// | 2  | Martos   | 1818 | Bronze   |
    /// | 3  | Shubin   | -    | -        |
    /// | 4  | Andreyev | 1909 | Granite  |
    /// | 5  | Martos   | 1850 | Bronze   |
    pub fn museum_items() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new(1)
                .with_name("Bust of Lomonosov")
                .with_sculptor("Shubin")
                .with_creation_time("1789")
                .with_material("Marble")
                .with_location("Main hall")
                .with_texts(["Carved from Carrara marble.", "Acquired in 1921."])
                .with_photos(["lomonosov-1.png", "lomonosov-2.png"]),
            CatalogItem::new(2)
                .with_name("Minin and Pozharsky")
                .with_sculptor("Martos")
                .with_creation_time("cast in 1818")
                .with_material("Bronze")
                .with_location("Red Square"),
            CatalogItem::new(3)
                .with_name("Unattributed fragment")
                .with_sculptor("Shubin"),
            CatalogItem::new(4)
                .with_name("Gogol")
                .with_sculptor("Andreyev")
                .with_creation_time("1909")
                .with_material("Granite"),
            CatalogItem::new(5)
                .with_name("Richelieu")
                .with_sculptor("Martos")
                .with_creation_time("1850")
                .with_material("Bronze")
                .with_photos(["richelieu.png"]),
        ]
    }

    pub fn museum_source() -> InMemorySource {
        InMemorySource::new(museum_items())
    }
}

//! # Dataset Service
//!
//! Every view needs the catalog, and each one used to fetch its own copy. This
//! service sits between the views and the [`CatalogSource`]: it fetches off the
//! event loop, keeps the last good snapshot and hands the same snapshot to every
//! view until it is explicitly invalidated (or, when configured, grows older
//! than its maximum age).
//!
//! ## Degradation
//!
//! Loading never fails. A source error, or a panic in the blocking fetch, is
//! logged and yields an empty dataset. Failures are not cached, so the next
//! load tries the source again.
//!
//! ## Delivery
//!
//! [`load_into`] delivers a snapshot to a mounted view held through a `Weak`
//! handle. When the view was dropped (unmounted) before the fetch resolved,
//! the result is discarded silently.

use crate::model::Dataset;
use crate::store::CatalogSource;
use chrono::Utc;
use std::cell::RefCell;
use std::rc::Weak;
use std::sync::Arc;
use std::time::Duration;

/// Something that displays a dataset snapshot.
pub trait DatasetConsumer {
    fn receive(&mut self, dataset: Dataset);
}

pub struct DatasetService<S> {
    source: Arc<S>,
    cached: RefCell<Option<Dataset>>,
    max_age: Option<Duration>,
}

impl<S> DatasetService<S>
where
    S: CatalogSource + Send + Sync + 'static,
{
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            cached: RefCell::new(None),
            max_age: None,
        }
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Drops the cached snapshot; the next load goes to the source.
    pub fn invalidate(&self) {
        if self.cached.borrow_mut().take().is_some() {
            tracing::debug!("dataset cache invalidated");
        }
    }

    /// The cached snapshot, if there is one that has not expired.
    pub fn cached(&self) -> Option<Dataset> {
        let cached = self.cached.borrow();
        let dataset = cached.as_ref()?;
        if self.is_expired(dataset) {
            return None;
        }
        Some(dataset.clone())
    }

    /// The current snapshot, fetching it when nothing fresh is cached.
    pub async fn load(&self) -> Dataset {
        if let Some(dataset) = self.cached() {
            return dataset;
        }

        let source = Arc::clone(&self.source);
        let fetched = tokio::task::spawn_blocking(move || source.fetch()).await;

        match fetched {
            Ok(Ok(items)) => {
                let dataset = Dataset::new(items);
                tracing::debug!(count = dataset.len(), "dataset loaded");
                *self.cached.borrow_mut() = Some(dataset.clone());
                dataset
            }
            Ok(Err(err)) => {
                tracing::warn!(source = %self.source.describe(), %err, "catalog fetch failed, using empty dataset");
                Dataset::empty()
            }
            Err(err) => {
                tracing::warn!(source = %self.source.describe(), %err, "catalog fetch aborted, using empty dataset");
                Dataset::empty()
            }
        }
    }

    fn is_expired(&self, dataset: &Dataset) -> bool {
        let Some(max_age) = self.max_age else {
            return false;
        };
        Utc::now()
            .signed_duration_since(dataset.loaded_at())
            .to_std()
            .is_ok_and(|age| age > max_age)
    }
}

/// Loads the dataset and hands it to `view` if the view is still mounted.
/// Returns whether the snapshot was delivered.
pub async fn load_into<S, V>(service: &DatasetService<S>, view: Weak<RefCell<V>>) -> bool
where
    S: CatalogSource + Send + Sync + 'static,
    V: DatasetConsumer,
{
    let dataset = service.load().await;
    match view.upgrade() {
        Some(view) => {
            view.borrow_mut().receive(dataset);
            true
        }
        None => {
            tracing::debug!("view unmounted before dataset arrived, dropping result");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CatalogItem, ItemId};
    use crate::store::memory::{fixtures, InMemorySource};
    use std::rc::Rc;
    use std::sync::{mpsc, Mutex};

    #[derive(Default)]
    struct Recorder {
        received: Vec<Dataset>,
    }

    impl DatasetConsumer for Recorder {
        fn receive(&mut self, dataset: Dataset) {
            self.received.push(dataset);
        }
    }

    #[tokio::test]
    async fn test_views_share_one_snapshot() {
        let service = DatasetService::new(fixtures::museum_source());
        let first = service.load().await;
        let second = service.load().await;

        assert!(first.same_snapshot(&second));
        assert_eq!(service.source().fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_invalidation_refetches() {
        let service = DatasetService::new(fixtures::museum_source());
        let before = service.load().await;

        service.source().replace(vec![CatalogItem::new(9)]);
        assert_eq!(service.load().await.len(), 5);

        service.invalidate();
        let after = service.load().await;
        assert!(!before.same_snapshot(&after));
        assert_eq!(after.find(ItemId(9)).map(|i| i.id), Some(ItemId(9)));
        assert_eq!(service.source().fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_expired_snapshot_is_refetched() {
        let service =
            DatasetService::new(fixtures::museum_source()).with_max_age(Duration::from_millis(1));
        service.load().await;
        tokio::time::sleep(Duration::from_millis(5)).await;

        assert!(service.cached().is_none());
        service.load().await;
        assert_eq!(service.source().fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_failure_degrades_to_empty_and_is_not_cached() {
        let service = DatasetService::new(fixtures::museum_source());
        service.source().set_failing(true);
        assert!(service.load().await.is_empty());
        assert!(service.cached().is_none());

        service.source().set_failing(false);
        assert_eq!(service.load().await.len(), 5);
    }

    #[tokio::test]
    async fn test_delivers_to_mounted_view() {
        let service = DatasetService::new(InMemorySource::new(vec![CatalogItem::new(1)]));
        let view = Rc::new(RefCell::new(Recorder::default()));

        assert!(load_into(&service, Rc::downgrade(&view)).await);
        assert_eq!(view.borrow().received.len(), 1);
    }

    /// Blocks each fetch until the test releases it.
    struct GatedSource {
        gate: Mutex<mpsc::Receiver<()>>,
    }

    impl CatalogSource for GatedSource {
        fn fetch(&self) -> crate::error::Result<Vec<CatalogItem>> {
            let _ = self.gate.lock().unwrap().recv();
            Ok(fixtures::museum_items())
        }

        fn describe(&self) -> String {
            "gated".to_string()
        }
    }

    #[tokio::test]
    async fn test_late_result_for_unmounted_view_is_dropped() {
        let (release, gate) = mpsc::channel();
        let service = DatasetService::new(GatedSource {
            gate: Mutex::new(gate),
        });
        let view = Rc::new(RefCell::new(Recorder::default()));

        let pending = load_into(&service, Rc::downgrade(&view));
        tokio::pin!(pending);

        // The fetch is now running and parked on the gate.
        let started = tokio::time::timeout(Duration::from_millis(20), &mut pending).await;
        assert!(started.is_err());

        drop(view);
        release.send(()).unwrap();
        assert!(!pending.await);
        assert_eq!(service.cached().map(|d| d.len()), Some(5));
    }
}

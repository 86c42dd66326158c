//! # API Facade
//!
//! The single entry point for kiosk clients. A [`KioskApi`] is one session: it
//! owns the [`DatasetService`] (so every view shares one catalog snapshot) and
//! the session's [`FilterStore`] (so every view shares one set of criteria).
//!
//! ## Role
//!
//! - **Dispatches** one-shot queries to `commands/*.rs`
//! - **Normalizes inputs** (textual item ids → [`ItemId`])
//! - **Mounts views** wired to the session store and delivers their data
//!
//! Like the command layer, it never writes to the terminal.
//!
//! ## Generic Over CatalogSource
//!
//! `KioskApi<S: CatalogSource>`:
//! - Production: `KioskApi<FileSource>`
//! - Testing: `KioskApi<InMemorySource>`

use crate::commands;
use crate::config::VitrineConfig;
use crate::error::{Result, VitrineError};
use crate::filters::FilterStore;
use crate::loader::{load_into, DatasetConsumer, DatasetService};
use crate::model::ItemId;
use crate::store::CatalogSource;
use crate::views::catalog::CatalogView;
use crate::views::detail::DetailView;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

pub struct KioskApi<S> {
    service: DatasetService<S>,
    filters: FilterStore,
    materials: Vec<String>,
    config_dir: PathBuf,
}

impl<S> KioskApi<S> {
    pub fn filters(&self) -> &FilterStore {
        &self.filters
    }

    pub fn service(&self) -> &DatasetService<S> {
        &self.service
    }
}

impl<S> KioskApi<S>
where
    S: CatalogSource + Send + Sync + 'static,
{
    pub fn new(source: S, config: &VitrineConfig, config_dir: impl Into<PathBuf>) -> Self {
        let service = match config.cache_max_age() {
            Some(max_age) => DatasetService::new(source).with_max_age(max_age),
            None => DatasetService::new(source),
        };
        Self {
            service,
            filters: FilterStore::new(),
            materials: config.materials.clone(),
            config_dir: config_dir.into(),
        }
    }

    pub fn apply_filters(&self, selection: &commands::filter::FilterSelection) {
        selection.apply(&self.filters);
    }

    pub async fn list(&self) -> commands::CmdResult {
        let dataset = self.service.load().await;
        self.filters
            .read(|criteria| commands::list::run(&dataset, criteria))
    }

    pub async fn show(&self, id: &str) -> Result<commands::CmdResult> {
        let id = parse_item_id(id)?;
        let dataset = self.service.load().await;
        self.filters
            .read(|criteria| commands::show::run(&dataset, criteria, id))
    }

    pub async fn options(&self) -> commands::CmdResult {
        let dataset = self.service.load().await;
        commands::options::run(&dataset, &self.materials)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.config_dir, action)
    }

    /// Mounts a catalog view on the session store and loads it.
    pub async fn mount_catalog(&self) -> Rc<RefCell<CatalogView>> {
        let view = Rc::new(RefCell::new(CatalogView::new(self.filters.clone())));
        self.refresh(&view).await;
        view
    }

    /// Mounts a detail view for `id` on the session store and loads it.
    pub async fn mount_detail(&self, id: ItemId) -> Rc<RefCell<DetailView>> {
        let mut detail = DetailView::new(self.filters.clone());
        detail.open(id);
        let view = Rc::new(RefCell::new(detail));
        self.refresh(&view).await;
        view
    }

    /// Delivers the current snapshot to a mounted view.
    pub async fn refresh<V: DatasetConsumer>(&self, view: &Rc<RefCell<V>>) -> bool {
        load_into(&self.service, Rc::downgrade(view)).await
    }

    /// Forgets the cached catalog; the next load reads the source again.
    pub fn reload(&self) {
        self.service.invalidate();
    }
}

pub fn parse_item_id(s: &str) -> Result<ItemId> {
    s.parse().map_err(VitrineError::Input)
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::filter::FilterSelection;
pub use crate::commands::{CmdMessage, CmdResult, ItemDetail, ListedItem, MessageLevel};

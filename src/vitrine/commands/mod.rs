use crate::config::VitrineConfig;
use crate::era::EraSet;
use crate::model::{CatalogItem, ItemId};
use crate::options::FilterOptions;
use crate::position::Position;

pub mod config;
pub mod filter;
pub mod list;
pub mod options;
pub mod show;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// An item as it appears in a filtered listing.
#[derive(Debug, Clone)]
pub struct ListedItem {
    /// 1-based position within the filtered list
    pub position: usize,
    pub item: CatalogItem,
    pub eras: EraSet,
}

/// A single item with its place in the filtered list.
#[derive(Debug, Clone)]
pub struct ItemDetail {
    pub item: CatalogItem,
    pub eras: EraSet,
    pub position: Position,
    pub shown: usize,
    pub previous: Option<ItemId>,
    pub next: Option<ItemId>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed_items: Vec<ListedItem>,
    pub detail: Option<ItemDetail>,
    pub options: Option<FilterOptions>,
    pub config: Option<VitrineConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_items(mut self, items: Vec<ListedItem>) -> Self {
        self.listed_items = items;
        self
    }

    pub fn with_detail(mut self, detail: ItemDetail) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn with_options(mut self, options: FilterOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_config(mut self, config: VitrineConfig) -> Self {
        self.config = Some(config);
        self
    }
}

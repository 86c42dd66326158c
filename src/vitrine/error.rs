use crate::model::ItemId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VitrineError {
    #[error("Catalog item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Source error: {0}")]
    Source(String),

    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, VitrineError>;

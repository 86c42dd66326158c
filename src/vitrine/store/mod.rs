//! # Catalog Sources
//!
//! Where the catalog comes from. The rest of the crate only sees the
//! [`CatalogSource`] trait: a single operation returning the whole ordered
//! collection of items.
//!
//! ## Implementations
//!
//! - [`fs::FileSource`]: production source reading a JSON array from disk
//!   (the kiosk's `catalogItems.json`).
//! - [`memory::InMemorySource`]: for tests; its contents can be swapped and it
//!   can be told to fail, to exercise the degraded paths.
//!
//! ## Failure Model
//!
//! Sources report real failures (unreadable file, malformed JSON) as errors.
//! Turning those into an empty catalog is the job of the dataset service in
//! [`crate::loader`], not of the source. A payload that is valid JSON but not
//! an array is not an error: it simply holds no items.

use crate::error::Result;
use crate::model::CatalogItem;

pub mod fs;
pub mod memory;

/// Abstract interface for loading the catalog.
pub trait CatalogSource {
    /// Fetch the full, ordered collection of items.
    fn fetch(&self) -> Result<Vec<CatalogItem>>;

    /// Human-readable origin, for logs and messages.
    fn describe(&self) -> String;
}

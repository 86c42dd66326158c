//! # Vitrine Architecture
//!
//! Vitrine is the browsing core of a museum exhibit kiosk: a catalog of
//! sculptures, filtered by sculptor, era, material and free-text search, with a
//! detail page that walks the filtered list item by item. The terminal kiosk in
//! `cli/` is one client of it; the core itself does no terminal I/O.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - One-shot commands and the interactive kiosk session      │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the dataset service and the session filter store    │
//! │  - Dispatches to commands, mounts views                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command & View Layer (commands/, views/)                   │
//! │  - Projection, position resolution, detail navigation       │
//! │  - Operates on Rust types, returns Rust types               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Source Layer (store/, loader.rs)                           │
//! │  - CatalogSource trait: FileSource, InMemorySource          │
//! │  - DatasetService: one cached snapshot shared by all views  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Shared filter state
//!
//! All views of a session hold a handle to the same [`filters::FilterStore`].
//! A view never caches criteria: it derives its filtered list from the
//! current criteria and its dataset snapshot whenever either changes, so a
//! mutation made on one page is visible on every other page.
//!
//! ## Identity, not index
//!
//! The catalog list remembers a raw cursor that is clamped when the list
//! shrinks. The detail page remembers an [`model::ItemId`] and re-resolves it
//! against the current filtered list; an item that dropped out of the list
//! resolves to "not found" rather than silently showing another item.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One-shot listing, detail and option queries
//! - [`views`]: Catalog and detail views over the shared filter state
//! - [`filters`]: Filter criteria and the shared store
//! - [`projector`]: Criteria + dataset → filtered result
//! - [`position`]: Index resolution and the catalog cursor
//! - [`navigation`]: Detail-page prev/next state machine
//! - [`era`], [`search`], [`options`], [`gallery`]: Per-item helpers
//! - [`loader`], [`store`]: Catalog loading and sources
//! - [`model`], [`config`], [`error`]: Core types, configuration, errors
//! - `cli`: Argument parsing, the kiosk session and rendering for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod era;
pub mod error;
pub mod filters;
pub mod gallery;
pub mod loader;
pub mod model;
pub mod navigation;
pub mod options;
pub mod position;
pub mod projector;
pub mod search;
pub mod store;
pub mod views;

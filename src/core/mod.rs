//! Synchronization engine.
//!
//! ## Module Structure
//!
//! - `catalog`: Nested message catalogs and their JSON files
//! - `extract`: Source scanning and translation-key extraction
//! - `reconcile`: Placeholders for code keys and catalog diffs
//! - `sync`: One run over a base catalog and its compare catalogs

pub mod catalog;
pub mod extract;
pub mod reconcile;
pub mod sync;

pub use catalog::{Catalog, CatalogError, LocaleCatalog};
pub use extract::{ExtractResult, ScanWarning, scan_source_keys};
pub use reconcile::{PlaceholderStyle, Reconciliation};
pub use sync::{LocaleReport, SyncOptions, SyncReport, SyncSession};

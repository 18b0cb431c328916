//! glot-sync - keep next-intl message catalogs in sync
//!
//! glot-sync extracts translation keys from TypeScript sources, adds
//! placeholders for keys the primary catalog lacks, and fills every gap between
//! the primary catalog and the other locales with machine translation.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, commands, reports)
//! - `config`: Configuration file loading and parsing
//! - `core`: Catalogs, key extraction, reconciliation and the sync session
//! - `logging`: tracing subscriber setup
//! - `translate`: Translation provider contract, Gemini binding, retry pipeline

pub mod cli;
pub mod config;
pub mod core;
pub mod logging;
pub mod translate;

//! # journal-catalog
//!
//! Academic journal directory: dataset builder, reconciler and query service.
//!
//! ## Modules
//!
//! - [`normalize`] - Title normalization into comparison keys
//! - [`record`] - Journal records, mappings and id extraction
//! - [`compare`] - Quality ranking between two candidate records
//! - [`reconcile`] - Merging two scraped datasets
//! - [`diagnostics`] - Duplicate and coverage report for one dataset
//! - [`ingest`] - Building the dataset from per-area/catalog CSV exports
//! - [`store`] - JSON persistence
//! - [`catalog`] - Read-only queries for the browsing front end
//! - [`server`] - JSON HTTP service over the catalog
//! - [`config`] - Data directory layout
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use journal_catalog::{reconcile, store};
//! use std::path::Path;
//!
//! fn main() -> journal_catalog::Result<()> {
//!     let first = store::load_mapping(Path::new("revistas_a.json"))?;
//!     let second = store::load_mapping(Path::new("revistas_b.json"))?;
//!     let (merged, stats) = reconcile::reconcile(first, second);
//!     println!("{}", stats);
//!     store::save_mapping(Path::new("revistas_combined.json"), &merged)
//! }
//! ```

pub mod catalog;
pub mod compare;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod ingest;
pub mod normalize;
pub mod reconcile;
pub mod record;
pub mod server;
pub mod store;

pub use error::{CatalogError, Result};
pub use record::{JournalMapping, JournalRecord};

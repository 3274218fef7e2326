//! Enrichment pipeline
//!
//! - [`enrich`]: one record, all sources, merge rules
//! - [`batch`]: bounded-concurrency sweeps over every record
//! - [`error`]: failures that abort a single record

pub mod batch;
pub mod enrich;
pub mod error;

pub use batch::{ReadmeSummary, SyncSummary, collect_readmes, sync_all};
pub use enrich::{Enricher, Sources, apply_package_document};
pub use error::SyncError;

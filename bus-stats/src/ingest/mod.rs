//! Observation ingestion.
//!
//! The scraper stages its samples as a JSON array of loosely-typed records.
//! This module turns those records into validated [`Observation`]s, failing
//! loudly on anything malformed, and offers a caller-owned store that
//! deduplicates repeated batches.
//!
//! [`Observation`]: crate::domain::Observation

mod record;
mod store;

pub use record::{IngestError, ObservationRecord, load_batch, parse_record, read_batch};
pub use store::ObservationStore;

//! Raw observation records and their validation.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{
    InvalidLine, Line, Observation, SENTINEL_DELAY, StopId, StopTime, TimeError,
};

/// Error from ingesting observation records.
///
/// Parse variants identify the offending field and value so a caller can
/// report which record was bad.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The line identifier failed validation.
    #[error("invalid line {value:?}: {source}")]
    Line {
        value: String,
        source: InvalidLine,
    },

    /// The stop id was zero, negative, or out of range.
    #[error("invalid stop id {value} (line {line}): must be a positive stop number")]
    Stop { value: i64, line: Line },

    /// The timestamp did not match the expected lexical form.
    #[error("invalid timestamp {value:?} (line {line}, stop {stop_id}): {source}")]
    Timestamp {
        value: String,
        line: Line,
        stop_id: StopId,
        source: TimeError,
    },

    /// The delay was negative or absurdly large.
    #[error(
        "invalid delay {value} (line {line}, stop {stop_id}): \
         must be a non-negative minute count or the sentinel {SENTINEL_DELAY}"
    )]
    Delay {
        value: i64,
        line: Line,
        stop_id: StopId,
    },

    /// The batch file could not be read.
    #[error("failed to read observation batch: {0}")]
    Io(#[from] std::io::Error),

    /// The batch was not a JSON array of observation records.
    #[error("malformed observation batch: {0}")]
    Json(#[from] serde_json::Error),
}

/// A raw observation record as the scraper stages it.
///
/// Fields are named rather than positional, and stay loosely typed until
/// [`parse_record`] validates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationRecord {
    /// Route label as shown on the stop page.
    pub line: String,

    /// Timestamp of the scrape in `YYYY-MM-DD HH:MM:SS` form.
    pub observed_at: String,

    /// Countdown in minutes, or the sentinel 999 for "no estimate".
    pub delay_minutes: i64,

    /// Numeric stop code the page was scraped for.
    pub stop_id: i64,
}

/// Validate a raw record into an [`Observation`].
///
/// The sentinel delay is valid input (it becomes an unknown arrival
/// downstream); anything else malformed is a typed error naming the field.
///
/// # Examples
///
/// ```
/// use bus_stats::ingest::{ObservationRecord, parse_record};
///
/// let record = ObservationRecord {
///     line: "2".into(),
///     observed_at: "2018-12-13 08:35:27".into(),
///     delay_minutes: 3,
///     stop_id: 833,
/// };
/// let obs = parse_record(&record).unwrap();
/// assert_eq!(obs.delay_minutes, 3);
/// assert_eq!(obs.observed_at.to_string(), "2018-12-13 08:35");
/// ```
pub fn parse_record(record: &ObservationRecord) -> Result<Observation, IngestError> {
    let line = Line::parse(&record.line).map_err(|source| IngestError::Line {
        value: record.line.clone(),
        source,
    })?;

    let stop_id = u32::try_from(record.stop_id)
        .ok()
        .and_then(|id| StopId::new(id).ok())
        .ok_or_else(|| IngestError::Stop {
            value: record.stop_id,
            line: line.clone(),
        })?;

    let observed_at =
        StopTime::parse(&record.observed_at).map_err(|source| IngestError::Timestamp {
            value: record.observed_at.clone(),
            line: line.clone(),
            stop_id,
            source,
        })?;

    let delay_minutes =
        u32::try_from(record.delay_minutes).map_err(|_| IngestError::Delay {
            value: record.delay_minutes,
            line: line.clone(),
            stop_id,
        })?;

    Ok(Observation {
        line,
        stop_id,
        observed_at,
        delay_minutes,
    })
}

/// Read a JSON array of records from a reader and validate every one.
///
/// Fails on the first malformed record; a batch either ingests completely
/// or not at all.
pub fn read_batch<R: Read>(reader: R) -> Result<Vec<Observation>, IngestError> {
    let records: Vec<ObservationRecord> = serde_json::from_reader(reader)?;
    records.iter().map(parse_record).collect()
}

/// Read and validate a JSON batch file.
pub fn load_batch(path: &Path) -> Result<Vec<Observation>, IngestError> {
    let file = File::open(path)?;
    read_batch(BufReader::new(file))
}

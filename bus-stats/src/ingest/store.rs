//! In-memory observation store with duplicate suppression.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::{ArrivalEvent, Line, Observation, StopId, StopTime};

/// The fields that identify an observation. Two scrapes of the same line at
/// the same stop in the same minute are the same sample.
type RecordKey = (Line, StopId, StopTime);

/// A caller-owned store of unique observations.
///
/// The scraper re-sends overlapping batches, so ingestion has to be
/// idempotent. The store's lifecycle belongs to the caller: create it
/// before a batch run, drain it after; there is no process-wide instance.
///
/// # Examples
///
/// ```
/// use bus_stats::domain::{Line, Observation, StopId, StopTime};
/// use bus_stats::ingest::ObservationStore;
///
/// let obs = Observation {
///     line: Line::parse("2").unwrap(),
///     stop_id: StopId::new(833).unwrap(),
///     observed_at: StopTime::parse("2018-12-13 08:35:00").unwrap(),
///     delay_minutes: 3,
/// };
///
/// let mut store = ObservationStore::new();
/// assert!(store.insert(obs.clone()));
/// assert!(!store.insert(obs)); // same sample again
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ObservationStore {
    seen: HashSet<RecordKey>,
    observations: Vec<Observation>,
}

impl ObservationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one observation. Returns `false` if an observation with the
    /// same identity was already present.
    pub fn insert(&mut self, observation: Observation) -> bool {
        let key = (
            observation.line.clone(),
            observation.stop_id,
            observation.observed_at,
        );
        if !self.seen.insert(key) {
            debug!(
                line = %observation.line,
                stop_id = %observation.stop_id,
                observed_at = %observation.observed_at,
                "skipping duplicate observation"
            );
            return false;
        }
        self.observations.push(observation);
        true
    }

    /// Insert a batch, returning how many observations were new.
    pub fn insert_batch<I>(&mut self, batch: I) -> usize
    where
        I: IntoIterator<Item = Observation>,
    {
        batch
            .into_iter()
            .filter(|obs| self.insert(obs.clone()))
            .count()
    }

    /// Number of distinct observations held.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the store holds nothing.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// The stored observations, in insertion order.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Derive arrival events for every stored observation.
    pub fn arrival_events(&self) -> Vec<ArrivalEvent> {
        self.observations
            .iter()
            .map(ArrivalEvent::from_observation)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(line: &str, timestamp: &str, delay: u32) -> Observation {
        Observation {
            line: Line::parse(line).unwrap(),
            stop_id: StopId::new(833).unwrap(),
            observed_at: StopTime::parse(timestamp).unwrap(),
            delay_minutes: delay,
        }
    }

    #[test]
    fn insert_deduplicates_by_identity() {
        let mut store = ObservationStore::new();

        assert!(store.insert(observation("2", "2018-12-13 08:35:00", 3)));
        assert!(!store.insert(observation("2", "2018-12-13 08:35:00", 3)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn same_minute_different_seconds_is_a_duplicate() {
        let mut store = ObservationStore::new();

        assert!(store.insert(observation("2", "2018-12-13 08:35:01", 3)));
        // Truncation makes this the same identity
        assert!(!store.insert(observation("2", "2018-12-13 08:35:42", 3)));
    }

    #[test]
    fn different_line_or_minute_is_distinct() {
        let mut store = ObservationStore::new();

        assert!(store.insert(observation("2", "2018-12-13 08:35:00", 3)));
        assert!(store.insert(observation("8", "2018-12-13 08:35:00", 3)));
        assert!(store.insert(observation("2", "2018-12-13 08:36:00", 2)));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn insert_batch_reports_new_count() {
        let mut store = ObservationStore::new();
        store.insert(observation("2", "2018-12-13 08:35:00", 3));

        let saved = store.insert_batch(vec![
            observation("2", "2018-12-13 08:35:00", 3), // duplicate
            observation("2", "2018-12-13 08:37:00", 1),
            observation("8", "2018-12-13 08:35:00", 5),
        ]);

        assert_eq!(saved, 2);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn arrival_events_cover_all_observations() {
        let mut store = ObservationStore::new();
        store.insert(observation("2", "2018-12-13 08:35:00", 3));
        store.insert(observation("2", "2018-12-13 08:40:00", crate::domain::SENTINEL_DELAY));

        let events = store.arrival_events();
        assert_eq!(events.len(), 2);
        assert!(events[0].is_known());
        assert!(!events[1].is_known());
    }

    #[test]
    fn empty_store() {
        let store = ObservationStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.arrival_events().is_empty());
    }
}

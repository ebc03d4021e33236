//! Temporal clustering of arrival events.
//!
//! The scraper produces a burst of near-duplicate events for every real bus
//! arrival. This module partitions a single (line, stop) group of events
//! into clusters of temporally close events and reduces each cluster to one
//! representative, giving one event per physical arrival.
//!
//! Distance during cluster growth is measured against the cluster's
//! *anchor* (its first member), not the previous member. A cluster can
//! therefore only grow while staying within `epsilon` of where it started,
//! which bounds its width, but it can still absorb events whose pairwise
//! gaps exceed `epsilon` individually. That anchor-relative policy is the
//! documented behavior, not chained clustering.

use tracing::debug;

use crate::domain::{ArrivalEvent, Line, StopId, UnknownArrival};

/// Error from clustering a malformed event group.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClusterError {
    /// An event with no finite arrival reached the clusterer; sentinel
    /// delays must be filtered out first.
    #[error("cannot cluster: {0}")]
    UnknownArrival(#[from] UnknownArrival),

    /// The input mixes more than one (line, stop) group.
    #[error(
        "cannot cluster line {line} at stop {stop_id} together with \
         line {expected_line} at stop {expected_stop}"
    )]
    MixedGroup {
        line: Line,
        stop_id: StopId,
        expected_line: Line,
        expected_stop: StopId,
    },
}

/// Default selector: the cluster member with the latest time of day.
///
/// The scraper keeps reporting a bus until it actually arrives, so the last
/// observation of a burst is the closest to the real arrival instant.
///
/// # Panics
///
/// Panics if the cluster is empty; `partition` never produces an empty
/// cluster.
pub fn latest_arrival(cluster: &[ArrivalEvent]) -> &ArrivalEvent {
    cluster
        .iter()
        .max_by_key(|e| e.sort_key())
        .expect("selector requires a non-empty cluster")
}

/// Partition a single (line, stop) group of events into temporal clusters.
///
/// Events are sorted by `(date, time of day)` and scanned left to right.
/// The current cluster is anchored at the first unconsumed event; each
/// following event joins while its time-of-day distance to the anchor is
/// strictly less than `epsilon` minutes. The first event at `>= epsilon`
/// from the anchor closes the cluster and anchors the next one.
///
/// Every input event lands in exactly one cluster, clusters are non-empty,
/// and their concatenation is the sorted input. With `epsilon <= 0` every
/// event is its own cluster: an anchor always belongs to the cluster it
/// opens.
///
/// Fails fast if any event has an unknown arrival or belongs to a different
/// (line, stop) group than the first.
pub fn partition(
    events: &[ArrivalEvent],
    epsilon: i64,
) -> Result<Vec<Vec<ArrivalEvent>>, ClusterError> {
    let Some(first) = events.first() else {
        return Ok(Vec::new());
    };

    for event in events {
        event.known_time()?;
        if event.line() != first.line() || event.stop_id() != first.stop_id() {
            return Err(ClusterError::MixedGroup {
                line: event.line().clone(),
                stop_id: event.stop_id(),
                expected_line: first.line().clone(),
                expected_stop: first.stop_id(),
            });
        }
    }

    let mut sorted = events.to_vec();
    sorted.sort_by(|a, b| a.order_key().cmp(&b.order_key()));

    let mut clusters = Vec::new();
    let mut i = 0;
    while i < sorted.len() {
        let anchor = sorted[i].clone();
        let mut k = i + 1;
        while k < sorted.len() && i64::from(sorted[k].minute_distance(&anchor)?) < epsilon {
            k += 1;
        }

        let members = sorted[i..k].to_vec();
        debug!(
            size = members.len(),
            anchor = ?anchor,
            "formed cluster"
        );
        clusters.push(members);
        i = k;
    }

    Ok(clusters)
}

/// Collapse a single (line, stop) group of events to one representative
/// event per real arrival.
///
/// Partitions the group with [`partition`] and applies `selector` to each
/// cluster. The selector receives a non-empty cluster and must return a
/// reference to one of its members; [`latest_arrival`] is the default
/// choice. Output is sorted by `(date, time of day)`.
///
/// # Examples
///
/// ```
/// use bus_stats::analysis::{cluster, latest_arrival};
/// use bus_stats::domain::{ArrivalEvent, Line, Observation, StopId, StopTime};
///
/// let event = |hh_mm_ss: &str| {
///     ArrivalEvent::from_observation(&Observation {
///         line: Line::parse("2").unwrap(),
///         stop_id: StopId::new(833).unwrap(),
///         observed_at: StopTime::parse(&format!("2018-12-13 {hh_mm_ss}")).unwrap(),
///         delay_minutes: 0,
///     })
/// };
///
/// // 01:40..01:44 and 01:50 are ten minutes apart: two real arrivals
/// let events = vec![
///     event("01:40:00"),
///     event("01:41:00"),
///     event("01:44:00"),
///     event("01:50:00"),
/// ];
/// let arrivals = cluster(&events, 5, latest_arrival).unwrap();
/// let keys: Vec<u32> = arrivals.iter().filter_map(|e| e.sort_key()).collect();
/// assert_eq!(keys, vec![104, 110]);
/// ```
pub fn cluster<F>(
    events: &[ArrivalEvent],
    epsilon: i64,
    selector: F,
) -> Result<Vec<ArrivalEvent>, ClusterError>
where
    F: Fn(&[ArrivalEvent]) -> &ArrivalEvent,
{
    let mut representatives: Vec<ArrivalEvent> = partition(events, epsilon)?
        .iter()
        .map(|members| selector(members).clone())
        .collect();
    // A cluster may span dates, so selection can disturb the total order.
    representatives.sort_by(|a, b| a.order_key().cmp(&b.order_key()));
    Ok(representatives)
}

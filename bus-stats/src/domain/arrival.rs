//! Predicted arrival events derived from observations.

use chrono::NaiveDate;

use super::{Line, Observation, SENTINEL_DELAY, StopId, StopTime};

/// Error returned when a minute distance is requested against an event
/// whose arrival instant is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("arrival time unknown for line {line} at stop {stop_id}")]
pub struct UnknownArrival {
    line: Line,
    stop_id: StopId,
}

/// A predicted arrival instant, or the explicit absence of one.
///
/// An observation with the sentinel countdown maps to `Unknown`; it never
/// maps to a made-up instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrival {
    /// The bus is predicted to arrive at this instant.
    At(StopTime),
    /// The stop page had no usable estimate.
    Unknown,
}

/// An observation converted to a predicted absolute arrival.
///
/// The arrival instant is `observed_at + delay_minutes`. Events are
/// immutable values; clustering and comparison copy them freely.
///
/// # Examples
///
/// ```
/// use bus_stats::domain::{Arrival, ArrivalEvent, Line, Observation, StopId, StopTime};
///
/// let obs = Observation {
///     line: Line::parse("2").unwrap(),
///     stop_id: StopId::new(833).unwrap(),
///     observed_at: StopTime::parse("2018-12-13 08:30:00").unwrap(),
///     delay_minutes: 5,
/// };
/// let event = ArrivalEvent::from_observation(&obs);
/// let Arrival::At(at) = event.arrival() else { panic!() };
/// assert_eq!(at.to_string(), "2018-12-13 08:35");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrivalEvent {
    line: Line,
    stop_id: StopId,
    arrival: Arrival,
}

impl ArrivalEvent {
    /// Create an event directly from its parts.
    pub fn new(line: Line, stop_id: StopId, arrival: Arrival) -> Self {
        Self {
            line,
            stop_id,
            arrival,
        }
    }

    /// Derive the predicted arrival from a raw observation.
    ///
    /// A sentinel countdown yields `Arrival::Unknown`, as does the
    /// (practically unreachable) case of the arrival overflowing chrono's
    /// date range.
    pub fn from_observation(observation: &Observation) -> Self {
        let arrival = match observation.delay_minutes {
            SENTINEL_DELAY => Arrival::Unknown,
            delay => observation
                .observed_at
                .plus_minutes(i64::from(delay))
                .map_or(Arrival::Unknown, Arrival::At),
        };

        Self {
            line: observation.line.clone(),
            stop_id: observation.stop_id,
            arrival,
        }
    }

    /// The bus line this event belongs to.
    pub fn line(&self) -> &Line {
        &self.line
    }

    /// The stop this event belongs to.
    pub fn stop_id(&self) -> StopId {
        self.stop_id
    }

    /// The predicted arrival.
    pub fn arrival(&self) -> Arrival {
        self.arrival
    }

    /// Whether a finite arrival instant is known.
    pub fn is_known(&self) -> bool {
        matches!(self.arrival, Arrival::At(_))
    }

    /// The arrival instant, if known.
    pub fn time(&self) -> Option<StopTime> {
        match self.arrival {
            Arrival::At(t) => Some(t),
            Arrival::Unknown => None,
        }
    }

    /// The arrival instant, or a typed error identifying the event.
    pub fn known_time(&self) -> Result<StopTime, UnknownArrival> {
        self.time().ok_or_else(|| self.unknown_arrival())
    }

    /// The arrival's calendar date, if known.
    pub fn date(&self) -> Option<NaiveDate> {
        self.time().map(|t| t.date())
    }

    /// Minutes since midnight of the arrival, if known.
    pub fn sort_key(&self) -> Option<u32> {
        self.time().map(|t| t.sort_key())
    }

    /// The total order events are clustered in: date first, then time of day.
    pub fn order_key(&self) -> Option<(NaiveDate, u32)> {
        self.time().map(|t| (t.date(), t.sort_key()))
    }

    /// Absolute minute difference between this event's and `other`'s
    /// time of day.
    ///
    /// Fails if either side has no known arrival; a distance against an
    /// unknown arrival would be a meaningless number, so it is refused
    /// rather than invented.
    pub fn minute_distance(&self, other: &ArrivalEvent) -> Result<u32, UnknownArrival> {
        let a = self.known_time()?.sort_key();
        let b = other.known_time()?.sort_key();
        Ok(a.abs_diff(b))
    }

    fn unknown_arrival(&self) -> UnknownArrival {
        UnknownArrival {
            line: self.line.clone(),
            stop_id: self.stop_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(timestamp: &str, delay: u32) -> ArrivalEvent {
        ArrivalEvent::from_observation(&Observation {
            line: Line::parse("2").unwrap(),
            stop_id: StopId::new(833).unwrap(),
            observed_at: StopTime::parse(timestamp).unwrap(),
            delay_minutes: delay,
        })
    }

    #[test]
    fn arrival_is_observation_plus_delay() {
        let e = event("2018-12-13 08:30:00", 7);
        assert_eq!(e.time().unwrap().to_string(), "2018-12-13 08:37");
        assert_eq!(e.sort_key(), Some(8 * 60 + 37));
    }

    #[test]
    fn zero_delay_arrives_at_observation_time() {
        let e = event("2018-12-13 08:30:00", 0);
        assert_eq!(e.time().unwrap().to_string(), "2018-12-13 08:30");
    }

    #[test]
    fn delay_crosses_midnight() {
        let e = event("2018-12-13 23:55:00", 10);
        let at = e.time().unwrap();
        assert_eq!(at.to_string(), "2018-12-14 00:05");
        assert_eq!(e.date().unwrap(), at.date());
    }

    #[test]
    fn sentinel_maps_to_unknown() {
        let e = event("2018-12-13 08:30:00", SENTINEL_DELAY);
        assert_eq!(e.arrival(), Arrival::Unknown);
        assert!(!e.is_known());
        assert_eq!(e.time(), None);
        assert_eq!(e.sort_key(), None);
        assert_eq!(e.order_key(), None);
    }

    #[test]
    fn distance_between_known_events() {
        let a = event("2018-12-13 08:30:00", 0);
        let b = event("2018-12-13 08:34:00", 0);

        assert_eq!(a.minute_distance(&b).unwrap(), 4);
        assert_eq!(b.minute_distance(&a).unwrap(), 4);
        assert_eq!(a.minute_distance(&a).unwrap(), 0);
    }

    #[test]
    fn distance_against_unknown_fails() {
        let known = event("2018-12-13 08:30:00", 0);
        let unknown = event("2018-12-13 08:30:00", SENTINEL_DELAY);

        let err = known.minute_distance(&unknown).unwrap_err();
        assert_eq!(err.to_string(), "arrival time unknown for line 2 at stop 833");
        assert!(unknown.minute_distance(&known).is_err());
    }

    #[test]
    fn distance_ignores_dates() {
        // Same time of day on different dates: distance is measured on the
        // time-of-day key only.
        let a = event("2018-12-13 08:30:00", 0);
        let b = event("2018-12-14 08:32:00", 0);
        assert_eq!(a.minute_distance(&b).unwrap(), 2);
    }
}

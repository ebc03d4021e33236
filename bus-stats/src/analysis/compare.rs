//! Per-day comparison of two lines' arrivals at a shared stop.
//!
//! Consumes the clustered, one-event-per-arrival sequences produced by
//! [`cluster`](fn@super::cluster) and classifies each calendar date: did
//! the target line arrive before the other one?

use std::collections::{BTreeMap, BTreeSet, btree_map::Entry};

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, warn};

use crate::domain::{Arrival, ArrivalEvent, Line};

use super::config::TimeWindow;
use super::report::ComparisonReport;

/// Classification of one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayOutcome {
    /// The target line arrived strictly earlier: the commuter caught it.
    Caught,
    /// The other line arrived strictly earlier.
    Missed,
    /// Both lines arrived at the same minute.
    Tie,
    /// One of the lines has no data for this date; the date is excluded
    /// from the probability denominator.
    MissingData,
}

/// One date's arrival times and classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayResult {
    /// Target line's arrival time of day, if it has data for the date.
    pub target: Option<NaiveTime>,
    /// Other line's arrival time of day, if it has data for the date.
    pub other: Option<NaiveTime>,
    /// The classification derived from the two times.
    pub outcome: DayOutcome,
}

/// Classify, per calendar date, which of two lines arrived first.
///
/// Both event sequences should already be clustered representatives for a
/// shared stop. An optional window restricts the comparison to the part of
/// the day it is meaningful in. Events with unknown arrivals never reach
/// the comparison.
///
/// Clustering upstream should leave at most one event per date; if a
/// duplicate still appears, the later time of day wins and a warning is
/// logged. Dates where either line is missing are classified as
/// [`DayOutcome::MissingData`] and excluded from the probability.
pub fn compare(
    target_line: &Line,
    target_events: &[ArrivalEvent],
    other_line: &Line,
    other_events: &[ArrivalEvent],
    window: Option<&TimeWindow>,
) -> ComparisonReport {
    let target_times = arrival_times(target_line, target_events, window);
    let other_times = arrival_times(other_line, other_events, window);

    let dates: BTreeSet<NaiveDate> = target_times
        .keys()
        .chain(other_times.keys())
        .copied()
        .collect();

    let mut days = BTreeMap::new();
    for date in dates {
        let target = target_times.get(&date).copied();
        let other = other_times.get(&date).copied();

        let outcome = match (target, other) {
            (Some(t), Some(o)) => {
                if t < o {
                    DayOutcome::Caught
                } else if t > o {
                    DayOutcome::Missed
                } else {
                    DayOutcome::Tie
                }
            }
            (None, _) => {
                debug!(line = %target_line, %date, "missing data for date");
                DayOutcome::MissingData
            }
            (_, None) => {
                debug!(line = %other_line, %date, "missing data for date");
                DayOutcome::MissingData
            }
        };

        days.insert(
            date,
            DayResult {
                target,
                other,
                outcome,
            },
        );
    }

    ComparisonReport::new(target_line.clone(), other_line.clone(), days)
}

/// Collapse a line's representative events into one time of day per date.
fn arrival_times(
    line: &Line,
    events: &[ArrivalEvent],
    window: Option<&TimeWindow>,
) -> BTreeMap<NaiveDate, NaiveTime> {
    let mut times = BTreeMap::new();

    for event in events {
        let Arrival::At(at) = event.arrival() else {
            continue;
        };
        if window.is_some_and(|w| !w.contains(at.time())) {
            continue;
        }

        match times.entry(at.date()) {
            Entry::Vacant(entry) => {
                entry.insert(at.time());
            }
            Entry::Occupied(mut entry) => {
                // Clustering should have collapsed these; recover by
                // keeping the later arrival, like the cluster selector does.
                let kept = (*entry.get()).max(at.time());
                warn!(
                    line = %line,
                    date = %at.date(),
                    existing = %entry.get(),
                    new = %at.time(),
                    kept = %kept,
                    "duplicate arrival for date after clustering"
                );
                entry.insert(kept);
            }
        }
    }

    times
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Arrival, Line, SENTINEL_DELAY, StopId, StopTime};

    fn line(s: &str) -> Line {
        Line::parse(s).unwrap()
    }

    fn event(l: &str, timestamp: &str) -> ArrivalEvent {
        ArrivalEvent::new(
            line(l),
            StopId::new(833).unwrap(),
            Arrival::At(StopTime::parse(timestamp).unwrap()),
        )
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn classifies_each_date() {
        // Target faster on the 13th, slower on the 14th, tied on the 15th.
        let target = vec![
            event("2", "2018-12-13 08:40:00"),
            event("2", "2018-12-14 08:45:00"),
            event("2", "2018-12-15 08:42:00"),
        ];
        let other = vec![
            event("8", "2018-12-13 08:43:00"),
            event("8", "2018-12-14 08:41:00"),
            event("8", "2018-12-15 08:42:00"),
        ];

        let report = compare(&line("2"), &target, &line("8"), &other, None);

        assert_eq!(report.caught(), 1);
        assert_eq!(report.missed(), 1);
        assert_eq!(report.ties(), 1);
        assert_eq!(report.probability(), Some(50.0));

        let outcomes: Vec<DayOutcome> =
            report.days().map(|(_, day)| day.outcome).collect();
        assert_eq!(
            outcomes,
            vec![DayOutcome::Caught, DayOutcome::Missed, DayOutcome::Tie]
        );
    }

    #[test]
    fn missing_data_excluded_from_denominator() {
        let target = vec![
            event("2", "2018-12-13 08:40:00"),
            event("2", "2018-12-14 08:40:00"),
        ];
        let other = vec![event("8", "2018-12-13 08:43:00")];

        let report = compare(&line("2"), &target, &line("8"), &other, None);

        assert_eq!(report.caught(), 1);
        assert_eq!(report.missing(), 1);
        assert_eq!(report.probability(), Some(100.0));

        let day = report.days().find(|(date, _)| {
            *date == NaiveDate::from_ymd_opt(2018, 12, 14).unwrap()
        });
        let (_, result) = day.unwrap();
        assert_eq!(result.outcome, DayOutcome::MissingData);
        assert_eq!(result.target, Some(time(8, 40)));
        assert_eq!(result.other, None);
    }

    #[test]
    fn disjoint_dates_mean_no_comparable_data() {
        let target = vec![event("2", "2018-12-13 08:40:00")];
        let other = vec![event("8", "2018-12-14 08:43:00")];

        let report = compare(&line("2"), &target, &line("8"), &other, None);

        assert_eq!(report.missing(), 2);
        assert_eq!(report.probability(), None);
        assert!(
            report
                .days()
                .all(|(_, day)| day.outcome == DayOutcome::MissingData)
        );
    }

    #[test]
    fn empty_input_means_no_comparable_data() {
        let report = compare(&line("2"), &[], &line("8"), &[], None);
        assert_eq!(report.days().count(), 0);
        assert_eq!(report.probability(), None);
    }

    #[test]
    fn duplicate_date_keeps_later_time() {
        let target = vec![
            event("2", "2018-12-13 08:40:00"),
            event("2", "2018-12-13 08:38:00"),
        ];
        let other = vec![event("8", "2018-12-13 08:39:00")];

        let report = compare(&line("2"), &target, &line("8"), &other, None);

        // 08:40 wins over 08:38, so the target arrived after the other line.
        assert_eq!(report.missed(), 1);
        let (_, day) = report.days().next().unwrap();
        assert_eq!(day.target, Some(time(8, 40)));
    }

    #[test]
    fn window_excludes_events_outside_it() {
        let window = TimeWindow::new(time(8, 35), time(8, 50)).unwrap();
        let target = vec![
            event("2", "2018-12-13 08:40:00"),
            // Next day's arrival is outside the commuting window
            event("2", "2018-12-14 09:15:00"),
        ];
        let other = vec![
            event("8", "2018-12-13 08:43:00"),
            event("8", "2018-12-14 08:43:00"),
        ];

        let report = compare(&line("2"), &target, &line("8"), &other, Some(&window));

        assert_eq!(report.caught(), 1);
        assert_eq!(report.missing(), 1);
    }

    #[test]
    fn unknown_arrivals_never_reach_comparison() {
        let target = vec![
            event("2", "2018-12-13 08:40:00"),
            ArrivalEvent::from_observation(&crate::domain::Observation {
                line: line("2"),
                stop_id: StopId::new(833).unwrap(),
                observed_at: StopTime::parse("2018-12-13 08:41:00").unwrap(),
                delay_minutes: SENTINEL_DELAY,
            }),
        ];
        let other = vec![event("8", "2018-12-13 08:43:00")];

        let report = compare(&line("2"), &target, &line("8"), &other, None);
        assert_eq!(report.caught(), 1);
        let (_, day) = report.days().next().unwrap();
        assert_eq!(day.target, Some(time(8, 40)));
    }

    #[test]
    fn probability_is_within_bounds() {
        let target = vec![
            event("2", "2018-12-13 08:40:00"),
            event("2", "2018-12-14 08:45:00"),
        ];
        let other = vec![
            event("8", "2018-12-13 08:43:00"),
            event("8", "2018-12-14 08:41:00"),
        ];

        let report = compare(&line("2"), &target, &line("8"), &other, None);
        let p = report.probability().unwrap();
        assert!((0.0..=100.0).contains(&p));
        assert_eq!(p, 50.0);
    }
}

//! Event filters applied before clustering and comparison.
//!
//! All filters are pure: they take a slice and return a new vector, leaving
//! the input untouched.

use crate::domain::{ArrivalEvent, Line, StopId};

use super::config::TimeWindow;

/// Keep only events of the given line.
pub fn by_line(events: &[ArrivalEvent], line: &Line) -> Vec<ArrivalEvent> {
    events.iter().filter(|e| e.line() == line).cloned().collect()
}

/// Keep only events at the given stop.
pub fn by_stop(events: &[ArrivalEvent], stop_id: StopId) -> Vec<ArrivalEvent> {
    events
        .iter()
        .filter(|e| e.stop_id() == stop_id)
        .cloned()
        .collect()
}

/// Keep only events whose arrival time of day falls inside the window.
///
/// Events with an unknown arrival have no time of day and are dropped.
pub fn by_window(events: &[ArrivalEvent], window: &TimeWindow) -> Vec<ArrivalEvent> {
    events
        .iter()
        .filter(|e| e.time().is_some_and(|t| window.contains(t.time())))
        .cloned()
        .collect()
}

/// Keep only events with a finite arrival instant.
///
/// Sentinel-delay observations produce unknown arrivals; they cannot take
/// part in distance comparisons and must be excluded before clustering.
pub fn known_arrivals(events: &[ArrivalEvent]) -> Vec<ArrivalEvent> {
    events.iter().filter(|e| e.is_known()).cloned().collect()
}

/// The combined pre-clustering filter: one line, one stop, known arrivals.
pub fn for_group(events: &[ArrivalEvent], line: &Line, stop_id: StopId) -> Vec<ArrivalEvent> {
    events
        .iter()
        .filter(|e| e.line() == line && e.stop_id() == stop_id && e.is_known())
        .cloned()
        .collect()
}

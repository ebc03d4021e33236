//! Raw scrape observations.

use super::{Line, StopId, StopTime};

/// Countdown value the stop page shows when it has no usable estimate.
///
/// The page renders "+" once a bus is more than a page-worth of minutes away;
/// the scraper stores that as 999. It must never be treated as a real
/// countdown.
pub const SENTINEL_DELAY: u32 = 999;

/// One raw scrape sample: a bus line's countdown at a stop at a moment.
///
/// The scraper polls the stop page every few minutes, so one physical
/// arrival produces a burst of observations with slightly different
/// countdowns. Collapsing those bursts is the job of
/// [`analysis::cluster`](fn@crate::analysis::cluster).
///
/// Invariant: `delay_minutes != SENTINEL_DELAY` exactly when a finite
/// arrival instant is computable from this observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Bus line the countdown was shown for.
    pub line: Line,

    /// Stop whose page was scraped.
    pub stop_id: StopId,

    /// When the sample was taken, truncated to whole minutes.
    pub observed_at: StopTime,

    /// Minutes until predicted arrival, or [`SENTINEL_DELAY`].
    pub delay_minutes: u32,
}

impl Observation {
    /// Whether the observation carries a usable countdown.
    pub fn has_estimate(&self) -> bool {
        self.delay_minutes != SENTINEL_DELAY
    }
}

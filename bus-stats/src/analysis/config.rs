//! Analysis configuration.

use chrono::NaiveTime;

/// Error returned when constructing a window whose bounds are reversed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time window: start {start} is after end {end}")]
pub struct InvalidWindow {
    start: NaiveTime,
    end: NaiveTime,
}

/// An inclusive time-of-day window `[start, end]`.
///
/// The comparison is only meaningful during the part of the day the user
/// actually rides the bus, so events outside the window are filtered out
/// before comparing.
///
/// # Examples
///
/// ```
/// use bus_stats::analysis::TimeWindow;
/// use chrono::NaiveTime;
///
/// let start = NaiveTime::from_hms_opt(8, 35, 0).unwrap();
/// let end = NaiveTime::from_hms_opt(8, 50, 0).unwrap();
/// let window = TimeWindow::new(start, end).unwrap();
///
/// assert!(window.contains(start));
/// assert!(window.contains(end));
/// assert!(!window.contains(NaiveTime::from_hms_opt(8, 51, 0).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeWindow {
    /// Create a window; `start` must not be after `end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, InvalidWindow> {
        if start > end {
            return Err(InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Lower bound (inclusive).
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// Upper bound (inclusive).
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Whether a time of day falls inside the window, bounds included.
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time <= self.end
    }
}

/// Parameters for one analysis pass.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Maximum minute gap between a cluster's anchor and any later member.
    pub epsilon_minutes: i64,

    /// Time-of-day window the comparison is restricted to, if any.
    pub window: Option<TimeWindow>,
}

impl AnalysisConfig {
    /// Create a configuration with the given parameters.
    pub fn new(epsilon_minutes: i64, window: Option<TimeWindow>) -> Self {
        Self {
            epsilon_minutes,
            window,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        // The scraper polls roughly every couple of minutes, and the
        // commuting window is the quarter hour before the 08:50 bus.
        let start = NaiveTime::from_hms_opt(8, 35, 0).expect("literal time is valid");
        let end = NaiveTime::from_hms_opt(8, 50, 0).expect("literal time is valid");
        Self {
            epsilon_minutes: 2,
            window: Some(TimeWindow { start, end }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn default_config() {
        let config = AnalysisConfig::default();

        assert_eq!(config.epsilon_minutes, 2);
        let window = config.window.unwrap();
        assert_eq!(window.start(), time(8, 35));
        assert_eq!(window.end(), time(8, 50));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let window = TimeWindow::new(time(8, 35), time(8, 50)).unwrap();

        assert!(window.contains(time(8, 35)));
        assert!(window.contains(time(8, 42)));
        assert!(window.contains(time(8, 50)));
        assert!(!window.contains(time(8, 34)));
        assert!(!window.contains(time(8, 51)));
    }

    #[test]
    fn degenerate_window_is_a_single_minute() {
        let window = TimeWindow::new(time(9, 0), time(9, 0)).unwrap();
        assert!(window.contains(time(9, 0)));
        assert!(!window.contains(time(9, 1)));
    }

    #[test]
    fn reversed_window_rejected() {
        assert!(TimeWindow::new(time(9, 0), time(8, 0)).is_err());
    }
}

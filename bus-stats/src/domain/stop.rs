//! Bus stop identifier.

use std::fmt;

/// Error returned when constructing an invalid stop id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// A validated bus stop number.
///
/// Stop pages are addressed by a positive numeric code, so zero is rejected.
///
/// # Examples
///
/// ```
/// use bus_stats::domain::StopId;
///
/// let stop = StopId::new(833).unwrap();
/// assert_eq!(stop.as_u32(), 833);
///
/// assert!(StopId::new(0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(u32);

impl StopId {
    /// Create a stop id from a positive number.
    pub fn new(id: u32) -> Result<Self, InvalidStopId> {
        if id == 0 {
            return Err(InvalidStopId {
                reason: "must be a positive number",
            });
        }
        Ok(StopId(id))
    }

    /// Returns the numeric stop code.
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

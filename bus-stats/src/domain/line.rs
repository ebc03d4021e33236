//! Bus line identifier.

use std::fmt;

/// Error returned when parsing an invalid line identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid line identifier: {reason}")]
pub struct InvalidLine {
    reason: &'static str,
}

/// A validated bus line identifier.
///
/// Lines are route labels, not numbers: "2" and "8" are the common case, but
/// networks also run lettered routes like "C1", so the identifier is kept in
/// string form and compared as text.
///
/// # Examples
///
/// ```
/// use bus_stats::domain::Line;
///
/// let line = Line::parse("2").unwrap();
/// assert_eq!(line.as_str(), "2");
///
/// // Lettered routes are fine
/// assert!(Line::parse("C1").is_ok());
///
/// // Empty or padded input is rejected
/// assert!(Line::parse("").is_err());
/// assert!(Line::parse(" 2").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Line(String);

impl Line {
    /// Parse a line identifier from a string.
    ///
    /// The input must be non-empty ASCII alphanumeric text.
    pub fn parse(s: &str) -> Result<Self, InvalidLine> {
        if s.is_empty() {
            return Err(InvalidLine {
                reason: "must not be empty",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(InvalidLine {
                reason: "must be ASCII letters and digits only",
            });
        }

        Ok(Line(s.to_string()))
    }

    /// Returns the line identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line({})", self.0)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//! Bus arrival statistics for a two-line commute.
//!
//! A scraper polls a transit-stop status page every few minutes, so a single
//! real bus arrival shows up as a burst of near-duplicate observations. This
//! crate collapses that noisy stream into one arrival per (line, day) and
//! answers the recurring question: on days when two lines serve a shared
//! stop, which one arrives first?

pub mod analysis;
pub mod domain;
pub mod ingest;

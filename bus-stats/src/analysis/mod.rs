//! The analysis core: cluster noisy observations, then compare two lines.
//!
//! Both passes are pure, synchronous transformations over in-memory event
//! sequences. A typical run filters the dataset to one (line, stop) group,
//! clusters it to one event per real arrival, does the same for the second
//! line, and feeds both into [`compare`].

mod cluster;
mod compare;
mod config;
pub mod filter;
mod report;

pub use cluster::{ClusterError, cluster, latest_arrival, partition};
pub use compare::{DayOutcome, DayResult, compare};
pub use config::{AnalysisConfig, InvalidWindow, TimeWindow};
pub use report::ComparisonReport;

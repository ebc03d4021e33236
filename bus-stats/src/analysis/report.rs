//! Comparison results and their textual summary.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use crate::domain::Line;

use super::compare::{DayOutcome, DayResult};

/// Per-date classifications plus the aggregate catch probability.
///
/// Built by [`compare`](fn@super::compare); consumable by any reporting or
/// export collaborator. The per-date table iterates in date order.
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    target_line: Line,
    other_line: Line,
    days: BTreeMap<NaiveDate, DayResult>,
    caught: usize,
    missed: usize,
    ties: usize,
    missing: usize,
}

impl ComparisonReport {
    /// Assemble a report from the per-date classification table.
    pub(super) fn new(
        target_line: Line,
        other_line: Line,
        days: BTreeMap<NaiveDate, DayResult>,
    ) -> Self {
        let mut caught = 0;
        let mut missed = 0;
        let mut ties = 0;
        let mut missing = 0;
        for day in days.values() {
            match day.outcome {
                DayOutcome::Caught => caught += 1,
                DayOutcome::Missed => missed += 1,
                DayOutcome::Tie => ties += 1,
                DayOutcome::MissingData => missing += 1,
            }
        }

        Self {
            target_line,
            other_line,
            days,
            caught,
            missed,
            ties,
            missing,
        }
    }

    /// The line whose catch probability is being estimated.
    pub fn target_line(&self) -> &Line {
        &self.target_line
    }

    /// The line it is compared against.
    pub fn other_line(&self) -> &Line {
        &self.other_line
    }

    /// Per-date results in date order.
    pub fn days(&self) -> impl Iterator<Item = (NaiveDate, &DayResult)> {
        self.days.iter().map(|(date, day)| (*date, day))
    }

    /// Days the target line arrived strictly first.
    pub fn caught(&self) -> usize {
        self.caught
    }

    /// Days the other line arrived strictly first.
    pub fn missed(&self) -> usize {
        self.missed
    }

    /// Days both lines arrived at the same minute.
    pub fn ties(&self) -> usize {
        self.ties
    }

    /// Days excluded because one line had no data.
    pub fn missing(&self) -> usize {
        self.missing
    }

    /// Days that enter the probability denominator.
    pub fn comparable_days(&self) -> usize {
        self.caught + self.missed + self.ties
    }

    /// Aggregate catch probability as a percentage in `[0, 100]`.
    ///
    /// A tie counts as half a catch. Returns `None` when no date has data
    /// for both lines: "no comparable data" is an explicit result, not a
    /// division error.
    pub fn probability(&self) -> Option<f64> {
        let denominator = self.comparable_days();
        if denominator == 0 {
            return None;
        }
        Some((self.caught as f64 + 0.5 * self.ties as f64) * 100.0 / denominator as f64)
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Line {} vs line {} ({} days compared, {} without data)",
            self.target_line,
            self.other_line,
            self.comparable_days(),
            self.missing
        )?;
        writeln!(f, "Caught:       {}", self.caught)?;
        writeln!(f, "Missed:       {}", self.missed)?;
        writeln!(f, "Tie:          {}", self.ties)?;
        writeln!(f, "-------------------------------")?;
        match self.probability() {
            Some(p) => write!(f, "Probability:  {p:.2} %"),
            None => write!(f, "Probability:  no data to compare"),
        }
    }
}

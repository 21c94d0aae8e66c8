/// Result of one experiment: the merged histogram plus a breakdown by
/// error configuration.
use super::histogram::Histogram;
use crate::error::Result;
use crate::qec::{CorrectionScheme, ErrorAssignment};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub scheme: CorrectionScheme,
    /// Shots drawn per run.
    pub shots: u64,
    /// Runs recorded, counting repeats of the same assignment.
    pub runs: usize,
    pub counts: Histogram,
    /// Histograms keyed by the `[(s1, e1), (s2, e2)]` form of each assignment.
    pub by_error: BTreeMap<String, Histogram>,
}

/// File layout written with `--details`.
#[derive(Serialize)]
struct Details<'a> {
    counts: &'a Histogram,
    by_error: &'a BTreeMap<String, Histogram>,
}

impl RunReport {
    pub fn new(scheme: CorrectionScheme, shots: u64) -> Self {
        Self {
            scheme,
            shots,
            runs: 0,
            counts: Histogram::new(),
            by_error: BTreeMap::new(),
        }
    }

    /// Add the shots of one run.
    pub fn record(&mut self, assignment: &ErrorAssignment, histogram: &Histogram) {
        self.runs += 1;
        self.counts.merge(histogram);
        self.by_error
            .entry(assignment.to_string())
            .or_default()
            .merge(histogram);
    }

    /// Number of distinct assignments recorded.
    pub fn configurations(&self) -> usize {
        self.by_error.len()
    }

    /// Write the histogram as JSON; with `details`, wrap it together with
    /// the per-error breakdown.
    pub fn write_json<W: Write>(&self, writer: W, details: bool) -> Result<()> {
        if details {
            let body = Details { counts: &self.counts, by_error: &self.by_error };
            serde_json::to_writer_pretty(writer, &body)?;
        } else {
            serde_json::to_writer_pretty(writer, &self.counts)?;
        }
        Ok(())
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: {} run(s) over {} configuration(s), {} shots each",
            self.scheme,
            self.runs,
            self.configurations(),
            self.shots
        )?;
        write!(f, "{}", self.counts)
    }
}

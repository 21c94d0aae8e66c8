/// Measurement histograms.
///
/// A [`Histogram`] maps a measured bitstring to the number of shots that
/// produced it. Histograms from independent runs combine by plain summation;
/// no weighting is applied.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Width of the widest bar in the text rendering.
const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Histogram {
    counts: BTreeMap<String, u64>,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` shots of `outcome`.
    pub fn record(&mut self, outcome: impl Into<String>, count: u64) {
        *self.counts.entry(outcome.into()).or_insert(0) += count;
    }

    /// Sum `other` into `self`.
    pub fn merge(&mut self, other: &Histogram) {
        for (outcome, count) in &other.counts {
            self.record(outcome.clone(), *count);
        }
    }

    /// Shots recorded for `outcome`.
    pub fn get(&self, outcome: &str) -> u64 {
        self.counts.get(outcome).copied().unwrap_or(0)
    }

    /// Total shots recorded.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Outcomes and counts in bitstring order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, u64)> for Histogram {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut histogram = Histogram::new();
        for (outcome, count) in iter {
            histogram.record(outcome, count);
        }
        histogram
    }
}

/// Text bar chart, one line per outcome.
impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let max = self.counts.values().copied().max().unwrap_or(0);
        let total = self.total();
        for (outcome, &count) in &self.counts {
            let bar = if max == 0 {
                0
            } else {
                ((count as f64 / max as f64) * BAR_WIDTH as f64).round() as usize
            };
            writeln!(
                f,
                "  |{outcome}⟩  {count:>9}  {:>6.2}%  {}",
                100.0 * count as f64 / total.max(1) as f64,
                "█".repeat(bar)
            )?;
        }
        write!(f, "  total  {total:>9}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_total() {
        let mut h = Histogram::new();
        h.record("00", 600);
        h.record("11", 400);
        h.record("00", 1);
        assert_eq!(h.get("00"), 601);
        assert_eq!(h.get("01"), 0);
        assert_eq!(h.total(), 1001);
        assert_eq!(h.len(), 2);
    }

    #[test]
    fn test_merge_sums_counts() {
        let mut a: Histogram = [("00".to_string(), 1000)].into_iter().collect();
        let b: Histogram = [("00".to_string(), 500), ("10".to_string(), 500)]
            .into_iter()
            .collect();
        a.merge(&b);
        assert_eq!(a.get("00"), 1500);
        assert_eq!(a.get("10"), 500);
        assert_eq!(a.total(), 2000);
    }

    #[test]
    fn test_serializes_as_plain_mapping() {
        let h: Histogram = [("01".to_string(), 2), ("00".to_string(), 7)].into_iter().collect();
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, r#"{"00":7,"01":2}"#);
        let back: Histogram = serde_json::from_str(&json).unwrap();
        assert_eq!(back, h);
    }

    #[test]
    fn test_display_lists_every_outcome() {
        let h: Histogram = [("00".to_string(), 9000)].into_iter().collect();
        let text = h.to_string();
        assert!(text.contains("|00⟩"));
        assert!(text.contains("100.00%"));
        assert!(text.ends_with("total       9000"));
    }
}

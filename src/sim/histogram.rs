//! Per-bin landing counts

use serde::Serialize;

/// Bin counters plus a running total
///
/// `total` only ever grows and always equals the sum of `bins`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramAggregator {
    bins: Vec<u32>,
    total: u32,
}

impl HistogramAggregator {
    /// `bin_count` zeroed bins (at least one)
    pub fn new(bin_count: usize) -> Self {
        Self {
            bins: vec![0; bin_count.max(1)],
            total: 0,
        }
    }

    /// Count a landing. Out-of-range indices go to the nearest edge bin.
    pub fn record(&mut self, bin: usize) {
        let bin = bin.min(self.bins.len() - 1);
        self.bins[bin] = self.bins[bin].saturating_add(1);
        self.total = self.total.saturating_add(1);
    }

    pub fn bins(&self) -> &[u32] {
        &self.bins
    }

    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Largest bin count (0 when empty)
    pub fn max_count(&self) -> u32 {
        self.bins.iter().copied().max().unwrap_or(0)
    }

    /// Bar heights scaled so the fullest bin reaches `max_height`
    pub fn normalized_heights(&self, max_height: u32) -> Vec<u32> {
        let denom = u64::from(self.max_count().max(1));
        self.bins
            .iter()
            .map(|&count| (u64::from(count) * u64::from(max_height) / denom) as u32)
            .collect()
    }
}

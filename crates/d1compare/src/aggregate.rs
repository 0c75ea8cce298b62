use std::collections::BTreeMap;

use crate::classify::Dimension;

/// One bin per (dimension, band). The band index follows the order of
/// `Dimension::band_labels`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BinKey {
    pub dimension: Dimension,
    pub band: usize,
}

impl BinKey {
    pub fn new(dimension: Dimension, band: usize) -> BinKey {
        BinKey { dimension, band }
    }

    pub fn label(self) -> &'static str {
        self.dimension.band_labels()[self.band]
    }
}

/// Running sums for one bin. Never re-read until the final report pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct Bin {
    pub count: u64,
    pub sum: f64,
    pub sumsq: f64,
}

/// Accumulates per-hour differences into every applicable bin. Bins only
/// grow; there is no removal.
#[derive(Debug, Default)]
pub struct Aggregator {
    bins: BTreeMap<BinKey, Bin>,
}

impl Aggregator {
    pub fn new() -> Aggregator {
        Aggregator::default()
    }

    pub fn accumulate(&mut self, key: BinKey, value: f64) {
        let bin = self.bins.entry(key).or_default();
        bin.count += 1;
        bin.sum += value;
        bin.sumsq += value * value;
    }

    pub fn bin(&self, key: BinKey) -> Option<&Bin> {
        self.bins.get(&key)
    }

    /// Folds a partial accumulator in, for callers that aggregate rows in
    /// separate passes and combine at the end.
    pub fn merge(&mut self, other: Aggregator) {
        for (key, partial) in other.bins {
            let bin = self.bins.entry(key).or_default();
            bin.count += partial.count;
            bin.sum += partial.sum;
            bin.sumsq += partial.sumsq;
        }
    }

    pub fn total_samples(&self) -> u64 {
        self.bins.values().map(|b| b.count).sum()
    }
}

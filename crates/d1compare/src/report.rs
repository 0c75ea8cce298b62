use std::io::{self, Write};

use crate::aggregate::{Aggregator, BinKey};
use crate::classify::Dimension;

/// Final statistics for one bin. `std_dev` is None below two samples, where
/// the sample standard deviation is undefined; `mean` is None for an empty
/// bin, which keeps a zero count distinguishable from a computed zero mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinStats {
    pub dimension: Dimension,
    pub band: usize,
    pub count: u64,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
}

impl BinStats {
    pub fn label(&self) -> &'static str {
        self.dimension.band_labels()[self.band]
    }
}

/// Converts every bin's running sums into count, mean and sample standard
/// deviation, ordered by dimension and band as the bands are tabulated.
/// Bins that never received a sample are reported with count 0.
pub fn summarize(aggregator: &Aggregator) -> Vec<BinStats> {
    let mut stats = Vec::new();
    for dimension in Dimension::ALL {
        for band in 0..dimension.band_labels().len() {
            let bin = aggregator
                .bin(BinKey::new(dimension, band))
                .copied()
                .unwrap_or_default();

            let n = bin.count as f64;
            let mean = (bin.count >= 1).then(|| bin.sum / n);
            let std_dev = (bin.count >= 2).then(|| {
                // Guard the radicand against a tiny negative from rounding.
                let variance = (bin.sumsq - bin.sum * bin.sum / n) / (n - 1.0);
                variance.max(0.0).sqrt()
            });

            stats.push(BinStats {
                dimension,
                band,
                count: bin.count,
                mean,
                std_dev,
            });
        }
    }
    stats
}

/// Renders the statistics as a delimited table:
/// dimension, band, count, mean (dB), std (dB).
pub fn write_report<W: Write>(stats: &[BinStats], mut out: W) -> io::Result<()> {
    writeln!(out, "dimension,band,count,mean (dB),std (dB)")?;
    for s in stats {
        write!(out, "{},{},{}", s.dimension.label(), s.label(), s.count)?;
        match s.mean {
            Some(mean) => write!(out, ",{:.4}", mean)?,
            None => write!(out, ",")?,
        }
        match (s.count, s.std_dev) {
            (_, Some(std)) => writeln!(out, ",{:.4}", std)?,
            (0, None) => writeln!(out, ",")?,
            (_, None) => writeln!(out, ",insufficient data")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn stats_for(key: BinKey, values: &[f64]) -> BinStats {
        let mut agg = Aggregator::new();
        for &v in values {
            agg.accumulate(key, v);
        }
        let all = summarize(&agg);
        *all.iter()
            .find(|s| s.dimension == key.dimension && s.band == key.band)
            .unwrap()
    }

    #[test]
    fn mean_and_std_match_hand_computation() {
        let key = BinKey::new(Dimension::Frequency, 0);
        let s = stats_for(key, &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(s.count, 8);
        assert_relative_eq!(s.mean.unwrap(), 5.0);
        // Sample std of this classic set: sqrt(32/7).
        assert_relative_eq!(s.std_dev.unwrap(), (32.0f64 / 7.0).sqrt());
    }

    #[test]
    fn identical_values_have_zero_std() {
        let key = BinKey::new(Dimension::Ssn, 3);
        let s = stats_for(key, &[-6.0, -6.0, -6.0]);
        assert_relative_eq!(s.mean.unwrap(), -6.0);
        assert_relative_eq!(s.std_dev.unwrap(), 0.0);
    }

    #[test]
    fn single_sample_has_mean_but_no_std() {
        let key = BinKey::new(Dimension::Season, 1);
        let s = stats_for(key, &[3.0]);
        assert_eq!(s.count, 1);
        assert_relative_eq!(s.mean.unwrap(), 3.0);
        assert!(s.std_dev.is_none());
    }

    #[test]
    fn empty_bins_are_reported_with_zero_count() {
        let agg = Aggregator::new();
        let all = summarize(&agg);
        // Every band of every dimension is present.
        let expected: usize = Dimension::ALL
            .iter()
            .map(|d| d.band_labels().len())
            .sum();
        assert_eq!(all.len(), expected);
        assert!(all.iter().all(|s| s.count == 0 && s.mean.is_none()));
    }

    #[test]
    fn report_orders_dimensions_then_bands_and_marks_small_bins() {
        let mut agg = Aggregator::new();
        agg.accumulate(BinKey::new(Dimension::Frequency, 1), -5.0);
        let stats = summarize(&agg);

        let mut rendered = Vec::new();
        write_report(&stats, &mut rendered).unwrap();
        let text = String::from_utf8(rendered).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "dimension,band,count,mean (dB),std (dB)");
        // First data row is the first frequency band, empty.
        assert_eq!(lines[1], "Frequency (MHz),<=5,0,,");
        // The n = 1 bin reports its mean and the insufficient-data marker.
        assert_eq!(lines[2], "Frequency (MHz),>5-10,1,-5.0000,insufficient data");
    }
}

//! Box-and-whisker data for reported quality quantiles.
//!
//! The metrics only give five quantiles per position, whereas a box plot is
//! normally summarised from a raw sample. We mock up a 100 element sample per
//! position whose summary reproduces the reported quantiles, and draw the
//! glyph from that summary.

use crate::error::{QcError, Result};
use crate::quality::{QualityTable, Quantile, QuantileScores};
use indexmap::IndexMap;

pub const SAMPLE_SIZE: usize = 100;

/// Number of copies of each quantile's score in a mocked sample
fn weight(quantile: Quantile) -> usize {
    match quantile {
        Quantile::Q10 => 10,
        Quantile::Q25 => 25,
        Quantile::Q50 => 30,
        Quantile::Q75 => 25,
        Quantile::Q90 => 10,
    }
}

/// Mocks up a sample of `SAMPLE_SIZE` scores having the given 10, 25, 50, 75
/// and 90th percentiles. The order of the sample is not meaningful.
///
/// # Errors
///
/// Returns `MissingQuantile` if any of the five quantiles has no score.
pub fn mock_sample(position: &str, scores: &QuantileScores) -> Result<Vec<u32>> {
    let mut sample = Vec::with_capacity(SAMPLE_SIZE);

    for quantile in Quantile::ALL {
        let score = scores.get(quantile).ok_or_else(|| QcError::MissingQuantile {
            position: position.to_string(),
            quantile,
        })?;

        sample.extend(std::iter::repeat(score).take(weight(quantile)));
    }

    Ok(sample)
}

/// Mocks a sample for every position of the table, keeping the position order.
///
/// # Errors
///
/// Returns `EmptyDataset` if the table has no positions, or the first
/// `MissingQuantile` encountered.
pub fn mock_dataset(table: &QualityTable) -> Result<IndexMap<String, Vec<u32>>> {
    if table.is_empty() {
        return Err(QcError::EmptyDataset {
            category: crate::metrics::Category::PositionalQuality.label(),
        });
    }

    table
        .iter()
        .map(|(position, scores)| -> Result<(String, Vec<u32>)> {
            Ok((position.clone(), mock_sample(position, scores)?))
        })
        .collect()
}

/// The five values drawn for one box: whiskers over the full range of the
/// sample, the interquartile box and the median.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoxSummary {
    pub whisker_low: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_high: f64,
}

impl BoxSummary {
    /// Summarises a sample, or `None` if it is empty.
    pub fn from_sample(sample: &[u32]) -> Option<Self> {
        let mut sorted = sample.to_vec();
        sorted.sort_unstable();

        let (first, last) = (*sorted.first()?, *sorted.last()?);

        Some(BoxSummary {
            whisker_low: first as f64,
            q1: percentile_of_sorted(&sorted, 25.0),
            median: percentile_of_sorted(&sorted, 50.0),
            q3: percentile_of_sorted(&sorted, 75.0),
            whisker_high: last as f64,
        })
    }
}

/// Linear interpolation between the closest ranks of a sorted, non-empty slice.
fn percentile_of_sorted(sorted: &[u32], pct: f64) -> f64 {
    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;

    let lo = sorted[lower] as f64;
    let hi = sorted[upper] as f64;
    lo + (hi - lo) * (rank - lower as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(values: [u32; 5]) -> QuantileScores {
        let mut res = QuantileScores::default();
        for (quantile, value) in Quantile::ALL.into_iter().zip(values) {
            res.set(quantile, value);
        }
        res
    }

    #[test]
    fn mocked_sample_has_reported_shape() {
        let sample = mock_sample("1", &scores([20, 25, 30, 35, 40])).unwrap();

        assert_eq!(sample.len(), SAMPLE_SIZE);
        assert!(*sample.iter().min().unwrap() >= 20);
        assert!(*sample.iter().max().unwrap() <= 40);

        let mut sorted = sample.clone();
        sorted.sort_unstable();
        assert_eq!(sorted[SAMPLE_SIZE / 2], 30);
        assert_eq!(percentile_of_sorted(&sorted, 50.0), 30.0);
    }

    #[test]
    fn summary_reproduces_quantiles() {
        let sample = mock_sample("7", &scores([12, 27, 33, 36, 38])).unwrap();
        let summary = BoxSummary::from_sample(&sample).unwrap();

        assert_eq!(
            summary,
            BoxSummary {
                whisker_low: 12.0,
                q1: 27.0,
                median: 33.0,
                q3: 36.0,
                whisker_high: 38.0,
            }
        );
    }

    #[test]
    fn percentile_interpolates_between_ranks() {
        assert_eq!(percentile_of_sorted(&[1, 2, 3, 4], 50.0), 2.5);
        assert_eq!(percentile_of_sorted(&[10], 75.0), 10.0);
        assert!(BoxSummary::from_sample(&[]).is_none());
    }

    #[test]
    fn missing_quantile_is_reported() {
        let mut partial = QuantileScores::default();
        partial.set(Quantile::Q10, 30);
        partial.set(Quantile::Q25, 32);

        match mock_sample("42", &partial).unwrap_err() {
            QcError::MissingQuantile { position, quantile } => {
                assert_eq!(position, "42");
                assert_eq!(quantile, Quantile::Q50);
            }
            other => panic!("expected a missing quantile, got {other:?}"),
        }
    }

    #[test]
    fn dataset_keeps_position_order() {
        let mut table = QualityTable::new();
        for (position, base) in [("3", 30), ("1", 20), ("2", 25)] {
            for quantile in Quantile::ALL {
                table.insert(position, quantile, base + quantile.percent() as u32 / 10);
            }
        }

        let dataset = mock_dataset(&table).unwrap();
        let order: Vec<&str> = dataset.keys().map(|k| k.as_str()).collect();
        assert_eq!(order, vec!["3", "1", "2"]);
        assert!(dataset.values().all(|s| s.len() == SAMPLE_SIZE));
    }

    #[test]
    fn empty_table_is_an_empty_dataset() {
        let err = mock_dataset(&QualityTable::new()).unwrap_err();
        assert!(matches!(
            err,
            QcError::EmptyDataset {
                category: "POSITIONAL QUALITY"
            }
        ));
    }
}

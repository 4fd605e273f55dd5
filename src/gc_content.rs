use crate::error::{QcError, Result};
use crate::metrics::{Category, MetricRow, MetricsReader};
use indexmap::IndexMap;
use itertools::Itertools;

/// Raw read counts by GC percentage, in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GcCounts(IndexMap<u8, u64>);

impl GcCounts {
    /// Sets the count for a GC percentage, replacing any earlier count
    pub fn insert(&mut self, gc: u8, count: u64) {
        self.0.insert(gc, count);
    }

    /// Summed in 128 bits, as 101 bins of `u64` counts cannot overflow it
    pub fn total(&self) -> u128 {
        self.0.values().map(|count| *count as u128).sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Converts counts into percentages of the total number of reads.
    ///
    /// # Errors
    ///
    /// Returns `EmptyDataset` if the total is zero, including when there are
    /// no counts at all.
    pub fn normalize(&self) -> Result<GcDistribution> {
        let total = self.total();
        if total == 0 {
            return Err(QcError::EmptyDataset {
                category: Category::ReadGcContent.label(),
            });
        }

        Ok(GcDistribution(
            self.0
                .iter()
                .map(|(gc, count)| (*gc, (*count as f64 / total as f64) * 100.0))
                .collect(),
        ))
    }
}

/// Percentage of reads by GC percentage, summing to ~100.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GcDistribution(IndexMap<u8, f64>);

impl GcDistribution {
    #[cfg(test)]
    pub fn get(&self, gc: u8) -> Option<f64> {
        self.0.get(&gc).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `(gc, percentage)` points sorted by GC percentage
    pub fn sorted_points(&self) -> Vec<(f64, f64)> {
        self.0
            .iter()
            .sorted_by_key(|(gc, _)| **gc)
            .map(|(gc, pct)| (*gc as f64, *pct))
            .collect()
    }
}

/// Reads the GC percentage from a description such as `45% GC Reads`.
fn parse_gc(row: &MetricRow) -> Result<u8> {
    let bad = || QcError::malformed(row.line, format!("unexpected GC metric `{}`", row.description));

    let (prefix, _) = row.description.split_once('%').ok_or_else(bad)?;
    prefix
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|gc| *gc <= 100)
        .ok_or_else(bad)
}

fn build_counts<I>(rows: I) -> Result<GcCounts>
where
    I: Iterator<Item = Result<MetricRow>>,
{
    let mut counts = GcCounts::default();

    for row in rows {
        let row = row?;
        let count = row.parse_value::<u64>()?;
        counts.insert(parse_gc(&row)?, count);
    }

    Ok(counts)
}

/// Parses `Read1` GC content counts, such as
/// ```text
/// READ GC CONTENT,Read1,45% GC Reads,360933337076
/// READ GC CONTENT,Read1,46% GC Reads,342295545717
/// ```
/// and normalizes them so that they sum to ~100%.
///
/// # Errors
///
/// Returns `IoFailure` if the file cannot be read, `MalformedLine` for a
/// matching row which cannot be parsed, and `EmptyDataset` if there are no
/// reads to normalize by.
pub fn parse_gc_content(path: &str) -> Result<GcDistribution> {
    info!("Reading GC content metrics from {path}");

    let counts = build_counts(MetricsReader::from_path(path, Category::ReadGcContent)?)?;
    debug!("{} GC bins, {} reads in total", counts.len(), counts.total());

    let distribution = counts.normalize()?;
    info!("Normalized read counts over {} GC bins", distribution.len());

    Ok(distribution)
}

use crate::error::{QcError, Result};
use crate::metrics::{Category, MetricRow, MetricsReader};
use indexmap::IndexMap;
use std::fmt;

/// The quality quantiles reported for every read position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quantile {
    Q10,
    Q25,
    Q50,
    Q75,
    Q90,
}

impl Quantile {
    pub const ALL: [Quantile; 5] = [
        Quantile::Q10,
        Quantile::Q25,
        Quantile::Q50,
        Quantile::Q75,
        Quantile::Q90,
    ];

    pub fn percent(self) -> u8 {
        match self {
            Quantile::Q10 => 10,
            Quantile::Q25 => 25,
            Quantile::Q50 => 50,
            Quantile::Q75 => 75,
            Quantile::Q90 => 90,
        }
    }

    pub fn from_percent(percent: u8) -> Option<Self> {
        Quantile::ALL.into_iter().find(|q| q.percent() == percent)
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Quantile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// Quality scores of one read position, one optional slot per quantile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuantileScores([Option<u32>; 5]);

impl QuantileScores {
    pub fn get(&self, quantile: Quantile) -> Option<u32> {
        self.0[quantile.slot()]
    }

    pub fn set(&mut self, quantile: Quantile, score: u32) {
        self.0[quantile.slot()] = Some(score);
    }

    /// The quantiles which have a score, in ascending order
    pub fn present(&self) -> impl Iterator<Item = (Quantile, u32)> + '_ {
        Quantile::ALL
            .into_iter()
            .filter_map(|q| self.get(q).map(|score| (q, score)))
    }
}

impl<const N: usize> From<[(Quantile, u32); N]> for QuantileScores {
    fn from(scores: [(Quantile, u32); N]) -> Self {
        let mut res = QuantileScores::default();
        for (quantile, score) in scores {
            res.set(quantile, score);
        }
        res
    }
}

/// Quality quantiles by read position, in the order positions first appear in the file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QualityTable {
    positions: IndexMap<String, QuantileScores>,
}

impl QualityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a score, creating the position on first sight. A repeated
    /// quantile for the same position replaces the earlier score.
    pub fn insert(&mut self, position: &str, quantile: Quantile, score: u32) {
        self.positions
            .entry(position.to_string())
            .or_default()
            .set(quantile, score);
    }

    #[cfg(test)]
    pub fn get(&self, position: &str) -> Option<&QuantileScores> {
        self.positions.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &QuantileScores)> {
        self.positions.iter()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Splits a description such as `ReadPos 50 10% Quantile QV` into its
/// position label (`50`) and quantile (10%).
fn parse_description(row: &MetricRow) -> Result<(String, Quantile)> {
    let tokens: Vec<&str> = row.description.split_whitespace().collect();

    let (position, quantile) = match tokens.as_slice() {
        [_, position, quantile, ..] => (*position, *quantile),
        _ => {
            return Err(QcError::malformed(
                row.line,
                format!("unexpected quality metric `{}`", row.description),
            ))
        }
    };

    // drop the `%` suffix
    let digits = quantile
        .strip_suffix(|c: char| !c.is_ascii_digit())
        .unwrap_or(quantile);

    let quantile = digits
        .parse::<u8>()
        .ok()
        .and_then(Quantile::from_percent)
        .ok_or_else(|| {
            QcError::malformed(row.line, format!("unsupported quantile `{quantile}`"))
        })?;

    Ok((position.to_string(), quantile))
}

fn build_table<I>(rows: I) -> Result<QualityTable>
where
    I: Iterator<Item = Result<MetricRow>>,
{
    let mut table = QualityTable::new();

    for row in rows {
        let row = row?;
        let score = row.parse_value::<u32>()?;
        let (position, quantile) = parse_description(&row)?;

        table.insert(&position, quantile, score);
    }

    Ok(table)
}

/// Parses `Read1` positional quality quantiles, such as
/// ```text
/// POSITIONAL QUALITY,Read1,ReadPos 50 10% Quantile QV,33
/// POSITIONAL QUALITY,Read1,ReadPos 50 25% Quantile QV,38
/// ```
/// into a table keyed first by read position and then by quantile.
///
/// # Errors
///
/// Returns `IoFailure` if the file cannot be read, and `MalformedLine` for a
/// matching row whose description or value cannot be parsed.
pub fn parse_positional_quality(path: &str) -> Result<QualityTable> {
    info!("Reading positional quality metrics from {path}");

    let table = build_table(MetricsReader::from_path(path, Category::PositionalQuality)?)?;

    for (position, scores) in table.iter() {
        debug!("ReadPos {position}: {:?}", scores.present().collect::<Vec<_>>());
    }

    info!("Found quality quantiles for {} read positions", table.len());
    Ok(table)
}

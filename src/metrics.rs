use crate::error::{QcError, Result};
use csv::{ReaderBuilder, StringRecordsIntoIter};
use std::fmt::Display;
use std::fs::File;
use std::io::Read;
use std::str::FromStr;

/// Only metrics of the first read are plotted.
pub const READ1: &str = "Read1";

/// The metric sections of a DRAGEN-style metrics file that can be charted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Category {
    PositionalQuality,
    ReadGcContent,
}

impl Category {
    /// The exact text of the first column for rows of this category
    pub fn label(&self) -> &'static str {
        match self {
            Category::PositionalQuality => "POSITIONAL QUALITY",
            Category::ReadGcContent => "READ GC CONTENT",
        }
    }
}

/// A single `Read1` row of the requested category.
///
/// # Fields
///
/// * `line` - The 1-based line number in the input, for error reporting
/// * `description` - The third column, e.g. `ReadPos 50 10% Quantile QV`
/// * `value` - The fourth column, unparsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRow {
    pub line: u64,
    pub description: String,
    pub value: String,
}

impl MetricRow {
    /// Parses the value column, reporting failures as a malformed line.
    pub fn parse_value<T>(&self) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.value.parse::<T>().map_err(|e| {
            QcError::malformed(self.line, format!("invalid value `{}`: {e}", self.value))
        })
    }
}

/// Iterates over the rows of one metric category, skipping every row which
/// belongs to another category or another read.
///
/// Rows are split on every comma with no header and no quoting, and may
/// have more than four columns (some sections carry a trailing percentage).
/// The category and read label must match exactly; only the description
/// and value are trimmed. The iterator yields `Some(Err)` on read failures
/// or on matching rows with fewer than four columns; callers are expected to
/// stop at the first error.
pub struct MetricsReader<R: Read> {
    source: String,
    category: Category,
    records: StringRecordsIntoIter<R>,
}

impl MetricsReader<File> {
    pub fn from_path(path: &str, category: Category) -> Result<Self> {
        let file = File::open(path).map_err(|source| QcError::IoFailure {
            path: path.to_string(),
            source,
        })?;

        Ok(Self::new(file, path, category))
    }
}

impl<R: Read> MetricsReader<R> {
    /// Wraps any reader. `source` names the input in error messages.
    pub fn new(reader: R, source: &str, category: Category) -> Self {
        let records = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader)
            .into_records();

        MetricsReader {
            source: source.to_string(),
            category,
            records,
        }
    }
}

impl<R: Read> Iterator for MetricsReader<R> {
    type Item = Result<MetricRow>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(e) => {
                    return Some(Err(QcError::IoFailure {
                        path: self.source.clone(),
                        source: e.into(),
                    }))
                }
            };

            if record.get(0) != Some(self.category.label()) || record.get(1) != Some(READ1) {
                continue;
            }

            let line = record.position().map(|p| p.line()).unwrap_or_default();

            return Some(match (record.get(2), record.get(3)) {
                (Some(description), Some(value)) => Ok(MetricRow {
                    line,
                    description: description.trim().to_string(),
                    value: value.trim().to_string(),
                }),
                _ => Err(QcError::malformed(
                    line,
                    format!("expected 4 fields, found {}", record.len()),
                )),
            });
        }
    }
}

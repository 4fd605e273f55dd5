use crate::quality::Quantile;
use thiserror::Error;

/// Errors produced while reading metric files and shaping them into chart data.
#[derive(Error, Debug)]
pub enum QcError {
    #[error("unable to read {path}")]
    IoFailure {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed metric at line {line}: {reason}")]
    MalformedLine { line: u64, reason: String },

    #[error("read position {position} has no {quantile} quantile")]
    MissingQuantile { position: String, quantile: Quantile },

    #[error("no {category} metrics for Read1 to plot")]
    EmptyDataset { category: &'static str },
}

impl QcError {
    pub fn malformed(line: u64, reason: impl Into<String>) -> Self {
        QcError::MalformedLine {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QcError>;

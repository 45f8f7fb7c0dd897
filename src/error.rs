//! Error types for the exceedence pipeline.

/// Everything that can stop an exceedence run.
#[derive(Debug, thiserror::Error)]
pub enum ExceedenceError {
    #[error("expected date to have the format of YYYY-MM-DD but got {0}")]
    MalformedDate(String),

    #[error("line {line}: row has no column {column}")]
    MissingColumn { line: u64, column: usize },

    #[error("line {line}: expected a number but got {value:?}")]
    InvalidValue { line: u64, value: String },

    #[error("step of {0} is not greater than zero")]
    InvalidStep(f64),

    #[error("insufficient coverage: {full_seasons} full season(s), need at least two")]
    InsufficientCoverage { full_seasons: usize },

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ExceedenceError>;

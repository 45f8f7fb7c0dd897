//! Run configuration for the exceedence calculator.

use std::path::PathBuf;

use crate::error::{ExceedenceError, Result};

/// Sample NOAA daily summary used when no input is given.
pub const DEFAULT_INPUT: &str = "tests/fixtures/3122642.csv";
pub const DEFAULT_DATE_COLUMN: usize = 2;
pub const DEFAULT_DATA_COLUMN: usize = 3;
pub const DEFAULT_LABEL: &str = "Snowfall";
pub const DEFAULT_STEP: f64 = 0.1;

/// Column positions of the two fields the pipeline reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub date: usize,
    pub data: usize,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            date: DEFAULT_DATE_COLUMN,
            data: DEFAULT_DATA_COLUMN,
        }
    }
}

/// How the curves are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Debug, Clone)]
pub struct ExceedenceConfig {
    pub input: PathBuf,
    pub columns: Columns,
    /// Cosmetic; used in report titles.
    pub label: String,
    /// Bucket width of the per-day amount curve.
    pub step: f64,
    pub format: OutputFormat,
}

impl Default for ExceedenceConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            columns: Columns::default(),
            label: DEFAULT_LABEL.to_string(),
            step: DEFAULT_STEP,
            format: OutputFormat::default(),
        }
    }
}

impl ExceedenceConfig {
    /// Rejects settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        // NaN fails this comparison too
        if !(self.step > 0.0) || !self.step.is_finite() {
            return Err(ExceedenceError::InvalidStep(self.step));
        }
        Ok(())
    }

    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }
}

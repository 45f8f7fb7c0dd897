//! CSV ingestion of daily station observations.
//!
//! The first row is a header and is only kept for diagnostics. Every other
//! row contributes one `(date, amount)` pair taken from the configured
//! columns.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use csv::{ReaderBuilder, StringRecord};
use regex::Regex;
use tracing::{debug, info};

use crate::config::Columns;
use crate::error::{ExceedenceError, Result};

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").expect("date pattern is a valid regex")
});

/// Calendar fields of an observation date. Not validated against the
/// calendar; `2021-02-30` is accepted as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObservationDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl ObservationDate {
    /// Parses a `YYYY-M-D` date string, failing with
    /// [`ExceedenceError::MalformedDate`] on anything else.
    pub fn parse(raw: &str) -> Result<Self> {
        let malformed = || ExceedenceError::MalformedDate(raw.to_string());
        let caps = DATE_PATTERN.captures(raw).ok_or_else(malformed)?;

        Ok(Self {
            year: caps[1].parse().map_err(|_| malformed())?,
            month: caps[2].parse().map_err(|_| malformed())?,
            day: caps[3].parse().map_err(|_| malformed())?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Date exactly as it appeared in the file; the table key.
    pub raw_date: String,
    pub date: ObservationDate,
    pub amount: f64,
}

/// Observations keyed by their date string.
///
/// A later row with the same date string replaces the earlier amount but
/// keeps the earlier position, so iteration follows first appearance.
#[derive(Debug, Default)]
pub struct ObservationTable {
    pub headers: Vec<String>,
    observations: Vec<Observation>,
    index: HashMap<String, usize>,
}

impl ObservationTable {
    pub fn insert(&mut self, observation: Observation) {
        match self.index.get(&observation.raw_date) {
            Some(&slot) => self.observations[slot] = observation,
            None => {
                self.index.insert(observation.raw_date.clone(), self.observations.len());
                self.observations.push(observation);
            }
        }
    }

    #[cfg(test)]
    fn get(&self, raw_date: &str) -> Option<&Observation> {
        self.index.get(raw_date).map(|&slot| &self.observations[slot])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Reads observations from an open CSV source.
///
/// # Errors
///
/// Fails on the first row whose date does not look like `YYYY-MM-DD`, whose
/// row is too short for the configured columns, or whose value is not a
/// finite number. An empty value is read as `0.0`.
pub fn parse_observations<R: Read>(reader: R, columns: Columns) -> Result<ObservationTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut table = ObservationTable::default();
    let mut records = rdr.records();

    if let Some(header) = records.next() {
        let header = header?;
        table.headers = header.iter().map(str::to_string).collect();
        info!(
            date_header = header.get(columns.date).unwrap_or(""),
            data_header = header.get(columns.data).unwrap_or(""),
            "Column header labels"
        );
    }

    for record in records {
        let record = record?;
        table.insert(parse_row(&record, columns)?);
    }

    debug!(observations = table.len(), "Observations loaded");
    Ok(table)
}

/// Opens `path` and reads its observations. The file is closed before this
/// returns, whether or not parsing succeeded.
#[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_observations(path: impl AsRef<Path>, columns: Columns) -> Result<ObservationTable> {
    let file = File::open(path.as_ref())?;
    parse_observations(file, columns)
}

fn parse_row(record: &StringRecord, columns: Columns) -> Result<Observation> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);
    let field = |column: usize| {
        record
            .get(column)
            .ok_or(ExceedenceError::MissingColumn { line, column })
    };

    let raw_date = field(columns.date)?;
    let date = ObservationDate::parse(raw_date)?;

    let raw_value = field(columns.data)?.trim();
    // a blank cell means nothing was measured that day
    let amount = if raw_value.is_empty() {
        0.0
    } else {
        raw_value
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite())
            .ok_or_else(|| ExceedenceError::InvalidValue {
                line,
                value: raw_value.to_string(),
            })?
    };

    Ok(Observation {
        raw_date: raw_date.to_string(),
        date,
        amount,
    })
}

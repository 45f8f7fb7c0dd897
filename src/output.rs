//! Output formatting for exceedence reports.
//!
//! Supports the CSV block layout and JSON serialization.

use std::io::Write;

use anyhow::Result;
use csv::WriterBuilder;
use tracing::debug;

use crate::analyzers::types::{ExceedenceCurve, ExceedenceReport};
use crate::config::OutputFormat;

/// Writes the report in the requested format.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &ExceedenceReport,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Csv => write_csv(out, report),
        OutputFormat::Json => write_json(out, report),
    }
}

/// Writes one titled `probability,bucket` block per curve, separated by a
/// blank line.
pub fn write_csv<W: Write>(out: &mut W, report: &ExceedenceReport) -> Result<()> {
    for (i, curve) in report.curves().into_iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        write_curve(out, curve, &report.label)?;
    }
    out.flush()?;
    Ok(())
}

fn write_curve<W: Write>(out: &mut W, curve: &ExceedenceCurve, label: &str) -> Result<()> {
    writeln!(out, "{}", curve.kind.title(label))?;
    debug!(kind = ?curve.kind, points = curve.points.len(), "Writing curve");

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(&mut *out);
    for point in &curve.points {
        writer.write_record([
            format!("{:?}", point.probability),
            curve.kind.format_threshold(point.threshold),
        ])?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes the report as pretty-printed JSON.
pub fn write_json<W: Write>(out: &mut W, report: &ExceedenceReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

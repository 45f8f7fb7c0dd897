use chrono::Utc;
use tracing::info;

use crate::analyzers::aggregate::aggregate;
use crate::analyzers::normalize::{coverage, normalize};
use crate::analyzers::season::segment;
use crate::analyzers::types::ExceedenceReport;
use crate::config::ExceedenceConfig;
use crate::error::Result;
use crate::parser::{ObservationTable, load_observations};

/// Reads the configured input and builds all three exceedence curves.
///
/// Nothing is written anywhere; the caller prints the report only once the
/// whole pipeline has succeeded.
#[tracing::instrument(skip_all, fields(input = %config.input.display(), label = %config.label))]
pub fn analyze(config: &ExceedenceConfig) -> Result<ExceedenceReport> {
    config.validate()?;
    let table = load_observations(&config.input, config.columns)?;
    analyze_table(&table, &config.label, config.step)
}

/// Runs segmentation, aggregation and normalization over loaded observations.
pub fn analyze_table(table: &ObservationTable, label: &str, step: f64) -> Result<ExceedenceReport> {
    let index = segment(table);
    let coverage = coverage(&index.full_seasons())?;

    let without_events = index.seasons_without_events();
    info!(
        count = without_events.len(),
        seasons = ?without_events,
        "Full seasons had no {label}"
    );

    let histograms = aggregate(&index, step);

    info!(
        span = coverage.span() as i64,
        first = coverage.first_season,
        last = coverage.last_season,
        "Seasons of data in range"
    );

    Ok(ExceedenceReport {
        label: label.to_string(),
        generated_at: Utc::now(),
        coverage,
        event_days: normalize(&histograms.event_days, &coverage),
        season_total: normalize(&histograms.season_total, &coverage),
        daily_amount: normalize(&histograms.daily_amount, &coverage),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Columns;
    use crate::error::ExceedenceError;
    use crate::parser::parse_observations;

    fn table(csv: &str) -> ObservationTable {
        parse_observations(csv.as_bytes(), Columns { date: 0, data: 1 }).unwrap()
    }

    #[test]
    fn test_marker_only_seasons() {
        let table = table("DATE,SNOW\n2019-09-01,0\n2020-05-31,0\n2020-09-01,0\n2021-05-31,0\n");
        let report = analyze_table(&table, "Snowfall", 0.1).unwrap();

        assert_eq!(report.coverage.span(), 1.0);
        assert!(report.event_days.points.is_empty());
        assert!(report.season_total.points.is_empty());
        assert!(report.daily_amount.points.is_empty());
    }

    #[test]
    fn test_no_full_season_fails() {
        let table = table("DATE,SNOW\n2019-09-01,1.0\n2019-10-01,2.0\n");
        assert!(matches!(
            analyze_table(&table, "Snowfall", 0.1),
            Err(ExceedenceError::InsufficientCoverage { .. })
        ));
    }

    #[test]
    fn test_invalid_step_is_rejected_before_reading() {
        let config = ExceedenceConfig {
            input: "/nonexistent/input.csv".into(),
            step: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            analyze(&config),
            Err(ExceedenceError::InvalidStep(_))
        ));
    }
}

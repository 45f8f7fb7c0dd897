//! Data types used by the exceedence pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// The three seasonal statistics a curve can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    /// Number of days with a measurable event in a season.
    EventDays,
    /// Sum of all measurable amounts in a season.
    SeasonTotal,
    /// Largest single-day amount in a season.
    DailyAmount,
}

impl CurveKind {
    pub fn title(self, label: &str) -> String {
        match self {
            CurveKind::EventDays => format!("Annual Excedence, Annual {label} Days Likelihood"),
            CurveKind::SeasonTotal => format!("Annual Excedence, Annual {label} Total Likelihood"),
            CurveKind::DailyAmount => format!("Annual Excedence, Daily {label} Total Likelihood"),
        }
    }

    /// Renders a bucket threshold the way it appears in the CSV report.
    pub fn format_threshold(self, threshold: f64) -> String {
        match self {
            CurveKind::EventDays | CurveKind::SeasonTotal => format!("{}", threshold as i64),
            CurveKind::DailyAmount => format!("{threshold:?}"),
        }
    }
}

/// Count of full seasons whose statistic met one threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    pub threshold: f64,
    pub count: usize,
}

/// Raw seasonal counts over a fixed threshold ladder.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub kind: CurveKind,
    pub buckets: Vec<Bucket>,
}

impl Histogram {
    pub fn new(kind: CurveKind, thresholds: impl IntoIterator<Item = f64>) -> Self {
        Self {
            kind,
            buckets: thresholds
                .into_iter()
                .map(|threshold| Bucket {
                    threshold,
                    count: 0,
                })
                .collect(),
        }
    }

    pub fn count_at(&self, threshold: f64) -> Option<usize> {
        self.buckets
            .iter()
            .find(|b| b.threshold == threshold)
            .map(|b| b.count)
    }
}

/// One point of an exceedence curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub probability: f64,
    pub threshold: f64,
}

/// Empirical annual exceedence probabilities for one statistic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExceedenceCurve {
    pub kind: CurveKind,
    pub points: Vec<CurvePoint>,
}

impl ExceedenceCurve {
    pub fn probability_at(&self, threshold: f64) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.threshold == threshold)
            .map(|p| p.probability)
    }
}

/// Range of full seasons the curves were normalized over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Coverage {
    pub first_season: i32,
    pub last_season: i32,
    pub full_seasons: usize,
}

impl Coverage {
    /// Denominator of every probability: the label span, not the season count.
    pub fn span(&self) -> f64 {
        f64::from(self.last_season - self.first_season)
    }
}

/// Complete result of one run, printed as CSV blocks or serialized as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct ExceedenceReport {
    pub label: String,
    pub generated_at: DateTime<Utc>,
    pub coverage: Coverage,
    pub event_days: ExceedenceCurve,
    pub season_total: ExceedenceCurve,
    pub daily_amount: ExceedenceCurve,
}

impl ExceedenceReport {
    /// Curves in report order.
    pub fn curves(&self) -> [&ExceedenceCurve; 3] {
        [&self.event_days, &self.season_total, &self.daily_amount]
    }
}

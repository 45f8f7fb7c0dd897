use std::collections::BTreeSet;

use crate::analyzers::types::{Coverage, CurvePoint, ExceedenceCurve, Histogram};
use crate::error::{ExceedenceError, Result};

/// Bounds the full seasons. Needs two distinct labels, otherwise there is no
/// span to divide by.
pub fn coverage(full_seasons: &BTreeSet<i32>) -> Result<Coverage> {
    let insufficient = || ExceedenceError::InsufficientCoverage {
        full_seasons: full_seasons.len(),
    };

    let first_season = *full_seasons.first().ok_or_else(insufficient)?;
    let last_season = *full_seasons.last().ok_or_else(insufficient)?;
    if first_season == last_season {
        return Err(insufficient());
    }

    Ok(Coverage {
        first_season,
        last_season,
        full_seasons: full_seasons.len(),
    })
}

/// Turns seasonal counts into exceedence probabilities. Buckets no season
/// reached are left out of the curve.
pub fn normalize(histogram: &Histogram, coverage: &Coverage) -> ExceedenceCurve {
    let span = coverage.span();

    ExceedenceCurve {
        kind: histogram.kind,
        points: histogram
            .buckets
            .iter()
            .filter(|bucket| bucket.count > 0)
            .map(|bucket| CurvePoint {
                probability: bucket.count as f64 / span,
                threshold: bucket.threshold,
            })
            .collect(),
    }
}

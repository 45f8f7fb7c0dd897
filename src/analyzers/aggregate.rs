use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::analyzers::season::SeasonIndex;
use crate::analyzers::types::{CurveKind, Histogram};
use crate::analyzers::utility::{ceil_count, round_to};

/// Decimal places kept on per-day thresholds.
const THRESHOLD_PRECISION: i32 = 5;

/// Per-season statistics over every recorded season, full or not.
/// These size the threshold ladders.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Extents {
    pub max_events: usize,
    pub max_total: f64,
    pub max_daily: f64,
}

impl Extents {
    pub fn of(index: &SeasonIndex) -> Self {
        index
            .records
            .values()
            .fold(Extents::default(), |acc, amounts| Extents {
                max_events: acc.max_events.max(amounts.len()),
                max_total: acc.max_total.max(amounts.iter().sum()),
                max_daily: amounts.iter().copied().fold(acc.max_daily, f64::max),
            })
    }
}

/// Raw counts for the three curves.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonHistograms {
    pub event_days: Histogram,
    pub season_total: Histogram,
    pub daily_amount: Histogram,
}

/// Thresholds `1..=max_events`.
pub fn event_thresholds(extents: &Extents) -> impl Iterator<Item = f64> {
    (1..=extents.max_events).map(|b| b as f64)
}

/// Thresholds `0..=ceil(max_total)`.
pub fn total_thresholds(extents: &Extents) -> impl Iterator<Item = f64> {
    (0..=ceil_count(extents.max_total)).map(|b| b as f64)
}

/// Multiples of `step` up to the first one covering `max_daily`.
pub fn daily_thresholds(extents: &Extents, step: f64) -> impl Iterator<Item = f64> {
    (1..=ceil_count(extents.max_daily / step))
        .map(move |k| round_to(k as f64 * step, THRESHOLD_PRECISION))
}

/// Counts, over full seasons only, how many seasons reached each threshold.
///
/// Event days and per-day amounts count a season when its statistic is at
/// least the threshold. Season totals count it only when strictly above.
#[tracing::instrument(skip(index))]
pub fn aggregate(index: &SeasonIndex, step: f64) -> SeasonHistograms {
    let extents = Extents::of(index);
    debug!(?extents, "Threshold extents");

    let mut event_days = Histogram::new(CurveKind::EventDays, event_thresholds(&extents));
    let mut season_total = Histogram::new(CurveKind::SeasonTotal, total_thresholds(&extents));
    let daily = daily_thresholds(&extents, step);
    let mut daily_amount = Histogram::new(CurveKind::DailyAmount, daily);

    let full: BTreeSet<i32> = index.full_seasons();

    for (season, amounts) in &index.records {
        if !full.contains(season) {
            info!(season, "Season was not a full weather year");
            continue;
        }

        let events = amounts.len() as f64;
        for bucket in &mut event_days.buckets {
            if events >= bucket.threshold {
                bucket.count += 1;
            }
        }

        let total: f64 = amounts.iter().sum();
        for bucket in &mut season_total.buckets {
            if total > bucket.threshold {
                bucket.count += 1;
            }
        }

        for bucket in &mut daily_amount.buckets {
            // one hit per season, however many days reach the threshold
            if amounts.iter().any(|&amount| amount >= bucket.threshold) {
                bucket.count += 1;
            }
        }
    }

    SeasonHistograms {
        event_days,
        season_total,
        daily_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn index(records: &[(i32, &[f64])], full: &[i32]) -> SeasonIndex {
        SeasonIndex {
            records: records
                .iter()
                .map(|(season, amounts)| (*season, amounts.to_vec()))
                .collect::<BTreeMap<_, _>>(),
            starts: full.iter().copied().collect(),
            ends: full.iter().copied().collect(),
        }
    }

    #[test]
    fn test_extents_cover_all_seasons() {
        let index = index(&[(2019, &[1.0, 2.0]), (2020, &[5.5])], &[2019]);
        let extents = Extents::of(&index);

        assert_eq!(extents.max_events, 2);
        assert_eq!(extents.max_total, 5.5);
        assert_eq!(extents.max_daily, 5.5);
    }

    #[test]
    fn test_threshold_ladders() {
        let extents = Extents {
            max_events: 3,
            max_total: 2.5,
            max_daily: 0.25,
        };

        assert_eq!(event_thresholds(&extents).collect::<Vec<_>>(), vec![1.0, 2.0, 3.0]);
        assert_eq!(total_thresholds(&extents).collect::<Vec<_>>(), vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(daily_thresholds(&extents, 0.1).collect::<Vec<_>>(), vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_empty_index_has_only_zero_total_bucket() {
        let histograms = aggregate(&SeasonIndex::default(), 0.1);

        assert!(histograms.event_days.buckets.is_empty());
        assert_eq!(histograms.season_total.buckets.len(), 1);
        assert!(histograms.daily_amount.buckets.is_empty());
    }

    #[test]
    fn test_incomplete_seasons_size_domain_but_do_not_count() {
        let index = index(&[(2019, &[1.0]), (2020, &[1.0, 1.0, 4.0])], &[2019]);
        let histograms = aggregate(&index, 1.0);

        assert_eq!(histograms.event_days.buckets.len(), 3);
        assert_eq!(histograms.event_days.count_at(1.0), Some(1));
        assert_eq!(histograms.event_days.count_at(2.0), Some(0));

        assert_eq!(histograms.daily_amount.buckets.len(), 4);
        assert_eq!(histograms.daily_amount.count_at(1.0), Some(1));
        assert_eq!(histograms.daily_amount.count_at(4.0), Some(0));
    }

    #[test]
    fn test_total_uses_strict_comparison() {
        let index = index(&[(2019, &[1.0, 1.0])], &[2019]);
        let histograms = aggregate(&index, 1.0);

        assert_eq!(histograms.season_total.count_at(1.0), Some(1));
        assert_eq!(histograms.season_total.count_at(2.0), Some(0));
        // the same season reaches two events and a 1.0 day
        assert_eq!(histograms.event_days.count_at(2.0), Some(1));
        assert_eq!(histograms.daily_amount.count_at(1.0), Some(1));
    }

    #[test]
    fn test_daily_counts_seasons_not_days() {
        let index = index(&[(2019, &[0.5, 0.5, 0.5])], &[2019]);
        let histograms = aggregate(&index, 0.5);

        assert_eq!(histograms.daily_amount.count_at(0.5), Some(1));
    }
}

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::parser::ObservationTable;

/// Smallest amount that counts as an event.
pub const MEASURABLE: f64 = 0.01;

/// Label of the season containing a date. Seasons run from September 1
/// through the following August and are named after the year they end in.
pub fn season_of(year: i32, month: u32) -> i32 {
    if month > 8 { year + 1 } else { year }
}

/// Measurable amounts per season plus the completeness markers.
#[derive(Debug, Default)]
pub struct SeasonIndex {
    /// Only seasons with at least one measurable event appear here.
    pub records: BTreeMap<i32, Vec<f64>>,
    /// Seasons with an observation dated September 1.
    pub starts: BTreeSet<i32>,
    /// Seasons with an observation dated May 31.
    pub ends: BTreeSet<i32>,
}

impl SeasonIndex {
    /// Seasons observed from their September 1 through their May 31.
    pub fn full_seasons(&self) -> BTreeSet<i32> {
        self.starts.intersection(&self.ends).copied().collect()
    }

    /// Full seasons that never saw a measurable event.
    pub fn seasons_without_events(&self) -> BTreeSet<i32> {
        self.full_seasons()
            .into_iter()
            .filter(|season| !self.records.contains_key(season))
            .collect()
    }
}

/// Splits observations into seasons. Markers are set by the date alone, so
/// a zero on September 1 still opens a season.
#[tracing::instrument(skip_all, fields(observations = table.len()))]
pub fn segment(table: &ObservationTable) -> SeasonIndex {
    let mut index = SeasonIndex::default();

    for observation in table.iter() {
        let date = observation.date;
        let season = season_of(date.year, date.month);

        if date.month == 9 && date.day == 1 {
            index.starts.insert(season);
        }
        if date.month == 5 && date.day == 31 {
            index.ends.insert(season);
        }

        if observation.amount < MEASURABLE {
            continue;
        }

        index
            .records
            .entry(season)
            .or_default()
            .push(observation.amount);
    }

    debug!(
        seasons = index.records.len(),
        starts = index.starts.len(),
        ends = index.ends.len(),
        "Seasons segmented"
    );

    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Columns;
    use crate::parser::parse_observations;

    fn table(rows: &[(&str, &str)]) -> ObservationTable {
        let mut csv = String::from("DATE,VALUE\n");
        for (date, value) in rows {
            csv.push_str(&format!("{date},{value}\n"));
        }
        parse_observations(csv.as_bytes(), Columns { date: 0, data: 1 }).unwrap()
    }

    #[test]
    fn test_season_assignment() {
        assert_eq!(season_of(2020, 9), 2021);
        assert_eq!(season_of(2020, 12), 2021);
        assert_eq!(season_of(2021, 1), 2021);
        assert_eq!(season_of(2021, 5), 2021);
        assert_eq!(season_of(2021, 6), 2021);
        assert_eq!(season_of(2021, 8), 2021);
    }

    #[test]
    fn test_markers_ignore_value() {
        let index = segment(&table(&[("2020-09-01", "0.0"), ("2021-05-31", "")]));

        assert!(index.starts.contains(&2021));
        assert!(index.ends.contains(&2021));
        assert!(index.full_seasons().contains(&2021));
        assert!(index.records.is_empty());
        assert_eq!(index.seasons_without_events(), BTreeSet::from([2021]));
    }

    #[test]
    fn test_only_measurable_amounts_are_recorded() {
        let index = segment(&table(&[
            ("2020-10-01", "0.009"),
            ("2020-10-02", "0.01"),
            ("2021-02-02", "3.5"),
        ]));

        assert_eq!(index.records.get(&2021), Some(&vec![0.01, 3.5]));
    }

    #[test]
    fn test_full_seasons_need_both_markers() {
        let index = segment(&table(&[
            ("2018-09-01", "0"),
            ("2019-05-31", "0"),
            ("2019-09-01", "0"),
            ("2021-05-31", "0"),
        ]));

        assert_eq!(index.full_seasons(), BTreeSet::from([2019]));
        assert!(!index.full_seasons().contains(&2020));
        assert!(!index.full_seasons().contains(&2021));
    }

    #[test]
    fn test_single_digit_dates_mark_seasons() {
        let index = segment(&table(&[("2020-9-1", "1.0"), ("2021-5-31", "0.2")]));
        assert!(index.full_seasons().contains(&2021));
        assert_eq!(index.records.get(&2021), Some(&vec![1.0, 0.2]));
    }
}

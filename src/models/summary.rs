use serde::{Deserialize, Serialize};
use std::fmt;

use super::RawRecord;

/// Grid coordinate: calendar year and zero-based month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridKey {
    pub year: i32,
    pub month: u32,
}

impl GridKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(record: &RawRecord) -> Self {
        Self::new(record.year(), record.month())
    }
}

impl fmt::Display for GridKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month + 1)
    }
}

/// Aggregated statistics of one (year, month) cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub max_temperature: f64,
    pub min_temperature: f64,
    pub mean_max: f64,
    pub mean_min: f64,
    pub day_count: usize,
}

impl MonthlySummary {
    pub fn key(&self) -> GridKey {
        GridKey::new(self.year, self.month)
    }

    /// Tooltip text shown when hovering the cell
    pub fn tooltip(&self) -> String {
        format!(
            "Date: {}; Max: {}°C Min: {}°C",
            self.key(),
            self.max_temperature,
            self.min_temperature
        )
    }

    pub fn values(&self) -> [f64; 4] {
        [
            self.max_temperature,
            self.min_temperature,
            self.mean_max,
            self.mean_min,
        ]
    }
}

/// Running totals for a cell while records stream in.
#[derive(Debug, Clone, Default)]
pub struct MonthlyAccumulator {
    max_temperature: Option<f64>,
    min_temperature: Option<f64>,
    max_sum: f64,
    min_sum: f64,
    count: usize,
}

impl MonthlyAccumulator {
    pub fn push(&mut self, record: &RawRecord) {
        self.max_temperature = Some(
            self.max_temperature
                .map_or(record.max_temperature, |t| t.max(record.max_temperature)),
        );
        self.min_temperature = Some(
            self.min_temperature
                .map_or(record.min_temperature, |t| t.min(record.min_temperature)),
        );
        self.max_sum += record.max_temperature;
        self.min_sum += record.min_temperature;
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Group min above group max, only reachable through coerced readings.
    pub fn is_inverted(&self) -> bool {
        matches!((self.max_temperature, self.min_temperature), (Some(max), Some(min)) if min > max)
    }

    /// `None` when nothing was pushed: empty cells are never emitted.
    ///
    /// Inverted extremes are exchanged so the cell keeps `min <= max`.
    pub fn finish(&self, key: GridKey) -> Option<MonthlySummary> {
        let (mut max_temperature, mut min_temperature) = (self.max_temperature?, self.min_temperature?);
        if min_temperature > max_temperature {
            std::mem::swap(&mut max_temperature, &mut min_temperature);
        }
        let n = self.count as f64;

        Some(MonthlySummary {
            year: key.year,
            month: key.month,
            max_temperature,
            min_temperature,
            mean_max: self.max_sum / n,
            mean_min: self.min_sum / n,
            day_count: self.count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(day: u32, max: f64, min: f64) -> RawRecord {
        RawRecord::new(NaiveDate::from_ymd_opt(2000, 1, day).unwrap(), max, min)
    }

    #[test]
    fn test_accumulator_summary() {
        let mut acc = MonthlyAccumulator::default();
        acc.push(&record(5, 10.0, 2.0));
        acc.push(&record(20, 15.0, -1.0));

        let summary = acc.finish(GridKey::new(2000, 0)).unwrap();
        assert_eq!(summary.max_temperature, 15.0);
        assert_eq!(summary.min_temperature, -1.0);
        assert_eq!(summary.mean_max, 12.5);
        assert_eq!(summary.mean_min, 0.5);
        assert_eq!(summary.day_count, 2);
    }

    #[test]
    fn test_empty_accumulator_yields_nothing() {
        let acc = MonthlyAccumulator::default();
        assert_eq!(acc.count(), 0);
        assert!(acc.finish(GridKey::new(2000, 0)).is_none());
    }

    #[test]
    fn test_extremes_use_the_readings_as_given() {
        let mut acc = MonthlyAccumulator::default();
        acc.push(&record(5, 10.0, 2.0));
        acc.push(&record(6, 0.0, 5.0));

        assert!(!acc.is_inverted());
        let summary = acc.finish(GridKey::new(2000, 0)).unwrap();
        assert_eq!(summary.max_temperature, 10.0);
        assert_eq!(summary.min_temperature, 2.0);
        assert_eq!(summary.mean_max, 5.0);
        assert_eq!(summary.mean_min, 3.5);
    }

    #[test]
    fn test_inverted_extremes_are_exchanged() {
        let mut acc = MonthlyAccumulator::default();
        acc.push(&record(5, 0.0, 6.0));

        assert!(acc.is_inverted());
        let summary = acc.finish(GridKey::new(2000, 0)).unwrap();
        assert_eq!(summary.max_temperature, 6.0);
        assert_eq!(summary.min_temperature, 0.0);
        assert_eq!(summary.mean_max, 0.0);
        assert_eq!(summary.mean_min, 6.0);
    }

    #[test]
    fn test_tooltip_uses_one_based_month() {
        let mut acc = MonthlyAccumulator::default();
        acc.push(&record(5, 10.0, 2.5));
        let summary = acc.finish(GridKey::new(2000, 0)).unwrap();

        assert_eq!(summary.tooltip(), "Date: 2000-01; Max: 10°C Min: 2.5°C");
    }

    #[test]
    fn test_grid_key_ordering() {
        let mut keys = vec![
            GridKey::new(2001, 0),
            GridKey::new(2000, 11),
            GridKey::new(2000, 2),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                GridKey::new(2000, 2),
                GridKey::new(2000, 11),
                GridKey::new(2001, 0)
            ]
        );
    }
}

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One day of observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub date: NaiveDate,
    pub max_temperature: f64,
    pub min_temperature: f64,
}

impl RawRecord {
    pub fn new(date: NaiveDate, max_temperature: f64, min_temperature: f64) -> Self {
        Self {
            date,
            max_temperature,
            min_temperature,
        }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Zero-based month (January = 0)
    pub fn month(&self) -> u32 {
        self.date.month0()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn temperature_range(&self) -> f64 {
        self.max_temperature - self.min_temperature
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_fields() {
        let date = NaiveDate::from_ymd_opt(2004, 12, 31).unwrap();
        let record = RawRecord::new(date, 8.5, -2.0);

        assert_eq!(record.year(), 2004);
        assert_eq!(record.month(), 11);
        assert_eq!(record.day(), 31);
        assert_eq!(record.temperature_range(), 10.5);
    }
}

use serde::{Deserialize, Serialize};

use crate::utils::constants::MONTHS_PER_YEAR;

/// Axis and color ranges derived from an aggregated dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleDomain {
    /// Sorted, distinct
    pub years: Vec<i32>,
    /// Always 0..=11
    pub months: Vec<u32>,
    pub temperature_range: (f64, f64),
}

impl ScaleDomain {
    pub fn new(years: Vec<i32>, temperature_range: (f64, f64)) -> Self {
        Self {
            years,
            months: (0..MONTHS_PER_YEAR).collect(),
            temperature_range,
        }
    }

    pub fn first_year(&self) -> Option<i32> {
        self.years.first().copied()
    }

    pub fn last_year(&self) -> Option<i32> {
        self.years.last().copied()
    }

    pub fn contains_temperature(&self, value: f64) -> bool {
        let (lo, hi) = self.temperature_range;
        (lo..=hi).contains(&value)
    }

    pub fn summary(&self) -> String {
        let (lo, hi) = self.temperature_range;
        match (self.first_year(), self.last_year()) {
            (Some(first), Some(last)) => format!(
                "Years: {} to {} ({} columns)\nMonths: {} rows\nTemperature Range: {:.1}°C to {:.1}°C",
                first,
                last,
                self.years.len(),
                self.months.len(),
                lo,
                hi
            ),
            _ => "No years in domain".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_months_reserved_regardless_of_data() {
        let domain = ScaleDomain::new(vec![2010], (-3.0, 20.0));
        assert_eq!(domain.months, (0..12).collect::<Vec<_>>());
        assert!(domain.contains_temperature(-3.0));
        assert!(domain.contains_temperature(20.0));
        assert!(!domain.contains_temperature(20.5));
    }

    #[test]
    fn test_summary() {
        let domain = ScaleDomain::new(vec![2010, 2020], (-3.0, 20.0));
        let summary = domain.summary();
        assert!(summary.contains("2010 to 2020 (2 columns)"));
        assert!(summary.contains("-3.0°C to 20.0°C"));
    }
}

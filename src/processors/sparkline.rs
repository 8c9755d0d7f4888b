use crate::models::{GridKey, RawRecord};
use crate::scales::LinearScale;
use crate::utils::constants::{SPARKLINE_FIRST_DAY, SPARKLINE_LAST_DAY};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyPoint {
    pub day: u32,
    pub max_temperature: f64,
    pub min_temperature: f64,
}

/// Daily max/min series drawn inside one heatmap cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sparkline {
    pub key: GridKey,
    /// Sorted by day
    pub points: Vec<DailyPoint>,
    pub temperature_domain: (f64, f64),
}

/// Cell-local polylines, y growing downward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SparklinePaths {
    pub max_line: Vec<(f64, f64)>,
    pub min_line: Vec<(f64, f64)>,
}

impl Sparkline {
    pub fn project(&self, cell_width: f64, cell_height: f64) -> SparklinePaths {
        let x = LinearScale::new((SPARKLINE_FIRST_DAY, SPARKLINE_LAST_DAY), (0.0, cell_width));
        let y = LinearScale::new(self.temperature_domain, (cell_height, 0.0));

        let line = |pick: fn(&DailyPoint) -> f64| -> Vec<(f64, f64)> {
            self.points
                .iter()
                .map(|p| (x.scale(f64::from(p.day)), y.scale(pick(p))))
                .collect()
        };

        SparklinePaths {
            max_line: line(|p| p.max_temperature),
            min_line: line(|p| p.min_temperature),
        }
    }
}

/// Group records into per-cell daily series.
pub fn build_sparklines<'a, I>(records: I) -> BTreeMap<GridKey, Sparkline>
where
    I: IntoIterator<Item = &'a RawRecord>,
{
    let mut grouped: BTreeMap<GridKey, Vec<&RawRecord>> = BTreeMap::new();
    for record in records {
        grouped.entry(GridKey::of(record)).or_default().push(record);
    }

    grouped
        .into_iter()
        .filter_map(|(key, mut days)| {
            days.sort_by_key(|r| r.date);

            let low = days.iter().map(|r| r.min_temperature).reduce(f64::min)?;
            let high = days.iter().map(|r| r.max_temperature).reduce(f64::max)?;
            let points = days
                .iter()
                .map(|r| DailyPoint {
                    day: r.day(),
                    max_temperature: r.max_temperature,
                    min_temperature: r.min_temperature,
                })
                .collect();

            Some((
                key,
                Sparkline {
                    key,
                    points,
                    temperature_domain: (low, high),
                },
            ))
        })
        .collect()
}

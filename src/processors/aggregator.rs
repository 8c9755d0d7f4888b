use crate::config::{AggregationConfig, YearAxis};
use crate::models::{GridKey, MonthlyAccumulator, MonthlySummary, RawRecord, ScaleDomain};
use crate::utils::constants::RECENT_WINDOW_YEARS;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// Grid of monthly summaries plus the domain used to scale it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregation {
    /// Serialized as a list of summaries in (year, month) order
    #[serde(serialize_with = "serialize_cells")]
    pub grid: BTreeMap<GridKey, MonthlySummary>,
    /// `None` when no record survived filtering
    pub domain: Option<ScaleDomain>,
    /// Cells whose min came out above their max and had the two exchanged
    pub inverted_cells: usize,
}

impl Aggregation {
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    pub fn get(&self, year: i32, month: u32) -> Option<&MonthlySummary> {
        self.grid.get(&GridKey::new(year, month))
    }

    pub fn cells(&self) -> impl Iterator<Item = &MonthlySummary> {
        self.grid.values()
    }

    pub fn summary(&self) -> String {
        let Some(domain) = &self.domain else {
            return "No records in the selected years".to_string();
        };

        let mut out = String::new();
        out.push_str("=== Monthly Grid ===\n");
        out.push_str(&format!("{}\n", domain.summary()));
        out.push_str(&format!("Cells: {}\n", self.grid.len()));
        out.push_str(&format!("Cells with Inverted Min/Max: {}\n\n", self.inverted_cells));
        out.push_str("  Month      Days      Max      Min  MeanMax  MeanMin\n");
        for cell in self.cells() {
            out.push_str(&format!(
                "  {:<8} {:>6} {:>8.1} {:>8.1} {:>8.1} {:>8.1}\n",
                cell.key().to_string(),
                cell.day_count,
                cell.max_temperature,
                cell.min_temperature,
                cell.mean_max,
                cell.mean_min
            ));
        }
        out
    }
}

fn serialize_cells<S: Serializer>(
    grid: &BTreeMap<GridKey, MonthlySummary>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(grid.values())
}

/// Groups daily records into (year, month) cells.
pub struct TemperatureAggregator {
    min_year: i32,
    window_years: Option<u16>,
    year_axis: YearAxis,
}

impl TemperatureAggregator {
    pub fn new(min_year: i32) -> Self {
        Self {
            min_year,
            window_years: None,
            year_axis: YearAxis::Observed,
        }
    }

    pub fn from_config(config: &AggregationConfig) -> Self {
        Self::new(config.min_year)
            .with_window_years(config.window_years)
            .with_year_axis(config.year_axis)
    }

    pub fn with_window_years(mut self, window_years: Option<u16>) -> Self {
        self.window_years = window_years;
        self
    }

    /// Keep only the latest eleven years present in the data
    pub fn with_recent_window(self) -> Self {
        self.with_window_years(Some(RECENT_WINDOW_YEARS))
    }

    pub fn with_year_axis(mut self, year_axis: YearAxis) -> Self {
        self.year_axis = year_axis;
        self
    }

    /// Inclusive year bounds of the records that will be aggregated
    pub fn window(&self, records: &[RawRecord]) -> Option<(i32, i32)> {
        let max_year = records
            .iter()
            .map(RawRecord::year)
            .filter(|year| *year >= self.min_year)
            .max()?;

        let lower = match self.window_years {
            Some(span) => (max_year - (i32::from(span) - 1)).max(self.min_year),
            None => records
                .iter()
                .map(RawRecord::year)
                .filter(|year| *year >= self.min_year)
                .min()
                .unwrap_or(max_year),
        };

        Some((lower, max_year))
    }

    /// Records inside the aggregation window, input order kept
    pub fn select<'a>(&self, records: &'a [RawRecord]) -> Vec<&'a RawRecord> {
        let Some((lower, upper)) = self.window(records) else {
            return Vec::new();
        };

        records
            .iter()
            .filter(|r| (lower..=upper).contains(&r.year()))
            .collect()
    }

    /// Owned copy of [`select`](Self::select)
    pub fn filter_records(&self, records: &[RawRecord]) -> Vec<RawRecord> {
        self.select(records).into_iter().cloned().collect()
    }

    pub fn aggregate(&self, records: &[RawRecord]) -> Aggregation {
        let selected = self.select(records);
        info!(
            input = records.len(),
            selected = selected.len(),
            min_year = self.min_year,
            window_years = ?self.window_years,
            "Aggregating daily records"
        );

        let mut accumulators: BTreeMap<GridKey, MonthlyAccumulator> = BTreeMap::new();
        let mut years = BTreeSet::new();

        for record in &selected {
            accumulators.entry(GridKey::of(record)).or_default().push(record);
            years.insert(record.year());
        }

        let grid: BTreeMap<GridKey, MonthlySummary> = accumulators
            .iter()
            .filter_map(|(key, acc)| acc.finish(*key).map(|summary| (*key, summary)))
            .collect();

        let inverted_cells = accumulators.values().filter(|acc| acc.is_inverted()).count();
        if inverted_cells > 0 {
            warn!(count = inverted_cells, "Cells had min above max and were exchanged");
        }

        for cell in grid.values() {
            debug!(
                cell = %cell.key(),
                days = cell.day_count,
                max = cell.max_temperature,
                min = cell.min_temperature,
                "Summarized cell"
            );
        }

        let domain = self.derive_domain(&grid, &years);
        if domain.is_none() {
            info!("No records in the selected years");
        }

        Aggregation {
            grid,
            domain,
            inverted_cells,
        }
    }

    fn derive_domain(
        &self,
        grid: &BTreeMap<GridKey, MonthlySummary>,
        years: &BTreeSet<i32>,
    ) -> Option<ScaleDomain> {
        // Means can fall outside a cell's extremes when a day's readings are inverted
        let values = || grid.values().flat_map(MonthlySummary::values);
        let low = values().reduce(f64::min)?;
        let high = values().reduce(f64::max)?;

        let axis: Vec<i32> = match self.year_axis {
            YearAxis::Observed => years.iter().copied().collect(),
            YearAxis::Contiguous => {
                let (first, last) = (*years.first()?, *years.last()?);
                (first..=last).collect()
            }
        };

        Some(ScaleDomain::new(axis, (low, high)))
    }
}

impl Default for TemperatureAggregator {
    fn default() -> Self {
        Self::from_config(&AggregationConfig::default())
    }
}

/// Aggregate the full history from `min_year` onward.
pub fn aggregate(records: &[RawRecord], min_year: i32) -> Aggregation {
    TemperatureAggregator::new(min_year).aggregate(records)
}

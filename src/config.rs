//! Runtime configuration.
//!
//! Values are layered: built-in defaults, an optional config file
//! (format picked from its extension), then `HEATMAP_*` environment
//! variables using `__` between section and key, e.g.
//! `HEATMAP_AGGREGATION__MIN_YEAR=2000` or `HEATMAP_LAYOUT__FILL=mean_max`.
//! Command-line flags are applied on top by the CLI.

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::{Validate, ValidationError};

use crate::error::Result;
use crate::models::MonthlySummary;
use crate::utils::constants::*;

/// What to do with a temperature cell that does not parse as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum NumericPolicy {
    /// Read it as 0 and count it in the load report
    #[default]
    Lenient,
    /// Fail the load
    Strict,
}

/// How the year axis is derived from the aggregated data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum YearAxis {
    /// Only years that have at least one record
    #[default]
    Observed,
    /// Every year from the first to the last, gaps included
    Contiguous,
}

/// Statistic used to color a heatmap cell.
///
/// Defaults to the monthly minimum, the coloring of the full-history
/// heatmap. The recent-years view with sparklines colors by `MeanMax`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FillStatistic {
    MaxTemperature,
    #[default]
    MinTemperature,
    MeanMax,
    MeanMin,
}

impl FillStatistic {
    pub fn value_of(&self, summary: &MonthlySummary) -> f64 {
        match self {
            FillStatistic::MaxTemperature => summary.max_temperature,
            FillStatistic::MinTemperature => summary.min_temperature,
            FillStatistic::MeanMax => summary.mean_max,
            FillStatistic::MeanMin => summary.mean_min,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AggregationConfig {
    pub min_year: i32,

    /// Keep only the most recent `n` years, counted back from the latest year present
    #[validate(range(min = 1, max = 200))]
    pub window_years: Option<u16>,

    pub year_axis: YearAxis,

    pub numeric_policy: NumericPolicy,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            min_year: DEFAULT_MIN_YEAR,
            window_years: None,
            year_axis: YearAxis::default(),
            numeric_policy: NumericPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Margins {
    #[validate(range(min = 0.0))]
    pub top: f64,
    #[validate(range(min = 0.0))]
    pub right: f64,
    #[validate(range(min = 0.0))]
    pub bottom: f64,
    #[validate(range(min = 0.0))]
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: DEFAULT_MARGIN_TOP,
            right: DEFAULT_MARGIN_RIGHT,
            bottom: DEFAULT_MARGIN_BOTTOM,
            left: DEFAULT_MARGIN_LEFT,
        }
    }
}

/// Outer size, margins and styling of the heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_plot_area"))]
pub struct HeatmapLayout {
    pub width: f64,
    pub height: f64,

    #[validate(nested)]
    pub margins: Margins,

    #[validate(range(min = 0.0, max = 0.99))]
    pub padding: f64,

    pub fill: FillStatistic,

    pub sparklines: bool,

    #[validate(range(min = 1, max = 100))]
    pub legend_swatches: usize,
}

impl Default for HeatmapLayout {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            margins: Margins::default(),
            padding: DEFAULT_BAND_PADDING,
            fill: FillStatistic::default(),
            sparklines: false,
            legend_swatches: DEFAULT_LEGEND_SWATCHES,
        }
    }
}

impl HeatmapLayout {
    pub fn inner_width(&self) -> f64 {
        self.width - self.margins.left - self.margins.right
    }

    pub fn inner_height(&self) -> f64 {
        self.height - self.margins.top - self.margins.bottom
    }
}

fn validate_plot_area(layout: &HeatmapLayout) -> std::result::Result<(), ValidationError> {
    if layout.inner_width() <= 0.0 || layout.inner_height() <= 0.0 {
        return Err(ValidationError::new("margins_exceed_size"));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AppConfig {
    #[validate(nested)]
    pub aggregation: AggregationConfig,

    #[validate(nested)]
    pub layout: HeatmapLayout,
}

impl AppConfig {
    /// Load defaults, then `path` if given, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&AppConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.aggregation.min_year, 1997);
        assert_eq!(config.layout.inner_width(), 750.0);
        assert_eq!(config.layout.inner_height(), 400.0);
        assert_eq!(config.layout.fill, FillStatistic::MinTemperature);
    }

    #[test]
    fn test_window_out_of_range_is_rejected() {
        let mut config = AppConfig::default();
        config.aggregation.window_years = Some(0);
        assert!(config.validate().is_err());

        config.aggregation.window_years = Some(11);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_margins_larger_than_plot_are_rejected() {
        let mut config = AppConfig::default();
        config.layout.margins.left = 900.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "[aggregation]")?;
        writeln!(file, "min_year = 2005")?;
        writeln!(file, "window_years = 11")?;
        writeln!(file, "year_axis = \"contiguous\"")?;
        writeln!(file, "[layout]")?;
        writeln!(file, "fill = \"mean_min\"")?;
        writeln!(file, "sparklines = true")?;

        let config = AppConfig::load(Some(file.path()))?;
        assert_eq!(config.aggregation.min_year, 2005);
        assert_eq!(config.aggregation.window_years, Some(11));
        assert_eq!(config.aggregation.year_axis, YearAxis::Contiguous);
        assert_eq!(config.aggregation.numeric_policy, NumericPolicy::Lenient);
        assert_eq!(config.layout.fill, FillStatistic::MeanMin);
        assert!(config.layout.sparklines);
        assert_eq!(config.layout.width, 900.0);

        Ok(())
    }

    #[test]
    fn test_fill_statistic_selects_value() {
        let summary = MonthlySummary {
            year: 2000,
            month: 0,
            max_temperature: 15.0,
            min_temperature: -1.0,
            mean_max: 12.5,
            mean_min: 0.5,
            day_count: 2,
        };

        assert_eq!(FillStatistic::MaxTemperature.value_of(&summary), 15.0);
        assert_eq!(FillStatistic::MinTemperature.value_of(&summary), -1.0);
        assert_eq!(FillStatistic::MeanMax.value_of(&summary), 12.5);
        assert_eq!(FillStatistic::MeanMin.value_of(&summary), 0.5);
    }
}

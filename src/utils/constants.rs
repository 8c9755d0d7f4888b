/// CSV column names
pub const COLUMN_DATE: &str = "date";
pub const COLUMN_MAX_TEMPERATURE: &str = "max_temperature";
pub const COLUMN_MIN_TEMPERATURE: &str = "min_temperature";

/// Accepted naive date layouts, tried in order
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
pub const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Aggregation defaults
pub const DEFAULT_MIN_YEAR: i32 = 1997;
pub const RECENT_WINDOW_YEARS: u16 = 11;
pub const MONTHS_PER_YEAR: u32 = 12;

/// Sparkline x domain (day of month)
pub const SPARKLINE_FIRST_DAY: f64 = 1.0;
pub const SPARKLINE_LAST_DAY: f64 = 31.0;

/// Layout defaults (outer size in pixels)
pub const DEFAULT_WIDTH: f64 = 900.0;
pub const DEFAULT_HEIGHT: f64 = 500.0;
pub const DEFAULT_MARGIN_TOP: f64 = 50.0;
pub const DEFAULT_MARGIN_RIGHT: f64 = 50.0;
pub const DEFAULT_MARGIN_BOTTOM: f64 = 50.0;
pub const DEFAULT_MARGIN_LEFT: f64 = 100.0;
pub const DEFAULT_BAND_PADDING: f64 = 0.05;

/// Legend defaults
pub const DEFAULT_LEGEND_SWATCHES: usize = 10;
pub const LEGEND_WIDTH: f64 = 100.0;
pub const LEGEND_TICKS: usize = 5;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "HEATMAP";

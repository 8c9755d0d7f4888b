pub mod aggregator;
pub mod sparkline;

pub use aggregator::{aggregate, Aggregation, TemperatureAggregator};
pub use sparkline::{build_sparklines, DailyPoint, Sparkline, SparklinePaths};

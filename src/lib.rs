pub mod cli;
pub mod config;
pub mod error;
pub mod heatmap;
pub mod models;
pub mod processors;
pub mod readers;
pub mod scales;
pub mod utils;

pub use error::{HeatmapError, Result};
pub use processors::{aggregate, Aggregation, TemperatureAggregator};

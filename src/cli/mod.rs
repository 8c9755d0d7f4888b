pub mod args;
pub mod commands;
pub mod logging;

pub use args::{AggregationArgs, Cli, Commands};
pub use commands::run;

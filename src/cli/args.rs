use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{AppConfig, FillStatistic, NumericPolicy, YearAxis};
use crate::utils::constants::RECENT_WINDOW_YEARS;

#[derive(Parser)]
#[command(name = "temperature-heatmap")]
#[command(about = "Aggregate daily temperatures into a year-by-month heatmap")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Configuration file (TOML, JSON or YAML)")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the monthly grid and its domain as a table
    Summary {
        #[command(flatten)]
        aggregation: AggregationArgs,
    },

    /// Export the monthly grid and domain as JSON
    Grid {
        #[command(flatten)]
        aggregation: AggregationArgs,

        #[arg(short, long, help = "Output JSON file [default: stdout]")]
        output: Option<PathBuf>,
    },

    /// Export the full heatmap model (cells, axes, legend) as JSON
    Heatmap {
        #[command(flatten)]
        aggregation: AggregationArgs,

        #[arg(short, long, help = "Output JSON file [default: stdout]")]
        output: Option<PathBuf>,

        #[arg(long, value_enum, help = "Statistic used for the cell color")]
        fill: Option<FillStatistic>,

        #[arg(long, help = "Include daily sparklines inside each cell")]
        sparklines: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct AggregationArgs {
    #[arg(short, long, help = "Input CSV with date, max_temperature, min_temperature columns")]
    pub input: PathBuf,

    #[arg(long, help = "Drop records before this year")]
    pub min_year: Option<i32>,

    #[arg(long, conflicts_with = "recent", help = "Keep only the latest N years")]
    pub window_years: Option<u16>,

    #[arg(long, help = "Keep only the latest 11 years")]
    pub recent: bool,

    #[arg(long, help = "Fail on non-numeric temperatures and unparseable dates")]
    pub strict: bool,

    #[arg(long, value_enum)]
    pub year_axis: Option<YearAxis>,
}

impl AggregationArgs {
    /// Flags win over file and environment settings
    pub fn apply(&self, config: &mut AppConfig) {
        let aggregation = &mut config.aggregation;

        if let Some(min_year) = self.min_year {
            aggregation.min_year = min_year;
        }
        if self.recent {
            aggregation.window_years = Some(RECENT_WINDOW_YEARS);
        } else if self.window_years.is_some() {
            aggregation.window_years = self.window_years;
        }
        if self.strict {
            aggregation.numeric_policy = NumericPolicy::Strict;
        }
        if let Some(year_axis) = self.year_axis {
            aggregation.year_axis = year_axis;
        }
    }
}

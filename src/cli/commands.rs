use crate::cli::args::{AggregationArgs, Cli, Commands};
use crate::cli::logging::init_logging;
use crate::config::AppConfig;
use crate::error::Result;
use crate::heatmap::HeatmapModel;
use crate::processors::{build_sparklines, TemperatureAggregator};
use crate::readers::{LoadedRecords, TemperatureCsvReader};
use crate::utils::progress::ProgressReporter;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::Path;
use tracing::info;
use validator::Validate;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let mut config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Summary { aggregation } => {
            aggregation.apply(&mut config);
            config.validate()?;

            let loaded = load_records(&aggregation, &config)?;
            let result = TemperatureAggregator::from_config(&config.aggregation).aggregate(&loaded.records);

            println!("{}\n", loaded.report.summary());
            println!("{}", result.summary());
        }

        Commands::Grid { aggregation, output } => {
            aggregation.apply(&mut config);
            config.validate()?;

            let loaded = load_records(&aggregation, &config)?;
            let result = TemperatureAggregator::from_config(&config.aggregation).aggregate(&loaded.records);

            if result.is_empty() {
                eprintln!("No records in the selected years");
            }
            write_json(&result, output.as_deref())?;
        }

        Commands::Heatmap {
            aggregation,
            output,
            fill,
            sparklines,
        } => {
            aggregation.apply(&mut config);
            if let Some(fill) = fill {
                config.layout.fill = fill;
            }
            if sparklines {
                config.layout.sparklines = true;
            }
            config.validate()?;

            let loaded = load_records(&aggregation, &config)?;
            let aggregator = TemperatureAggregator::from_config(&config.aggregation);
            let result = aggregator.aggregate(&loaded.records);

            let daily = config
                .layout
                .sparklines
                .then(|| build_sparklines(aggregator.select(&loaded.records)));

            match HeatmapModel::build(&result, daily.as_ref(), &config.layout) {
                Some(model) => {
                    info!(cells = model.cells.len(), "Heatmap model ready");
                    write_json(&model, output.as_deref())?;
                }
                None => eprintln!("No records in the selected years, nothing to draw"),
            }
        }
    }

    Ok(())
}

fn load_records(args: &AggregationArgs, config: &AppConfig) -> Result<LoadedRecords> {
    let progress = ProgressReporter::new_spinner(
        &format!("Loading {}...", args.input.display()),
        !io::stderr().is_terminal(),
    );

    let reader = TemperatureCsvReader::with_policy(config.aggregation.numeric_policy);
    let loaded = reader.read_path(&args.input)?;

    progress.finish_with_message(&format!("Loaded {} daily records", loaded.records.len()));
    Ok(loaded)
}

fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(&mut writer, value)?;
            writer.flush()?;
            info!(path = %path.display(), "Wrote JSON output");
        }
        None => {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, value)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::Result;

/// Install the global subscriber: stderr always, plus `log_file` when given.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_filter = if verbose {
        "temperature_heatmap=debug"
    } else {
        "temperature_heatmap=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let file_layer = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()?;

    Ok(())
}

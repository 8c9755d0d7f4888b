use thiserror::Error;

pub type Result<T> = std::result::Result<T, HeatmapError>;

#[derive(Error, Debug)]
pub enum HeatmapError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Logging setup error: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("Required column '{0}' not found in CSV header")]
    MissingColumn(String),

    #[error("Row {line} has no date")]
    MissingDate { line: u64 },

    #[error("Row {line} has an unparseable date: '{value}'")]
    InvalidDate { line: u64, value: String },

    #[error("Row {line} has a non-numeric {field}: '{value}'")]
    MalformedNumeric {
        line: u64,
        field: &'static str,
        value: String,
    },
}

use crate::config::NumericPolicy;
use crate::error::{HeatmapError, Result};
use crate::models::RawRecord;
use crate::utils::constants::*;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// One row of an already-parsed table, cells still as text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    pub date: Option<String>,
    pub max_temperature: Option<String>,
    pub min_temperature: Option<String>,
}

impl RawRow {
    pub fn new(date: &str, max_temperature: &str, min_temperature: &str) -> Self {
        Self {
            date: Some(date.to_string()),
            max_temperature: Some(max_temperature.to_string()),
            min_temperature: Some(min_temperature.to_string()),
        }
    }
}

/// What the reader had to repair or drop while loading.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    pub rows_read: usize,
    pub records_loaded: usize,
    pub coerced_fields: usize,
    pub skipped_dates: usize,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.coerced_fields == 0 && self.skipped_dates == 0
    }

    pub fn summary(&self) -> String {
        format!(
            "=== Load Report ===\n\
            Rows Read: {}\n\
            Records Loaded: {}\n\
            Temperatures Coerced to 0: {}\n\
            Rows with Unparseable Dates: {}",
            self.rows_read,
            self.records_loaded,
            self.coerced_fields,
            self.skipped_dates
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadedRecords {
    pub records: Vec<RawRecord>,
    pub report: LoadReport,
}

#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    date: usize,
    max_temperature: Option<usize>,
    min_temperature: Option<usize>,
}

pub struct TemperatureCsvReader {
    policy: NumericPolicy,
}

impl TemperatureCsvReader {
    pub fn new() -> Self {
        Self {
            policy: NumericPolicy::Lenient,
        }
    }

    pub fn with_policy(policy: NumericPolicy) -> Self {
        Self { policy }
    }

    /// Read daily records from a CSV file with a header row
    pub fn read_path(&self, path: &Path) -> Result<LoadedRecords> {
        info!(path = %path.display(), "Reading temperature CSV");
        let file = File::open(path)?;
        self.read_from(file)
    }

    /// Read daily records from any CSV source with a header row
    pub fn read_from<R: Read>(&self, source: R) -> Result<LoadedRecords> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        let columns = self.locate_columns(reader.headers()?)?;
        let mut loaded = LoadedRecords::default();

        for result in reader.records() {
            let record = result?;
            let line = record.position().map_or(0, |p| p.line());
            let row = Self::row_from_record(&record, columns);

            if let Some(parsed) = self.parse_row(&row, line, &mut loaded.report)? {
                loaded.records.push(parsed);
            }
        }

        self.log_report(&loaded.report);
        Ok(loaded)
    }

    /// Convert rows of an already-parsed table
    pub fn read_rows(&self, rows: &[RawRow]) -> Result<LoadedRecords> {
        let mut loaded = LoadedRecords::default();

        for (index, row) in rows.iter().enumerate() {
            // Line numbers count the header as line 1
            let line = index as u64 + 2;
            if let Some(parsed) = self.parse_row(row, line, &mut loaded.report)? {
                loaded.records.push(parsed);
            }
        }

        self.log_report(&loaded.report);
        Ok(loaded)
    }

    fn locate_columns(&self, headers: &StringRecord) -> Result<ColumnIndex> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let date = find(COLUMN_DATE).ok_or_else(|| HeatmapError::MissingColumn(COLUMN_DATE.to_string()))?;
        let max_temperature = find(COLUMN_MAX_TEMPERATURE);
        let min_temperature = find(COLUMN_MIN_TEMPERATURE);

        for (name, index) in [
            (COLUMN_MAX_TEMPERATURE, max_temperature),
            (COLUMN_MIN_TEMPERATURE, min_temperature),
        ] {
            if index.is_none() {
                if self.policy == NumericPolicy::Strict {
                    return Err(HeatmapError::MissingColumn(name.to_string()));
                }
                warn!(column = name, "Temperature column missing, every value will read as 0");
            }
        }

        Ok(ColumnIndex {
            date,
            max_temperature,
            min_temperature,
        })
    }

    fn row_from_record(record: &StringRecord, columns: ColumnIndex) -> RawRow {
        let cell = |index: Option<usize>| index.and_then(|i| record.get(i)).map(str::to_string);

        RawRow {
            date: cell(Some(columns.date)),
            max_temperature: cell(columns.max_temperature),
            min_temperature: cell(columns.min_temperature),
        }
    }

    /// Turn one row into a record.
    ///
    /// `Ok(None)` means the row was dropped (unparseable date, lenient policy).
    pub fn parse_row(&self, row: &RawRow, line: u64, report: &mut LoadReport) -> Result<Option<RawRecord>> {
        report.rows_read += 1;

        let date_str = row
            .date
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(HeatmapError::MissingDate { line })?;

        let Some(date) = parse_date(date_str) else {
            if self.policy == NumericPolicy::Strict {
                return Err(HeatmapError::InvalidDate {
                    line,
                    value: date_str.to_string(),
                });
            }
            debug!(line, value = date_str, "Skipping row with unparseable date");
            report.skipped_dates += 1;
            return Ok(None);
        };

        let max_temperature =
            self.parse_temperature(row.max_temperature.as_deref(), COLUMN_MAX_TEMPERATURE, line, report)?;
        let min_temperature =
            self.parse_temperature(row.min_temperature.as_deref(), COLUMN_MIN_TEMPERATURE, line, report)?;

        report.records_loaded += 1;
        Ok(Some(RawRecord::new(date, max_temperature, min_temperature)))
    }

    fn parse_temperature(
        &self,
        value: Option<&str>,
        field: &'static str,
        line: u64,
        report: &mut LoadReport,
    ) -> Result<f64> {
        if let Some(parsed) = value.and_then(parse_temperature) {
            return Ok(parsed);
        }

        match self.policy {
            NumericPolicy::Strict => Err(HeatmapError::MalformedNumeric {
                line,
                field,
                value: value.unwrap_or_default().to_string(),
            }),
            NumericPolicy::Lenient => {
                report.coerced_fields += 1;
                Ok(0.0)
            }
        }
    }

    fn log_report(&self, report: &LoadReport) {
        info!(
            rows = report.rows_read,
            records = report.records_loaded,
            "Finished loading temperature rows"
        );
        if report.coerced_fields > 0 {
            warn!(
                count = report.coerced_fields,
                "Non-numeric temperatures were read as 0"
            );
        }
        if report.skipped_dates > 0 {
            warn!(count = report.skipped_dates, "Rows with unparseable dates were dropped");
        }
    }
}

impl Default for TemperatureCsvReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a finite number; blanks and non-numbers give `None`
pub fn parse_temperature(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parse an ISO-like calendar date, ignoring any time of day
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

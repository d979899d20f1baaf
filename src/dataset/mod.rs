use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::WasteRecord;

pub const BUILDING_COLUMN: &str = "Building";
pub const STREAM_COLUMN: &str = "Stream";
pub const DATE_COLUMN: &str = "Date";
pub const WEIGHT_COLUMN: &str = "Weight";

// Two-digit years first: %Y would also accept "23" as year 23.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%y %H:%M",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

/// Errors raised while loading the waste table. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read data: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: cannot parse date '{value}'")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}: cannot parse weight '{value}'")]
    InvalidWeight { row: usize, value: String },
}

/// Positions of the required columns within the header row
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    building: usize,
    stream: usize,
    date: usize,
    weight: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, LoadError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(LoadError::MissingColumn(name))
        };

        Ok(Self {
            building: find(BUILDING_COLUMN)?,
            stream: find(STREAM_COLUMN)?,
            date: find(DATE_COLUMN)?,
            weight: find(WEIGHT_COLUMN)?,
        })
    }
}

/// Immutable table of waste records in file order
#[derive(Debug, Clone, Default)]
pub struct WasteDataset {
    records: Vec<WasteRecord>,
}

impl WasteDataset {
    pub fn new(records: Vec<WasteRecord>) -> Self {
        Self { records }
    }

    /// Load the table from a CSV file on disk
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }
        debug!("Loading waste data from {}", path.display());

        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Load the table from any CSV source with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let columns = ColumnIndex::from_headers(rdr.headers()?)?;

        let mut records = Vec::new();
        for (i, result) in rdr.records().enumerate() {
            let row = i + 1;
            let raw = result?;
            match parse_record(&raw, columns, row)? {
                Some(record) => records.push(record),
                None => warn!("Skipping row {}: blank weight", row),
            }
        }

        let dataset = Self::new(records);
        info!(
            "Loaded {} waste records ({} buildings, {} streams)",
            dataset.len(),
            dataset.buildings().len(),
            dataset.streams().len()
        );
        Ok(dataset)
    }

    pub fn records(&self) -> &[WasteRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct building names in order of first appearance
    pub fn buildings(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.building.as_str()))
    }

    /// Distinct stream names in order of first appearance
    pub fn streams(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.stream.as_str()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// Parse one data row. A blank weight is a missing value and yields `None`.
fn parse_record(
    raw: &StringRecord,
    columns: ColumnIndex,
    row: usize,
) -> Result<Option<WasteRecord>, LoadError> {
    let field = |idx: usize| raw.get(idx).unwrap_or("");

    let date_text = field(columns.date);
    let date = parse_date(date_text).ok_or_else(|| LoadError::InvalidDate {
        row,
        value: date_text.to_string(),
    })?;

    let weight_text = field(columns.weight);
    if weight_text.trim().is_empty() {
        return Ok(None);
    }
    let weight = weight_text
        .parse::<f64>()
        .map_err(|_| LoadError::InvalidWeight {
            row,
            value: weight_text.to_string(),
        })?;

    Ok(Some(WasteRecord {
        building: field(columns.building).to_string(),
        stream: field(columns.stream).to_string(),
        date,
        weight,
    }))
}

/// Parse a calendar date, dropping any time of day
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
}

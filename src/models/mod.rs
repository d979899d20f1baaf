use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One row of the waste-collection table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteRecord {
    pub building: String,
    pub stream: String,
    pub date: NaiveDate,
    /// Pounds
    pub weight: f64,
}

impl WasteRecord {
    pub fn new(building: &str, stream: &str, date: NaiveDate, weight: f64) -> Self {
        Self {
            building: building.to_string(),
            stream: stream.to_string(),
            date,
            weight,
        }
    }
}

/// Summed weight keyed by (building, stream), ordered by building then stream
pub type Aggregation = BTreeMap<(String, String), f64>;

/// Buildings and streams currently chosen in the dropdowns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub buildings: BTreeSet<String>,
    pub streams: BTreeSet<String>,
}

impl Selection {
    pub fn new<B, S>(buildings: B, streams: S) -> Self
    where
        B: IntoIterator,
        B::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            buildings: buildings.into_iter().map(Into::into).collect(),
            streams: streams.into_iter().map(Into::into).collect(),
        }
    }

    pub fn matches(&self, record: &WasteRecord) -> bool {
        self.buildings.contains(&record.building) && self.streams.contains(&record.stream)
    }

    /// True when either dimension has nothing selected
    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty() || self.streams.is_empty()
    }
}

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: String,
    pub tick_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Ok(Config {
            data_path: std::env::var("WASTE_DATA_PATH")
                .unwrap_or_else(|_| "assign2_wastedata.csv".to_string()),
            tick_ms: std::env::var("WASTE_TICK_MS")
                .unwrap_or_else(|_| "250".to_string())
                .parse()
                .unwrap_or(250),
        })
    }

    /// Command line path wins over the environment
    pub fn with_data_path(mut self, path: Option<String>) -> Self {
        if let Some(path) = path {
            self.data_path = path;
        }
        self
    }
}

//! Common test utilities and helpers

/// Test data utilities
pub mod fixtures {
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use waste_dashboard::{WasteDataset, WasteRecord};

    pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// The three-row table used throughout the documentation examples
    pub fn sample_dataset() -> WasteDataset {
        WasteDataset::new(vec![
            WasteRecord::new("Harrington", "Landfill", ymd(2023, 1, 1), 10.0),
            WasteRecord::new("Harrington", "Recycling", ymd(2023, 1, 1), 5.0),
            WasteRecord::new("Lucas", "Landfill", ymd(2023, 1, 2), 8.0),
        ])
    }

    /// A larger table with repeated days and several streams per building
    pub fn campus_dataset() -> WasteDataset {
        let buildings = ["Harrington", "Lucas", "Benson Center", "Swig"];
        let streams = ["Landfill", "Recycling", "Compost"];

        let mut records = Vec::new();
        for day in 1..=14u32 {
            for (bi, building) in buildings.iter().enumerate() {
                for (si, stream) in streams.iter().enumerate() {
                    // Skip some pairs so not every combination exists
                    if (day as usize + bi + si) % 4 == 0 {
                        continue;
                    }
                    let weight = (day as f64) * 1.5 + (bi * 10 + si) as f64 + 0.1;
                    records.push(WasteRecord::new(building, stream, ymd(2023, 2, day), weight));
                }
            }
        }
        // Same-day duplicate
        records.push(WasteRecord::new("Lucas", "Compost", ymd(2023, 2, 3), 2.75));
        WasteDataset::new(records)
    }

    /// Write CSV text to a temporary file that lives as long as the handle
    pub fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp csv");
        file.write_all(contents.as_bytes()).expect("write temp csv");
        file.flush().expect("flush temp csv");
        file
    }

    pub const SAMPLE_CSV: &str = "\
Date,Building,Stream,Weight
1/1/2023,Harrington,Landfill,10
1/1/2023,Harrington,Recycling,5
1/2/2023,Lucas,Landfill,8
1/3/2023,Lucas,Compost,3.5
1/3/2023,Lucas,Compost,1.5
";
}

/// Logging utilities for tests
pub mod logging {
    use tracing::{debug, info};

    /// Log test step
    pub fn log_test_step(step: &str) {
        info!("🧪 Test Step: {}", step);
    }

    /// Log test data
    pub fn log_test_data<T: std::fmt::Debug>(label: &str, data: &T) {
        debug!("📊 {}: {:?}", label, data);
    }
}

pub mod charts;
pub mod dataset;
pub mod models;
pub mod ui;
pub mod view;

pub use charts::DashboardData;
pub use dataset::{LoadError, WasteDataset};
pub use models::{Aggregation, Config, Selection, WasteRecord};
pub use view::WasteDataView;

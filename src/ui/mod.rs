//! Terminal dashboard: two dropdowns driving a trend chart and a totals chart.

pub mod app;
pub mod components;
pub mod dropdown;
pub mod layout;

pub use app::{run_app, WasteDashboardApp};

//! Load a CSV from disk and build the dashboard data from it

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use test_log::test;
use waste_dashboard::{DashboardData, LoadError, Selection, WasteDataView, WasteDataset};

use crate::common::fixtures::{write_csv, ymd, SAMPLE_CSV};
use crate::common::logging;

fn load_sample() -> WasteDataView {
    let file = write_csv(SAMPLE_CSV);
    let dataset = WasteDataset::from_csv_path(file.path()).expect("sample csv loads");
    WasteDataView::new(dataset)
}

#[test]
fn test_csv_load_preserves_file_order() {
    logging::log_test_step("load sample csv");
    let view = load_sample();

    let dates: Vec<_> = view.dataset().records().iter().map(|r| r.date).collect();
    assert_eq!(
        dates,
        vec![ymd(2023, 1, 1), ymd(2023, 1, 1), ymd(2023, 1, 2), ymd(2023, 1, 3), ymd(2023, 1, 3)]
    );
    assert_eq!(view.buildings(), vec!["Harrington", "Lucas"]);
    assert_eq!(view.streams(), vec!["Landfill", "Recycling", "Compost"]);
}

#[test]
fn test_documented_example() {
    let view = load_sample();
    let selection = Selection::new(["Harrington"], ["Landfill", "Recycling"]);

    let rows = view.filter_records(&selection);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].stream, "Landfill");
    assert_eq!(rows[1].stream, "Recycling");

    let totals = view.aggregate_by_building_and_stream(&selection);
    let pairs: Vec<(&str, &str, f64)> = totals
        .iter()
        .map(|((b, s), w)| (b.as_str(), s.as_str(), *w))
        .collect();
    assert_eq!(
        pairs,
        vec![("Harrington", "Landfill", 10.0), ("Harrington", "Recycling", 5.0)]
    );

    let none = Selection::new(["Lucas"], ["Recycling"]);
    assert!(view.filter_records(&none).is_empty());
    assert!(view.aggregate_by_building_and_stream(&none).is_empty());
}

#[test]
fn test_dashboard_data_from_csv() {
    let view = load_sample();
    let data = DashboardData::build(&view, &view.full_selection());

    assert_eq!(data.row_count, 5);
    assert_eq!(data.trend.len(), 4);
    let lucas = data.totals.iter().find(|g| g.building == "Lucas").expect("Lucas group");
    assert_eq!(
        lucas.bars,
        vec![("Compost".to_string(), 5.0), ("Landfill".to_string(), 8.0)]
    );
    assert_eq!(data.streams, vec!["Compost", "Landfill", "Recycling"]);
    assert_eq!(data.date_bounds(), Some((ymd(2023, 1, 1), ymd(2023, 1, 3))));
}

#[test]
fn test_bad_date_fails_load() {
    let file = write_csv("Building,Stream,Date,Weight\nHarrington,Landfill,2023-02-30,4\n");

    let err = WasteDataset::from_csv_path(file.path()).unwrap_err();
    assert_matches!(err, LoadError::InvalidDate { row: 1, .. });
    assert_eq!(err.to_string(), "row 1: cannot parse date '2023-02-30'");
}

#[test]
fn test_missing_column_fails_load() {
    let file = write_csv("Building,Date,Weight\nHarrington,2023-01-01,4\n");

    let err = WasteDataset::from_csv_path(file.path()).unwrap_err();
    assert_matches!(err, LoadError::MissingColumn("Stream"));
}

#[test]
fn test_ragged_row_fails_load() {
    let file = write_csv("Building,Stream,Date,Weight\nHarrington,Landfill,2023-01-01\n");

    let err = WasteDataset::from_csv_path(file.path()).unwrap_err();
    assert_matches!(err, LoadError::Csv(_));
}

#[test]
fn test_header_only_file_is_empty_dataset() {
    let file = write_csv("Building,Stream,Date,Weight\n");

    let dataset = WasteDataset::from_csv_path(file.path()).unwrap();
    assert!(dataset.is_empty());
    let view = WasteDataView::new(dataset);
    assert!(DashboardData::build(&view, &view.default_selection()).is_empty());
}

//! Filter and aggregation properties checked across many selections

use pretty_assertions::assert_eq;
use test_log::test;
use waste_dashboard::{Selection, WasteDataView};

use crate::common::fixtures::campus_dataset;
use crate::common::logging;

/// Every subset of `values`, the empty one included
fn subsets(values: &[String]) -> Vec<Vec<String>> {
    (0..1u32 << values.len())
        .map(|mask| {
            values
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, v)| v.clone())
                .collect()
        })
        .collect()
}

fn all_selections(view: &WasteDataView) -> Vec<Selection> {
    let mut streams = view.streams();
    // An unknown value must simply match nothing
    streams.push("Glass".to_string());

    let mut selections = Vec::new();
    for buildings in subsets(&view.buildings()) {
        for streams in subsets(&streams) {
            selections.push(Selection::new(buildings.clone(), streams));
        }
    }
    selections
}

#[test]
fn test_filter_returns_exactly_the_matching_records() {
    logging::log_test_step("filter membership over all selections");
    let view = WasteDataView::new(campus_dataset());

    for selection in all_selections(&view) {
        let rows = view.filter_records(&selection);

        for row in &rows {
            assert!(selection.buildings.contains(&row.building));
            assert!(selection.streams.contains(&row.stream));
        }

        let expected: Vec<_> = view
            .dataset()
            .records()
            .iter()
            .filter(|r| selection.buildings.contains(&r.building) && selection.streams.contains(&r.stream))
            .collect();
        assert_eq!(rows, expected, "selection {:?}", selection);
    }
}

#[test]
fn test_aggregate_sum_matches_filtered_sum() {
    let view = WasteDataView::new(campus_dataset());

    for selection in all_selections(&view) {
        let filtered: f64 = view.filter_records(&selection).iter().map(|r| r.weight).sum();
        let aggregated: f64 = view.aggregate_by_building_and_stream(&selection).values().sum();
        assert!(
            (filtered - aggregated).abs() < 1e-9,
            "selection {:?}: {} != {}",
            selection,
            filtered,
            aggregated
        );
    }
}

#[test]
fn test_aggregate_is_idempotent() {
    let view = WasteDataView::new(campus_dataset());
    let selection = view.full_selection();

    let first = view.aggregate_by_building_and_stream(&selection);
    let second = view.aggregate_by_building_and_stream(&selection);
    assert_eq!(first, second);
}

#[test]
fn test_aggregate_omits_absent_pairs() {
    let view = WasteDataView::new(campus_dataset());
    let selection = view.full_selection();

    let totals = view.aggregate_by_building_and_stream(&selection);
    for (building, stream) in totals.keys() {
        assert!(view
            .dataset()
            .records()
            .iter()
            .any(|r| &r.building == building && &r.stream == stream));
    }
}

#[test]
fn test_empty_dimension_yields_nothing() {
    let view = WasteDataView::new(campus_dataset());

    for selection in all_selections(&view) {
        if selection.buildings.is_empty() || selection.streams.is_empty() {
            assert!(view.filter_records(&selection).is_empty());
            assert!(view.aggregate_by_building_and_stream(&selection).is_empty());
        }
    }
}

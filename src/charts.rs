//! Chart-ready data for the trend and comparison panels.
//!
//! `DashboardData::build` is the single entry point the UI and the report
//! binary call whenever the selection changes.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use crate::models::Selection;
use crate::view::WasteDataView;

/// One line on the trend chart: a building/stream pair over time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub building: String,
    pub stream: String,
    pub points: Vec<(NaiveDate, f64)>,
}

impl TrendSeries {
    pub fn label(&self) -> String {
        format!("{} / {}", self.building, self.stream)
    }
}

/// One bar group on the comparison chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildingTotals {
    pub building: String,
    pub bars: Vec<(String, f64)>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardData {
    pub trend: Vec<TrendSeries>,
    pub totals: Vec<BuildingTotals>,
    /// Streams present in `totals`, sorted
    pub streams: Vec<String>,
    pub row_count: usize,
}

impl DashboardData {
    pub fn build(view: &WasteDataView, selection: &Selection) -> Self {
        let rows = view.filter_records(selection);

        let mut trend: Vec<TrendSeries> = Vec::new();
        let mut series_index: HashMap<(&str, &str), usize> = HashMap::new();
        for record in rows.iter().copied() {
            let idx = *series_index
                .entry((record.building.as_str(), record.stream.as_str()))
                .or_insert_with(|| {
                    trend.push(TrendSeries {
                        building: record.building.clone(),
                        stream: record.stream.clone(),
                        points: Vec::new(),
                    });
                    trend.len() - 1
                });
            trend[idx].points.push((record.date, record.weight));
        }

        let mut totals: Vec<BuildingTotals> = Vec::new();
        let mut streams = BTreeSet::new();
        for ((building, stream), total) in view.aggregate_by_building_and_stream(selection) {
            streams.insert(stream.clone());
            // Aggregation keys are sorted, so each building's bars are contiguous
            if let Some(group) = totals.last_mut().filter(|g| g.building == building) {
                group.bars.push((stream, total));
                continue;
            }
            totals.push(BuildingTotals {
                building,
                bars: vec![(stream, total)],
            });
        }

        Self {
            trend,
            totals,
            streams: streams.into_iter().collect(),
            row_count: rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.trend.iter().flat_map(|s| s.points.iter().map(|(d, _)| *d));
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    pub fn weight_bounds(&self) -> Option<(f64, f64)> {
        let mut weights = self.trend.iter().flat_map(|s| s.points.iter().map(|(_, w)| *w));
        let first = weights.next()?;
        Some(weights.fold((first, first), |(lo, hi), w| (lo.min(w), hi.max(w))))
    }

    pub fn max_total(&self) -> f64 {
        self.totals
            .iter()
            .flat_map(|g| g.bars.iter().map(|(_, v)| *v))
            .fold(0.0, f64::max)
    }

    /// Position of a stream in the sorted legend, used to pick its color
    pub fn stream_index(&self, stream: &str) -> Option<usize> {
        self.streams.iter().position(|s| s == stream)
    }
}

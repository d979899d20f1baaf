/// Chart widgets and formatting helpers for the waste dashboard
use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::charts::DashboardData;

pub const TREND_TITLE: &str = "Waste Trends Over Time";
pub const TOTALS_TITLE: &str = "Total Waste by Building and Stream";
pub const EMPTY_MESSAGE: &str = "No data for current selection";

const PALETTE: [Color; 8] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::LightRed,
    Color::LightBlue,
    Color::LightMagenta,
    Color::LightGreen,
];

// Terminals cannot dash a line, so the stream is told apart by marker instead
const STREAM_MARKERS: [Marker; 4] = [Marker::Braille, Marker::Dot, Marker::Block, Marker::Bar];

pub fn palette_color(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

pub fn stream_marker(index: usize) -> Marker {
    STREAM_MARKERS[index % STREAM_MARKERS.len()]
}

/// Format pounds with K/M suffixes
pub fn format_weight(value: f64) -> String {
    if value < 0.0 {
        return format!("-{}", format_weight(-value));
    }
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}

/// Y-axis bounds covering the plotted weights; always includes zero
pub fn weight_axis_bounds(min_weight: f64, max_weight: f64) -> [f64; 2] {
    let lo = if min_weight < 0.0 { min_weight * 1.1 } else { 0.0 };
    let hi = if max_weight > 0.0 { max_weight * 1.1 } else { 0.0 };
    if hi > lo {
        [lo, hi]
    } else {
        [lo, lo + 1.0]
    }
}

/// Chart x coordinate for a date
pub fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// Start, middle and end labels for the date axis
pub fn date_axis_labels(lo: NaiveDate, hi: NaiveDate) -> Vec<String> {
    let mid = lo + (hi - lo) / 2;
    vec![
        lo.format("%Y-%m-%d").to_string(),
        mid.format("%Y-%m-%d").to_string(),
        hi.format("%Y-%m-%d").to_string(),
    ]
}

fn chart_block(title: Line<'_>) -> Block<'_> {
    Block::default().borders(Borders::ALL).title(title)
}

/// Placeholder shown when the selection matches no rows
pub fn render_empty(f: &mut Frame, area: Rect, title: &str) {
    let paragraph = Paragraph::new(EMPTY_MESSAGE)
        .alignment(Alignment::Center)
        .block(chart_block(Line::from(title.to_string())))
        .style(Style::default().fg(Color::DarkGray));

    f.render_widget(paragraph, area);
}

/// Line chart of weight over date: color by building, marker by stream
pub fn render_trend_chart(f: &mut Frame, area: Rect, data: &DashboardData) {
    let (Some((lo, hi)), Some((min_weight, max_weight))) = (data.date_bounds(), data.weight_bounds())
    else {
        render_empty(f, area, TREND_TITLE);
        return;
    };

    let mut buildings: Vec<&str> = Vec::new();
    let mut streams: Vec<&str> = Vec::new();
    for series in &data.trend {
        if !buildings.contains(&series.building.as_str()) {
            buildings.push(&series.building);
        }
        if !streams.contains(&series.stream.as_str()) {
            streams.push(&series.stream);
        }
    }

    let points: Vec<Vec<(f64, f64)>> = data
        .trend
        .iter()
        .map(|s| s.points.iter().map(|(d, w)| (date_to_x(*d), *w)).collect())
        .collect();

    let datasets: Vec<Dataset> = data
        .trend
        .iter()
        .zip(&points)
        .map(|(series, pts)| {
            let color = buildings
                .iter()
                .position(|b| *b == series.building)
                .map(palette_color)
                .unwrap_or(Color::White);
            let marker = streams
                .iter()
                .position(|s| *s == series.stream)
                .map(stream_marker)
                .unwrap_or(Marker::Braille);

            Dataset::default()
                .name(series.label())
                .marker(marker)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(color))
                .data(pts)
        })
        .collect();

    // Pad a single-day range so the axis has width
    let (x_lo, x_hi) = (date_to_x(lo), date_to_x(hi).max(date_to_x(lo) + 1.0));
    let [y_lo, y_hi] = weight_axis_bounds(min_weight, max_weight);

    let chart = Chart::new(datasets)
        .block(chart_block(Line::from(Span::styled(
            TREND_TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        ))))
        .x_axis(
            Axis::default()
                .title("Date")
                .style(Style::default().fg(Color::Gray))
                .bounds([x_lo, x_hi])
                .labels(date_axis_labels(lo, hi)),
        )
        .y_axis(
            Axis::default()
                .title("Weight (lbs)")
                .style(Style::default().fg(Color::Gray))
                .bounds([y_lo, y_hi])
                .labels(vec![
                    format_weight(y_lo),
                    format_weight((y_lo + y_hi) / 2.0),
                    format_weight(y_hi),
                ]),
        );

    f.render_widget(chart, area);
}

/// Grouped bar chart of total weight per building, one colored bar per stream
pub fn render_totals_chart(f: &mut Frame, area: Rect, data: &DashboardData) {
    if data.totals.is_empty() {
        render_empty(f, area, TOTALS_TITLE);
        return;
    }

    let mut title = vec![Span::styled(
        TOTALS_TITLE,
        Style::default().add_modifier(Modifier::BOLD),
    )];
    for (i, stream) in data.streams.iter().enumerate() {
        title.push(Span::raw("  "));
        title.push(Span::styled(
            format!("■ {}", stream),
            Style::default().fg(palette_color(i)),
        ));
    }

    let groups: Vec<Vec<Bar>> = data
        .totals
        .iter()
        .map(|group| {
            group
                .bars
                .iter()
                .map(|(stream, total)| {
                    let color = data.stream_index(stream).map(palette_color).unwrap_or(Color::White);
                    Bar::default()
                        .value(total.max(0.0).round() as u64)
                        .text_value(format_weight(*total))
                        .style(Style::default().fg(color))
                        .value_style(Style::default().fg(Color::Black).bg(color))
                })
                .collect()
        })
        .collect();

    let mut chart = BarChart::default()
        .block(chart_block(Line::from(title)))
        .bar_width(7)
        .bar_gap(1)
        .group_gap(3)
        .max(data.max_total().max(1.0).round() as u64);

    for (group, bars) in data.totals.iter().zip(&groups) {
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(group.building.clone()))
                .bars(bars),
        );
    }

    f.render_widget(chart, area);
}

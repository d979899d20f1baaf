use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Height of a dropdown panel, borders included
pub const DROPDOWN_HEIGHT: u16 = 8;

/// Areas of the dashboard screen, top to bottom
pub struct DashboardLayout {
    pub title: Rect,
    pub building_dropdown: Rect,
    pub stream_dropdown: Rect,
    pub line_chart: Rect,
    pub bar_chart: Rect,
    pub writeup: Option<Rect>,
    pub status_bar: Rect,
}

impl DashboardLayout {
    /// Create a new layout from the given area
    pub fn new(area: Rect, show_writeup: bool) -> Self {
        let writeup_height = if show_writeup { 9 } else { 0 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),               // Title
                Constraint::Length(DROPDOWN_HEIGHT), // Dropdowns
                Constraint::Fill(1),                 // Line chart
                Constraint::Fill(1),                 // Bar chart
                Constraint::Length(writeup_height),  // Design rationale
                Constraint::Length(3),               // Status bar
            ])
            .split(area);

        let controls = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        Self {
            title: chunks[0],
            building_dropdown: controls[0],
            stream_dropdown: controls[1],
            line_chart: chunks[2],
            bar_chart: chunks[3],
            writeup: show_writeup.then_some(chunks[4]),
            status_bar: chunks[5],
        }
    }
}

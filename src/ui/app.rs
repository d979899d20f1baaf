use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use tracing::{debug, info};

use super::components::{render_totals_chart, render_trend_chart};
use super::dropdown::MultiSelect;
use super::layout::DashboardLayout;
use crate::charts::DashboardData;
use crate::models::{Config, Selection};
use crate::view::WasteDataView;

pub const DASHBOARD_TITLE: &str = "Santa Clara University Waste Data Visualization";
pub const WRITEUP_TITLE: &str = "Design Rationale and Justification";

pub const WRITEUP: [&str; 3] = [
    "The interactive visualization allows users to explore waste data by building and waste stream. \
     Different colors distinguish buildings and waste streams. Temporal trends are shown to identify \
     patterns in waste management.",
    "Users can interact with the dropdown menus to filter the data, making the visualization dynamic \
     and informative. Annotations highlight significant events or policy changes affecting waste trends.",
    "Bar charts provide a comparative view of total waste volumes, helping to identify high-impact \
     areas for waste reduction.",
];

/// Which dropdown receives list keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Buildings,
    Streams,
}

pub struct WasteDashboardApp {
    pub view: WasteDataView,
    pub building_dropdown: MultiSelect,
    pub stream_dropdown: MultiSelect,
    pub focus: Focus,
    pub data: DashboardData,
    pub show_writeup: bool,
    pub should_quit: bool,
}

impl WasteDashboardApp {
    pub fn new(view: WasteDataView) -> Self {
        let initial = view.default_selection();
        let building_dropdown =
            MultiSelect::new("Select Building:", view.buildings(), initial.buildings);
        let stream_dropdown =
            MultiSelect::new("Select Waste Stream:", view.streams(), initial.streams);

        let mut app = Self {
            view,
            building_dropdown,
            stream_dropdown,
            focus: Focus::Buildings,
            data: DashboardData::default(),
            show_writeup: false,
            should_quit: false,
        };
        app.refresh_data();
        app
    }

    pub fn selection(&self) -> Selection {
        Selection {
            buildings: self.building_dropdown.selected.clone(),
            streams: self.stream_dropdown.selected.clone(),
        }
    }

    /// Recompute both charts from the current dropdown state
    pub fn refresh_data(&mut self) {
        self.data = DashboardData::build(&self.view, &self.selection());
        debug!(
            "Refreshed charts: {} rows, {} series, {} building groups",
            self.data.row_count,
            self.data.trend.len(),
            self.data.totals.len()
        );
    }

    fn focused_dropdown(&mut self) -> &mut MultiSelect {
        match self.focus {
            Focus::Buildings => &mut self.building_dropdown,
            Focus::Streams => &mut self.stream_dropdown,
        }
    }

    pub fn draw(&self, f: &mut Frame) {
        let layout = DashboardLayout::new(f.area(), self.show_writeup);

        let title = Paragraph::new(DASHBOARD_TITLE)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        f.render_widget(title, layout.title);

        self.building_dropdown
            .render(f, layout.building_dropdown, self.focus == Focus::Buildings);
        self.stream_dropdown
            .render(f, layout.stream_dropdown, self.focus == Focus::Streams);

        render_trend_chart(f, layout.line_chart, &self.data);
        render_totals_chart(f, layout.bar_chart, &self.data);

        if let Some(area) = layout.writeup {
            self.render_writeup(f, area);
        }

        self.render_status_bar(f, layout.status_bar);
    }

    fn render_writeup(&self, f: &mut Frame, area: Rect) {
        let mut lines = Vec::new();
        for paragraph in WRITEUP {
            lines.push(Line::from(paragraph));
            lines.push(Line::from(""));
        }

        let writeup = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(WRITEUP_TITLE))
            .style(Style::default().fg(Color::White));
        f.render_widget(writeup, area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let key = |k: &'static str, color: Color| {
            Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
        };
        let text = |t: &'static str| Span::styled(t, Style::default().fg(Color::Gray));

        let status = Line::from(vec![
            key("Tab", Color::Yellow),
            text(" switch list • "),
            key("Space", Color::Green),
            text(" toggle • "),
            key("a/c", Color::Green),
            text(" all/clear • "),
            key("/", Color::Cyan),
            text(" search • "),
            key("?", Color::Cyan),
            text(" rationale • "),
            key("Q", Color::Red),
            text(" quit   "),
            Span::styled(
                format!("{} rows selected", self.data.row_count),
                Style::default().fg(Color::Cyan),
            ),
        ]);

        let paragraph = Paragraph::new(status)
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::White));
        f.render_widget(paragraph, area);
    }

    /// Apply one terminal read. A failed read is returned so the loop stops.
    pub fn handle_terminal_event(&mut self, event: io::Result<Event>) -> Result<()> {
        match event? {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key_event(key.code),
            _ => Ok(()),
        }
    }

    pub fn handle_key_event(&mut self, key: KeyCode) -> Result<()> {
        // While a search is open, letters belong to the query
        if self.focused_dropdown().is_searching() {
            if self.focused_dropdown().handle_key(key) {
                self.refresh_data();
            }
            return Ok(());
        }

        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                self.focus = match self.focus {
                    Focus::Buildings => Focus::Streams,
                    Focus::Streams => Focus::Buildings,
                };
            }
            KeyCode::Char('?') => {
                self.show_writeup = !self.show_writeup;
            }
            other => {
                if self.focused_dropdown().handle_key(other) {
                    self.refresh_data();
                }
            }
        }
        Ok(())
    }
}

/// Run the dashboard until the user quits
pub fn run_app(view: WasteDataView, config: &Config) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut app = WasteDashboardApp::new(view);
    info!("Dashboard started with {} rows selected", app.data.row_count);

    let tick = Duration::from_millis(config.tick_ms);
    let result = loop {
        if let Err(e) = terminal.draw(|f| app.draw(f)) {
            break Err(e.into());
        }

        match event::poll(tick) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(e) => break Err(e.into()),
        }

        if let Err(e) = app.handle_terminal_event(event::read()) {
            break Err(e);
        }

        if app.should_quit {
            break Ok(());
        }
    };

    // Cleanup terminal
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}

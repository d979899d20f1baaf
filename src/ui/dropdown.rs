use crossterm::event::KeyCode;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use std::collections::BTreeSet;

/// Multi-select list of options with optional fuzzy narrowing
pub struct MultiSelect {
    pub label: String,
    pub options: Vec<String>,
    pub selected: BTreeSet<String>,
    /// Index into `visible()`
    pub cursor: usize,
    /// Active search text; `None` when not searching
    pub query: Option<String>,
    matcher: SkimMatcherV2,
}

impl std::fmt::Debug for MultiSelect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiSelect")
            .field("label", &self.label)
            .field("options", &self.options)
            .field("selected", &self.selected)
            .field("cursor", &self.cursor)
            .field("query", &self.query)
            .finish()
    }
}

impl MultiSelect {
    pub fn new<I>(label: &str, options: Vec<String>, initial: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            label: label.to_string(),
            options,
            selected: initial.into_iter().collect(),
            cursor: 0,
            query: None,
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Options shown under the current query, best match first
    pub fn visible(&self) -> Vec<&String> {
        let pattern = match self.query.as_deref() {
            Some(q) if !q.is_empty() => q,
            _ => return self.options.iter().collect(),
        };

        let mut scored: Vec<(i64, &String)> = self
            .options
            .iter()
            .filter_map(|opt| self.matcher.fuzzy_match(opt, pattern).map(|score| (score, opt)))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, opt)| opt).collect()
    }

    pub fn is_searching(&self) -> bool {
        self.query.is_some()
    }

    /// Handle a key press. Returns true when the selected set changed.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        let changed = match key {
            KeyCode::Up => {
                self.move_cursor(-1);
                false
            }
            KeyCode::Down => {
                self.move_cursor(1);
                false
            }
            KeyCode::Enter => self.toggle_current(),
            KeyCode::Esc => {
                self.query = None;
                false
            }
            KeyCode::Backspace => {
                if let Some(query) = self.query.as_mut() {
                    query.pop();
                }
                false
            }
            KeyCode::Char(c) if self.is_searching() => {
                if let Some(query) = self.query.as_mut() {
                    query.push(c);
                }
                false
            }
            KeyCode::Char(' ') => self.toggle_current(),
            KeyCode::Char('/') => {
                self.query = Some(String::new());
                false
            }
            KeyCode::Char('a') | KeyCode::Char('A') => self.select_all(),
            KeyCode::Char('c') | KeyCode::Char('C') => self.clear(),
            _ => false,
        };

        self.clamp_cursor();
        changed
    }

    pub fn toggle_current(&mut self) -> bool {
        let Some(option) = self.visible().get(self.cursor).map(|s| s.to_string()) else {
            return false;
        };

        if !self.selected.remove(&option) {
            self.selected.insert(option);
        }
        true
    }

    pub fn select_all(&mut self) -> bool {
        let before = self.selected.len();
        self.selected.extend(self.options.iter().cloned());
        self.selected.len() != before
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.selected.is_empty();
        self.selected.clear();
        changed
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.visible().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = (self.cursor as isize + delta).rem_euclid(len as isize) as usize;
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    /// Render the dropdown as a checklist
    pub fn render(&self, f: &mut Frame, area: Rect, focused: bool) {
        let items: Vec<ListItem> = self
            .visible()
            .into_iter()
            .map(|opt| {
                let checked = self.selected.contains(opt);
                let marker = if checked { "[x] " } else { "[ ] " };
                let style = if checked {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(opt.as_str(), style),
                ]))
            })
            .collect();

        let mut title = format!(
            "{} ({}/{})",
            self.label,
            self.selected.len(),
            self.options.len()
        );
        if let Some(query) = &self.query {
            title.push_str(&format!(" /{}", query));
        }

        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(title),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut state = ListState::default();
        if focused {
            state.select(Some(self.cursor));
        }
        f.render_stateful_widget(list, area, &mut state);
    }
}

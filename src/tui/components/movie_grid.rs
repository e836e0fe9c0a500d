//! # Movie Grid Component
//!
//! Renders search results as a grid of cards and tracks which card is
//! selected.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `MovieGridState` lives in `TuiState` (selection, scroll, cached layout)
//! - `MovieGrid` is created each frame with borrowed state and the movies
//!
//! The column count depends on the terminal width, so it is computed during
//! render and cached for keyboard navigation.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::catalog::MovieSummary;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text::truncate_to_width;
use crate::tui::event::TuiEvent;

/// Minimum card width in cells, including borders.
pub const CARD_WIDTH: u16 = 28;
/// Card height: border + title + meta line + overview line + border.
pub const CARD_HEIGHT: u16 = 5;

/// Events emitted by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    /// Open the detail overlay for the movie at this index.
    Open(usize),
}

#[derive(Debug, Clone)]
pub struct MovieGridState {
    pub selected: usize,
    /// First visible row.
    pub scroll_row: usize,
    // Layout cache from the last render.
    columns: usize,
    visible_rows: usize,
    len: usize,
}

impl MovieGridState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            scroll_row: 0,
            columns: 1,
            visible_rows: 1,
            len: 0,
        }
    }

    /// Back to the first card, e.g. after a new search or page change.
    pub fn reset(&mut self) {
        self.selected = 0;
        self.scroll_row = 0;
    }

    /// Updates the cached layout and keeps the selection in range.
    pub fn set_layout(&mut self, len: usize, columns: usize, visible_rows: usize) {
        self.len = len;
        self.columns = columns.max(1);
        self.visible_rows = visible_rows.max(1);
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
        self.scroll_to_selected();
    }

    fn scroll_to_selected(&mut self) {
        let row = self.selected / self.columns;
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + self.visible_rows {
            self.scroll_row = row + 1 - self.visible_rows;
        }
    }

    fn select(&mut self, index: usize) {
        if self.len == 0 {
            return;
        }
        self.selected = index.min(self.len - 1);
        self.scroll_to_selected();
    }
}

impl Default for MovieGridState {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for MovieGridState {
    type Event = GridEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<GridEvent> {
        match event {
            TuiEvent::CursorLeft => self.select(self.selected.saturating_sub(1)),
            TuiEvent::CursorRight => self.select(self.selected + 1),
            TuiEvent::CursorUp => {
                if self.selected >= self.columns {
                    self.select(self.selected - self.columns);
                }
            }
            TuiEvent::CursorDown => {
                if self.selected + self.columns < self.len {
                    self.select(self.selected + self.columns);
                }
            }
            TuiEvent::Submit if self.len > 0 => return Some(GridEvent::Open(self.selected)),
            _ => {}
        }
        None
    }
}

/// Transient render wrapper for the grid.
pub struct MovieGrid<'a> {
    state: &'a mut MovieGridState,
    movies: &'a [MovieSummary],
    focused: bool,
}

impl<'a> MovieGrid<'a> {
    pub fn new(state: &'a mut MovieGridState, movies: &'a [MovieSummary], focused: bool) -> Self {
        Self {
            state,
            movies,
            focused,
        }
    }
}

impl Component for MovieGrid<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let columns = (area.width / CARD_WIDTH).max(1) as usize;
        let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
        self.state.set_layout(self.movies.len(), columns, visible_rows);

        let row_areas = Layout::vertical(vec![Constraint::Length(CARD_HEIGHT); visible_rows]).split(area);
        let column_constraints = vec![Constraint::Ratio(1, columns as u32); columns];

        for (row_offset, row_area) in row_areas.iter().enumerate() {
            let row = self.state.scroll_row + row_offset;
            let cells = Layout::horizontal(column_constraints.clone()).split(*row_area);
            for (col, cell) in cells.iter().enumerate() {
                let index = row * columns + col;
                let Some(movie) = self.movies.get(index) else {
                    return;
                };
                let is_selected = self.focused && index == self.state.selected;
                render_card(frame, *cell, movie, is_selected);
            }
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, movie: &MovieSummary, is_selected: bool) {
    let inner_width = area.width.saturating_sub(2) as usize;

    let border_style = if is_selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title_style = if is_selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let year = movie
        .release_year()
        .map(|y| y.to_string())
        .unwrap_or_else(|| "----".to_string());
    let meta = format!("{year}  ★ {}", movie.rating_label());

    let lines = vec![
        Line::from(Span::styled(truncate_to_width(&movie.title, inner_width), title_style)),
        Line::from(Span::styled(
            truncate_to_width(&meta, inner_width),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            truncate_to_width(&movie.overview, inner_width),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let card = Paragraph::new(lines).block(Block::bordered().border_style(border_style));
    frame.render_widget(card, area);
}

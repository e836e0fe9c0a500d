//! # Movie Detail Overlay
//!
//! Centered overlay with the full details of one movie. Opened with Enter
//! on a grid card, closed with Esc, Enter, Backspace or `q`.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `MovieModalState` lives in `TuiState` as `Option<_>` (None = hidden)
//! - `MovieModal` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::catalog::{MovieSummary, image_url};
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

/// Persistent state for the detail overlay.
#[derive(Debug, Clone)]
pub struct MovieModalState {
    pub movie: MovieSummary,
    image_base_url: String,
    scroll: u16,
}

/// Events emitted by the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEvent {
    Close,
}

impl MovieModalState {
    pub fn new(movie: MovieSummary, image_base_url: &str) -> Self {
        Self {
            movie,
            image_base_url: image_base_url.to_string(),
            scroll: 0,
        }
    }

    /// Handle a key event, returning a ModalEvent if the overlay should act.
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<ModalEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::Submit | TuiEvent::Backspace | TuiEvent::InputChar('q') => {
                Some(ModalEvent::Close)
            }
            TuiEvent::CursorUp => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                self.scroll = self.scroll.saturating_add(1);
                None
            }
            _ => None,
        }
    }

    fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let movie = &self.movie;
        let label = Style::default().fg(Color::DarkGray);

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Release date  ", label),
                Span::raw(movie.release_label()),
            ]),
            Line::from(vec![
                Span::styled("Rating        ", label),
                Span::styled(movie.rating_label(), Style::default().fg(Color::Yellow)),
                Span::styled(format!("  ({} votes)", movie.vote_count), label),
            ]),
            Line::default(),
        ];

        if movie.overview.trim().is_empty() {
            lines.push(Line::from(Span::styled(
                "No overview available.",
                label.add_modifier(Modifier::ITALIC),
            )));
        } else {
            for wrapped in textwrap::wrap(&movie.overview, width.max(1)) {
                lines.push(Line::from(wrapped.into_owned()));
            }
        }

        lines.push(Line::default());
        if let Some(path) = &movie.poster_path {
            lines.push(Line::from(vec![
                Span::styled("Poster    ", label),
                Span::styled(
                    image_url(&self.image_base_url, "w500", path),
                    Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
                ),
            ]));
        }
        if let Some(path) = &movie.backdrop_path {
            lines.push(Line::from(vec![
                Span::styled("Backdrop  ", label),
                Span::styled(
                    image_url(&self.image_base_url, "original", path),
                    Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
                ),
            ]));
        }
        lines
    }
}

/// Transient render wrapper for the detail overlay.
pub struct MovieModal<'a> {
    state: &'a mut MovieModalState,
}

impl<'a> MovieModal<'a> {
    pub fn new(state: &'a mut MovieModalState) -> Self {
        Self { state }
    }
}

impl Component for MovieModal<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 70, area);

        // Clear underlying content
        frame.render_widget(Clear, overlay);

        let title = match self.state.movie.release_year() {
            Some(year) => format!(" {} ({year}) ", self.state.movie.title),
            None => format!(" {} ", self.state.movie.title),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(Span::styled(title, Style::default().add_modifier(Modifier::BOLD)))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" ↑↓ Scroll  Esc Close ").centered())
            .padding(Padding::horizontal(1));

        let inner_width = overlay.width.saturating_sub(4) as usize; // borders + padding
        let lines = self.state.lines(inner_width);

        // Don't scroll past the last line.
        let inner_height = overlay.height.saturating_sub(2) as usize;
        let max_scroll = lines.len().saturating_sub(inner_height) as u16;
        self.state.scroll = self.state.scroll.min(max_scroll);

        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((self.state.scroll, 0));
        frame.render_widget(paragraph, overlay);
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

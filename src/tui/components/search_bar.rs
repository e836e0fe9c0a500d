//! # SearchBar Component
//!
//! Single-line text field for the search query.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste)
//! - Handle editing (backspace, delete, cursor movement)
//! - Emit the raw text on Enter and clear the field
//!
//! Validation (trimming, rejecting empty input) is not done here; the raw
//! text goes to the core reducer, which owns the query rules.
//!
//! The buffer is internal state. `focused` is a prop set by the parent each
//! frame.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const PLACEHOLDER: &str = "Search movies...";

/// High-level events emitted by the SearchBar
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// Enter pressed; carries the untrimmed text.
    Submit(String),
}

pub struct SearchBar {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Byte offset of the cursor, always on a char boundary.
    cursor: usize,
    /// Whether the field has keyboard focus (Prop)
    pub focused: bool,
}

impl SearchBar {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            focused: true,
        }
    }

    fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.cursor)
    }
}

impl Default for SearchBar {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for SearchBar {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SearchEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut buf = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut buf));
                None
            }
            TuiEvent::Paste(text) => {
                // Single-line field: flatten newlines.
                let flat = text.replace(['\r', '\n'], " ");
                self.insert_str(&flat);
                None
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let start = self.prev_boundary();
                    self.buffer.replace_range(start..self.cursor, "");
                    self.cursor = start;
                }
                None
            }
            TuiEvent::Delete => {
                let end = self.next_boundary();
                self.buffer.replace_range(self.cursor..end, "");
                None
            }
            TuiEvent::CursorLeft => {
                self.cursor = self.prev_boundary();
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = self.next_boundary();
                None
            }
            TuiEvent::Home => {
                self.cursor = 0;
                None
            }
            TuiEvent::End => {
                self.cursor = self.buffer.len();
                None
            }
            TuiEvent::Submit => {
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                Some(SearchEvent::Submit(text))
            }
            _ => None,
        }
    }
}

impl Component for SearchBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .title(" Search ")
            .border_style(border_style)
            .title_style(border_style);

        let inner_width = area.width.saturating_sub(2) as usize;
        let before_cursor = self.buffer[..self.cursor].width();
        // Scroll horizontally so the cursor stays inside the field.
        let skip = before_cursor.saturating_sub(inner_width.saturating_sub(1));

        let line = if self.buffer.is_empty() {
            Line::from(Span::styled(
                PLACEHOLDER,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ))
        } else {
            Line::from(self.buffer.as_str())
        };

        let paragraph = Paragraph::new(line).block(block).scroll((0, skip as u16));
        frame.render_widget(paragraph, area);

        if self.focused {
            let x = area.x + 1 + (before_cursor - skip) as u16;
            frame.set_cursor_position(Position::new(x, area.y + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_str(bar: &mut SearchBar, s: &str) {
        for c in s.chars() {
            bar.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_typing_and_submit_clears_buffer() {
        let mut bar = SearchBar::new();
        type_str(&mut bar, " matrix ");
        let event = bar.handle_event(&TuiEvent::Submit);
        assert_eq!(event, Some(SearchEvent::Submit(" matrix ".to_string())));
        assert!(bar.buffer.is_empty());
        assert_eq!(bar.cursor, 0);
    }

    #[test]
    fn test_submit_empty_still_emits() {
        let mut bar = SearchBar::new();
        assert_eq!(
            bar.handle_event(&TuiEvent::Submit),
            Some(SearchEvent::Submit(String::new()))
        );
    }

    #[test]
    fn test_cursor_editing_with_multibyte_chars() {
        let mut bar = SearchBar::new();
        type_str(&mut bar, "amélie");
        bar.handle_event(&TuiEvent::CursorLeft);
        bar.handle_event(&TuiEvent::CursorLeft);
        bar.handle_event(&TuiEvent::CursorLeft);
        bar.handle_event(&TuiEvent::Backspace);
        assert_eq!(bar.buffer, "amlie");

        bar.handle_event(&TuiEvent::Home);
        bar.handle_event(&TuiEvent::Delete);
        assert_eq!(bar.buffer, "mlie");

        bar.handle_event(&TuiEvent::End);
        type_str(&mut bar, "!");
        assert_eq!(bar.buffer, "mlie!");
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut bar = SearchBar::new();
        bar.handle_event(&TuiEvent::Paste("blade\nrunner".to_string()));
        assert_eq!(bar.buffer, "blade runner");
    }

    #[test]
    fn test_render_shows_placeholder() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut bar = SearchBar::new();
        terminal.draw(|f| bar.render(f, f.area())).unwrap();

        let buffer = terminal.backend().buffer();
        let row: String = (0..40).map(|x| buffer[(x, 1)].symbol()).collect();
        assert!(row.contains("Search movies..."));
    }
}

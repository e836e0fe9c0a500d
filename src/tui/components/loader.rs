//! # Loader Component
//!
//! Braille spinner with a label. Visibility is decided by
//! `core::loader::LoaderDebounce`; this only draws the current frame.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct Loader {
    pub frame_index: usize,
}

impl Loader {
    pub fn new(frame_index: usize) -> Self {
        Self { frame_index }
    }

    fn glyph(&self) -> &'static str {
        SPINNER_FRAMES[self.frame_index % SPINNER_FRAMES.len()]
    }
}

impl Component for Loader {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(self.glyph(), Style::default().fg(Color::Yellow)),
            Span::styled(" Loading movies", Style::default().fg(Color::Gray)),
        ]);
        frame.render_widget(Paragraph::new(line).centered(), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_wraps_around() {
        assert_eq!(Loader::new(0).glyph(), "⠋");
        assert_eq!(Loader::new(10).glyph(), "⠋");
        assert_eq!(Loader::new(13).glyph(), "⠸");
    }
}

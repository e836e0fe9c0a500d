//! # ErrorMessage Component
//!
//! Shown in place of the grid when the current fetch failed.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::catalog::CatalogError;
use crate::tui::component::Component;

pub const ERROR_TEXT: &str = "There was an error, please try again...";

pub struct ErrorMessage<'a> {
    pub error: &'a CatalogError,
}

impl<'a> ErrorMessage<'a> {
    pub fn new(error: &'a CatalogError) -> Self {
        Self { error }
    }
}

impl Component for ErrorMessage<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                ERROR_TEXT,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.error.to_string(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::default(),
            Line::from(Span::styled(
                "Press r to retry or search again.",
                Style::default().fg(Color::Gray),
            )),
        ];
        let height = lines.len() as u16 + 1;
        let [center] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);

        let paragraph = Paragraph::new(lines)
            .centered()
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, center);
    }
}

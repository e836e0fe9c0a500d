//! # Toast Stack
//!
//! Draws transient notifications top-center, newest at the bottom.
//! Stateless: the queue and its expiry live in `core::notify`.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::notify::{Toast, ToastKind};
use crate::tui::component::Component;
use crate::tui::components::text::truncate_to_width;

const TOAST_HEIGHT: u16 = 3;

pub struct ToastStack<'a> {
    pub toasts: &'a [Toast],
}

impl<'a> ToastStack<'a> {
    pub fn new(toasts: &'a [Toast]) -> Self {
        Self { toasts }
    }
}

impl Component for ToastStack<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let max_text = area.width.saturating_sub(6) as usize;
        let mut y = area.y + 1;

        for toast in self.toasts {
            if y + TOAST_HEIGHT > area.y + area.height {
                break;
            }
            let (icon, color) = match toast.kind {
                ToastKind::Info => ("ℹ", Color::Cyan),
                ToastKind::Error => ("✖", Color::Red),
            };
            let text = truncate_to_width(&toast.message, max_text);
            let width = (text.width() as u16 + 6).min(area.width);
            let rect = Rect::new(area.x + (area.width - width) / 2, y, width, TOAST_HEIGHT);

            let line = Line::from(vec![
                Span::styled(format!("{icon} "), Style::default().fg(color)),
                Span::raw(text),
            ]);
            frame.render_widget(Clear, rect);
            frame.render_widget(
                Paragraph::new(line)
                    .centered()
                    .block(Block::bordered().border_style(Style::default().fg(color))),
                rect,
            );
            y += TOAST_HEIGHT;
        }
    }
}

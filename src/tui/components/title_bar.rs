//! # TitleBar Component
//!
//! Top status line: app name and TMDB attribution on the left, the current
//! query and result counts on the right.
//!
//! ## Design Decisions
//!
//! ### Stateless Component
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(Some("popular".into()), Some(ResultSummary { .. }));
//! title_bar.render(frame, area);
//! ```
//!
//! ### Conditional Formatting
//!
//! 1. **Results known**: `"popular" · page 2 of 10 · 200 movies`
//! 2. **Query but no results yet**: `"popular"`
//! 3. **No query**: nothing on the right

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

/// Page position and size of the displayed result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultSummary {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u32,
}

pub struct TitleBar {
    /// Current search term, if any
    pub query: Option<String>,
    /// Counts of the displayed result, if any
    pub summary: Option<ResultSummary>,
}

impl TitleBar {
    pub fn new(query: Option<String>, summary: Option<ResultSummary>) -> Self {
        Self { query, summary }
    }

    fn status_text(&self) -> String {
        match (&self.query, self.summary) {
            (Some(query), Some(s)) => format!(
                "\"{query}\" · page {} of {} · {} {}",
                s.page,
                s.total_pages.max(1),
                s.total_results,
                if s.total_results == 1 { "movie" } else { "movies" }
            ),
            (Some(query), None) => format!("\"{query}\""),
            (None, _) => String::new(),
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [left, right] =
            Layout::horizontal([Constraint::Length(28), Constraint::Min(0)]).areas(area);

        let brand = Line::from(vec![
            Span::styled(
                "Marquee",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Powered by TMDB", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(brand), left);
        frame.render_widget(Paragraph::new(self.status_text()).right_aligned(), right);
    }
}

//! # Pagination Component
//!
//! Page selector shown above the grid when there is more than one page:
//!
//! ```text
//! ←  1  2  3  4  5  6  …  10  →
//! ```
//!
//! A window of [`PAGE_RANGE`] pages around the current one, [`MARGIN_PAGES`]
//! pages pinned at each end, and a break marker for every gap. Navigation
//! never produces a page outside `1..=total_pages`, which is how the upper
//! bound on the query's page number is enforced.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::query::PageNumber;
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

pub const PAGE_RANGE: u32 = 5;
pub const MARGIN_PAGES: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Break,
}

/// Computes which page labels to show.
///
/// The window holds `range` pages. It is centred on the current page in the
/// middle of the list and slides against either end, so the first and last
/// pages show one more neighbour than a centred window would. Half-page
/// offsets are kept in doubled units.
pub fn page_items(current: u32, total: u32, range: u32, margin: u32) -> Vec<PageItem> {
    if total == 0 {
        return Vec::new();
    }
    if total <= range {
        return (1..=total).map(PageItem::Page).collect();
    }

    let selected = i64::from(current.clamp(1, total)) - 1;
    let (total, range) = (i64::from(total), i64::from(range));
    let (mut left, mut right) = (range, range);
    if 2 * selected > 2 * total - range {
        right = 2 * (total - selected);
        left = 2 * range - right;
    } else if 2 * selected < range {
        left = 2 * selected;
        right = 2 * range - left;
    }

    let margin = i64::from(margin);
    let mut items = Vec::new();
    for index in 0..total {
        let page = index + 1;
        let pinned = page <= margin || page > total - margin;
        let windowed = 2 * index >= 2 * selected - left && 2 * index <= 2 * selected + right;
        if pinned || windowed {
            items.push(PageItem::Page(page as u32));
        } else if items.last() != Some(&PageItem::Break) {
            items.push(PageItem::Break);
        }
    }
    items
}

/// Page selector bound to the current page and the page count of the last
/// result.
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub current: PageNumber,
    pub total_pages: u32,
}

impl Pagination {
    pub fn new(current: PageNumber, total_pages: u32) -> Self {
        Self {
            current,
            total_pages: total_pages.max(1),
        }
    }

    /// Only worth drawing with more than one page.
    pub fn is_needed(&self) -> bool {
        self.total_pages > 1
    }

    /// Maps a navigation key to a target page, or `None` when the key would
    /// leave `1..=total_pages` or not change the page.
    pub fn target(&self, event: &TuiEvent) -> Option<PageNumber> {
        let current = self.current.get().min(self.total_pages);
        let target = match event {
            TuiEvent::PageUp | TuiEvent::InputChar('[') => current.checked_sub(1)?,
            TuiEvent::PageDown | TuiEvent::InputChar(']') => current + 1,
            TuiEvent::Home => 1,
            TuiEvent::End => self.total_pages,
            _ => return None,
        };
        if target == self.current.get() || target > self.total_pages {
            return None;
        }
        PageNumber::new(target)
    }

    fn items(&self) -> Vec<PageItem> {
        page_items(self.current.get(), self.total_pages, PAGE_RANGE, MARGIN_PAGES)
    }
}

impl Component for Pagination {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let current = self.current.get();
        let enabled = Style::default().fg(Color::Cyan);
        let disabled = Style::default().fg(Color::DarkGray);

        let mut spans = vec![Span::styled(
            "←",
            if current > 1 { enabled } else { disabled },
        )];
        for item in self.items() {
            spans.push(Span::raw("  "));
            match item {
                PageItem::Page(page) if page == current => spans.push(Span::styled(
                    format!(" {page} "),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
                PageItem::Page(page) => spans.push(Span::raw(page.to_string())),
                PageItem::Break => spans.push(Span::styled("…", disabled)),
            }
        }
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "→",
            if current < self.total_pages { enabled } else { disabled },
        ));

        let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }
}

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::fetch::FetchState;
use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{
    ErrorMessage, Loader, MovieGrid, MovieModal, Pagination, ResultSummary, TitleBar, ToastStack,
};
use crate::tui::{Focus, TuiState};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(3), Length(1), Length(1), Min(0), Length(1)]);
    let [title_area, search_area, loader_area, pagination_area, main_area, help_area] =
        layout.areas(frame.area());

    let state = app.fetch_state();

    // Title bar
    let summary = state.data().map(|page| ResultSummary {
        page: page.page,
        total_pages: page.total_pages,
        total_results: page.total_results,
    });
    let query = app.query.query().map(|q| q.to_string());
    TitleBar::new(query, summary).render(frame, title_area);

    // Search bar
    tui.search_bar.focused = tui.focus == Focus::Search && tui.detail.is_none();
    tui.search_bar.render(frame, search_area);

    if app.loader_visible() {
        Loader::new(spinner_frame).render(frame, loader_area);
    }

    let mut pagination = Pagination::new(app.query.page(), app.total_pages());
    if app.pagination_available() && pagination.is_needed() {
        pagination.render(frame, pagination_area);
    }

    draw_main_area(frame, main_area, &state, tui);

    frame.render_widget(help_line(tui), help_area);

    if let Some(detail) = tui.detail.as_mut() {
        MovieModal::new(detail).render(frame, frame.area());
    }

    ToastStack::new(app.toasts.visible()).render(frame, frame.area());
}

fn draw_main_area(frame: &mut Frame, area: Rect, state: &FetchState, tui: &mut TuiState) {
    match state {
        FetchState::Error(error) => ErrorMessage::new(error).render(frame, area),
        FetchState::Success(page) | FetchState::Refetching(page) if !page.is_empty() => {
            let focused = tui.focus == Focus::Results && tui.detail.is_none();
            MovieGrid::new(&mut tui.grid, &page.results, focused).render(frame, area);
        }
        FetchState::Idle => {
            let hint = Paragraph::new("Type a movie title and press Enter.")
                .centered()
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(hint, area);
        }
        // Loading, or a result with no movies: the grid area stays empty.
        _ => {}
    }
}

fn help_line(tui: &TuiState) -> Paragraph<'static> {
    let keys: &[(&str, &str)] = if tui.detail.is_some() {
        &[("↑↓", "scroll"), ("Esc", "close")]
    } else {
        match tui.focus {
            Focus::Search => &[
                ("Enter", "search"),
                ("Tab", "results"),
                ("Ctrl+R", "refresh"),
                ("Ctrl+C", "quit"),
            ],
            Focus::Results => &[
                ("←↑↓→", "select"),
                ("Enter", "details"),
                ("[ ]", "page"),
                ("/ Esc", "search"),
                ("r", "refresh"),
                ("q", "quit"),
            ],
        }
    };

    let mut spans = Vec::new();
    for (key, label) in keys {
        spans.push(Span::styled(format!(" {key} "), Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(format!("{label} "), Style::default().fg(Color::DarkGray)));
    }
    Paragraph::new(Line::from(spans))
}

//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! Every iteration sends `Action::Tick` so time-based state (the loader
//! hide delay, toast expiry) advances without input. `Effect::Fetch` becomes
//! a `tokio::spawn` whose result comes back over an mpsc channel as
//! `Action::FetchCompleted`.
//!
//! - **Busy** (loader visible, toasts showing, fetch pending): polls every
//!   ~80ms so the spinner animates and timers fire on time.
//! - **Idle**: polls every 250ms.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::catalog::{CatalogError, MovieCatalog, SearchRequest, TmdbCatalog};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::fetch::FetchTicket;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    GridEvent, ModalEvent, MovieGridState, MovieModalState, Pagination, SearchBar, SearchEvent,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const BUSY_POLL: Duration = Duration::from_millis(80);
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Which pane receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Results,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub search_bar: SearchBar,
    pub grid: MovieGridState,
    pub focus: Focus,
    // Detail overlay (None = hidden)
    pub detail: Option<MovieModalState>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            search_bar: SearchBar::new(),
            grid: MovieGridState::new(),
            focus: Focus::Search, // User expects to type immediately
            detail: None,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableBracketedPaste)?;
        info!("Terminal modes enabled (bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

/// Build the TMDB catalog from resolved config.
pub fn build_catalog(config: &ResolvedConfig) -> Result<Arc<dyn MovieCatalog>, CatalogError> {
    let token = config
        .tmdb_access_token
        .clone()
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| {
            CatalogError::Config(
                "TMDB access token must be set (config file or TMDB_TOKEN env var)".to_string(),
            )
        })?;
    Ok(Arc::new(TmdbCatalog::new(
        token,
        Some(config.tmdb_base_url.clone()),
        config.language.clone(),
    )))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let catalog = build_catalog(&config).map_err(std::io::Error::other)?;
    info!("Using catalog: {}", catalog.name());
    let mut app = App::from_config(catalog, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut pending_fetches = 0usize;
    let mut should_quit = false;

    if let Effect::Fetch(ticket) = update(&mut app, Action::Startup, Instant::now()) {
        pending_fetches += 1;
        spawn_fetch(app.catalog.clone(), ticket, tx.clone());
    }

    while !should_quit {
        update(&mut app, Action::Tick, Instant::now());

        let spinner_frame = (start_time.elapsed().as_millis() / 80) as usize;
        terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;

        let busy = app.loader_visible() || !app.toasts.is_empty() || pending_fetches > 0;
        let timeout = if busy { BUSY_POLL } else { IDLE_POLL };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = dispatch(&app, &mut tui, event) else {
                continue;
            };
            match update(&mut app, action, Instant::now()) {
                Effect::Quit => should_quit = true,
                Effect::Fetch(ticket) => {
                    pending_fetches += 1;
                    spawn_fetch(app.catalog.clone(), ticket, tx.clone());
                }
                Effect::None => {}
            }
        }

        while let Ok(action) = rx.try_recv() {
            debug!("Event loop received: {:?}", action);
            if matches!(action, Action::FetchCompleted { .. }) {
                pending_fetches = pending_fetches.saturating_sub(1);
            }
            if let Effect::Fetch(ticket) = update(&mut app, action, Instant::now()) {
                pending_fetches += 1;
                spawn_fetch(app.catalog.clone(), ticket, tx.clone());
            }
        }
    }

    ratatui::restore();
    Ok(())
}

/// Route one terminal event through the focused component.
///
/// Returns the core action it produced, if any. Purely presentational
/// changes (focus, selection, the detail overlay) are applied to `tui`
/// directly.
fn dispatch(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::Resize => return None,
        _ => {}
    }

    // The detail overlay captures everything while open
    if let Some(detail) = tui.detail.as_mut() {
        if detail.handle_event(&event) == Some(ModalEvent::Close) {
            tui.detail = None;
        }
        return None;
    }

    match event {
        TuiEvent::Refresh => return Some(Action::Refetch),
        TuiEvent::Tab => {
            tui.focus = match tui.focus {
                Focus::Search => Focus::Results,
                Focus::Results => Focus::Search,
            };
            return None;
        }
        _ => {}
    }

    match tui.focus {
        Focus::Search => {
            if event == TuiEvent::Escape {
                tui.focus = Focus::Results;
                return None;
            }
            match tui.search_bar.handle_event(&event)? {
                SearchEvent::Submit(text) => {
                    tui.grid.reset();
                    Some(Action::SubmitSearch(text))
                }
            }
        }
        Focus::Results => dispatch_results(app, tui, event),
    }
}

fn dispatch_results(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    let state = app.fetch_state();
    let movies = state.data().map(|page| page.results.as_slice()).unwrap_or_default();

    // Pagination keys act only while the control is on screen
    if app.pagination_available()
        && let Some(page) = Pagination::new(app.query.page(), app.total_pages()).target(&event)
    {
        tui.grid.reset();
        return Some(Action::ChangePage(page));
    }

    match event {
        TuiEvent::CursorUp
        | TuiEvent::CursorDown
        | TuiEvent::CursorLeft
        | TuiEvent::CursorRight
        | TuiEvent::Submit => {
            if let Some(GridEvent::Open(index)) = tui.grid.handle_event(&event)
                && let Some(movie) = movies.get(index)
            {
                debug!("Opening details for movie {} ({})", movie.id, movie.title);
                tui.detail = Some(MovieModalState::new(movie.clone(), &app.image_base_url));
            }
            None
        }
        TuiEvent::InputChar('r') => Some(Action::Refetch),
        TuiEvent::InputChar('q') => Some(Action::Quit),
        TuiEvent::InputChar('/') | TuiEvent::Escape => {
            tui.focus = Focus::Search;
            None
        }
        // Typing auto-switches to the search box and forwards the event
        TuiEvent::InputChar(_) | TuiEvent::Paste(_) => {
            tui.focus = Focus::Search;
            tui.search_bar.handle_event(&event);
            None
        }
        _ => None,
    }
}

fn spawn_fetch(catalog: Arc<dyn MovieCatalog>, ticket: FetchTicket, tx: mpsc::Sender<Action>) {
    info!("Spawning fetch for {}", ticket.key);
    tokio::spawn(async move {
        let request = SearchRequest {
            query: ticket.key.query.as_str(),
            page: ticket.key.page.get(),
        };
        let outcome = catalog.search_movies(request).await;
        if let Err(e) = &outcome {
            warn!("Fetch for {} failed: {}", ticket.key, e);
        }
        if tx.send(Action::FetchCompleted { ticket, outcome }).is_err() {
            warn!("Failed to deliver fetch result: receiver dropped");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::PageNumber;
    use crate::test_support::{search_page, test_app};

    fn loaded_app(total_pages: u32) -> App {
        let mut app = test_app();
        let now = Instant::now();
        let Effect::Fetch(ticket) = update(&mut app, Action::Startup, now) else {
            panic!("startup should fetch");
        };
        update(
            &mut app,
            Action::FetchCompleted {
                ticket,
                outcome: Ok(search_page(1, 6, total_pages)),
            },
            now,
        );
        app
    }

    fn results_focus() -> TuiState {
        let mut tui = TuiState::new();
        tui.focus = Focus::Results;
        tui.grid.set_layout(6, 3, 2);
        tui
    }

    #[test]
    fn test_typing_then_enter_submits_search() {
        let app = test_app();
        let mut tui = TuiState::new();
        for c in "heat".chars() {
            assert!(dispatch(&app, &mut tui, TuiEvent::InputChar(c)).is_none());
        }
        let action = dispatch(&app, &mut tui, TuiEvent::Submit);
        assert!(matches!(action, Some(Action::SubmitSearch(ref q)) if q == "heat"));
        assert!(tui.search_bar.buffer.is_empty());
    }

    #[test]
    fn test_force_quit_always_quits() {
        let app = test_app();
        let mut tui = TuiState::new();
        tui.detail = Some(MovieModalState::new(
            crate::test_support::movie(1, "Alien"),
            &app.image_base_url,
        ));
        assert!(matches!(
            dispatch(&app, &mut tui, TuiEvent::ForceQuit),
            Some(Action::Quit)
        ));
    }

    #[test]
    fn test_q_in_search_box_is_text() {
        let app = test_app();
        let mut tui = TuiState::new();
        assert!(dispatch(&app, &mut tui, TuiEvent::InputChar('q')).is_none());
        assert_eq!(tui.search_bar.buffer, "q");
    }

    #[test]
    fn test_tab_and_escape_move_focus() {
        let app = test_app();
        let mut tui = TuiState::new();
        dispatch(&app, &mut tui, TuiEvent::Tab);
        assert_eq!(tui.focus, Focus::Results);
        dispatch(&app, &mut tui, TuiEvent::Tab);
        assert_eq!(tui.focus, Focus::Search);
        dispatch(&app, &mut tui, TuiEvent::Escape);
        assert_eq!(tui.focus, Focus::Results);
        dispatch(&app, &mut tui, TuiEvent::Escape);
        assert_eq!(tui.focus, Focus::Search);
    }

    #[test]
    fn test_results_keys() {
        let app = loaded_app(3);
        let mut tui = results_focus();

        assert!(matches!(
            dispatch(&app, &mut tui, TuiEvent::InputChar('r')),
            Some(Action::Refetch)
        ));
        assert!(matches!(
            dispatch(&app, &mut tui, TuiEvent::InputChar('q')),
            Some(Action::Quit)
        ));
        assert!(dispatch(&app, &mut tui, TuiEvent::InputChar('/')).is_none());
        assert_eq!(tui.focus, Focus::Search);
    }

    #[test]
    fn test_typing_in_results_switches_to_search() {
        let app = loaded_app(1);
        let mut tui = results_focus();
        dispatch(&app, &mut tui, TuiEvent::InputChar('a'));
        assert_eq!(tui.focus, Focus::Search);
        assert_eq!(tui.search_bar.buffer, "a");
    }

    #[test]
    fn test_page_down_changes_page_and_resets_selection() {
        let app = loaded_app(3);
        let mut tui = results_focus();
        dispatch(&app, &mut tui, TuiEvent::CursorRight);
        assert_eq!(tui.grid.selected, 1);

        let action = dispatch(&app, &mut tui, TuiEvent::PageDown);
        assert!(matches!(action, Some(Action::ChangePage(p)) if p == PageNumber::new(2).unwrap()));
        assert_eq!(tui.grid.selected, 0);
    }

    #[test]
    fn test_page_keys_ignored_without_results() {
        let app = test_app();
        let mut tui = results_focus();
        assert!(dispatch(&app, &mut tui, TuiEvent::PageDown).is_none());
    }

    #[test]
    fn test_page_keys_ignored_while_new_query_loads() {
        let mut app = loaded_app(10);
        let now = Instant::now();
        let Effect::Fetch(_) = update(&mut app, Action::SubmitSearch("heat".to_string()), now) else {
            panic!("new search should fetch");
        };
        let mut tui = results_focus();

        // Previous query's results are still on screen but its page count
        // says nothing about "heat".
        assert!(app.fetch_state().data().is_some());
        assert!(dispatch(&app, &mut tui, TuiEvent::InputChar(']')).is_none());
        assert!(dispatch(&app, &mut tui, TuiEvent::PageDown).is_none());
        assert!(dispatch(&app, &mut tui, TuiEvent::End).is_none());
        assert_eq!(app.query.page(), PageNumber::FIRST);
    }

    #[test]
    fn test_page_keys_work_while_same_query_page_loads() {
        let mut app = loaded_app(10);
        let now = Instant::now();
        let page2 = PageNumber::new(2).unwrap();
        let Effect::Fetch(_) = update(&mut app, Action::ChangePage(page2), now) else {
            panic!("page change should fetch");
        };
        let mut tui = results_focus();

        let action = dispatch(&app, &mut tui, TuiEvent::InputChar(']'));
        assert!(matches!(action, Some(Action::ChangePage(p)) if p == PageNumber::new(3).unwrap()));
    }

    #[test]
    fn test_enter_opens_detail_and_escape_closes_it() {
        let app = loaded_app(1);
        let mut tui = results_focus();
        dispatch(&app, &mut tui, TuiEvent::CursorDown);
        assert!(dispatch(&app, &mut tui, TuiEvent::Submit).is_none());

        let detail = tui.detail.as_ref().expect("detail should open");
        assert_eq!(detail.movie.id, 1003);

        // Overlay swallows keys that would otherwise act
        assert!(dispatch(&app, &mut tui, TuiEvent::InputChar('r')).is_none());
        assert!(tui.detail.is_some());

        dispatch(&app, &mut tui, TuiEvent::Escape);
        assert!(tui.detail.is_none());
        assert_eq!(tui.focus, Focus::Results);
    }

    #[test]
    fn test_refresh_from_search_focus() {
        let app = loaded_app(1);
        let mut tui = TuiState::new();
        assert!(matches!(
            dispatch(&app, &mut tui, TuiEvent::Refresh),
            Some(Action::Refetch)
        ));
    }

    #[test]
    fn test_build_catalog_requires_token() {
        let config = ResolvedConfig {
            initial_query: "popular".to_string(),
            stale_time: Duration::ZERO,
            tmdb_access_token: None,
            tmdb_base_url: "http://localhost".to_string(),
            image_base_url: "http://localhost/img".to_string(),
            language: None,
        };
        assert!(matches!(build_catalog(&config), Err(CatalogError::Config(_))));

        let config = ResolvedConfig {
            tmdb_access_token: Some("token".to_string()),
            ..config
        };
        let catalog = build_catalog(&config).expect("token present");
        assert_eq!(catalog.name(), "tmdb");
    }
}

//! # Actions
//!
//! Everything that can happen in Marquee becomes an `Action`.
//! User presses Enter in the search box? That's `Action::SubmitSearch(text)`.
//! A fetch finishes? That's `Action::FetchCompleted { .. }`.
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect` describing the I/O the caller should perform. No I/O here.
//!
//! ```text
//! State + Action + now  →  update()  →  New State + Effect
//! ```

use std::time::Instant;

use log::{debug, info, warn};

use crate::core::fetch::{FetchOutcome, FetchTicket, ResolveOutcome};
use crate::core::query::{PageNumber, SubmitOutcome};
use crate::core::state::App;

#[derive(Debug)]
pub enum Action {
    /// Activates the initial query. Sent once when the UI comes up.
    Startup,
    /// Raw text from the search box.
    SubmitSearch(String),
    ChangePage(PageNumber),
    /// Retry / refresh the current query and page.
    Refetch,
    FetchCompleted {
        ticket: FetchTicket,
        outcome: FetchOutcome,
    },
    /// Timer tick; lets time-based state (loader hide, toast expiry) advance.
    Tick,
    Quit,
}

/// Side effect requested by `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Perform the network call described by the ticket.
    Fetch(FetchTicket),
    Quit,
}

impl From<Option<FetchTicket>> for Effect {
    fn from(ticket: Option<FetchTicket>) -> Self {
        ticket.map_or(Effect::None, Effect::Fetch)
    }
}

pub fn update(app: &mut App, action: Action, now: Instant) -> Effect {
    let effect = match action {
        Action::Startup => {
            info!("Activating initial query: {:?}", app.query.query());
            app.fetch.activate(app.query.fetch_key(), now).into()
        }
        Action::SubmitSearch(raw) => match app.query.submit(&raw) {
            Err(e) => {
                debug!("Rejected search input {:?}: {}", raw, e);
                app.toasts.error(e.to_string(), now);
                Effect::None
            }
            Ok(SubmitOutcome::Unchanged) => {
                debug!("Search {:?} matches current query; nothing to do", raw.trim());
                Effect::None
            }
            Ok(SubmitOutcome::Changed) => {
                info!("New search: {:?}", raw.trim());
                app.fetch.activate(app.query.fetch_key(), now).into()
            }
        },
        Action::ChangePage(page) => {
            if app.query.set_page(page) {
                info!("Page changed to {}", page);
                app.fetch.activate(app.query.fetch_key(), now).into()
            } else {
                Effect::None
            }
        }
        Action::Refetch => {
            info!("Refetch requested");
            app.fetch.refetch(now).into()
        }
        Action::FetchCompleted { ticket, outcome } => {
            if let Err(e) = &outcome {
                warn!("Fetch for {} failed: {}", ticket.key, e);
            }
            match app.fetch.resolve(&ticket, outcome, now) {
                ResolveOutcome::Applied => debug!("Applied result for {}", ticket.key),
                ResolveOutcome::Superseded => info!("Ignored late result for {}", ticket.key),
                ResolveOutcome::Discarded => debug!("Discarded result for {}", ticket.key),
            }
            Effect::None
        }
        Action::Tick => Effect::None,
        Action::Quit => Effect::Quit,
    };

    app.sync_presentation(now);
    effect
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogError;
    use crate::core::loader::LOADER_HIDE_DELAY;
    use crate::core::notify::{NO_RESULTS_MESSAGE, ToastKind};
    use crate::test_support::{search_page, test_app};
    use std::time::Duration;

    fn page(n: u32) -> PageNumber {
        PageNumber::new(n).unwrap()
    }

    fn expect_fetch(effect: Effect) -> FetchTicket {
        match effect {
            Effect::Fetch(ticket) => ticket,
            other => panic!("expected a fetch, got {other:?}"),
        }
    }

    #[test]
    fn test_startup_fetches_default_query() {
        let mut app = test_app();
        let now = Instant::now();
        let ticket = expect_fetch(update(&mut app, Action::Startup, now));
        assert_eq!(ticket.key.query.as_str(), "popular");
        assert_eq!(ticket.key.page, PageNumber::FIRST);
        assert!(app.loader_visible());
    }

    #[test]
    fn test_each_empty_submission_toasts_once_and_keeps_state() {
        let mut app = test_app();
        let now = Instant::now();
        update(&mut app, Action::Startup, now);
        let before = app.query.clone();

        let effect = update(&mut app, Action::SubmitSearch("   ".to_string()), now);

        assert_eq!(effect, Effect::None);
        assert_eq!(app.query, before);
        let toasts = app.toasts.visible();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Error);
        assert_eq!(toasts[0].message, "Please enter your search query.");

        // A second attempt gets its own notice; ticks in between add none
        update(&mut app, Action::Tick, now);
        let effect = update(&mut app, Action::SubmitSearch(String::new()), now);

        assert_eq!(effect, Effect::None);
        assert_eq!(app.query, before);
        let toasts = app.toasts.visible();
        assert_eq!(toasts.len(), 2);
        assert!(
            toasts
                .iter()
                .all(|t| t.kind == ToastKind::Error && t.message == "Please enter your search query.")
        );
    }

    #[test]
    fn test_new_search_fetches_page_one() {
        let mut app = test_app();
        let now = Instant::now();
        let first = expect_fetch(update(&mut app, Action::Startup, now));
        update(
            &mut app,
            Action::FetchCompleted {
                ticket: first,
                outcome: Ok(search_page(1, 20, 10)),
            },
            now,
        );
        let second = expect_fetch(update(&mut app, Action::ChangePage(page(3)), now));
        assert_eq!(second.key.page, page(3));

        let ticket = expect_fetch(update(&mut app, Action::SubmitSearch(" dune ".to_string()), now));
        assert_eq!(ticket.key.query.as_str(), "dune");
        assert_eq!(ticket.key.page, PageNumber::FIRST);
    }

    #[test]
    fn test_resubmitting_current_query_is_a_no_op() {
        let mut app = test_app();
        let now = Instant::now();
        update(&mut app, Action::Startup, now);
        let effect = update(&mut app, Action::SubmitSearch("popular".to_string()), now);
        assert_eq!(effect, Effect::None);
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn test_same_page_does_not_refetch() {
        let mut app = test_app();
        let now = Instant::now();
        update(&mut app, Action::Startup, now);
        assert_eq!(update(&mut app, Action::ChangePage(PageNumber::FIRST), now), Effect::None);
    }

    #[test]
    fn test_page_change_keeps_results_and_loader_grace() {
        let mut app = test_app();
        let t0 = Instant::now();
        let first = expect_fetch(update(&mut app, Action::Startup, t0));
        update(
            &mut app,
            Action::FetchCompleted {
                ticket: first,
                outcome: Ok(search_page(1, 20, 10)),
            },
            t0,
        );
        assert!(!app.loader_visible());

        let t1 = t0 + Duration::from_secs(5);
        let second = expect_fetch(update(&mut app, Action::ChangePage(page(2)), t1));
        assert!(app.loader_visible());
        assert_eq!(app.fetch_state().data().unwrap().page, 1);

        let t2 = t1 + Duration::from_millis(30);
        update(
            &mut app,
            Action::FetchCompleted {
                ticket: second,
                outcome: Ok(search_page(2, 20, 10)),
            },
            t2,
        );
        assert!(app.loader_visible());
        assert_eq!(app.fetch_state().data().unwrap().page, 2);

        update(&mut app, Action::Tick, t2 + LOADER_HIDE_DELAY);
        assert!(!app.loader_visible());
    }

    #[test]
    fn test_empty_results_toast_fires_once() {
        let mut app = test_app();
        let now = Instant::now();
        update(&mut app, Action::Startup, now);
        let ticket = expect_fetch(update(
            &mut app,
            Action::SubmitSearch("zzzznonexistentmovie".to_string()),
            now,
        ));
        update(
            &mut app,
            Action::FetchCompleted {
                ticket,
                outcome: Ok(search_page(1, 0, 1)),
            },
            now,
        );
        for _ in 0..3 {
            update(&mut app, Action::Tick, now);
        }

        let toasts = app.toasts.visible();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Info);
        assert_eq!(toasts[0].message, NO_RESULTS_MESSAGE);
        assert_eq!(app.total_pages(), 1);
    }

    #[test]
    fn test_failed_fetch_shows_error_and_recovers() {
        let mut app = test_app();
        let now = Instant::now();
        let ticket = expect_fetch(update(&mut app, Action::Startup, now));
        update(
            &mut app,
            Action::FetchCompleted {
                ticket,
                outcome: Err(CatalogError::Api {
                    status: 500,
                    message: "boom".to_string(),
                }),
            },
            now,
        );
        assert!(app.fetch_state().is_error());
        assert!(!app.loader_visible());

        let retry = expect_fetch(update(&mut app, Action::Refetch, now));
        update(
            &mut app,
            Action::FetchCompleted {
                ticket: retry,
                outcome: Ok(search_page(1, 4, 1)),
            },
            now,
        );
        assert!(app.fetch_state().is_success());
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit, Instant::now()), Effect::Quit);
    }
}

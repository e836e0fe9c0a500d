//! # Application State
//!
//! Core business state for Marquee. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── catalog: Arc<dyn MovieCatalog>  // remote movie search
//! ├── query: QueryState               // search term + page
//! ├── fetch: FetchCache               // keyed results, in-flight tickets
//! ├── loader: LoaderDebounce          // loading indicator visibility
//! ├── empty_watch: EmptyResultWatch   // "no movies found" edge detector
//! ├── toasts: Toasts                  // transient notifications
//! └── image_base_url: String          // for poster/backdrop links
//! ```
//!
//! State changes only happen through `update(state, action, now)` in action.rs.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::catalog::MovieCatalog;
use crate::catalog::types::DEFAULT_IMAGE_BASE_URL;
use crate::core::config::ResolvedConfig;
use crate::core::fetch::{FetchCache, FetchState};
use crate::core::loader::LoaderDebounce;
use crate::core::notify::{EmptyResultWatch, NO_RESULTS_MESSAGE, Toasts};
use crate::core::query::QueryState;

pub struct App {
    pub catalog: Arc<dyn MovieCatalog>,
    pub query: QueryState,
    pub fetch: FetchCache,
    pub loader: LoaderDebounce,
    pub empty_watch: EmptyResultWatch,
    pub toasts: Toasts,
    pub image_base_url: String,
}

impl App {
    pub fn new(catalog: Arc<dyn MovieCatalog>, initial_query: &str, stale_time: Duration) -> Self {
        Self {
            catalog,
            query: QueryState::new(initial_query),
            fetch: FetchCache::new(stale_time),
            loader: LoaderDebounce::new(),
            empty_watch: EmptyResultWatch::new(),
            toasts: Toasts::new(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
        }
    }

    pub fn from_config(catalog: Arc<dyn MovieCatalog>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(catalog, &config.initial_query, config.stale_time);
        app.image_base_url = config.image_base_url.clone();
        app
    }

    /// What the UI should show for the current query and page.
    pub fn fetch_state(&self) -> FetchState {
        self.fetch.view()
    }

    /// Page count reported by the last displayed result; 1 when unknown.
    pub fn total_pages(&self) -> u32 {
        self.fetch_state()
            .data()
            .map(|page| page.total_pages.max(1))
            .unwrap_or(1)
    }

    /// Pagination applies only to a non-empty result of the current query.
    /// A new query's page count is unknown until its first page arrives.
    pub fn pagination_available(&self) -> bool {
        self.fetch.shows_current_query()
            && self.fetch_state().data().is_some_and(|page| !page.is_empty())
    }

    pub fn loader_visible(&self) -> bool {
        self.loader.is_visible()
    }

    /// Re-derives loader visibility and notifications from the fetch state.
    /// Runs after every action, including timer ticks.
    pub(crate) fn sync_presentation(&mut self, now: Instant) {
        let state = self.fetch.view();
        self.loader.observe(state.is_loading(), state.is_fetching(), now);
        if self.empty_watch.observe(&state) {
            self.toasts.info(NO_RESULTS_MESSAGE, now);
        }
        self.toasts.expire(now);
    }
}

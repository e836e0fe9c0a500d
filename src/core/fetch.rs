//! # Fetch Orchestrator
//!
//! A finite-state cache of search pages keyed by [`FetchKey`].
//!
//! ```text
//!             Started               Resolved(Ok)
//!   Empty ───────────▶ Loading ─────────────────▶ Success
//!   Error ───────────▶    │                          │
//!                         │ Resolved(Err)            │ Started
//!                         ▼                          ▼
//!                       Error ◀──── Resolved(Err) ── StaleWhileLoading
//!                                                    │ Resolved(Ok)
//!                                                    ▼
//!                                                  Success
//! ```
//!
//! Each in-flight request carries a ticket. A completion is only applied to
//! the entry whose in-flight ticket it matches, and only completions for the
//! current key change what the UI observes. That covers the two races this
//! app has: duplicate activations of one key (deduplicated, at most one call
//! in flight per key) and late responses for a key the user already left
//! (stored under their own key, never shown as the current result).
//!
//! No I/O happens here. The caller turns a returned [`FetchTicket`] into a
//! network call and feeds the outcome back through [`FetchCache::resolve`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::debug;

use crate::catalog::{CatalogError, SearchPage};
use crate::core::query::FetchKey;

pub type FetchOutcome = Result<SearchPage, CatalogError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TicketId(u64);

/// Permission to perform one network call for `key`.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub id: TicketId,
    pub key: FetchKey,
}

/// State of a single cache entry.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryState {
    Empty,
    Loading {
        ticket: TicketId,
    },
    StaleWhileLoading {
        data: Arc<SearchPage>,
        ticket: TicketId,
    },
    Success {
        data: Arc<SearchPage>,
        fetched_at: Instant,
    },
    Error {
        error: CatalogError,
    },
}

#[derive(Debug, Clone)]
pub enum EntryEvent {
    Started(TicketId),
    Resolved {
        ticket: TicketId,
        outcome: Result<Arc<SearchPage>, CatalogError>,
        at: Instant,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next: EntryState,
    /// False when the event did not fit the state and was dropped.
    pub applied: bool,
}

impl EntryState {
    /// Pure transition function.
    pub fn apply(self, event: EntryEvent) -> Transition {
        match (self, event) {
            (EntryState::Empty | EntryState::Error { .. }, EntryEvent::Started(ticket)) => {
                Transition {
                    next: EntryState::Loading { ticket },
                    applied: true,
                }
            }
            (EntryState::Success { data, .. }, EntryEvent::Started(ticket)) => Transition {
                next: EntryState::StaleWhileLoading { data, ticket },
                applied: true,
            },
            (
                EntryState::Loading { ticket: in_flight }
                | EntryState::StaleWhileLoading {
                    ticket: in_flight, ..
                },
                EntryEvent::Resolved {
                    ticket,
                    outcome,
                    at,
                },
            ) if in_flight == ticket => {
                let next = match outcome {
                    Ok(data) => EntryState::Success {
                        data,
                        fetched_at: at,
                    },
                    Err(error) => EntryState::Error { error },
                };
                Transition {
                    next,
                    applied: true,
                }
            }
            (state, _) => Transition {
                next: state,
                applied: false,
            },
        }
    }

    pub fn in_flight(&self) -> Option<TicketId> {
        match self {
            EntryState::Loading { ticket } | EntryState::StaleWhileLoading { ticket, .. } => {
                Some(*ticket)
            }
            _ => None,
        }
    }

    pub fn data(&self) -> Option<&Arc<SearchPage>> {
        match self {
            EntryState::StaleWhileLoading { data, .. } | EntryState::Success { data, .. } => {
                Some(data)
            }
            _ => None,
        }
    }
}

/// What the UI observes for the current key.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    /// No key (fetching disabled).
    Idle,
    /// First fetch, nothing to show yet.
    Loading,
    /// A fetch is in flight; older data stays on screen meanwhile.
    Refetching(Arc<SearchPage>),
    Success(Arc<SearchPage>),
    Error(CatalogError),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self, FetchState::Loading | FetchState::Refetching(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FetchState::Error(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchState::Success(_) | FetchState::Refetching(_))
    }

    /// Data to display, possibly stale.
    pub fn data(&self) -> Option<&Arc<SearchPage>> {
        match self {
            FetchState::Refetching(data) | FetchState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&CatalogError> {
        match self {
            FetchState::Error(error) => Some(error),
            _ => None,
        }
    }
}

/// How a completion was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// Applied to the current key.
    Applied,
    /// Stored under its own key, which is no longer current.
    Superseded,
    /// Ticket no longer matches anything in flight.
    Discarded,
}

pub struct FetchCache {
    entries: HashMap<FetchKey, EntryState>,
    current: Option<FetchKey>,
    /// Last data shown for a previous key, displayed while a new key loads.
    placeholder: Option<(FetchKey, Arc<SearchPage>)>,
    stale_time: Duration,
    next_ticket: u64,
}

impl FetchCache {
    /// `stale_time` is how long a successful result counts as fresh. Fresh
    /// entries are not refetched when their key is activated again.
    pub fn new(stale_time: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            current: None,
            placeholder: None,
            stale_time,
            next_ticket: 0,
        }
    }

    pub fn current_key(&self) -> Option<&FetchKey> {
        self.current.as_ref()
    }

    pub fn entry(&self, key: &FetchKey) -> Option<&EntryState> {
        self.entries.get(key)
    }

    /// Makes `key` the current key. Returns a ticket when a network call
    /// should be issued; `None` for a disabled key, a key already in flight,
    /// or a key with fresh data.
    pub fn activate(&mut self, key: Option<FetchKey>, now: Instant) -> Option<FetchTicket> {
        if let Some(current) = &self.current
            && let Some(data) = self.current_entry().and_then(EntryState::data)
        {
            self.placeholder = Some((current.clone(), data.clone()));
        }
        self.current = key.clone();

        let Some(key) = key else {
            debug!("Fetch key cleared; orchestrator idle");
            return None;
        };
        self.start(key, now, false)
    }

    /// Refetches the current key regardless of freshness. Still deduplicated.
    pub fn refetch(&mut self, now: Instant) -> Option<FetchTicket> {
        let key = self.current.clone()?;
        self.start(key, now, true)
    }

    fn start(&mut self, key: FetchKey, now: Instant, force: bool) -> Option<FetchTicket> {
        let entry = self.entries.entry(key.clone()).or_insert(EntryState::Empty);

        if let Some(in_flight) = entry.in_flight() {
            debug!("Fetch for {} already in flight ({:?}); not duplicating", key, in_flight);
            return None;
        }
        if let EntryState::Success { fetched_at, .. } = entry
            && !force
            && now.saturating_duration_since(*fetched_at) < self.stale_time
        {
            debug!("Cached result for {} is fresh; skipping fetch", key);
            return None;
        }

        let id = TicketId(self.next_ticket);
        self.next_ticket += 1;

        let state = std::mem::replace(entry, EntryState::Empty);
        *entry = state.apply(EntryEvent::Started(id)).next;
        debug!("Fetch started for {} ({:?})", key, id);

        Some(FetchTicket { id, key })
    }

    /// Feeds a finished network call back into the cache.
    pub fn resolve(&mut self, ticket: &FetchTicket, outcome: FetchOutcome, now: Instant) -> ResolveOutcome {
        let Some(entry) = self.entries.get_mut(&ticket.key) else {
            debug!("Completion for unknown key {}; discarded", ticket.key);
            return ResolveOutcome::Discarded;
        };

        let state = std::mem::replace(entry, EntryState::Empty);
        let transition = state.apply(EntryEvent::Resolved {
            ticket: ticket.id,
            outcome: outcome.map(Arc::new),
            at: now,
        });
        *entry = transition.next;

        if !transition.applied {
            debug!("Completion {:?} for {} does not match in-flight ticket; discarded", ticket.id, ticket.key);
            return ResolveOutcome::Discarded;
        }
        if self.current.as_ref() != Some(&ticket.key) {
            debug!("Completion for {} arrived after the key was abandoned", ticket.key);
            return ResolveOutcome::Superseded;
        }

        if let Some(data) = entry.data() {
            self.placeholder = Some((ticket.key.clone(), data.clone()));
        }
        ResolveOutcome::Applied
    }

    fn current_entry(&self) -> Option<&EntryState> {
        self.current.as_ref().and_then(|key| self.entries.get(key))
    }

    /// Whether the data `view()` shows was fetched for the current query.
    ///
    /// False while a new query's first page loads behind the previous
    /// query's placeholder. Page counts from that placeholder do not apply
    /// to the new query.
    pub fn shows_current_query(&self) -> bool {
        let Some(current) = &self.current else {
            return false;
        };
        match self.current_entry() {
            Some(EntryState::StaleWhileLoading { .. } | EntryState::Success { .. }) => true,
            Some(EntryState::Loading { .. }) => self
                .placeholder
                .as_ref()
                .is_some_and(|(key, _)| key.query == current.query),
            _ => false,
        }
    }

    /// Observed state for the current key.
    pub fn view(&self) -> FetchState {
        match self.current_entry() {
            None | Some(EntryState::Empty) => FetchState::Idle,
            Some(EntryState::Loading { .. }) => match &self.placeholder {
                Some((_, data)) => FetchState::Refetching(data.clone()),
                None => FetchState::Loading,
            },
            Some(EntryState::StaleWhileLoading { data, .. }) => FetchState::Refetching(data.clone()),
            Some(EntryState::Success { data, .. }) => FetchState::Success(data.clone()),
            Some(EntryState::Error { error }) => FetchState::Error(error.clone()),
        }
    }
}

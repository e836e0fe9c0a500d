//! # Core Application Logic
//!
//! This module contains Marquee's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                   ┌────────────┴───────────┐
//!                   ▼                        ▼
//!            ┌────────────┐           ┌────────────┐
//!            │    TUI     │           │  Catalog   │
//!            │  Adapter   │           │  (TMDB)    │
//!            │ (ratatui)  │           │            │
//!            └────────────┘           └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and `update()` reducer
//! - [`query`]: Search term + page, reset together
//! - [`fetch`]: Keyed result cache with in-flight tickets
//! - [`loader`]: Loading indicator debounce
//! - [`notify`]: Toasts and the empty-result watcher
//! - [`config`]: File/env/CLI configuration

pub mod action;
pub mod config;
pub mod fetch;
pub mod loader;
pub mod notify;
pub mod query;
pub mod state;

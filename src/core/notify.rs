//! # Notifications
//!
//! Transient, non-blocking messages ("toasts") and the watcher that raises
//! the "no movies found" notice.

use std::time::{Duration, Instant};

use log::info;

use crate::core::fetch::FetchState;

pub const NO_RESULTS_MESSAGE: &str = "No movies found for your request.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

impl ToastKind {
    /// How long a toast of this kind stays on screen.
    pub fn duration(self) -> Duration {
        match self {
            ToastKind::Info => Duration::from_secs(2),
            ToastKind::Error => Duration::from_secs(4),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub expires_at: Instant,
}

/// Queue of visible toasts, oldest first.
#[derive(Debug, Default)]
pub struct Toasts {
    items: Vec<Toast>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>, now: Instant) {
        let message = message.into();
        info!("Toast ({:?}): {}", kind, message);
        self.items.push(Toast {
            kind,
            message,
            expires_at: now + kind.duration(),
        });
    }

    pub fn info(&mut self, message: impl Into<String>, now: Instant) {
        self.push(ToastKind::Info, message, now);
    }

    pub fn error(&mut self, message: impl Into<String>, now: Instant) {
        self.push(ToastKind::Error, message, now);
    }

    /// Drops expired toasts. Returns true if anything was removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.items.len();
        self.items.retain(|toast| toast.expires_at > now);
        self.items.len() != before
    }

    pub fn visible(&self) -> &[Toast] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Fires once each time the fetch state enters a settled, zero-result
/// success. Staying in that state does not fire again.
#[derive(Debug, Default)]
pub struct EmptyResultWatch {
    was_empty: bool,
}

impl EmptyResultWatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true on the transition into the empty-result condition.
    pub fn observe(&mut self, state: &FetchState) -> bool {
        let is_empty = matches!(state, FetchState::Success(page) if page.is_empty());
        let entered = is_empty && !self.was_empty;
        self.was_empty = is_empty;
        entered
    }
}

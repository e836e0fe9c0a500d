//! # Loader Debounce
//!
//! Decides when the loading indicator is visible.
//!
//! - **Bootstrapping**: visible exactly while the very first load runs, then
//!   hidden the instant it finishes (success or error).
//! - **Steady**: shown as soon as a fetch starts; hidden [`LOADER_HIDE_DELAY`]
//!   after fetching stops. A fetch that starts before the deadline cancels
//!   the pending hide.
//!
//! Time is passed in rather than read from the clock so the timing contract
//! can be tested without sleeping.

use std::time::{Duration, Instant};

use log::debug;

pub const LOADER_HIDE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderPhase {
    Bootstrapping,
    Steady,
}

#[derive(Debug, Clone)]
pub struct LoaderDebounce {
    phase: LoaderPhase,
    visible: bool,
    /// Pending hide. Cleared when fetching resumes.
    hide_at: Option<Instant>,
    was_fetching: bool,
}

impl LoaderDebounce {
    pub fn new() -> Self {
        Self {
            phase: LoaderPhase::Bootstrapping,
            visible: false,
            hide_at: None,
            was_fetching: false,
        }
    }

    pub fn phase(&self) -> LoaderPhase {
        self.phase
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn pending_hide(&self) -> Option<Instant> {
        self.hide_at
    }

    /// Feeds the current fetch signals. Call on every state change and on
    /// every tick so an expired hide deadline takes effect.
    pub fn observe(&mut self, is_loading: bool, is_fetching: bool, now: Instant) {
        match self.phase {
            LoaderPhase::Bootstrapping => {
                if is_loading {
                    self.visible = true;
                } else {
                    debug!("First load finished; loader enters steady phase");
                    self.visible = false;
                    self.phase = LoaderPhase::Steady;
                    self.was_fetching = is_fetching;
                }
            }
            LoaderPhase::Steady => {
                if is_fetching {
                    if self.hide_at.take().is_some() {
                        debug!("Fetch resumed; pending loader hide cancelled");
                    }
                    self.visible = true;
                } else if self.was_fetching && self.visible {
                    self.hide_at = Some(now + LOADER_HIDE_DELAY);
                }

                if let Some(deadline) = self.hide_at
                    && now >= deadline
                {
                    self.visible = false;
                    self.hide_at = None;
                }
                self.was_fetching = is_fetching;
            }
        }
    }
}

impl Default for LoaderDebounce {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_first_load_hides_without_delay() {
        let mut loader = LoaderDebounce::new();
        let t0 = Instant::now();

        loader.observe(true, true, t0);
        assert!(loader.is_visible());
        assert_eq!(loader.phase(), LoaderPhase::Bootstrapping);

        loader.observe(false, false, t0 + ms(5));
        assert!(!loader.is_visible());
        assert_eq!(loader.phase(), LoaderPhase::Steady);
        assert!(loader.pending_hide().is_none());
    }

    #[test]
    fn test_first_load_error_also_ends_bootstrapping() {
        let mut loader = LoaderDebounce::new();
        let t0 = Instant::now();
        loader.observe(true, true, t0);
        // Error state: neither loading nor fetching.
        loader.observe(false, false, t0);
        assert_eq!(loader.phase(), LoaderPhase::Steady);
        assert!(!loader.is_visible());
    }

    #[test]
    fn test_fast_page_change_keeps_loader_for_grace_period() {
        let mut loader = LoaderDebounce::new();
        let t0 = Instant::now();
        loader.observe(true, true, t0);
        loader.observe(false, false, t0);

        let start = t0 + ms(2000);
        loader.observe(false, true, start);
        assert!(loader.is_visible());

        let stop = start + ms(10);
        loader.observe(false, false, stop);
        assert!(loader.is_visible());
        assert_eq!(loader.pending_hide(), Some(stop + LOADER_HIDE_DELAY));

        loader.observe(false, false, stop + ms(999));
        assert!(loader.is_visible());

        loader.observe(false, false, stop + ms(1000));
        assert!(!loader.is_visible());
        assert!(loader.pending_hide().is_none());
    }

    #[test]
    fn test_deadline_is_measured_from_when_fetching_stopped() {
        let mut loader = LoaderDebounce::new();
        let t0 = Instant::now();
        loader.observe(true, true, t0);
        loader.observe(false, false, t0);
        loader.observe(false, true, t0 + ms(100));
        loader.observe(false, false, t0 + ms(200));

        // Repeated ticks must not push the deadline out.
        loader.observe(false, false, t0 + ms(700));
        assert_eq!(loader.pending_hide(), Some(t0 + ms(1200)));
    }

    #[test]
    fn test_resumed_fetch_cancels_pending_hide() {
        let mut loader = LoaderDebounce::new();
        let t0 = Instant::now();
        loader.observe(true, true, t0);
        loader.observe(false, false, t0);

        loader.observe(false, true, t0 + ms(100));
        loader.observe(false, false, t0 + ms(200));
        assert!(loader.pending_hide().is_some());

        loader.observe(false, true, t0 + ms(600));
        assert!(loader.pending_hide().is_none());

        // The old deadline passes while fetching; loader stays up.
        loader.observe(false, true, t0 + ms(1300));
        assert!(loader.is_visible());

        loader.observe(false, false, t0 + ms(1400));
        loader.observe(false, false, t0 + ms(2399));
        assert!(loader.is_visible());
        loader.observe(false, false, t0 + ms(2400));
        assert!(!loader.is_visible());
    }

    #[test]
    fn test_disabled_query_goes_straight_to_steady() {
        let mut loader = LoaderDebounce::new();
        loader.observe(false, false, Instant::now());
        assert_eq!(loader.phase(), LoaderPhase::Steady);
        assert!(!loader.is_visible());
    }
}

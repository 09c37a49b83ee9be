//! Auto-save debouncing.
//!
//! The form auto-saves two seconds after the applicant stops typing, not
//! on every keystroke. [`Debouncer`] tracks that quiet period: call
//! [`mark_dirty`](Debouncer::mark_dirty) on every change and
//! [`poll`](Debouncer::poll) on a timer; `poll` reports `true` once per
//! burst of changes, after the burst has gone quiet.

use std::time::{Duration, Instant};

/// Tracks whether a pending change has sat quiet long enough to flush.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    dirty_since: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_QUIET)
    }
}

impl Debouncer {
    /// The portal's auto-save quiet period.
    pub const DEFAULT_QUIET: Duration = Duration::from_millis(2000);

    /// A debouncer with a custom quiet period.
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            dirty_since: None,
        }
    }

    /// Note a change. Restarts the quiet period.
    pub fn mark_dirty(&mut self) {
        self.dirty_since = Some(Instant::now());
    }

    /// Whether a change is waiting to flush.
    pub fn is_dirty(&self) -> bool {
        self.dirty_since.is_some()
    }

    /// `true` exactly once after the last change has sat quiet for the
    /// configured period. Clears the dirty mark when it fires.
    pub fn poll(&mut self) -> bool {
        match self.dirty_since {
            Some(since) if since.elapsed() >= self.quiet => {
                self.dirty_since = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn clean_debouncer_never_fires() {
        let mut debouncer = Debouncer::new(Duration::from_millis(1));
        assert!(!debouncer.is_dirty());
        assert!(!debouncer.poll());
    }

    #[test]
    fn fires_once_after_the_quiet_period() {
        let mut debouncer = Debouncer::new(Duration::from_millis(10));
        debouncer.mark_dirty();
        assert!(debouncer.is_dirty());
        assert!(!debouncer.poll(), "must stay quiet inside the window");

        sleep(Duration::from_millis(15));
        assert!(debouncer.poll());
        assert!(!debouncer.poll(), "one flush per burst");
        assert!(!debouncer.is_dirty());
    }

    #[test]
    fn new_changes_restart_the_window() {
        let mut debouncer = Debouncer::new(Duration::from_millis(30));
        debouncer.mark_dirty();
        sleep(Duration::from_millis(20));

        // A second change inside the window pushes the flush out.
        debouncer.mark_dirty();
        sleep(Duration::from_millis(20));
        assert!(!debouncer.poll());

        sleep(Duration::from_millis(15));
        assert!(debouncer.poll());
    }
}

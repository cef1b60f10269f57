//! Debounced row hover tracking.
//!
//! Pointer events arrive on every cell the mouse crosses. Only a position that
//! stays put for the debounce window is reported. Every quiet period ending
//! on a row is reported, including a return to the previously settled row.

use std::time::{Duration, Instant};

/// Quiet period before a hover counts as settled.
pub const HOVER_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverTarget {
    /// Pointer is outside the rows.
    #[default]
    None,
    /// Pointer is over the row at this index (in table rows, not window rows).
    Row(usize),
}

#[derive(Debug, Clone)]
pub struct HoverTracker {
    delay: Duration,
    pending: Option<(HoverTarget, Instant)>,
    settled: HoverTarget,
}

impl Default for HoverTracker {
    fn default() -> Self {
        Self::new(HOVER_DEBOUNCE)
    }
}

impl HoverTracker {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            settled: HoverTarget::None,
        }
    }

    /// Pointer moved over row `index`. Supersedes any pending event.
    pub fn hover(&mut self, index: usize, now: Instant) {
        self.push(HoverTarget::Row(index), now);
    }

    /// Pointer left the rows.
    pub fn leave(&mut self, now: Instant) {
        self.push(HoverTarget::None, now);
    }

    fn push(&mut self, target: HoverTarget, now: Instant) {
        match self.pending {
            // Same target keeps its original deadline; the pointer is still.
            Some((pending, _)) if pending == target => {}
            _ => self.pending = Some((target, now + self.delay)),
        }
    }

    /// Delivers the settled row once the quiet period of the latest event
    /// elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<usize> {
        let (target, deadline) = self.pending?;
        if now < deadline {
            return None;
        }
        self.pending = None;
        self.settled = target;
        match target {
            HoverTarget::Row(index) => Some(index),
            HoverTarget::None => None,
        }
    }

    pub fn settled(&self) -> HoverTarget {
        self.settled
    }

    /// Row indexes are meaningless after the rows are rebuilt.
    pub fn clear(&mut self) {
        self.pending = None;
        self.settled = HoverTarget::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn settles_after_quiet_period() {
        let t0 = Instant::now();
        let mut h = HoverTracker::default();
        h.hover(3, t0);
        assert_eq!(h.poll(t0 + ms(499)), None);
        assert_eq!(h.poll(t0 + ms(500)), Some(3));
        assert_eq!(h.settled(), HoverTarget::Row(3));
        assert_eq!(h.poll(t0 + ms(900)), None);
    }

    #[test]
    fn moving_between_rows_reports_only_final_row() {
        let t0 = Instant::now();
        let mut h = HoverTracker::default();
        h.hover(1, t0);
        h.hover(2, t0 + ms(200));
        assert_eq!(h.poll(t0 + ms(600)), None);
        h.hover(3, t0 + ms(650));
        assert_eq!(h.poll(t0 + ms(800)), None);
        assert_eq!(h.poll(t0 + ms(1150)), Some(3));
    }

    #[test]
    fn repeated_events_on_same_row_do_not_delay() {
        let t0 = Instant::now();
        let mut h = HoverTracker::default();
        h.hover(5, t0);
        h.hover(5, t0 + ms(300));
        assert_eq!(h.poll(t0 + ms(500)), Some(5));
    }

    #[test]
    fn leave_resets_without_notification() {
        let t0 = Instant::now();
        let mut h = HoverTracker::default();
        h.hover(2, t0);
        assert_eq!(h.poll(t0 + ms(500)), Some(2));

        h.leave(t0 + ms(600));
        assert_eq!(h.poll(t0 + ms(1200)), None);
        assert_eq!(h.settled(), HoverTarget::None);

        // Re-entering the same row notifies again.
        h.hover(2, t0 + ms(1300));
        assert_eq!(h.poll(t0 + ms(1800)), Some(2));
    }

    #[test]
    fn leave_within_window_cancels_pending_hover() {
        let t0 = Instant::now();
        let mut h = HoverTracker::default();
        h.hover(4, t0);
        h.leave(t0 + ms(100));
        assert_eq!(h.poll(t0 + ms(700)), None);
        assert_eq!(h.settled(), HoverTarget::None);
    }

    #[test]
    fn returning_to_settled_row_is_reported_again() {
        let t0 = Instant::now();
        let mut h = HoverTracker::default();
        h.hover(1, t0);
        assert_eq!(h.poll(t0 + ms(500)), Some(1));
        h.hover(2, t0 + ms(510));
        h.hover(1, t0 + ms(520));
        assert_eq!(h.poll(t0 + ms(1019)), None);
        assert_eq!(h.poll(t0 + ms(1100)), Some(1));
        assert_eq!(h.settled(), HoverTarget::Row(1));
    }
}

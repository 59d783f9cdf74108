//! Debouncer
//!
//! Settles a rapidly changing input. Each change hands out a ticket for the
//! quiet-period timer; the timer owner reports the lapse with that ticket and
//! only the newest ticket may publish.

use std::time::Duration;

/// Default quiet period for free-text search
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(350);

/// Identifies one quiet-period timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

#[derive(Debug)]
pub struct Debouncer<T> {
    quiet_period: Duration,
    generation: u64,
    pending: Option<T>,
    alive: bool,
}

impl<T> Debouncer<T> {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            generation: 0,
            pending: None,
            alive: true,
        }
    }

    /// How long the timer for each ticket must run
    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Record a raw change. Restarts the quiet period: the caller must start
    /// a timer of `quiet_period` and report it with the returned ticket.
    pub fn input(&mut self, value: T) -> DebounceTicket {
        self.generation += 1;
        self.pending = Some(value);
        DebounceTicket(self.generation)
    }

    /// The timer for `ticket` ran out. Publishes the pending value if no
    /// newer change restarted the period and the owner is still alive.
    pub fn lapse(&mut self, ticket: DebounceTicket) -> Option<T> {
        if !self.alive || ticket.0 != self.generation {
            return None;
        }
        self.pending.take()
    }

    /// Publish the pending value now, without waiting
    pub fn flush(&mut self) -> Option<T> {
        if !self.alive {
            return None;
        }
        // outstanding timers must not publish again
        self.generation += 1;
        self.pending.take()
    }

    /// Owner went away; nothing will be published from now on
    pub fn teardown(&mut self) {
        self.alive = false;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_publishes_once_with_last_value() {
        let mut search = Debouncer::new(DEFAULT_QUIET_PERIOD);

        // three edits within 100ms of each other; each restarts the timer
        let t1 = search.input("a".to_string());
        let t2 = search.input("ab".to_string());
        let t3 = search.input("abc".to_string());

        // earlier timers lapse first but were interrupted
        assert_eq!(search.lapse(t1), None);
        assert_eq!(search.lapse(t2), None);
        assert_eq!(search.lapse(t3), Some("abc".to_string()));
        assert_eq!(search.lapse(t3), None);
    }

    #[test]
    fn test_same_value_retyped_still_restarts_period() {
        let mut search = Debouncer::new(DEFAULT_QUIET_PERIOD);
        let first = search.input("sum".to_string());
        let again = search.input("sum".to_string());

        assert_eq!(search.lapse(first), None);
        assert_eq!(search.lapse(again), Some("sum".to_string()));
    }

    #[test]
    fn test_teardown_suppresses_publication() {
        let mut search = Debouncer::new(DEFAULT_QUIET_PERIOD);
        let ticket = search.input("abc".to_string());
        search.teardown();

        assert_eq!(search.lapse(ticket), None);
        assert_eq!(search.flush(), None);
        assert_eq!(search.input("abcd".to_string()), DebounceTicket(2));
        assert_eq!(search.flush(), None);
    }

    #[test]
    fn test_flush_publishes_immediately_and_cancels_timer() {
        let mut search = Debouncer::new(DEFAULT_QUIET_PERIOD);
        let ticket = search.input("boss".to_string());

        assert_eq!(search.flush(), Some("boss".to_string()));
        assert_eq!(search.lapse(ticket), None);
        assert_eq!(search.flush(), None);
    }
}

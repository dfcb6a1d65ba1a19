//! Cancellable one-shot timers on a virtual clock
//!
//! Nothing in the core reads the wall clock. Hosts measure elapsed time
//! themselves (`Instant` natively, `performance.now()` in the browser) and
//! feed it to [`TimerQueue::pop_due`], which keeps everything deterministic
//! and testable.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

/// Handle to a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// Anything that can schedule and cancel one-shot timers
pub trait Scheduler {
    /// Schedule a timer that fires `delay` after the current virtual time
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    fn cancel(&mut self, id: TimerId) -> bool;
}

/// Deadline-ordered timer queue
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    deadlines: BTreeMap<TimerId, Duration>,
    // (deadline, id) so ties fire in scheduling order
    order: BTreeSet<(Duration, TimerId)>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    #[cfg(test)]
    fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    pub fn pending_count(&self) -> usize {
        self.deadlines.len()
    }

    /// Earliest pending deadline, if any
    pub fn next_deadline(&self) -> Option<Duration> {
        self.order.first().map(|(deadline, _)| *deadline)
    }

    /// Pop the earliest timer due at or before `now`.
    ///
    /// The clock moves to the popped timer's deadline, so timers scheduled
    /// while draining a backlog are placed relative to when their parent
    /// should have fired. Once nothing is due the clock moves to `now`.
    /// The clock never runs backwards.
    pub fn pop_due(&mut self, now: Duration) -> Option<TimerId> {
        match self.order.first().copied() {
            Some((deadline, id)) if deadline <= now => {
                self.order.remove(&(deadline, id));
                self.deadlines.remove(&id);
                self.now = self.now.max(deadline);
                tracing::trace!(?id, ?deadline, "timer fired");
                Some(id)
            }
            _ => {
                self.now = self.now.max(now);
                None
            }
        }
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        let deadline = self.now.saturating_add(delay);
        self.deadlines.insert(id, deadline);
        self.order.insert((deadline, id));
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id) {
            Some(deadline) => {
                self.order.remove(&(deadline, id));
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut timers = TimerQueue::new();
        let late = timers.schedule(ms(50));
        let early = timers.schedule(ms(10));
        let tie = timers.schedule(ms(10));

        assert_eq!(timers.pop_due(ms(5)), None);
        assert_eq!(timers.pop_due(ms(100)), Some(early));
        assert_eq!(timers.pop_due(ms(100)), Some(tie));
        assert_eq!(timers.pop_due(ms(100)), Some(late));
        assert_eq!(timers.pop_due(ms(100)), None);
        assert_eq!(timers.now(), ms(100));
    }

    #[test]
    fn test_cancel() {
        let mut timers = TimerQueue::new();
        let id = timers.schedule(ms(10));

        assert!(timers.is_pending(id));
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert_eq!(timers.pop_due(ms(20)), None);
        assert_eq!(timers.pending_count(), 0);
    }

    #[test]
    fn test_backlog_reschedules_relative_to_deadline() {
        let mut timers = TimerQueue::new();
        timers.schedule(ms(10));

        // A host that stalled for 35ms drains a chain of 10ms timers
        let mut fired = 0;
        while timers.pop_due(ms(35)).is_some() {
            fired += 1;
            timers.schedule(ms(10));
        }

        assert_eq!(fired, 3);
        assert_eq!(timers.next_deadline(), Some(ms(40)));
        assert_eq!(timers.now(), ms(35));
    }

    #[test]
    fn test_far_deadlines_saturate() {
        let mut timers = TimerQueue::new();
        let first = timers.schedule(Duration::MAX);
        assert_eq!(timers.pop_due(Duration::MAX), Some(first));

        // Scheduling past the end of time clamps instead of overflowing
        let second = timers.schedule(ms(10));
        assert_eq!(timers.next_deadline(), Some(Duration::MAX));
        assert_eq!(timers.pop_due(Duration::MAX), Some(second));
    }
}

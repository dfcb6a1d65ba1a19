use std::time::Duration;

use tracing::{debug, info};

use super::source::{RevealSource, RevealedParagraph};
use crate::error::{CardError, Result};
use crate::timer::{Scheduler, TimerId};

/// Invoked once when a session has revealed its whole source
pub type CompletionCallback = Box<dyn FnOnce()>;

/// Cursor of one reveal session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealState {
    pub position: usize,
    pub is_complete: bool,
}

/// Result of handing a fired timer to the typewriter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One more unit is visible and the next tick is scheduled
    Advanced,
    /// The last unit became visible
    Completed,
    /// The timer does not belong to the current session
    Stale,
}

/// Extra pause after sentence punctuation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Multiplier applied to the interval after `.`, `!`, `?` or `,`.
    /// Values of 0 or 1 keep a steady cadence.
    pub punctuation_factor: u32,
}

impl Pacing {
    pub fn steady() -> Self {
        Self {
            punctuation_factor: 1,
        }
    }

    /// Delay before the tick that follows revealing `unit`
    pub fn delay_after(&self, unit: &str, interval: Duration) -> Duration {
        if self.punctuation_factor > 1 && matches!(unit, "." | "!" | "?" | ",") {
            interval.saturating_mul(self.punctuation_factor)
        } else {
            interval
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            punctuation_factor: 3,
        }
    }
}

struct Session {
    source: RevealSource,
    state: RevealState,
    interval: Duration,
    pending: Option<TimerId>,
    on_complete: Option<CompletionCallback>,
}

/// Text reveal engine.
///
/// Holds at most one session. Timers come from an injected [`Scheduler`];
/// the host hands every fired timer back through [`Typewriter::tick`].
#[derive(Default)]
pub struct Typewriter {
    session: Option<Session>,
    pacing: Pacing,
}

impl Typewriter {
    pub fn new(pacing: Pacing) -> Self {
        Self {
            session: None,
            pacing,
        }
    }

    /// Begin a new session, cancelling the pending tick of any previous one.
    ///
    /// An empty source completes immediately without scheduling anything.
    pub fn start<F>(
        &mut self,
        source: RevealSource,
        interval: Duration,
        scheduler: &mut dyn Scheduler,
        on_complete: F,
    ) -> Result<()>
    where
        F: FnOnce() + 'static,
    {
        if interval.is_zero() {
            return Err(CardError::ZeroInterval);
        }

        self.cancel(scheduler);

        let mut session = Session {
            state: RevealState::default(),
            interval,
            pending: None,
            on_complete: Some(Box::new(on_complete)),
            source,
        };

        if session.source.is_empty() {
            session.state.is_complete = true;
            if let Some(callback) = session.on_complete.take() {
                callback();
            }
            debug!("empty reveal source, completed immediately");
        } else {
            session.pending = Some(scheduler.schedule(interval));
            debug!(units = session.source.len(), ?interval, "reveal session started");
        }

        self.session = Some(session);
        Ok(())
    }

    /// Advance by one unit if `timer` is this session's pending tick
    pub fn tick(&mut self, timer: TimerId, scheduler: &mut dyn Scheduler) -> TickOutcome {
        let Some(session) = self.session.as_mut() else {
            return TickOutcome::Stale;
        };
        if session.pending != Some(timer) {
            return TickOutcome::Stale;
        }
        session.pending = None;

        let len = session.source.len();
        if session.state.position < len {
            session.state.position += 1;
        }

        if session.state.position == len {
            session.state.is_complete = true;
            if let Some(callback) = session.on_complete.take() {
                callback();
            }
            info!(units = len, "reveal session complete");
            return TickOutcome::Completed;
        }

        let delay = session
            .source
            .unit(session.state.position - 1)
            .map(|unit| self.pacing.delay_after(unit, session.interval))
            .unwrap_or(session.interval);
        session.pending = Some(scheduler.schedule(delay));
        TickOutcome::Advanced
    }

    /// Stop scheduling ticks. Safe to call repeatedly or after completion.
    pub fn cancel(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(session) = self.session.as_mut() {
            if let Some(id) = session.pending.take() {
                scheduler.cancel(id);
                debug!(position = session.state.position, "reveal session cancelled");
            }
        }
    }

    /// Cancel and forget the current session
    pub fn reset(&mut self, scheduler: &mut dyn Scheduler) {
        self.cancel(scheduler);
        self.session = None;
    }

    /// Revealed text of the current session, split into paragraphs
    pub fn current_renderable(&self) -> Vec<RevealedParagraph> {
        self.session
            .as_ref()
            .map(|s| s.source.render_prefix(s.state.position))
            .unwrap_or_default()
    }

    pub fn state(&self) -> Option<RevealState> {
        self.session.as_ref().map(|s| s.state)
    }

    pub fn is_complete(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.state.is_complete)
    }

    /// Whether a tick is waiting on the scheduler
    #[cfg(test)]
    fn is_running(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.pending.is_some())
    }

    /// (revealed units, total units)
    pub fn progress(&self) -> (usize, usize) {
        self.session
            .as_ref()
            .map(|s| (s.state.position, s.source.len()))
            .unwrap_or((0, 0))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::timer::TimerQueue;

    const INTERVAL: Duration = Duration::from_millis(30);

    fn counter() -> (Rc<Cell<u32>>, impl FnOnce() + 'static) {
        let count = Rc::new(Cell::new(0));
        let handle = count.clone();
        (count, move || handle.set(handle.get() + 1))
    }

    /// Fire timers until none remain, returning how many ticks advanced
    fn drain(typewriter: &mut Typewriter, timers: &mut TimerQueue) -> usize {
        let mut ticks = 0;
        while let Some(deadline) = timers.next_deadline() {
            let Some(id) = timers.pop_due(deadline) else {
                break;
            };
            if typewriter.tick(id, timers) != TickOutcome::Stale {
                ticks += 1;
            }
        }
        ticks
    }

    #[test]
    fn test_ticks_to_completion_equal_length() {
        for text in ["<p>A</p><p>B</p>", "Hello, world!", "<p>é👨‍👩‍👧</p>"] {
            let mut timers = TimerQueue::new();
            let mut typewriter = Typewriter::default();
            let source = RevealSource::new(text);
            let len = source.len();

            typewriter.start(source, INTERVAL, &mut timers, || {}).unwrap();

            assert_eq!(drain(&mut typewriter, &mut timers), len);
            assert!(typewriter.is_complete());
            assert_eq!(typewriter.progress(), (len, len));
        }
    }

    #[test]
    fn test_position_is_monotonic_and_bounded() {
        let mut timers = TimerQueue::new();
        let mut typewriter = Typewriter::default();
        typewriter
            .start(RevealSource::new("<p>Hi!</p>"), INTERVAL, &mut timers, || {})
            .unwrap();

        let mut last = 0;
        while let Some(deadline) = timers.next_deadline() {
            let id = timers.pop_due(deadline).unwrap();
            typewriter.tick(id, &mut timers);
            let state = typewriter.state().unwrap();
            assert!(state.position >= last);
            assert!(state.position <= 10);
            last = state.position;
        }
        assert_eq!(last, 10);
    }

    #[test]
    fn test_on_complete_fires_once_after_last_unit() {
        let mut timers = TimerQueue::new();
        let mut typewriter = Typewriter::default();
        let (count, on_complete) = counter();
        typewriter
            .start(RevealSource::new("abc"), INTERVAL, &mut timers, on_complete)
            .unwrap();

        for _ in 0..2 {
            let id = timers.pop_due(Duration::from_secs(10)).unwrap();
            assert_eq!(typewriter.tick(id, &mut timers), TickOutcome::Advanced);
            assert_eq!(count.get(), 0);
        }

        let id = timers.pop_due(Duration::from_secs(10)).unwrap();
        assert_eq!(typewriter.tick(id, &mut timers), TickOutcome::Completed);
        assert_eq!(count.get(), 1);

        // Nothing further is scheduled, and replaying the timer does nothing
        assert_eq!(timers.pending_count(), 0);
        assert_eq!(typewriter.tick(id, &mut timers), TickOutcome::Stale);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_first_paragraph_renders_without_partial_second() {
        let mut timers = TimerQueue::new();
        let mut typewriter = Typewriter::default();
        typewriter
            .start(RevealSource::new("<p>A</p><p>B</p>"), INTERVAL, &mut timers, || {})
            .unwrap();

        // "<p>A" is four units
        for _ in 0..4 {
            let id = timers.pop_due(Duration::from_secs(10)).unwrap();
            typewriter.tick(id, &mut timers);
        }

        let paragraphs = typewriter.current_renderable();
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].text(), "A");

        // Mid-way through "</p><p" still shows only the first paragraph
        for _ in 0..6 {
            let id = timers.pop_due(Duration::from_secs(10)).unwrap();
            typewriter.tick(id, &mut timers);
        }
        let paragraphs = typewriter.current_renderable();
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].text(), "A");
    }

    #[test]
    fn test_empty_source_completes_without_scheduling() {
        let mut timers = TimerQueue::new();
        let mut typewriter = Typewriter::default();
        let (count, on_complete) = counter();

        typewriter
            .start(RevealSource::new(""), INTERVAL, &mut timers, on_complete)
            .unwrap();

        assert_eq!(count.get(), 1);
        assert_eq!(timers.pending_count(), 0);
        assert!(typewriter.is_complete());
        assert!(typewriter.current_renderable().is_empty());
    }

    #[test]
    fn test_cancel_before_first_tick() {
        let mut timers = TimerQueue::new();
        let mut typewriter = Typewriter::default();
        typewriter
            .start(RevealSource::new("abc"), INTERVAL, &mut timers, || {})
            .unwrap();

        typewriter.cancel(&mut timers);
        typewriter.cancel(&mut timers);

        assert_eq!(timers.pop_due(Duration::from_secs(10)), None);
        assert_eq!(typewriter.state().unwrap().position, 0);
        assert!(!typewriter.is_running());
    }

    #[test]
    fn test_cancel_after_completion_is_noop() {
        let mut timers = TimerQueue::new();
        let mut typewriter = Typewriter::default();
        typewriter
            .start(RevealSource::new("a"), INTERVAL, &mut timers, || {})
            .unwrap();
        drain(&mut typewriter, &mut timers);

        typewriter.cancel(&mut timers);
        assert!(typewriter.is_complete());
        assert_eq!(typewriter.progress(), (1, 1));
    }

    #[test]
    fn test_new_session_cancels_pending_tick() {
        let mut timers = TimerQueue::new();
        let mut typewriter = Typewriter::default();
        let (first_done, on_first) = counter();

        typewriter
            .start(RevealSource::new("first"), INTERVAL, &mut timers, on_first)
            .unwrap();
        let stale = timers.pop_due(INTERVAL).unwrap();

        typewriter
            .start(RevealSource::new("xy"), INTERVAL, &mut timers, || {})
            .unwrap();

        assert_eq!(typewriter.tick(stale, &mut timers), TickOutcome::Stale);
        assert_eq!(typewriter.state().unwrap().position, 0);
        assert_eq!(timers.pending_count(), 1);

        assert_eq!(drain(&mut typewriter, &mut timers), 2);
        assert_eq!(first_done.get(), 0);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut timers = TimerQueue::new();
        let mut typewriter = Typewriter::default();
        let result = typewriter.start(RevealSource::new("a"), Duration::ZERO, &mut timers, || {});

        assert!(matches!(result, Err(CardError::ZeroInterval)));
        assert!(typewriter.state().is_none());
    }

    #[test]
    fn test_punctuation_pause() {
        let mut timers = TimerQueue::new();
        let mut typewriter = Typewriter::new(Pacing::default());
        typewriter
            .start(RevealSource::new("a,b"), INTERVAL, &mut timers, || {})
            .unwrap();

        // 'a' at 30ms, ',' at 60ms, then a 3x pause before 'b' at 150ms
        let mut fired_at = Vec::new();
        while let Some(deadline) = timers.next_deadline() {
            let id = timers.pop_due(deadline).unwrap();
            typewriter.tick(id, &mut timers);
            fired_at.push(deadline.as_millis());
        }
        assert_eq!(fired_at, vec![30, 60, 150]);

        let steady = Pacing::steady();
        assert_eq!(steady.delay_after("!", INTERVAL), INTERVAL);
    }

    #[test]
    fn test_extreme_pacing_saturates() {
        let huge = Duration::from_millis(10_000_000_000_000);
        let pacing = Pacing {
            punctuation_factor: u32::MAX,
        };
        assert_eq!(pacing.delay_after(",", huge), Duration::MAX);

        let mut timers = TimerQueue::new();
        let (count, on_complete) = counter();
        let mut typewriter = Typewriter::new(pacing);
        typewriter
            .start(RevealSource::new("Hi, you"), huge, &mut timers, on_complete)
            .unwrap();

        assert_eq!(drain(&mut typewriter, &mut timers), 7);
        assert!(typewriter.is_complete());
        assert_eq!(count.get(), 1);
    }
}

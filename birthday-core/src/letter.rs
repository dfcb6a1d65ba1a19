use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::{CardError, Result};
use crate::particles::{scatter, Particle, LETTER_GLYPHS};
use crate::reveal::{Pacing, RevealSource, RevealedParagraph, TickOutcome, Typewriter};
use crate::timer::{Scheduler, TimerId};

/// Pause between opening the envelope and the first typed character
pub const OPENING_DELAY: Duration = Duration::from_millis(500);

/// Default typewriter cadence
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(30);

/// Number of emoji floating behind the letter
pub const LETTER_PARTICLES: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterStage {
    /// Envelope closed, waiting for the reader
    Sealed,
    /// Envelope animating open
    Opening,
    /// Typewriter running
    Typing,
    /// Whole letter shown
    Revealed,
}

/// The love letter section
pub struct Letter {
    stage: LetterStage,
    source: RevealSource,
    interval: Duration,
    typewriter: Typewriter,
    open_timer: Option<TimerId>,
    // Set by the session's completion callback
    completed: Rc<Cell<bool>>,
    pub particles: Vec<Particle>,
}

impl Letter {
    pub fn new(text: &str, interval: Duration, pacing: Pacing) -> Result<Self> {
        if interval.is_zero() {
            return Err(CardError::ZeroInterval);
        }

        Ok(Self {
            stage: LetterStage::Sealed,
            source: RevealSource::new(text),
            interval,
            typewriter: Typewriter::new(pacing),
            open_timer: None,
            completed: Rc::new(Cell::new(false)),
            particles: scatter(LETTER_PARTICLES, LETTER_GLYPHS),
        })
    }

    pub fn stage(&self) -> LetterStage {
        self.stage
    }

    /// Break the seal. Typing starts after [`OPENING_DELAY`].
    pub fn open(&mut self, scheduler: &mut dyn Scheduler) -> bool {
        if self.stage != LetterStage::Sealed {
            return false;
        }
        self.stage = LetterStage::Opening;
        self.open_timer = Some(scheduler.schedule(OPENING_DELAY));
        true
    }

    /// Type the letter again from the beginning
    pub fn restart(&mut self, scheduler: &mut dyn Scheduler) {
        match self.stage {
            LetterStage::Sealed | LetterStage::Opening => {
                self.open(scheduler);
            }
            LetterStage::Typing | LetterStage::Revealed => self.begin_typing(scheduler),
        }
    }

    /// Tear down any running session and reseal the envelope
    pub fn close(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(id) = self.open_timer.take() {
            scheduler.cancel(id);
        }
        self.typewriter.reset(scheduler);
        self.stage = LetterStage::Sealed;
    }

    /// Returns true if `id` belonged to this letter
    pub fn handle_timer(&mut self, id: TimerId, scheduler: &mut dyn Scheduler) -> bool {
        if self.open_timer == Some(id) {
            self.open_timer = None;
            self.begin_typing(scheduler);
            return true;
        }

        match self.typewriter.tick(id, scheduler) {
            TickOutcome::Stale => false,
            TickOutcome::Advanced | TickOutcome::Completed => {
                self.sync_completion();
                true
            }
        }
    }

    fn begin_typing(&mut self, scheduler: &mut dyn Scheduler) {
        let completed = Rc::new(Cell::new(false));
        self.completed = completed.clone();
        self.stage = LetterStage::Typing;

        let started = self.typewriter.start(
            self.source.clone(),
            self.interval,
            scheduler,
            move || completed.set(true),
        );
        if let Err(e) = started {
            warn!("letter could not be typed: {e}");
            self.completed.set(true);
        }
        self.sync_completion();
    }

    fn sync_completion(&mut self) {
        if self.completed.get() && self.stage == LetterStage::Typing {
            self.stage = LetterStage::Revealed;
            info!("letter fully revealed");
        }
    }

    /// Paragraphs to draw for the current stage
    pub fn paragraphs(&self) -> Vec<RevealedParagraph> {
        match self.stage {
            LetterStage::Sealed | LetterStage::Opening => Vec::new(),
            LetterStage::Typing => self.typewriter.current_renderable(),
            LetterStage::Revealed => self.source.paragraphs(),
        }
    }

    /// Fraction of the letter revealed so far
    pub fn progress(&self) -> f32 {
        match self.stage {
            LetterStage::Sealed | LetterStage::Opening => 0.0,
            LetterStage::Revealed => 1.0,
            LetterStage::Typing => {
                let (position, len) = self.typewriter.progress();
                if len == 0 {
                    1.0
                } else {
                    position as f32 / len as f32
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::TimerQueue;

    fn run_until_idle(letter: &mut Letter, timers: &mut TimerQueue) {
        while let Some(deadline) = timers.next_deadline() {
            let id = timers.pop_due(deadline).unwrap();
            assert!(letter.handle_timer(id, timers));
        }
    }

    #[test]
    fn test_open_types_then_reveals() {
        let mut timers = TimerQueue::new();
        let mut letter = Letter::new("<p>Hi</p><p>You</p>", DEFAULT_INTERVAL, Pacing::default()).unwrap();
        assert_eq!(letter.stage(), LetterStage::Sealed);

        assert!(letter.open(&mut timers));
        assert!(!letter.open(&mut timers));
        assert_eq!(letter.stage(), LetterStage::Opening);
        assert!(letter.paragraphs().is_empty());

        let id = timers.pop_due(OPENING_DELAY).unwrap();
        assert!(letter.handle_timer(id, &mut timers));
        assert_eq!(letter.stage(), LetterStage::Typing);

        run_until_idle(&mut letter, &mut timers);
        assert_eq!(letter.stage(), LetterStage::Revealed);
        let texts: Vec<String> = letter.paragraphs().iter().map(|p| p.text()).collect();
        assert_eq!(texts, vec!["Hi", "You"]);
        assert_eq!(letter.progress(), 1.0);
    }

    #[test]
    fn test_restart_replaces_session() {
        let mut timers = TimerQueue::new();
        let mut letter = Letter::new("<p>abc</p>", DEFAULT_INTERVAL, Pacing::steady()).unwrap();
        letter.open(&mut timers);
        let id = timers.pop_due(OPENING_DELAY).unwrap();
        letter.handle_timer(id, &mut timers);

        // One character in, then restart
        let id = timers.pop_due(Duration::from_secs(5)).unwrap();
        letter.handle_timer(id, &mut timers);
        letter.restart(&mut timers);

        assert_eq!(timers.pending_count(), 1);
        assert_eq!(letter.progress(), 0.0);
        run_until_idle(&mut letter, &mut timers);
        assert_eq!(letter.stage(), LetterStage::Revealed);
    }

    #[test]
    fn test_empty_letter_reveals_immediately() {
        let mut timers = TimerQueue::new();
        let mut letter = Letter::new("", DEFAULT_INTERVAL, Pacing::default()).unwrap();
        letter.open(&mut timers);
        let id = timers.pop_due(OPENING_DELAY).unwrap();

        assert!(letter.handle_timer(id, &mut timers));
        assert_eq!(letter.stage(), LetterStage::Revealed);
        assert_eq!(timers.pending_count(), 0);
    }

    #[test]
    fn test_close_cancels_everything() {
        let mut timers = TimerQueue::new();
        let mut letter = Letter::new("<p>abc</p>", DEFAULT_INTERVAL, Pacing::default()).unwrap();
        letter.open(&mut timers);
        letter.close(&mut timers);

        assert_eq!(timers.pending_count(), 0);
        assert_eq!(letter.stage(), LetterStage::Sealed);
    }

    #[test]
    fn test_zero_interval() {
        assert!(Letter::new("x", Duration::ZERO, Pacing::default()).is_err());
    }
}

use tracing::info;

use crate::particles::Confetti;
use crate::timer::{Scheduler, TimerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiftStage {
    Wrapped,
    Unwrapped,
}

/// The final surprise: a wrapped box that bursts into confetti when opened
#[derive(Debug)]
pub struct Gift {
    pub stage: GiftStage,
    pub confetti: Confetti,
}

impl Gift {
    pub fn new() -> Self {
        Self {
            stage: GiftStage::Wrapped,
            confetti: Confetti::default(),
        }
    }

    /// Open the box. Does nothing once unwrapped.
    pub fn unwrap_gift(&mut self, scheduler: &mut dyn Scheduler) -> bool {
        if self.stage == GiftStage::Unwrapped {
            return false;
        }
        self.stage = GiftStage::Unwrapped;
        self.confetti.burst(scheduler);
        info!("gift unwrapped");
        true
    }

    pub fn is_unwrapped(&self) -> bool {
        self.stage == GiftStage::Unwrapped
    }

    pub fn handle_timer(&mut self, id: TimerId) -> bool {
        self.confetti.handle_timer(id)
    }
}

impl Default for Gift {
    fn default() -> Self {
        Self::new()
    }
}

use chrono::{Datelike, NaiveDate};

use crate::particles::{scatter, Confetti, Particle, HERO_GLYPHS};
use crate::timer::Scheduler;

/// Number of emoji orbiting the hero title
pub const HERO_PARTICLES: usize = 10;

/// Age in whole years on `today`
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

/// Landing section: greeting, age and a confetti welcome
#[derive(Debug)]
pub struct Hero {
    pub age: i32,
    pub confetti: Confetti,
    pub particles: Vec<Particle>,
}

impl Hero {
    pub fn new(birth_date: NaiveDate, today: NaiveDate) -> Self {
        Self {
            age: age_on(birth_date, today),
            confetti: Confetti::default(),
            particles: scatter(HERO_PARTICLES, HERO_GLYPHS),
        }
    }

    /// Kick off the welcome confetti
    pub fn welcome(&mut self, scheduler: &mut dyn Scheduler) {
        self.confetti.burst(scheduler);
    }
}

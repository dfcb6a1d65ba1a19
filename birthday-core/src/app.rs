use std::time::Duration;

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::actions::Action;
use crate::error::Result;
use crate::gallery::Gallery;
use crate::gift::Gift;
use crate::hero::Hero;
use crate::letter::{Letter, LetterStage, DEFAULT_INTERVAL};
use crate::model::CardContent;
use crate::reveal::Pacing;
use crate::timeline::Timeline;
use crate::timer::TimerQueue;

/// Photos per row in the gallery grid
pub const GALLERY_COLUMNS: usize = 3;

/// Page sections, in scroll order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Hero,
    Gallery,
    Timeline,
    Letter,
    Gift,
}

impl Section {
    pub fn all() -> &'static [Section] {
        &[
            Section::Hero,
            Section::Gallery,
            Section::Timeline,
            Section::Letter,
            Section::Gift,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Hero => "Welcome",
            Section::Gallery => "Memories",
            Section::Timeline => "Our Story",
            Section::Letter => "Letter",
            Section::Gift => "Surprise",
        }
    }

    pub fn index(&self) -> usize {
        Section::all().iter().position(|s| s == self).unwrap_or(0)
    }

    pub fn next(&self) -> Section {
        let all = Section::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn prev(&self) -> Section {
        let all = Section::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Lightbox,
    Help,
}

/// Typewriter tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub interval: Duration,
    pub pacing: Pacing,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            pacing: Pacing::default(),
        }
    }
}

/// Platform-agnostic application state
pub struct App {
    pub content: CardContent,
    pub section: Section,
    pub mode: Mode,
    pub running: bool,

    pub timers: TimerQueue,

    // Sections
    pub hero: Hero,
    pub gallery: Gallery,
    pub timeline: Timeline,
    pub letter: Letter,
    pub gift: Gift,

    // Status message
    pub status_message: Option<String>,
}

impl App {
    pub fn new(content: CardContent, settings: Settings, today: NaiveDate) -> Result<Self> {
        let letter = Letter::new(&content.letter, settings.interval, settings.pacing)?;

        let mut app = Self {
            section: Section::Hero,
            mode: Mode::Normal,
            running: true,

            timers: TimerQueue::new(),

            hero: Hero::new(content.birth_date, today),
            gallery: Gallery::new(content.photos.len()),
            timeline: Timeline::new(content.milestones.len()),
            letter,
            gift: Gift::new(),

            status_message: None,
            content,
        };
        app.hero.welcome(&mut app.timers);
        Ok(app)
    }

    /// Time since the app started, as seen by its timers
    pub fn elapsed(&self) -> Duration {
        self.timers.now()
    }

    /// Fire every timer due at `now` (time since start)
    pub fn advance(&mut self, now: Duration) {
        let was_revealed = self.letter.stage() == LetterStage::Revealed;

        while let Some(id) = self.timers.pop_due(now) {
            let handled = self.hero.confetti.handle_timer(id)
                || self.gift.handle_timer(id)
                || self.letter.handle_timer(id, &mut self.timers);
            if !handled {
                trace!(?id, "ignored stale timer");
            }
        }

        if !was_revealed && self.letter.stage() == LetterStage::Revealed {
            self.set_status(&format!("A letter for you, from {}", self.content.sender));
        }
    }

    /// Handle one user intent
    pub fn apply(&mut self, action: Action) {
        debug!(?action, mode = ?self.mode, section = ?self.section, "action");

        match self.mode {
            // Any key closes help, quit included
            Mode::Help => {
                self.mode = if self.gallery.is_open() {
                    Mode::Lightbox
                } else {
                    Mode::Normal
                };
            }
            Mode::Lightbox => self.apply_lightbox(action),
            Mode::Normal => self.apply_normal(action),
        }
    }

    fn apply_normal(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ToggleHelp => self.mode = Mode::Help,
            Action::NextSection => self.goto(self.section.next()),
            Action::PrevSection => self.goto(self.section.prev()),
            Action::GoTo(section) => self.goto(section),

            Action::Up => match self.section {
                Section::Gallery => self.gallery.move_selection(-(GALLERY_COLUMNS as isize)),
                Section::Timeline => self.timeline.prev(),
                _ => {}
            },
            Action::Down => match self.section {
                Section::Gallery => self.gallery.move_selection(GALLERY_COLUMNS as isize),
                Section::Timeline => self.timeline.next(),
                _ => {}
            },
            Action::Left => match self.section {
                Section::Gallery => self.gallery.select_prev(),
                Section::Timeline => self.timeline.prev(),
                _ => {}
            },
            Action::Right => match self.section {
                Section::Gallery => self.gallery.select_next(),
                Section::Timeline => self.timeline.next(),
                _ => {}
            },

            Action::Activate => self.activate(),
            Action::Back => {
                if self.section == Section::Letter && self.letter.stage() != LetterStage::Sealed {
                    self.letter.close(&mut self.timers);
                    self.set_status("Letter sealed again");
                }
            }
            Action::Like => {
                if self.section == Section::Gallery {
                    self.like(self.gallery.selected());
                }
            }
            Action::RestartLetter => {
                if self.section == Section::Letter {
                    self.letter.restart(&mut self.timers);
                }
            }
            Action::Swipe(_) => {}
        }
    }

    fn apply_lightbox(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ToggleHelp => self.mode = Mode::Help,
            Action::Back | Action::Activate => {
                self.gallery.close();
                self.mode = Mode::Normal;
            }
            Action::Left | Action::Up => self.gallery.prev(),
            Action::Right | Action::Down => self.gallery.next(),
            Action::Like => {
                if let Some(index) = self.gallery.current() {
                    self.like(index);
                }
            }
            Action::Swipe(offset) => {
                self.gallery.swipe(offset as f32);
            }
            _ => {}
        }
    }

    fn activate(&mut self) {
        match self.section {
            Section::Hero => self.goto(Section::Gallery),
            Section::Gallery => {
                if self.gallery.open() {
                    self.mode = Mode::Lightbox;
                }
            }
            Section::Timeline => {}
            Section::Letter => {
                if self.letter.open(&mut self.timers) {
                    self.set_status("Opening your letter...");
                }
            }
            Section::Gift => {
                if self.gift.unwrap_gift(&mut self.timers) {
                    self.set_status(&format!("Surprise! {}", self.content.gift));
                }
            }
        }
    }

    fn goto(&mut self, section: Section) {
        self.section = section;
    }

    fn like(&mut self, index: usize) {
        if self.gallery.toggle_like(index) {
            self.set_status("Liked");
        }
    }

    /// Set status message
    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some(msg.to_string());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Get title for display
    pub fn title(&self) -> String {
        format!("Happy Birthday, {}!", self.content.recipient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gift::GiftStage;
    use crate::letter::OPENING_DELAY;
    use crate::particles::CONFETTI_DURATION;

    fn app() -> App {
        let today = NaiveDate::from_ymd_opt(2026, 4, 15).unwrap();
        App::new(CardContent::default(), Settings::default(), today).unwrap()
    }

    #[test]
    fn test_hero_welcome() {
        let mut app = app();
        assert_eq!(app.hero.age, 31);
        assert!(app.hero.confetti.is_active());

        app.advance(CONFETTI_DURATION);
        assert!(!app.hero.confetti.is_active());
        assert_eq!(app.elapsed(), CONFETTI_DURATION);
    }

    #[test]
    fn test_section_navigation_wraps() {
        let mut app = app();
        app.apply(Action::PrevSection);
        assert_eq!(app.section, Section::Gift);
        app.apply(Action::NextSection);
        assert_eq!(app.section, Section::Hero);

        app.apply(Action::Activate);
        assert_eq!(app.section, Section::Gallery);
        app.apply(Action::GoTo(Section::Letter));
        assert_eq!(app.section, Section::Letter);
    }

    #[test]
    fn test_gallery_lightbox_flow() {
        let mut app = app();
        app.apply(Action::GoTo(Section::Gallery));
        app.apply(Action::Down);
        assert_eq!(app.gallery.selected(), GALLERY_COLUMNS);

        app.apply(Action::Activate);
        assert_eq!(app.mode, Mode::Lightbox);
        assert_eq!(app.gallery.current(), Some(3));

        app.apply(Action::Right);
        app.apply(Action::Like);
        assert!(app.gallery.is_liked(4));

        app.apply(Action::Swipe(-80));
        assert_eq!(app.gallery.current(), Some(3));

        // Help over the lightbox returns to it
        app.apply(Action::ToggleHelp);
        assert_eq!(app.mode, Mode::Help);
        app.apply(Action::Down);
        assert_eq!(app.mode, Mode::Lightbox);

        app.apply(Action::Back);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.gallery.selected(), 3);
    }

    #[test]
    fn test_letter_reveals_over_time() {
        let mut app = app();
        app.apply(Action::GoTo(Section::Letter));
        app.apply(Action::Activate);
        assert_eq!(app.letter.stage(), LetterStage::Opening);

        app.advance(OPENING_DELAY);
        assert_eq!(app.letter.stage(), LetterStage::Typing);

        app.advance(OPENING_DELAY + Duration::from_secs(1));
        assert_eq!(app.letter.stage(), LetterStage::Typing);
        assert!(!app.letter.paragraphs().is_empty());

        // Long enough for every unit even with punctuation pauses
        app.advance(Duration::from_secs(600));
        assert_eq!(app.letter.stage(), LetterStage::Revealed);
        assert_eq!(app.letter.paragraphs().len(), 5);
        assert!(app.status_message.as_deref().unwrap_or("").contains("John"));
        assert_eq!(app.timers.pending_count(), 0);
    }

    #[test]
    fn test_letter_back_and_restart() {
        let mut app = app();
        app.apply(Action::GoTo(Section::Letter));
        app.apply(Action::RestartLetter);
        assert_eq!(app.letter.stage(), LetterStage::Opening);

        app.apply(Action::Back);
        assert_eq!(app.letter.stage(), LetterStage::Sealed);
        // only the hero confetti remains
        assert_eq!(app.timers.pending_count(), 1);
    }

    #[test]
    fn test_gift_unwrap() {
        let mut app = app();
        app.apply(Action::GoTo(Section::Gift));
        app.apply(Action::Activate);

        assert_eq!(app.gift.stage, GiftStage::Unwrapped);
        assert!(app.gift.confetti.is_active());
        assert!(app.status_message.as_deref().unwrap_or("").contains("Paris"));

        app.advance(CONFETTI_DURATION);
        assert!(!app.gift.confetti.is_active());
    }

    #[test]
    fn test_any_key_closes_help() {
        let mut app = app();
        app.apply(Action::ToggleHelp);
        app.apply(Action::Quit);
        assert!(app.running);
        assert_eq!(app.mode, Mode::Normal);

        app.apply(Action::Quit);
        assert!(!app.running);
    }

    #[test]
    fn test_extreme_settings_do_not_overflow() {
        let content = CardContent {
            letter: "<p>Hi, you</p>".to_string(),
            ..CardContent::default()
        };
        let settings = Settings {
            interval: Duration::from_millis(10_000_000_000_000),
            pacing: Pacing {
                punctuation_factor: u32::MAX,
            },
        };
        let today = NaiveDate::from_ymd_opt(2026, 4, 15).unwrap();
        let mut app = App::new(content, settings, today).unwrap();

        app.apply(Action::GoTo(Section::Letter));
        app.apply(Action::Activate);
        while let Some(deadline) = app.timers.next_deadline() {
            app.advance(deadline);
        }
        assert_eq!(app.letter.stage(), LetterStage::Revealed);
        assert_eq!(app.letter.paragraphs()[0].text(), "Hi, you");
    }
}

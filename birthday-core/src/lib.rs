//! Birthday Core - Platform-agnostic state for the animated birthday card
//!
//! This crate provides the typewriter reveal engine, timers and section
//! state behind the birthday card. It's designed to work both in native CLI
//! and WASM environments.

pub mod actions;
pub mod app;
pub mod error;
pub mod gallery;
pub mod gift;
pub mod hero;
pub mod letter;
pub mod model;
pub mod particles;
pub mod reveal;
pub mod theme;
pub mod timeline;
pub mod timer;

pub use actions::Action;
pub use app::{App, Mode, Section, Settings};
pub use error::{CardError, Result};
pub use letter::LetterStage;
pub use model::{CardContent, Milestone, Photo};
pub use reveal::{Pacing, RevealSource, RevealState, RevealedParagraph, Segment, TickOutcome, Typewriter};
pub use theme::{Rgb, Theme};
pub use timer::{Scheduler, TimerId, TimerQueue};

//! Typewriter text reveal
//!
//! A [`RevealSource`] is disclosed one unit per tick by a [`Typewriter`]
//! session. Rendering goes through [`RevealedParagraph`] segments, never raw
//! markup.

mod engine;
mod source;

pub use engine::{CompletionCallback, Pacing, RevealState, TickOutcome, Typewriter};
pub use source::{RevealSource, RevealedParagraph, Segment};

//! Error types for birthday-core

use thiserror::Error;

/// Errors that can occur while building or driving the card
#[derive(Error, Debug)]
pub enum CardError {
    /// The typewriter cadence must be a positive duration
    #[error("reveal interval must be greater than zero")]
    ZeroInterval,

    /// Failed to read a content file
    #[error("failed to read card content: {0}")]
    ContentIo(#[from] std::io::Error),

    /// Content file is not valid card JSON
    #[error("failed to parse card content: {0}")]
    ContentParse(#[from] serde_json::Error),

    /// A color string is not `#RRGGBB`
    #[error("invalid color {0:?}, expected #RRGGBB")]
    InvalidColor(String),
}

/// Result type for birthday-core operations
pub type Result<T> = std::result::Result<T, CardError>;

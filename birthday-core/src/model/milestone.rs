use serde::{Deserialize, Serialize};

use crate::theme::Rgb;

/// A dated moment on the relationship timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Free-form label, e.g. "15 June 2022" or "Today"
    pub date: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub color: Rgb,
}

impl Milestone {
    pub fn new(date: &str, title: &str, description: &str, location: &str, color: Rgb) -> Self {
        Self {
            date: date.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            location: location.to_string(),
            color,
        }
    }
}

use serde::{Deserialize, Serialize};

/// A gallery entry. Images are not loaded; photos are shown by caption.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Photo {
    /// Path or URL of the picture, kept for reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    pub caption: String,
    pub location: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl Photo {
    pub fn new(caption: &str, location: &str) -> Self {
        Self {
            src: None,
            caption: caption.to_string(),
            location: location.to_string(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}

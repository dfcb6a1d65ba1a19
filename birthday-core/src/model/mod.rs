mod content;
mod milestone;
mod photo;

pub use content::CardContent;
pub use milestone::Milestone;
pub use photo::Photo;

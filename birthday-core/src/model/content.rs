use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Milestone, Photo};
use crate::error::Result;
use crate::theme::{Rgb, Theme};

/// Everything personal on the card. Missing JSON fields fall back to the
/// built-in sample card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardContent {
    pub recipient: String,
    pub sender: String,
    pub birth_date: NaiveDate,
    /// Letter body with `<p>` paragraphs and optional
    /// `<span class="highlight">` emphasis
    pub letter: String,
    pub signature: String,
    pub photos: Vec<Photo>,
    pub milestones: Vec<Milestone>,
    pub gift: String,
    pub theme: Theme,
}

impl CardContent {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read card content from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

const SAMPLE_LETTER: &str = r#"<p>My perfect love,</p><p>Today,
   as you celebrate another year of your <span class="highlight">beautiful life</span>,
   I want to tell you how much joy and happiness living with you brings me.
     You inspire me to be a better person with your kindness, your strength, your wit
     and the way you see the world.
     </p><p>On this special day, I want you to know that I cherish every moment we share,
      from our adventures to our quiet evenings at home.
      </p><p>I promise to keep loving you, to keep making you laugh and to be your partner in life.
       You deserve nothing but <span class="highlight">happiness</span>, and I will do everything
       I can to bring you some every single day.
       </p><p>Happy birthday, my love.</p>"#;

impl Default for CardContent {
    fn default() -> Self {
        let theme = Theme::default();

        Self {
            recipient: "Emma".to_string(),
            sender: "John".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1995, 4, 15).unwrap_or(NaiveDate::MIN),
            letter: SAMPLE_LETTER.to_string(),
            signature: "Forever yours".to_string(),
            photos: vec![
                Photo::new("Simply stunning", "The big cove"),
                Photo::new("Funny since forever", "A quick snap")
                    .with_description("A truly unbeatable sense of humour"),
                Photo::new("To our old days in Nantes", "Nantes"),
                Photo::new("To our endless complicity", "Cagnes-sur-Mer"),
                Photo::new("What a glow up", "La Corniche"),
                Photo::new("Your smile lights up my life", "Cagnes-sur-Mer"),
                Photo::new("Gorgeous as always", "Fréjus"),
                Photo::new("To our wonderful memories", "La Mala"),
            ],
            milestones: vec![
                Milestone::new(
                    "15 June 2022",
                    "When We First Met",
                    "A little first date that turned into everything",
                    "Saint-Laurent",
                    theme.primary,
                ),
                Milestone::new(
                    "30 August 2022",
                    "Our First Trip Together",
                    "A trip to Copenhagen, already sure you were the one",
                    "Copenhagen",
                    theme.secondary,
                ),
                Milestone::new(
                    "25 December 2022",
                    "Moving to Nantes",
                    "Our first flat together, so far from the south",
                    "Nantes",
                    theme.accent1,
                ),
                Milestone::new(
                    "14 February 2023",
                    "Welcoming the Little One",
                    "Adopting Francisco, first of his name",
                    "Nantes",
                    theme.accent2,
                ),
                Milestone::new(
                    "Today",
                    "Another Year of Loving You",
                    "Another year of making beautiful memories together. \
                     I fall more in love with you every day.",
                    "Everywhere",
                    Rgb(0xFF, 0xD5, 0x4F),
                ),
            ],
            gift: "Weekend getaway to Paris".to_string(),
            theme,
        }
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CardError;

/// 24-bit color, serialized as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Linear blend towards `other`, `t` clamped to 0..=1
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

impl FromStr for Rgb {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CardError::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = CardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Shared page palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Theme {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent1: Rgb,
    pub accent2: Rgb,
    pub accent3: Rgb,
    pub background: Rgb,
    pub background_alt: Rgb,
    pub text: Rgb,
    pub light_text: Rgb,
    pub white: Rgb,
}

impl Theme {
    /// Color at `t` along the primary -> secondary gradient used for titles
    pub fn title_gradient(&self, t: f32) -> Rgb {
        self.primary.lerp(self.secondary, t)
    }

    /// Accent colors in display order, for cycling decorations
    pub fn accents(&self) -> [Rgb; 5] {
        [
            self.primary,
            self.secondary,
            self.accent1,
            self.accent2,
            self.accent3,
        ]
    }
}

impl Default for Theme {
    // Sunny palette
    fn default() -> Self {
        Self {
            primary: Rgb(0xFF, 0xD5, 0x4F),
            secondary: Rgb(0xFF, 0x98, 0x00),
            accent1: Rgb(0x4C, 0xAF, 0x50),
            accent2: Rgb(0x21, 0x96, 0xF3),
            accent3: Rgb(0xE9, 0x1E, 0x63),
            background: Rgb(0xFF, 0xFD, 0xE7),
            background_alt: Rgb(0xFF, 0xF9, 0xC4),
            text: Rgb(0x37, 0x47, 0x4F),
            light_text: Rgb(0x60, 0x7D, 0x8B),
            white: Rgb(0xFF, 0xFF, 0xFF),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!("#FFD54F".parse::<Rgb>().unwrap(), Rgb(255, 213, 79));
        assert_eq!("#ff9800".parse::<Rgb>().unwrap(), Rgb(255, 152, 0));
        assert_eq!(Rgb(33, 150, 243).to_string(), "#2196F3");

        for bad in ["FFD54F", "#FFD54", "#GGGGGG", "#ééé"] {
            assert!(matches!(bad.parse::<Rgb>(), Err(CardError::InvalidColor(_))), "{bad}");
        }
    }

    #[test]
    fn test_gradient_endpoints() {
        let theme = Theme::default();
        assert_eq!(theme.title_gradient(0.0), theme.primary);
        assert_eq!(theme.title_gradient(1.0), theme.secondary);
        assert_eq!(theme.title_gradient(7.0), theme.secondary);
    }

    #[test]
    fn test_partial_theme_json() {
        let theme: Theme = serde_json::from_str(r##"{"accent3": "#000000"}"##).unwrap();
        assert_eq!(theme.accent3, Rgb(0, 0, 0));
        assert_eq!(theme.primary, Theme::default().primary);
    }
}

//! Platform-agnostic user intents. Front ends map their key events here.

use crate::app::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleHelp,
    NextSection,
    PrevSection,
    GoTo(Section),
    Up,
    Down,
    Left,
    Right,
    /// Open the photo, the letter or the gift depending on the section
    Activate,
    /// Close whatever overlay is open
    Back,
    Like,
    RestartLetter,
    /// Drag in the lightbox by this many cells/pixels
    Swipe(i32),
}

impl Action {
    /// Map a typed character shared by every front end
    pub fn from_char(c: char) -> Option<Action> {
        let action = match c {
            'q' => Action::Quit,
            '?' => Action::ToggleHelp,
            'j' => Action::Down,
            'k' => Action::Up,
            'h' => Action::Left,
            'l' => Action::Right,
            ' ' => Action::Like,
            'r' => Action::RestartLetter,
            'o' => Action::Activate,
            c => {
                let index = c.to_digit(10)?.checked_sub(1)?;
                Action::GoTo(*Section::all().get(index as usize)?)
            }
        };
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_mapping() {
        assert_eq!(Action::from_char('j'), Some(Action::Down));
        assert_eq!(Action::from_char('1'), Some(Action::GoTo(Section::Hero)));
        assert_eq!(Action::from_char('5'), Some(Action::GoTo(Section::Gift)));
        assert_eq!(Action::from_char('0'), None);
        assert_eq!(Action::from_char('6'), None);
        assert_eq!(Action::from_char('z'), None);
    }
}

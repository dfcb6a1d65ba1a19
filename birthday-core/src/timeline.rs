/// Badge drawn next to a milestone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilestoneIcon {
    Calendar,
    Star,
    Sun,
    Heart,
}

impl MilestoneIcon {
    const CYCLE: [MilestoneIcon; 6] = [
        MilestoneIcon::Calendar,
        MilestoneIcon::Star,
        MilestoneIcon::Sun,
        MilestoneIcon::Heart,
        MilestoneIcon::Star,
        MilestoneIcon::Heart,
    ];

    /// Icon for the milestone at `index`
    pub fn for_index(index: usize) -> Self {
        Self::CYCLE[index % Self::CYCLE.len()]
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            MilestoneIcon::Calendar => "📅",
            MilestoneIcon::Star => "⭐",
            MilestoneIcon::Sun => "🌞",
            MilestoneIcon::Heart => "💖",
        }
    }
}

/// Selection within the milestone list
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    len: usize,
    selected: usize,
}

impl Timeline {
    pub fn new(len: usize) -> Self {
        Self { len, selected: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn next(&mut self) {
        if self.selected + 1 < self.len {
            self.selected += 1;
        }
    }

    pub fn prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_cycle() {
        assert_eq!(MilestoneIcon::for_index(0), MilestoneIcon::Calendar);
        assert_eq!(MilestoneIcon::for_index(2), MilestoneIcon::Sun);
        assert_eq!(MilestoneIcon::for_index(5), MilestoneIcon::Heart);
        assert_eq!(MilestoneIcon::for_index(7), MilestoneIcon::Star);
    }

    #[test]
    fn test_selection_clamps() {
        let mut timeline = Timeline::new(2);
        timeline.prev();
        assert_eq!(timeline.selected(), 0);
        timeline.next();
        timeline.next();
        assert_eq!(timeline.selected(), 1);

        let mut empty = Timeline::new(0);
        empty.next();
        assert_eq!(empty.selected(), 0);
    }
}

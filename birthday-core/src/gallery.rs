use std::collections::BTreeSet;

/// Minimum drag distance that counts as a swipe
pub const SWIPE_THRESHOLD: f32 = 50.0;

/// Photo grid selection plus the lightbox viewer
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    len: usize,
    selected: usize,
    lightbox: Option<usize>,
    liked: BTreeSet<usize>,
}

impl Gallery {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Selected photo in the grid
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        self.move_selection(1);
    }

    pub fn select_prev(&mut self) {
        self.move_selection(-1);
    }

    /// Move the grid selection, clamping at both ends
    pub fn move_selection(&mut self, delta: isize) {
        if self.len == 0 {
            return;
        }
        let target = self.selected as isize + delta;
        self.selected = target.clamp(0, self.len as isize - 1) as usize;
    }

    /// Open the lightbox on the selected photo
    pub fn open(&mut self) -> bool {
        if self.len == 0 {
            return false;
        }
        self.lightbox = Some(self.selected);
        true
    }

    /// Close the lightbox, leaving the grid on the last viewed photo
    pub fn close(&mut self) {
        if let Some(index) = self.lightbox.take() {
            self.selected = index;
        }
    }

    pub fn is_open(&self) -> bool {
        self.lightbox.is_some()
    }

    /// Photo shown in the lightbox
    pub fn current(&self) -> Option<usize> {
        self.lightbox
    }

    pub fn next(&mut self) {
        if let Some(index) = self.lightbox.as_mut() {
            *index = if *index + 1 >= self.len { 0 } else { *index + 1 };
        }
    }

    pub fn prev(&mut self) {
        if let Some(index) = self.lightbox.as_mut() {
            *index = if *index == 0 { self.len - 1 } else { *index - 1 };
        }
    }

    /// Horizontal drag in the lightbox. A positive offset shows the next
    /// photo. Returns true if the drag was long enough.
    pub fn swipe(&mut self, offset: f32) -> bool {
        if offset.abs() <= SWIPE_THRESHOLD || !self.is_open() {
            return false;
        }
        if offset > 0.0 {
            self.next();
        } else {
            self.prev();
        }
        true
    }

    /// Toggle the like on `index`, returning the new state
    pub fn toggle_like(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        if !self.liked.remove(&index) {
            self.liked.insert(index);
            return true;
        }
        false
    }

    pub fn is_liked(&self, index: usize) -> bool {
        self.liked.contains(&index)
    }

    pub fn liked_count(&self) -> usize {
        self.liked.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_selection_clamps() {
        let mut gallery = Gallery::new(3);
        gallery.select_prev();
        assert_eq!(gallery.selected(), 0);

        gallery.move_selection(10);
        assert_eq!(gallery.selected(), 2);
        gallery.select_next();
        assert_eq!(gallery.selected(), 2);
    }

    #[test]
    fn test_lightbox_wraps() {
        let mut gallery = Gallery::new(3);
        gallery.move_selection(2);
        assert!(gallery.open());
        assert_eq!(gallery.current(), Some(2));

        gallery.next();
        assert_eq!(gallery.current(), Some(0));
        gallery.prev();
        gallery.prev();
        assert_eq!(gallery.current(), Some(1));

        gallery.close();
        assert!(!gallery.is_open());
        assert_eq!(gallery.selected(), 1);
    }

    #[test]
    fn test_swipe_threshold() {
        let mut gallery = Gallery::new(4);
        assert!(!gallery.swipe(80.0), "closed lightbox ignores swipes");

        gallery.open();
        assert!(!gallery.swipe(50.0));
        assert_eq!(gallery.current(), Some(0));

        assert!(gallery.swipe(51.0));
        assert_eq!(gallery.current(), Some(1));
        assert!(gallery.swipe(-120.0));
        assert_eq!(gallery.current(), Some(0));
    }

    #[test]
    fn test_likes() {
        let mut gallery = Gallery::new(2);
        assert!(gallery.toggle_like(1));
        assert!(gallery.is_liked(1));
        assert_eq!(gallery.liked_count(), 1);

        assert!(!gallery.toggle_like(1));
        assert!(!gallery.is_liked(1));
        assert!(!gallery.toggle_like(5));
    }

    #[test]
    fn test_empty_gallery() {
        let mut gallery = Gallery::new(0);
        assert!(!gallery.open());
        gallery.next();
        gallery.select_next();
        assert_eq!(gallery.current(), None);
        assert_eq!(gallery.selected(), 0);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollAction {
    LineUp,
    LineDown,
    PageUp(usize),
    PageDown(usize),
    Home,
    End,
}

/// Vertical offset of the body pane. While following, the offset eases toward
/// the bottom; manual scrolling stops following until the bottom is reached
/// again or new output arrives.
#[derive(Debug, Clone)]
pub struct ScrollState {
    offset: usize,
    following: bool,
    smooth: bool,
    content_rows: usize,
    viewport_rows: usize,
}

impl ScrollState {
    pub fn new(smooth: bool) -> Self {
        Self {
            offset: 0,
            following: true,
            smooth,
            content_rows: 0,
            viewport_rows: 0,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_following(&self) -> bool {
        self.following
    }

    pub fn max_offset(&self) -> usize {
        self.content_rows.saturating_sub(self.viewport_rows)
    }

    /// Records the latest geometry from the renderer.
    pub fn set_extent(&mut self, content_rows: usize, viewport_rows: usize) {
        self.content_rows = content_rows;
        self.viewport_rows = viewport_rows;
        self.offset = self.offset.min(self.max_offset());
        if self.following && !self.smooth {
            self.offset = self.max_offset();
        }
    }

    /// Called after every scrollback mutation.
    pub fn follow(&mut self) {
        self.following = true;
        if !self.smooth {
            self.offset = self.max_offset();
        }
    }

    /// One animation step toward the bottom. Returns true when the offset moved.
    pub fn step(&mut self) -> bool {
        if !self.following {
            return false;
        }
        let target = self.max_offset();
        if self.offset == target {
            return false;
        }
        if self.offset > target {
            self.offset = target;
            return true;
        }
        let remaining = target - self.offset;
        self.offset += remaining.div_ceil(2).max(1);
        true
    }

    pub fn apply(&mut self, action: ScrollAction) {
        let max = self.max_offset();
        self.offset = match action {
            ScrollAction::LineUp => self.offset.saturating_sub(1),
            ScrollAction::LineDown => self.offset.saturating_add(1).min(max),
            ScrollAction::PageUp(rows) => self.offset.saturating_sub(rows),
            ScrollAction::PageDown(rows) => self.offset.saturating_add(rows).min(max),
            ScrollAction::Home => 0,
            ScrollAction::End => max,
        };
        self.following = self.offset >= max;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_follow_eases_to_bottom() {
        let mut scroll = ScrollState::new(true);
        scroll.set_extent(30, 10);
        assert_eq!(scroll.offset(), 0);

        let mut steps = 0;
        while scroll.step() {
            steps += 1;
        }
        assert_eq!(scroll.offset(), 20);
        assert!(steps > 1, "smooth scrolling takes more than one step");
    }

    #[test]
    fn test_instant_follow_jumps() {
        let mut scroll = ScrollState::new(false);
        scroll.set_extent(30, 10);
        assert_eq!(scroll.offset(), 20);
        scroll.set_extent(35, 10);
        assert_eq!(scroll.offset(), 25);
    }

    #[test]
    fn test_manual_scroll_stops_following_until_bottom() {
        let mut scroll = ScrollState::new(false);
        scroll.set_extent(30, 10);
        scroll.apply(ScrollAction::PageUp(5));
        assert_eq!(scroll.offset(), 15);
        assert!(!scroll.is_following());

        scroll.set_extent(40, 10);
        assert_eq!(scroll.offset(), 15);
        assert!(!scroll.step());

        scroll.apply(ScrollAction::End);
        assert!(scroll.is_following());
        assert_eq!(scroll.offset(), 30);
    }

    #[test]
    fn test_follow_resumes_after_new_output() {
        let mut scroll = ScrollState::new(false);
        scroll.set_extent(30, 10);
        scroll.apply(ScrollAction::Home);
        scroll.follow();
        assert!(scroll.is_following());
        assert_eq!(scroll.offset(), 20);
    }

    #[test]
    fn test_shrinking_content_clamps_offset() {
        let mut scroll = ScrollState::new(true);
        scroll.set_extent(30, 10);
        while scroll.step() {}
        scroll.set_extent(5, 10);
        assert_eq!(scroll.offset(), 0);
    }
}

// Scroll state for list-like views
//
// The dropdown shows a window of rows. The window follows the highlighted
// row: moving the selection past either edge scrolls just enough to reveal it.

/// Scroll state for a single list
///
/// Owns position, content size and viewport size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollState {
    /// Index of the first visible item
    offset: usize,

    /// Total number of items
    total: usize,

    /// Number of items visible in the viewport
    viewport: usize,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update content and viewport dimensions, clamping the offset
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Scroll the minimum amount needed to make `index` visible
    pub fn reveal(&mut self, index: usize) {
        if self.viewport == 0 {
            self.offset = 0;
            return;
        }
        if index < self.offset {
            self.offset = index;
        } else if index >= self.offset + self.viewport {
            self.offset = index + 1 - self.viewport;
        }
        self.offset = self.offset.min(self.max_offset());
    }

    /// Scroll up by one item
    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    /// Scroll down by one item
    pub fn scroll_down(&mut self) {
        if self.offset < self.max_offset() {
            self.offset += 1;
        }
    }

    /// Jump to top
    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    /// Jump to bottom
    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Get current scroll offset
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Get visible range (start_index, end_index)
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset;
        let end = (self.offset + self.viewport).min(self.total);
        (start, end)
    }

    /// Check if content overflows viewport (scrollbar needed)
    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    /// Maximum valid offset
    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_scrolls_down_minimally() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);

        scroll.reveal(4);
        assert_eq!(scroll.offset(), 0);

        scroll.reveal(5);
        assert_eq!(scroll.offset(), 1);

        scroll.reveal(12);
        assert_eq!(scroll.visible_range(), (8, 13));
    }

    #[test]
    fn test_reveal_scrolls_up() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);
        scroll.scroll_to_bottom();
        assert_eq!(scroll.offset(), 15);

        scroll.reveal(3);
        assert_eq!(scroll.offset(), 3);
    }

    #[test]
    fn test_shrinking_content_clamps_offset() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);
        scroll.scroll_to_bottom();

        scroll.update_dimensions(3, 5);
        assert_eq!(scroll.offset(), 0);
        assert!(!scroll.needs_scrollbar());
    }

    #[test]
    fn test_zero_viewport() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(10, 0);
        scroll.reveal(7);
        assert_eq!(scroll.offset(), 0);
        assert_eq!(scroll.visible_range(), (0, 0));
    }

    #[test]
    fn test_scroll_bounds() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(6, 4);
        scroll.scroll_up();
        assert_eq!(scroll.offset(), 0);
        scroll.scroll_down();
        scroll.scroll_down();
        scroll.scroll_down();
        assert_eq!(scroll.offset(), 2);
        scroll.scroll_to_top();
        assert_eq!(scroll.offset(), 0);
    }
}

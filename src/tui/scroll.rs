// Scroll state for list panels
//
// Each panel owns one of these. Auto-follow keeps the newest entries in view
// while the stream is running; any upward movement hands control to the user
// until they return to the bottom.

#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Index of the first visible item
    offset: usize,

    /// Total number of items
    total: usize,

    /// Number of items visible in viewport
    viewport: usize,

    /// Keep the view pinned to the newest item
    pub auto_follow: bool,
}

impl ScrollState {
    /// Create new scroll state with auto-follow enabled
    pub fn new() -> Self {
        Self {
            offset: 0,
            total: 0,
            viewport: 0,
            auto_follow: true,
        }
    }

    /// Update content and viewport dimensions
    /// Call this each render frame with current sizes
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;

        if self.auto_follow {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    pub fn page_up(&mut self) {
        let page = self.viewport.max(1);
        self.offset = self.offset.saturating_sub(page);
        self.auto_follow = false;
    }

    pub fn page_down(&mut self) {
        let page = self.viewport.max(1);
        self.offset = (self.offset + page).min(self.max_offset());

        if self.offset >= self.max_offset() {
            self.auto_follow = true;
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
        self.auto_follow = false;
    }

    /// Jump to bottom (and enable auto-follow)
    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
        self.auto_follow = true;
    }

    /// Keep `index` inside the viewport, moving as little as possible
    pub fn reveal(&mut self, index: usize) {
        if index < self.offset {
            self.offset = index;
        } else if self.viewport > 0 && index >= self.offset + self.viewport {
            self.offset = index + 1 - self.viewport;
        }
        self.auto_follow = self.offset >= self.max_offset();
    }

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

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

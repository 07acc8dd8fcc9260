//! Header/footer visibility driven by scroll position.

/// The header always shows within this many pixels of the top.
pub const HEADER_REVEAL_OFFSET: f64 = 50.0;

/// The footer shows within this many pixels of the bottom.
pub const FOOTER_REVEAL_DISTANCE: f64 = 100.0;

/// Scroll position and page size, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

#[derive(Debug, Clone)]
pub struct ScrollTracker {
    last_y: f64,
    header_visible: bool,
    footer_visible: bool,
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self {
            last_y: 0.0,
            header_visible: true,
            footer_visible: false,
        }
    }
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a scroll event and update visibility.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) {
        let y = metrics.scroll_y;
        let scrolling_up = y < self.last_y;

        self.header_visible = scrolling_up || y < HEADER_REVEAL_OFFSET;
        self.footer_visible =
            metrics.viewport_height + y >= metrics.document_height - FOOTER_REVEAL_DISTANCE;
        self.last_y = y;
    }

    pub fn header_visible(&self) -> bool {
        self.header_visible
    }

    pub fn footer_visible(&self) -> bool {
        self.footer_visible
    }
}

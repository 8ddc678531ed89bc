/// Rows of slack when deciding whether content sits at an edge.
pub const EDGE_TOLERANCE: u16 = 0;

/// Snapshot of a slide's internal scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollMetrics {
    pub offset: u16,
    pub content_height: u16,
    pub viewport_height: u16,
}

impl ScrollMetrics {
    pub fn has_no_scroll(&self) -> bool {
        self.content_height <= self.viewport_height
    }

    pub fn is_at_top(&self) -> bool {
        self.offset <= EDGE_TOLERANCE
    }

    pub fn is_at_bottom(&self) -> bool {
        self.offset as u32 + self.viewport_height as u32
            >= self.content_height.saturating_sub(EDGE_TOLERANCE) as u32
    }
}

/// Which slide-change directions the current slide's content allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanNavigate {
    pub up: bool,
    pub down: bool,
}

impl Default for CanNavigate {
    fn default() -> Self {
        Self {
            up: true,
            down: true,
        }
    }
}

impl From<ScrollMetrics> for CanNavigate {
    fn from(m: ScrollMetrics) -> Self {
        let no_scroll = m.has_no_scroll();
        Self {
            up: m.is_at_top() || no_scroll,
            down: m.is_at_bottom() || no_scroll,
        }
    }
}

/// Internal scroll state of the visible slide.
#[derive(Debug, Clone, Default)]
pub struct SlideViewport {
    offset: u16,
    content_height: u16,
    viewport_height: u16,
}

impl SlideViewport {
    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            offset: self.offset,
            content_height: self.content_height,
            viewport_height: self.viewport_height,
        }
    }

    pub fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Record new content/viewport sizes, keeping the offset in range.
    pub fn measure(&mut self, content_height: u16, viewport_height: u16) {
        self.content_height = content_height;
        self.viewport_height = viewport_height;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Scroll by `lines` (negative is up). Returns true if the offset moved.
    pub fn scroll_by(&mut self, lines: i32) -> bool {
        let target = (self.offset as i32 + lines).clamp(0, self.max_offset() as i32) as u16;
        let moved = target != self.offset;
        self.offset = target;
        moved
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_content_allows_both_directions() {
        let m = ScrollMetrics {
            offset: 0,
            content_height: 10,
            viewport_height: 20,
        };
        assert_eq!(CanNavigate::from(m), CanNavigate { up: true, down: true });
    }

    #[test]
    fn overflowing_content_at_top() {
        let m = ScrollMetrics {
            offset: 0,
            content_height: 40,
            viewport_height: 20,
        };
        assert_eq!(
            CanNavigate::from(m),
            CanNavigate {
                up: true,
                down: false
            }
        );
    }

    #[test]
    fn overflowing_content_in_the_middle() {
        let m = ScrollMetrics {
            offset: 5,
            content_height: 40,
            viewport_height: 20,
        };
        assert_eq!(
            CanNavigate::from(m),
            CanNavigate {
                up: false,
                down: false
            }
        );
    }

    #[test]
    fn overflowing_content_at_bottom() {
        let m = ScrollMetrics {
            offset: 20,
            content_height: 40,
            viewport_height: 20,
        };
        assert_eq!(
            CanNavigate::from(m),
            CanNavigate {
                up: false,
                down: true
            }
        );
    }

    #[test]
    fn viewport_clamps_scrolling() {
        let mut vp = SlideViewport::default();
        vp.measure(30, 10);
        assert!(!vp.scroll_by(-1));
        assert!(vp.scroll_by(5));
        assert_eq!(vp.offset(), 5);
        assert!(vp.scroll_by(100));
        assert_eq!(vp.offset(), 20);
        assert!(!vp.scroll_by(1));
        vp.reset();
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn remeasure_keeps_offset_in_range() {
        let mut vp = SlideViewport::default();
        vp.measure(30, 10);
        vp.scroll_to_bottom();
        assert_eq!(vp.offset(), 20);
        vp.measure(30, 25);
        assert_eq!(vp.offset(), 5);
    }
}

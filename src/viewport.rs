//! Geometry of the scroll container and the landmark track.
//!
//! The controller never measures anything itself; it asks a [`Viewport`]
//! where matches sit and tells it where to scroll. [`LineViewport`] is a
//! fixed line-height layout used headlessly by the CLI and the tests.

use crate::content::ContentRoot;

/// Vertical extent of a rendered match, relative to the visible viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top edge in pixels (negative when scrolled past)
    pub top: f32,
    /// Bottom edge in pixels
    pub bottom: f32,
}

impl Rect {
    /// Height of the rectangle.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Read-mostly view of the scroll container hosting the content.
pub trait Viewport {
    /// Current vertical scroll offset.
    fn scroll_top(&self) -> f32;

    /// Total scrollable height of the content.
    fn scroll_height(&self) -> f32;

    /// Pixel height of the landmark track.
    fn track_height(&self) -> f32;

    /// Viewport-relative rectangle of the N-th match in document order.
    fn match_rect(&self, index: usize) -> Option<Rect>;

    /// Scroll so that `y` becomes the top of the viewport.
    fn scroll_to(&mut self, y: f32);

    /// Called after the content root has been replaced, so the renderer can
    /// lay out the new tree.
    fn content_changed(&mut self, _root: &ContentRoot) {}
}

/// Layout where every top-level node occupies one line of fixed height.
#[derive(Debug, Clone, PartialEq)]
pub struct LineViewport {
    line_height: f32,
    viewport_height: f32,
    track_height: f32,
    scroll_top: f32,
    line_count: usize,
    /// Line number of each match in document order
    match_lines: Vec<usize>,
}

impl LineViewport {
    /// Create a layout with the given line, viewport and track heights.
    pub fn new(line_height: f32, viewport_height: f32, track_height: f32) -> Self {
        Self {
            line_height,
            viewport_height,
            track_height,
            scroll_top: 0.0,
            line_count: 0,
            match_lines: Vec::new(),
        }
    }

    /// Change the visible height, as a window resize would.
    pub fn resize(&mut self, viewport_height: f32, track_height: f32) {
        self.viewport_height = viewport_height;
        self.track_height = track_height;
        self.scroll_to(self.scroll_top);
    }

    fn max_scroll(&self) -> f32 {
        (self.scroll_height() - self.viewport_height).max(0.0)
    }
}

impl Viewport for LineViewport {
    fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    fn scroll_height(&self) -> f32 {
        (self.line_count as f32 * self.line_height).max(self.viewport_height)
    }

    fn track_height(&self) -> f32 {
        self.track_height
    }

    fn match_rect(&self, index: usize) -> Option<Rect> {
        let line = *self.match_lines.get(index)?;
        let top = line as f32 * self.line_height - self.scroll_top;
        Some(Rect {
            top,
            bottom: top + self.line_height,
        })
    }

    fn scroll_to(&mut self, y: f32) {
        self.scroll_top = y.clamp(0.0, self.max_scroll());
    }

    fn content_changed(&mut self, root: &ContentRoot) {
        self.line_count = root.children().len();
        self.match_lines = root
            .children()
            .iter()
            .enumerate()
            .flat_map(|(line, node)| std::iter::repeat_n(line, node.match_count()))
            .collect();
        self.scroll_to(self.scroll_top);
    }
}

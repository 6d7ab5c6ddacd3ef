//! Scroll tracking
//!
//! Scroll progress is measured between two offsets, each pairing an edge of
//! the tracked element with an edge of the viewport. `"start end"` means
//! "the element's top meets the viewport's bottom":
//!
//! ```rust
//! use kinetic_core::Rect;
//! use kinetic_layout::{ScrollOffset, ScrollRange};
//!
//! let section = Rect::new(0.0, 1000.0, 800.0, 400.0);
//! let range = ScrollRange::resolve(
//!     "start end".parse::<ScrollOffset>().unwrap(),
//!     "end end".parse::<ScrollOffset>().unwrap(),
//!     section,
//!     800.0,
//! );
//! assert_eq!(range.start_y(), 200.0);
//! assert_eq!(range.end_y(), 600.0);
//! assert_eq!(range.progress(400.0), 0.5);
//! ```

use std::str::FromStr;

use kinetic_core::{Rect, Size};

use crate::error::{LayoutError, Result};

/// A position along an element or the viewport
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edge {
    /// Fraction of the length (`start` = 0, `center` = 0.5, `end` = 1)
    Fraction(f32),
    /// Absolute distance from the start
    Pixels(f32),
}

impl Edge {
    pub const START: Edge = Edge::Fraction(0.0);
    pub const CENTER: Edge = Edge::Fraction(0.5);
    pub const END: Edge = Edge::Fraction(1.0);

    /// Distance from the start of something `length` pixels long
    pub fn resolve(self, length: f32) -> f32 {
        match self {
            Edge::Fraction(f) => f * length,
            Edge::Pixels(px) => px,
        }
    }

    fn parse(token: &str) -> Option<Edge> {
        match token {
            "start" => return Some(Edge::START),
            "center" => return Some(Edge::CENTER),
            "end" => return Some(Edge::END),
            _ => {}
        }
        if let Some(pct) = token.strip_suffix('%') {
            return pct.parse::<f32>().ok().map(|v| Edge::Fraction(v / 100.0));
        }
        if let Some(px) = token.strip_suffix("px") {
            return px.parse::<f32>().ok().map(Edge::Pixels);
        }
        token.parse::<f32>().ok().map(Edge::Fraction)
    }
}

/// Where an element edge meets a viewport edge
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollOffset {
    pub element: Edge,
    pub viewport: Edge,
}

impl ScrollOffset {
    /// Element top at viewport top
    pub const START_START: ScrollOffset = ScrollOffset::new(Edge::START, Edge::START);
    /// Element top at viewport bottom
    pub const START_END: ScrollOffset = ScrollOffset::new(Edge::START, Edge::END);
    /// Element bottom at viewport top
    pub const END_START: ScrollOffset = ScrollOffset::new(Edge::END, Edge::START);
    /// Element bottom at viewport bottom
    pub const END_END: ScrollOffset = ScrollOffset::new(Edge::END, Edge::END);

    pub const fn new(element: Edge, viewport: Edge) -> Self {
        Self { element, viewport }
    }

    /// Parse `"<element edge> <viewport edge>"`
    ///
    /// A single token names the element edge and pins it to the viewport's
    /// start.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || LayoutError::InvalidOffset(input.to_string());
        let mut tokens = input.split_whitespace();

        let element = tokens.next().and_then(Edge::parse).ok_or_else(invalid)?;
        let viewport = match tokens.next() {
            Some(token) => Edge::parse(token).ok_or_else(invalid)?,
            None => Edge::START,
        };
        if tokens.next().is_some() {
            return Err(invalid());
        }

        Ok(Self { element, viewport })
    }

    /// Scroll position at which this offset is reached
    pub fn scroll_y(&self, element: Rect, viewport_height: f32) -> f32 {
        element.y() + self.element.resolve(element.height()) - self.viewport.resolve(viewport_height)
    }
}

impl FromStr for ScrollOffset {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Scroll positions between which an element's progress runs from 0 to 1
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRange {
    start_y: f32,
    end_y: f32,
}

impl ScrollRange {
    pub fn new(start_y: f32, end_y: f32) -> Self {
        Self { start_y, end_y }
    }

    /// Resolve a pair of offsets against an element's document rectangle
    pub fn resolve(
        start: ScrollOffset,
        end: ScrollOffset,
        element: Rect,
        viewport_height: f32,
    ) -> Self {
        Self::new(
            start.scroll_y(element, viewport_height),
            end.scroll_y(element, viewport_height),
        )
    }

    pub fn start_y(&self) -> f32 {
        self.start_y
    }

    pub fn end_y(&self) -> f32 {
        self.end_y
    }

    /// Normalized, clamped position of `scroll_y` within the range
    pub fn progress(&self, scroll_y: f32) -> f32 {
        let span = self.end_y - self.start_y;
        if span.abs() <= f32::EPSILON {
            return if scroll_y < self.start_y { 0.0 } else { 1.0 };
        }
        ((scroll_y - self.start_y) / span).clamp(0.0, 1.0)
    }
}

/// Whole-page scroll progress, 0 when the page does not scroll
pub fn page_progress(scroll_y: f32, document_height: f32, viewport_height: f32) -> f32 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_y / scrollable).clamp(0.0, 1.0)
}

/// Current page scroll position
#[derive(Clone, Debug)]
pub struct ScrollTracker {
    scroll_y: f32,
    document_height: f32,
    viewport: Size,
}

impl ScrollTracker {
    pub fn new(document_height: f32, viewport: Size) -> Self {
        Self {
            scroll_y: 0.0,
            document_height,
            viewport,
        }
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn document_height(&self) -> f32 {
        self.document_height
    }

    /// Furthest scroll position
    pub fn max_scroll(&self) -> f32 {
        (self.document_height - self.viewport.height).max(0.0)
    }

    /// Jump to a position, clamped to the scrollable range; returns the
    /// position actually reached
    ///
    /// NaN leaves the position unchanged.
    pub fn scroll_to(&mut self, y: f32) -> f32 {
        if y.is_nan() {
            tracing::debug!(scroll_y = self.scroll_y, "ignoring NaN scroll position");
            return self.scroll_y;
        }
        let clamped = y.clamp(0.0, self.max_scroll());
        if clamped != self.scroll_y {
            tracing::trace!(requested = y, scroll_y = clamped, "scroll");
        }
        self.scroll_y = clamped;
        clamped
    }

    pub fn scroll_by(&mut self, dy: f32) -> f32 {
        self.scroll_to(self.scroll_y + dy)
    }

    /// Update the page size after a relayout, keeping the position in range
    pub fn resize(&mut self, document_height: f32, viewport: Size) {
        self.document_height = document_height;
        self.viewport = viewport;
        self.scroll_to(self.scroll_y);
    }

    /// Visible part of the document
    pub fn viewport_rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.viewport.width, self.viewport.height)
    }

    /// Whole-page progress
    pub fn page_progress(&self) -> f32 {
        page_progress(self.scroll_y, self.document_height, self.viewport.height)
    }

    /// Progress within an element's scroll range
    pub fn progress(&self, range: &ScrollRange) -> f32 {
        range.progress(self.scroll_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_edges() {
        assert_eq!(
            ScrollOffset::parse("start end").unwrap(),
            ScrollOffset::START_END
        );
        assert_eq!(
            "end end".parse::<ScrollOffset>().unwrap(),
            ScrollOffset::END_END
        );
        assert_eq!(
            ScrollOffset::parse("center").unwrap(),
            ScrollOffset::new(Edge::CENTER, Edge::START)
        );
    }

    #[test]
    fn test_parse_units() {
        let offset = ScrollOffset::parse("25% 100px").unwrap();
        assert_eq!(offset.element, Edge::Fraction(0.25));
        assert_eq!(offset.viewport, Edge::Pixels(100.0));

        let offset = ScrollOffset::parse("0.5 1").unwrap();
        assert_eq!(offset, ScrollOffset::new(Edge::CENTER, Edge::END));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            ScrollOffset::parse(""),
            Err(LayoutError::InvalidOffset(_))
        ));
        assert!(ScrollOffset::parse("top bottom").is_err());
        assert!(ScrollOffset::parse("start end end").is_err());
    }

    #[test]
    fn test_range_progress_is_clamped() {
        let section = Rect::new(0.0, 1000.0, 800.0, 400.0);
        let range = ScrollRange::resolve(
            ScrollOffset::START_END,
            ScrollOffset::END_END,
            section,
            800.0,
        );
        assert_eq!(range.progress(0.0), 0.0);
        assert_eq!(range.progress(200.0), 0.0);
        assert_eq!(range.progress(300.0), 0.25);
        assert_eq!(range.progress(600.0), 1.0);
        assert_eq!(range.progress(5000.0), 1.0);
    }

    #[test]
    fn test_degenerate_range() {
        let range = ScrollRange::new(100.0, 100.0);
        assert_eq!(range.progress(99.0), 0.0);
        assert_eq!(range.progress(100.0), 1.0);
        assert_eq!(range.progress(250.0), 1.0);
    }

    #[test]
    fn test_page_progress() {
        assert_eq!(page_progress(0.0, 2000.0, 800.0), 0.0);
        assert_eq!(page_progress(600.0, 2000.0, 800.0), 0.5);
        assert_eq!(page_progress(1200.0, 2000.0, 800.0), 1.0);
        assert_eq!(page_progress(50.0, 600.0, 800.0), 0.0);
    }

    #[test]
    fn test_tracker_clamps_position() {
        let mut tracker = ScrollTracker::new(2000.0, Size::new(1280.0, 800.0));
        assert_eq!(tracker.scroll_to(-50.0), 0.0);
        assert_eq!(tracker.scroll_to(5000.0), 1200.0);
        assert_eq!(tracker.scroll_by(-200.0), 1000.0);
        assert_eq!(tracker.viewport_rect(), Rect::new(0.0, 1000.0, 1280.0, 800.0));

        tracker.resize(1500.0, Size::new(1280.0, 800.0));
        assert_eq!(tracker.scroll_y(), 700.0);
        assert_eq!(tracker.page_progress(), 1.0);
    }

    #[test]
    fn test_tracker_ignores_nan() {
        let mut tracker = ScrollTracker::new(2000.0, Size::new(1280.0, 800.0));
        tracker.scroll_to(300.0);
        assert_eq!(tracker.scroll_to(f32::NAN), 300.0);
        assert_eq!(tracker.scroll_by(f32::NAN), 300.0);
        assert_eq!(tracker.page_progress(), 0.25);

        assert_eq!(tracker.scroll_to(f32::INFINITY), 1200.0);
        assert_eq!(tracker.scroll_to(f32::NEG_INFINITY), 0.0);
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll state and the visible row range.

use core::ops::Range;

use kurbo::{Rect, Size, Vec2};

use crate::layout::{GridLayout, to_index};
use crate::orientation::Orientation;

/// Scroll offsets of the cells view and the rows they reveal.
///
/// Offsets are always kept within `[0, content - client]` on both axes.
/// Geometry is refreshed from a [`GridLayout`] with
/// [`set_layout`](Self::set_layout), which re-clamps the offsets.
#[derive(Clone, Debug, PartialEq)]
pub struct GridViewport {
    orientation: Orientation,
    scroll: Vec2,
    content: Size,
    client: Size,
    row_size: f64,
    rows: usize,
    overscan: usize,
}

impl GridViewport {
    /// Creates a viewport over `layout`, scrolled to the origin.
    #[must_use]
    pub fn new(layout: &GridLayout, overscan: usize) -> Self {
        let mut vp = Self {
            orientation: layout.orientation(),
            scroll: Vec2::ZERO,
            content: Size::ZERO,
            client: Size::ZERO,
            row_size: 0.0,
            rows: 0,
            overscan,
        };
        vp.set_layout(layout);
        vp
    }

    /// Takes new geometry from `layout` and re-clamps the scroll offsets.
    pub fn set_layout(&mut self, layout: &GridLayout) {
        self.orientation = layout.orientation();
        self.content = layout.content();
        self.client = layout.client();
        self.row_size = layout.row_size();
        self.rows = layout.row_count();
        self.scroll = self.clamp(self.scroll);
    }

    /// Sets the number of rows drawn past each end of the viewport.
    pub fn set_overscan(&mut self, overscan: usize) {
        self.overscan = overscan;
    }

    /// Current scroll offsets.
    #[must_use]
    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    /// Scroll offset along the row axis.
    #[must_use]
    pub fn row_scroll(&self) -> f64 {
        match self.orientation {
            Orientation::Horizontal => self.scroll.y,
            Orientation::Vertical => self.scroll.x,
        }
    }

    /// Largest valid scroll offsets.
    #[must_use]
    pub fn max_scroll(&self) -> Vec2 {
        Vec2::new(
            (self.content.width - self.client.width).max(0.0),
            (self.content.height - self.client.height).max(0.0),
        )
    }

    /// Scrolls to `offset`, clamped into range. Non-finite components become
    /// zero.
    ///
    /// Returns `true` if the offsets changed.
    pub fn set_scroll(&mut self, offset: Vec2) -> bool {
        let next = self.clamp(offset);
        if next == self.scroll {
            return false;
        }
        self.scroll = next;
        true
    }

    /// Scrolls by the least amount that brings `rect` (content coordinates)
    /// into view.
    ///
    /// A rect larger than the client area is aligned to its far edge.
    /// Returns `true` if the offsets changed.
    pub fn scroll_to_rect(&mut self, rect: Rect) -> bool {
        let sx = scroll_to_view(rect.x0, rect.width(), self.client.width, self.scroll.x);
        let sy = scroll_to_view(rect.y0, rect.height(), self.client.height, self.scroll.y);
        self.set_scroll(Vec2::new(sx, sy))
    }

    /// Scrolls along the row axis only, to reveal `span`.
    ///
    /// Returns `true` if the offsets changed.
    pub fn scroll_to_row_span(&mut self, span: Range<f64>) -> bool {
        let mut scroll = self.scroll;
        match self.orientation {
            Orientation::Horizontal => {
                let len = span.end - span.start;
                scroll.y = scroll_to_view(span.start, len, self.client.height, scroll.y);
            }
            Orientation::Vertical => {
                let len = span.end - span.start;
                scroll.x = scroll_to_view(span.start, len, self.client.width, scroll.x);
            }
        }
        self.set_scroll(scroll)
    }

    /// Scrolls along the field axis only, to reveal `span`.
    ///
    /// Returns `true` if the offsets changed.
    pub fn scroll_to_field_span(&mut self, span: Range<f64>) -> bool {
        let mut scroll = self.scroll;
        match self.orientation {
            Orientation::Horizontal => {
                let len = span.end - span.start;
                scroll.x = scroll_to_view(span.start, len, self.client.width, scroll.x);
            }
            Orientation::Vertical => {
                let len = span.end - span.start;
                scroll.y = scroll_to_view(span.start, len, self.client.height, scroll.y);
            }
        }
        self.set_scroll(scroll)
    }

    /// Rows to draw: those intersecting the client area, extended by the
    /// overscan on both ends and clamped to `[0, rows]`.
    ///
    /// Every row whose span intersects `[scroll, scroll + client]` along the
    /// row axis is included.
    #[must_use]
    pub fn visible_rows(&self) -> Range<usize> {
        self.rows_in(self.row_scroll(), self.client_main())
    }

    /// Like [`visible_rows`](Self::visible_rows) for an arbitrary span along
    /// the row axis.
    #[must_use]
    pub fn rows_in(&self, start: f64, len: f64) -> Range<usize> {
        if self.rows == 0
            || self.row_size.is_nan()
            || self.row_size <= 0.0
            || !start.is_finite()
            || !len.is_finite()
        {
            return 0..0;
        }
        let overscan = self.overscan as f64;
        let rows = self.rows as f64;
        let first = (libm::floor(start / self.row_size) - overscan).clamp(0.0, rows);
        let last = (libm::ceil((start + len.max(0.0)) / self.row_size) + overscan).clamp(0.0, rows);
        to_index(first)..to_index(last.max(first))
    }

    /// Client extent along the row axis.
    #[must_use]
    pub fn client_main(&self) -> f64 {
        self.orientation.axis().main_size(self.client)
    }

    /// Client size.
    #[must_use]
    pub fn client(&self) -> Size {
        self.client
    }

    /// Content size.
    #[must_use]
    pub fn content(&self) -> Size {
        self.content
    }

    /// Returns a snapshot of the viewport's state.
    #[must_use]
    pub fn debug_info(&self) -> GridViewportDebugInfo {
        GridViewportDebugInfo {
            orientation: self.orientation,
            scroll: self.scroll,
            max_scroll: self.max_scroll(),
            content: self.content,
            client: self.client,
            row_size: self.row_size,
            rows: self.rows,
            overscan: self.overscan,
            visible_rows: self.visible_rows(),
        }
    }

    fn clamp(&self, offset: Vec2) -> Vec2 {
        let max = self.max_scroll();
        let fix = |v: f64, hi: f64| if v.is_finite() { v.clamp(0.0, hi) } else { 0.0 };
        Vec2::new(fix(offset.x, max.x), fix(offset.y, max.y))
    }
}

/// Minimal scroll offset revealing `[x, x + w]` in a view of size `view`.
fn scroll_to_view(x: f64, w: f64, view: f64, scroll: f64) -> f64 {
    scroll.min(x).max(x + w - view)
}

/// Debug snapshot of a [`GridViewport`].
#[derive(Clone, Debug, PartialEq)]
pub struct GridViewportDebugInfo {
    /// Row/field mapping.
    pub orientation: Orientation,
    /// Current scroll offsets.
    pub scroll: Vec2,
    /// Largest valid scroll offsets.
    pub max_scroll: Vec2,
    /// Scrollable content size.
    pub content: Size,
    /// Client area size.
    pub client: Size,
    /// Row size along the row axis.
    pub row_size: f64,
    /// Row count.
    pub rows: usize,
    /// Rows drawn past each end of the viewport.
    pub overscan: usize,
    /// Rows to draw.
    pub visible_rows: Range<usize>,
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::config::GridConfig;
    use crate::field::Field;

    fn viewport(rows: usize, cell_h: f64, client_h: f64) -> GridViewport {
        let cfg = GridConfig {
            cell_h,
            header_h: 0.0,
            border_h: 0.0,
            scrollbar_w: 0.0,
            scrollbar_h: 0.0,
            ..GridConfig::default()
        };
        let fields: Vec<Field> = alloc::vec![Field::new("a")];
        let layout = GridLayout::compute(&cfg, &fields, rows, Size::new(300.0, client_h), None);
        GridViewport::new(&layout, cfg.overscan)
    }

    #[test]
    fn scroll_is_clamped_and_finite() {
        let mut vp = viewport(100, 10.0, 200.0);
        assert!(vp.set_scroll(Vec2::new(0.0, 5000.0)));
        assert_eq!(vp.scroll().y, 800.0);
        vp.set_scroll(Vec2::new(0.0, f64::NAN));
        assert_eq!(vp.scroll().y, 0.0);
        assert!(!vp.set_scroll(Vec2::new(0.0, -3.0)));
    }

    #[test]
    fn scroll_to_rect_is_minimal() {
        let mut vp = viewport(100, 10.0, 200.0);
        assert!(vp.scroll_to_rect(Rect::new(0.0, 300.0, 10.0, 310.0)));
        assert_eq!(vp.scroll().y, 110.0);
        // Already visible: nothing to do.
        assert!(!vp.scroll_to_rect(Rect::new(0.0, 200.0, 10.0, 210.0)));
        assert!(vp.scroll_to_rect(Rect::new(0.0, 50.0, 10.0, 60.0)));
        assert_eq!(vp.scroll().y, 50.0);
    }

    #[test]
    fn empty_grid_has_no_visible_rows() {
        let vp = viewport(0, 10.0, 200.0);
        assert_eq!(vp.visible_rows(), 0..0);
        assert_eq!(vp.debug_info().max_scroll, Vec2::ZERO);
    }
}

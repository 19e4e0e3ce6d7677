// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The 2D drawing surface a grid paints into, and a recording implementation.
//!
//! [`Canvas`] is deliberately small: rectangles, lines, text and a handful of
//! icon glyphs, plus a transform and clip stack. Hosts adapt it to whatever
//! renderer they use. [`RecordingCanvas`] keeps every call, together with
//! the translation and clip in effect, for tests and debugging.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use smallvec::SmallVec;

use crate::field::{Align, SortDir};

/// Which font a piece of text is drawn with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontRole {
    /// Cell text, at the grid's font size.
    Text,
    /// Header labels, slightly smaller.
    Header,
}

/// Icons the grid draws itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// Sort indicator of a header.
    Sort {
        /// Direction to point at.
        dir: SortDir,
        /// Point left/right instead of up/down.
        vertical: bool,
        /// The field is a secondary sort key; drawn as a double arrow.
        secondary: bool,
    },
    /// Tree node whose children are hidden.
    TreeCollapsed,
    /// Tree node whose children are shown.
    TreeExpanded,
}

/// Dash pattern of a stroke: `(on, off)` lengths.
pub type Dash = (f64, f64);

/// A 2D drawing surface.
///
/// Text and glyph anchors are vertically centered on `at.y`; `align` says
/// which horizontal edge of the text `at.x` is.
pub trait Canvas {
    /// Clears the whole surface.
    fn clear(&mut self);

    /// Pushes the current translation and clip.
    fn save(&mut self);

    /// Pops the translation and clip pushed by the matching
    /// [`save`](Self::save).
    fn restore(&mut self);

    /// Offsets subsequent drawing.
    fn translate(&mut self, offset: Vec2);

    /// Intersects the clip with `rect`.
    fn clip_rect(&mut self, rect: Rect);

    /// Fills `rect`.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Strokes a straight line.
    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Color);

    /// Strokes the outline of `rect`, optionally dashed.
    fn stroke_rect(&mut self, rect: Rect, width: f64, color: Color, dash: Option<Dash>);

    /// Draws a single line of text.
    fn fill_text(&mut self, text: &str, at: Point, align: Align, font: FontRole, color: Color);

    /// Draws an icon.
    fn fill_glyph(&mut self, glyph: Glyph, at: Point, align: Align, font: FontRole, color: Color);

    /// Advance width of `text`.
    fn measure_text(&mut self, text: &str, font: FontRole) -> f64;
}

/// A recorded canvas call.
#[derive(Clone, Debug)]
pub enum CanvasOp {
    /// [`Canvas::clear`].
    Clear,
    /// [`Canvas::save`].
    Save,
    /// [`Canvas::restore`].
    Restore,
    /// [`Canvas::translate`].
    Translate(Vec2),
    /// [`Canvas::clip_rect`].
    ClipRect(Rect),
    /// [`Canvas::fill_rect`].
    FillRect {
        /// Rectangle, in local coordinates.
        rect: Rect,
        /// Fill color.
        color: Color,
    },
    /// [`Canvas::stroke_line`].
    StrokeLine {
        /// Start, in local coordinates.
        from: Point,
        /// End, in local coordinates.
        to: Point,
        /// Line width.
        width: f64,
        /// Stroke color.
        color: Color,
    },
    /// [`Canvas::stroke_rect`].
    StrokeRect {
        /// Rectangle, in local coordinates.
        rect: Rect,
        /// Line width.
        width: f64,
        /// Stroke color.
        color: Color,
        /// Dash pattern.
        dash: Option<Dash>,
    },
    /// [`Canvas::fill_text`].
    FillText {
        /// The text.
        text: String,
        /// Anchor, in local coordinates.
        at: Point,
        /// Horizontal anchoring.
        align: Align,
        /// Font.
        font: FontRole,
        /// Text color.
        color: Color,
    },
    /// [`Canvas::fill_glyph`].
    FillGlyph {
        /// The icon.
        glyph: Glyph,
        /// Anchor, in local coordinates.
        at: Point,
        /// Horizontal anchoring.
        align: Align,
        /// Font.
        font: FontRole,
        /// Glyph color.
        color: Color,
    },
}

/// A recorded call with the state it was made in.
#[derive(Clone, Debug)]
pub struct CanvasEvent {
    /// The call.
    pub op: CanvasOp,
    /// Accumulated translation.
    pub origin: Vec2,
    /// Clip in surface coordinates, if any.
    pub clip: Option<Rect>,
}

impl CanvasEvent {
    /// For fills and rect strokes, the rectangle in surface coordinates.
    #[must_use]
    pub fn surface_rect(&self) -> Option<Rect> {
        match &self.op {
            CanvasOp::FillRect { rect, .. } | CanvasOp::StrokeRect { rect, .. } => {
                Some(*rect + self.origin)
            }
            _ => None,
        }
    }

    /// For text, the anchor in surface coordinates.
    #[must_use]
    pub fn surface_anchor(&self) -> Option<Point> {
        match &self.op {
            CanvasOp::FillText { at, .. } | CanvasOp::FillGlyph { at, .. } => {
                Some(*at + self.origin)
            }
            _ => None,
        }
    }
}

/// A [`Canvas`] that records every call.
///
/// Text is measured as `0.5 × font size` per character, which keeps layout
/// decisions that depend on measuring deterministic.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    events: Vec<CanvasEvent>,
    origin: Vec2,
    clip: Option<Rect>,
    stack: SmallVec<[(Vec2, Option<Rect>); 8]>,
    font_size: f64,
}

impl RecordingCanvas {
    /// Creates an empty recording that measures text as if set at
    /// `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            ..Self::default()
        }
    }

    /// Recorded calls, oldest first.
    #[must_use]
    pub fn events(&self) -> &[CanvasEvent] {
        &self.events
    }

    /// Drops the recording, keeping the current state.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Text drawn so far, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.events.iter().filter_map(|e| match &e.op {
            CanvasOp::FillText { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Index of the first event drawing `text`, if any.
    #[must_use]
    pub fn position_of_text(&self, text: &str) -> Option<usize> {
        self.events
            .iter()
            .position(|e| matches!(&e.op, CanvasOp::FillText { text: t, .. } if t == text))
    }

    /// Depth of the save stack.
    #[must_use]
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    fn record(&mut self, op: CanvasOp) {
        self.events.push(CanvasEvent {
            op,
            origin: self.origin,
            clip: self.clip,
        });
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self) {
        self.record(CanvasOp::Clear);
    }

    fn save(&mut self) {
        self.stack.push((self.origin, self.clip));
        self.record(CanvasOp::Save);
    }

    fn restore(&mut self) {
        if let Some((origin, clip)) = self.stack.pop() {
            self.origin = origin;
            self.clip = clip;
        }
        self.record(CanvasOp::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.origin += offset;
        self.record(CanvasOp::Translate(offset));
    }

    fn clip_rect(&mut self, rect: Rect) {
        let surface = rect + self.origin;
        self.clip = Some(match self.clip {
            Some(clip) => clip.intersect(surface),
            None => surface,
        });
        self.record(CanvasOp::ClipRect(rect));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.record(CanvasOp::FillRect { rect, color });
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Color) {
        self.record(CanvasOp::StrokeLine {
            from,
            to,
            width,
            color,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, width: f64, color: Color, dash: Option<Dash>) {
        self.record(CanvasOp::StrokeRect {
            rect,
            width,
            color,
            dash,
        });
    }

    fn fill_text(&mut self, text: &str, at: Point, align: Align, font: FontRole, color: Color) {
        self.record(CanvasOp::FillText {
            text: String::from(text),
            at,
            align,
            font,
            color,
        });
    }

    fn fill_glyph(&mut self, glyph: Glyph, at: Point, align: Align, font: FontRole, color: Color) {
        self.record(CanvasOp::FillGlyph {
            glyph,
            at,
            align,
            font,
            color,
        });
    }

    fn measure_text(&mut self, text: &str, font: FontRole) -> f64 {
        let size = match font {
            FontRole::Text => self.font_size,
            FontRole::Header => self.font_size * 0.875,
        };
        text.chars().count() as f64 * size * 0.5
    }
}

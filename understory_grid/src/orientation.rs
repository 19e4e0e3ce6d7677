// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid orientation and the axis mapping shared by layout, hit-testing and
//! painting.
//!
//! Algorithms are written in terms of a *row axis* (the axis rows stack
//! along) and a *field axis* (the axis fields are laid out along). An
//! [`Axis`] maps those back to x/y.

use kurbo::{Point, Rect, Size, Vec2};

/// How rows and fields map onto the screen.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Rows stack vertically and fields run left to right; the header is a
    /// row at the top. A normal table.
    #[default]
    Horizontal,
    /// Rows stack left to right and fields run top to bottom; the header is a
    /// column at the left.
    Vertical,
}

impl Orientation {
    /// Returns the axis mapping for this orientation.
    #[must_use]
    pub fn axis(self) -> &'static dyn Axis {
        match self {
            Self::Horizontal => &HorizontalAxis,
            Self::Vertical => &VerticalAxis,
        }
    }

    /// Returns `true` for [`Orientation::Horizontal`].
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        self == Self::Horizontal
    }
}

/// Maps row-axis / field-axis quantities onto screen coordinates.
pub trait Axis {
    /// Coordinate of `p` along the row axis.
    fn row_main(&self, p: Point) -> f64;

    /// Coordinate of `p` along the field axis.
    fn field_main(&self, p: Point) -> f64;

    /// Extent of `size` along the row axis.
    fn main_size(&self, size: Size) -> f64;

    /// Extent of `size` along the field axis.
    fn cross_size(&self, size: Size) -> f64;

    /// A rectangle from its row-axis and field-axis spans.
    fn rect(&self, row_offset: f64, row_size: f64, field_offset: f64, field_size: f64) -> Rect;

    /// A point from its row-axis and field-axis coordinates.
    fn point(&self, row_coord: f64, field_coord: f64) -> Point;

    /// A vector from its row-axis and field-axis components.
    fn vec(&self, row_delta: f64, field_delta: f64) -> Vec2 {
        self.point(row_delta, field_delta).to_vec2()
    }
}

/// Rows along y, fields along x.
#[derive(Copy, Clone, Debug, Default)]
pub struct HorizontalAxis;

impl Axis for HorizontalAxis {
    fn row_main(&self, p: Point) -> f64 {
        p.y
    }

    fn field_main(&self, p: Point) -> f64 {
        p.x
    }

    fn main_size(&self, size: Size) -> f64 {
        size.height
    }

    fn cross_size(&self, size: Size) -> f64 {
        size.width
    }

    fn rect(&self, row_offset: f64, row_size: f64, field_offset: f64, field_size: f64) -> Rect {
        Rect::new(
            field_offset,
            row_offset,
            field_offset + field_size,
            row_offset + row_size,
        )
    }

    fn point(&self, row_coord: f64, field_coord: f64) -> Point {
        Point::new(field_coord, row_coord)
    }
}

/// Rows along x, fields along y.
#[derive(Copy, Clone, Debug, Default)]
pub struct VerticalAxis;

impl Axis for VerticalAxis {
    fn row_main(&self, p: Point) -> f64 {
        p.x
    }

    fn field_main(&self, p: Point) -> f64 {
        p.y
    }

    fn main_size(&self, size: Size) -> f64 {
        size.width
    }

    fn cross_size(&self, size: Size) -> f64 {
        size.height
    }

    fn rect(&self, row_offset: f64, row_size: f64, field_offset: f64, field_size: f64) -> Rect {
        Rect::new(
            row_offset,
            field_offset,
            row_offset + row_size,
            field_offset + field_size,
        )
    }

    fn point(&self, row_coord: f64, field_coord: f64) -> Point {
        Point::new(row_coord, field_coord)
    }
}

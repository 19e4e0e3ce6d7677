// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Field (column) descriptors.

use alloc::string::String;

/// Horizontal alignment of a field's content.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

/// Sort direction of a field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortDir {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortDir {
    /// Next state when the header is clicked: `Asc → Desc → unsorted → Asc`.
    #[must_use]
    pub fn toggled(dir: Option<Self>) -> Option<Self> {
        match dir {
            None => Some(Self::Asc),
            Some(Self::Asc) => Some(Self::Desc),
            Some(Self::Desc) => None,
        }
    }
}

/// A field descriptor.
///
/// Field order is significant: it is the column order. Widths are in
/// pixels; `width` is the preferred width and is kept within
/// `[min_width, max_width]` by resizing.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    /// Identifier, passed back in events.
    pub name: String,
    /// Header text.
    pub label: String,
    /// Preferred width.
    pub width: f64,
    /// Minimum width.
    pub min_width: f64,
    /// Maximum width.
    pub max_width: f64,
    /// Content alignment.
    pub align: Align,
    /// Whether clicking the header toggles sorting.
    pub sortable: bool,
    /// Current sort direction, if sorted.
    pub sort: Option<SortDir>,
    /// Position in a multi-field sort; `0` is the primary key.
    pub sort_priority: u32,
}

impl Field {
    /// Default preferred width.
    pub const DEFAULT_WIDTH: f64 = 100.0;
    /// Default minimum width.
    pub const DEFAULT_MIN_WIDTH: f64 = 22.0;
    /// Default maximum width.
    pub const DEFAULT_MAX_WIDTH: f64 = 2000.0;

    /// Creates a sortable, left-aligned field labelled with its name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            width: Self::DEFAULT_WIDTH,
            min_width: Self::DEFAULT_MIN_WIDTH,
            max_width: Self::DEFAULT_MAX_WIDTH,
            align: Align::Left,
            sortable: true,
            sort: None,
            sort_priority: 0,
        }
    }

    /// Sets the preferred width.
    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Sets the width bounds.
    #[must_use]
    pub fn with_bounds(mut self, min_width: f64, max_width: f64) -> Self {
        self.min_width = min_width;
        self.max_width = max_width;
        self
    }

    /// Sets the header label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the content alignment.
    #[must_use]
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// `width` clamped into `[min_width, max_width]`.
    #[must_use]
    pub fn clamped_width(&self) -> f64 {
        self.width.max(self.min_width).min(self.max_width)
    }

    /// `w` clamped into `[min_width, max_width]`.
    #[must_use]
    pub fn clamp_width(&self, w: f64) -> f64 {
        w.max(self.min_width).min(self.max_width)
    }
}

/// Resolved span of a field along the field axis, in content coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FieldGeometry {
    /// Start offset.
    pub offset: f64,
    /// Extent.
    pub size: f64,
}

impl FieldGeometry {
    /// End offset.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.offset + self.size
    }

    /// Returns `true` if `x` lies within `[offset, end]`.
    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.offset && x <= self.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_toggles_through_unsorted() {
        let mut dir = None;
        let mut seen = alloc::vec::Vec::new();
        for _ in 0..4 {
            dir = SortDir::toggled(dir);
            seen.push(dir);
        }
        assert_eq!(
            seen,
            [Some(SortDir::Asc), Some(SortDir::Desc), None, Some(SortDir::Asc)]
        );
    }

    #[test]
    fn width_is_clamped_to_bounds() {
        let f = Field::new("qty").with_width(10.0).with_bounds(30.0, 60.0);
        assert_eq!(f.clamped_width(), 30.0);
        assert_eq!(f.clamp_width(90.0), 60.0);
        assert_eq!(f.label, "qty");
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid layout: content size, client size and field geometry.
//!
//! [`GridLayout::compute`] is a pure function of the configuration, the
//! fields, the row count and the container size. It never measures content,
//! so it is safe to run from an update hook.
//!
//! Coordinates:
//! - *Grid coordinates* have their origin at the grid's top-left corner.
//!   [`GridLayout::header`] and [`GridLayout::view`] are in grid coordinates.
//! - *Content coordinates* have their origin at the first cell, past the
//!   leading borders and unaffected by scrolling. Field and row offsets are
//!   in content coordinates.

use alloc::vec::Vec;
use core::ops::Range;

use kurbo::{Point, Rect, Size, Vec2};

use crate::config::GridConfig;
use crate::field::{Field, FieldGeometry};
use crate::orientation::Orientation;

/// Scrollbar policy of one axis of the cells view.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Overflow {
    /// Show a scrollbar when the content overflows.
    #[default]
    Auto,
    /// Always show a scrollbar.
    Scroll,
    /// Never show a scrollbar.
    Hidden,
}

/// Client area of a scroll box once its scrollbars are accounted for.
///
/// `content` is the scrolled content size, `outer` the box size including
/// any scrollbars, and `scrollbar` the thickness of the vertical (`width`)
/// and horizontal (`height`) scrollbars. Whether an `Auto` scrollbar shows
/// depends on the other axis, since a scrollbar on one axis shrinks the
/// room on the other.
#[must_use]
pub fn scrollbox_client_size(
    content: Size,
    outer: Size,
    overflow_x: Overflow,
    overflow_y: Overflow,
    scrollbar: Size,
) -> Size {
    let (w, h) = (content.width, content.height);
    let (cw, ch) = (outer.width, outer.height);
    let (vs_w, hs_h) = (scrollbar.width, scrollbar.height);

    let hs = match overflow_x {
        Overflow::Scroll => true,
        Overflow::Hidden => false,
        Overflow::Auto => match overflow_y {
            Overflow::Auto => w > cw || (w > cw - vs_w && h > ch),
            Overflow::Scroll => w > cw - vs_w,
            Overflow::Hidden => w > cw,
        },
    };
    let vs = match overflow_y {
        Overflow::Scroll => true,
        Overflow::Hidden => false,
        Overflow::Auto => match overflow_x {
            Overflow::Auto => h > ch || (h > ch - hs_h && w > cw),
            Overflow::Scroll => h > ch - hs_h,
            Overflow::Hidden => h > ch,
        },
    };

    Size::new(
        if vs { cw - vs_w } else { cw },
        if hs { ch - hs_h } else { ch },
    )
}

/// Column widths held fixed while a column is being resized.
///
/// While a resize is in progress the stretch distribution is suspended and
/// every column keeps its current width, so only the resized column changes.
/// The content width never drops below `content_width`, which keeps the
/// horizontal scroll offset from jumping.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResizeFreeze {
    /// Width of each field, in field order.
    pub widths: Vec<f64>,
    /// Content width when the resize started.
    pub content_width: f64,
}

/// Resolved geometry of a grid.
#[derive(Clone, Debug, PartialEq)]
pub struct GridLayout {
    orientation: Orientation,
    container: Size,
    header: Rect,
    view: Rect,
    client: Size,
    content: Size,
    border: Vec2,
    overflow_x: Overflow,
    overflow_y: Overflow,
    fields: Vec<FieldGeometry>,
    row_size: f64,
    rows: usize,
    visible_row_count: usize,
    page_row_count: usize,
}

impl GridLayout {
    /// Lays out `rows` rows of `fields` inside a `container`.
    ///
    /// Pass `freeze` while a column resize is in progress.
    #[must_use]
    pub fn compute(
        config: &GridConfig,
        fields: &[Field],
        rows: usize,
        container: Size,
        freeze: Option<&ResizeFreeze>,
    ) -> Self {
        let container = Size::new(
            finite_or_zero(container.width),
            finite_or_zero(container.height),
        );
        let horizontal = config.orientation.is_horizontal();
        let resizing = freeze.is_some();
        let auto_cols_w = horizontal && !config.auto_expand && config.auto_cols_w && !resizing;

        let overflow_x = if config.auto_expand {
            Overflow::Hidden
        } else {
            Overflow::Auto
        };
        let overflow_y = if config.auto_expand {
            Overflow::Hidden
        } else if auto_cols_w {
            Overflow::Scroll
        } else {
            Overflow::Auto
        };
        let scrollbar = Size::new(config.scrollbar_w, config.scrollbar_h);
        let (bx, by) = (config.border_v, config.border_h);

        let mut geometry = Vec::with_capacity(fields.len());
        let header;
        let view;
        let client;
        let content;
        let row_size;

        if horizontal {
            let frozen_width = |fi: usize, f: &Field| match freeze {
                Some(fr) => fr.widths.get(fi).copied().unwrap_or_else(|| f.clamped_width()),
                None => f.clamped_width(),
            };
            let min_cols_w: f64 = fields
                .iter()
                .enumerate()
                .map(|(fi, f)| frozen_width(fi, f))
                .sum();
            let cells_h = by + config.cell_h * rows as f64;
            let mut min_cells_w = bx + min_cols_w;
            if let Some(fr) = freeze
                && !config.auto_expand
            {
                min_cells_w = min_cells_w.max(fr.content_width);
            }

            let outer = if config.auto_expand {
                Size::new(min_cells_w, cells_h)
            } else {
                Size::new(container.width, (container.height - config.header_h).max(0.0))
            };
            header = Rect::new(0.0, 0.0, outer.width, config.header_h);
            view = Rect::from_origin_size((0.0, config.header_h), outer);
            client = scrollbox_client_size(
                Size::new(min_cells_w, cells_h),
                outer,
                overflow_x,
                overflow_y,
                scrollbar,
            );

            let mut total_free = 0.0;
            let mut cw = min_cols_w;
            if auto_cols_w {
                cw = client.width - bx;
                total_free = (cw - min_cols_w).max(0.0);
            }

            let mut col_x = 0.0;
            let last = fields.len().saturating_sub(1);
            for (fi, f) in fields.iter().enumerate() {
                let (min_col_w, max_col_w) = match freeze {
                    Some(_) => {
                        let w = frozen_width(fi, f);
                        (w, w)
                    }
                    None => (f.width.max(f.min_width), f.max_width),
                };
                let free = if min_cols_w > 0.0 {
                    total_free * (min_col_w / min_cols_w)
                } else {
                    0.0
                };
                let mut col_w = libm::floor(min_col_w + free).min(max_col_w);
                if fi == last {
                    let remaining = cw - col_x;
                    col_w = if total_free > 0.0 {
                        remaining
                    } else {
                        col_w.max(remaining)
                    };
                }
                geometry.push(FieldGeometry {
                    offset: col_x,
                    size: col_w,
                });
                col_x += col_w;
            }

            let mut cells_w = bx + col_x;
            if let Some(fr) = freeze
                && !config.auto_expand
            {
                cells_w = cells_w.max(fr.content_width);
            }
            content = Size::new(cells_w, cells_h);
            row_size = config.cell_h;
        } else {
            let header_w = config
                .header_w
                .min(container.width - config.min_header_w)
                .max(config.min_header_w);
            for fi in 0..fields.len() {
                geometry.push(FieldGeometry {
                    offset: fi as f64 * config.cell_h,
                    size: config.cell_h,
                });
            }
            let cells_w = bx + config.cell_w * rows as f64;
            let cells_h = by + config.cell_h * fields.len() as f64;
            let outer = if config.auto_expand {
                Size::new(cells_w, cells_h)
            } else {
                Size::new((container.width - header_w).max(0.0), container.height)
            };
            let header_h = (config.cell_h * fields.len() as f64).min(outer.height);
            header = Rect::new(0.0, 0.0, header_w, header_h);
            view = Rect::from_origin_size((header_w, 0.0), outer);
            client = scrollbox_client_size(
                Size::new(cells_w, cells_h),
                outer,
                overflow_x,
                overflow_y,
                scrollbar,
            );
            content = Size::new(cells_w, cells_h);
            row_size = config.cell_w;
        }

        let client = Size::new(client.width.max(0.0), client.height.max(0.0));
        let client_main = config.orientation.axis().main_size(client);
        let page_row_count = if row_size > 0.0 {
            to_index(libm::floor(client_main / row_size))
        } else {
            0
        };

        Self {
            orientation: config.orientation,
            container,
            header,
            view,
            client,
            content,
            border: Vec2::new(bx, by),
            overflow_x,
            overflow_y,
            fields: geometry,
            row_size,
            rows,
            visible_row_count: (page_row_count + 2).min(rows),
            page_row_count,
        }
    }

    /// Orientation the layout was computed for.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Container size the layout was computed for.
    #[must_use]
    pub fn container(&self) -> Size {
        self.container
    }

    /// Header area, in grid coordinates.
    #[must_use]
    pub fn header(&self) -> Rect {
        self.header
    }

    /// Cells view area including its scrollbars, in grid coordinates.
    #[must_use]
    pub fn view(&self) -> Rect {
        self.view
    }

    /// Cells view area excluding its scrollbars, in grid coordinates.
    #[must_use]
    pub fn client_rect(&self) -> Rect {
        Rect::from_origin_size(self.view.origin(), self.client)
    }

    /// Size of the cells view once scrollbars are subtracted.
    #[must_use]
    pub fn client(&self) -> Size {
        self.client
    }

    /// Scrollable content size, leading borders included.
    #[must_use]
    pub fn content(&self) -> Size {
        self.content
    }

    /// Leading border widths, `x` for vertical borders and `y` for horizontal.
    #[must_use]
    pub fn border(&self) -> Vec2 {
        self.border
    }

    /// Scrollbar policies of the cells view.
    #[must_use]
    pub fn overflow(&self) -> (Overflow, Overflow) {
        (self.overflow_x, self.overflow_y)
    }

    /// Geometry of every field along the field axis.
    #[must_use]
    pub fn fields(&self) -> &[FieldGeometry] {
        &self.fields
    }

    /// Geometry of field `fi`, if it exists.
    #[must_use]
    pub fn field(&self, fi: usize) -> Option<FieldGeometry> {
        self.fields.get(fi).copied()
    }

    /// Extent of all fields along the field axis.
    #[must_use]
    pub fn fields_extent(&self) -> f64 {
        self.fields.last().map_or(0.0, FieldGeometry::end)
    }

    /// Size of one row along the row axis.
    #[must_use]
    pub fn row_size(&self) -> f64 {
        self.row_size
    }

    /// Number of rows laid out.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Rows fully or partially visible at once, capped at the row count.
    #[must_use]
    pub fn visible_row_count(&self) -> usize {
        self.visible_row_count
    }

    /// Rows fully visible at once; the paging distance.
    #[must_use]
    pub fn page_row_count(&self) -> usize {
        self.page_row_count
    }

    /// Offset of row `ri` along the row axis, in content coordinates.
    #[must_use]
    pub fn row_offset(&self, ri: usize) -> f64 {
        ri as f64 * self.row_size
    }

    /// Offsets along the row axis covered by rows `rows`.
    #[must_use]
    pub fn rows_span(&self, rows: Range<usize>) -> Range<f64> {
        self.row_offset(rows.start)..self.row_offset(rows.end)
    }

    /// Rectangle of cell (`ri`, `fi`) in content coordinates.
    ///
    /// Fields past the end yield an empty rectangle on the row.
    #[must_use]
    pub fn cell_rect(&self, ri: usize, fi: usize) -> Rect {
        let g = self.field(fi).unwrap_or_default();
        self.orientation
            .axis()
            .rect(self.row_offset(ri), self.row_size, g.offset, g.size)
    }

    /// Rectangle of row `ri` across all fields, in content coordinates.
    #[must_use]
    pub fn row_rect(&self, ri: usize) -> Rect {
        self.orientation
            .axis()
            .rect(self.row_offset(ri), self.row_size, 0.0, self.fields_extent())
    }

    /// Rectangle of the header cell of field `fi`, in header coordinates.
    ///
    /// Header coordinates share the field axis with content coordinates and
    /// start at the header's edge on the row axis.
    #[must_use]
    pub fn header_cell_rect(&self, fi: usize) -> Rect {
        let g = self.field(fi).unwrap_or_default();
        let axis = self.orientation.axis();
        let depth = axis.main_size(self.header.size());
        axis.rect(0.0, depth, g.offset, g.size)
    }

    /// Converts a point in grid coordinates to content coordinates, given
    /// the current scroll offset.
    #[must_use]
    pub fn content_point(&self, p: Point, scroll: Vec2) -> Point {
        p - self.view.origin().to_vec2() + scroll - self.border
    }

    /// Converts a point in content coordinates to grid coordinates.
    #[must_use]
    pub fn grid_point(&self, p: Point, scroll: Vec2) -> Point {
        p + self.view.origin().to_vec2() - scroll + self.border
    }
}

/// Converts a non-negative, already floored or ceiled offset quotient into
/// an index.
pub(crate) fn to_index(v: f64) -> usize {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Callers clamp to a row or field count first; NaN saturates to zero"
    )]
    {
        v.max(0.0) as usize
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

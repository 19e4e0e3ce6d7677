// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit states: what the pointer is over, and which drag is in progress.
//!
//! A grid is in exactly one [`HitState`] at a time. Hover states are
//! resolved from the pointer position while no button is held, in priority
//! order (see [`hit_test`]). Pressing promotes a hover state to a drag state,
//! and no other drag can start until it is released or cancelled.

use bitflags::bitflags;
use kurbo::{Point, Vec2};

use crate::config::GridConfig;
use crate::layout::{GridLayout, to_index};

/// What a column resize changes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResizeTarget {
    /// The width of a field, in horizontal grids.
    Field(usize),
    /// The shared row width, in vertical grids.
    CellWidth,
}

/// The single active interaction mode.
///
/// Grabs are pointer offsets in content coordinates, measured from the
/// edge being dragged.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum HitState {
    /// Nothing under the pointer.
    #[default]
    None,
    /// Hovering a body cell.
    Cell {
        /// Row index.
        row: usize,
        /// Field index.
        field: usize,
        /// The pointer is over the tree expand/collapse sign.
        indent: bool,
        /// Pointer offset from the cell's top-left corner.
        grab: Vec2,
    },
    /// Hovering a header cell.
    Col {
        /// Field index.
        field: usize,
        /// Pointer offset from the header cell's leading edge, along the field
        /// axis.
        grab: f64,
    },
    /// Hovering a resizable boundary.
    ColResize {
        /// What would be resized.
        target: ResizeTarget,
        /// Pointer offset from the boundary.
        grab: f64,
    },
    /// Hovering the trailing edge of a vertical grid's header.
    HeaderResize {
        /// Pointer offset from the edge.
        grab: f64,
    },
    /// Resizing a column or the row width.
    ColResizing {
        /// What is being resized.
        target: ResizeTarget,
        /// Pointer offset from the boundary.
        grab: f64,
        /// Size before the resize started.
        start_width: f64,
    },
    /// Resizing a vertical grid's header.
    HeaderResizing {
        /// Pointer offset from the edge.
        grab: f64,
        /// Header width before the resize started.
        start_width: f64,
    },
    /// A header is pressed but has not moved past the deadzone.
    ColDragging {
        /// Field index.
        field: usize,
        /// Pointer offset from the header cell's leading edge.
        grab: f64,
    },
    /// A column is being moved.
    ColMoving {
        /// Index of the moving field.
        field: usize,
        /// Pointer offset from the column's leading edge.
        grab: f64,
    },
    /// A body cell is pressed but has not moved past the deadzone.
    RowDragging {
        /// Row index.
        row: usize,
        /// Field index.
        field: usize,
        /// Pointer offset from the cell's top-left corner.
        grab: Vec2,
    },
    /// Rows are being moved.
    RowMoving {
        /// First moving row.
        row: usize,
        /// Field that was pressed.
        field: usize,
        /// Pointer offset from the moving block's leading edge, along the row
        /// axis.
        grab: f64,
    },
}

/// Discriminant of a [`HitState`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HitKind {
    /// [`HitState::None`].
    None,
    /// [`HitState::Cell`].
    Cell,
    /// [`HitState::Col`].
    Col,
    /// [`HitState::ColResize`].
    ColResize,
    /// [`HitState::HeaderResize`].
    HeaderResize,
    /// [`HitState::ColResizing`].
    ColResizing,
    /// [`HitState::HeaderResizing`].
    HeaderResizing,
    /// [`HitState::ColDragging`].
    ColDragging,
    /// [`HitState::ColMoving`].
    ColMoving,
    /// [`HitState::RowDragging`].
    RowDragging,
    /// [`HitState::RowMoving`].
    RowMoving,
}

impl HitKind {
    /// Snake-case name, as used in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Cell => "cell",
            Self::Col => "col",
            Self::ColResize => "col_resize",
            Self::HeaderResize => "header_resize",
            Self::ColResizing => "col_resizing",
            Self::HeaderResizing => "header_resizing",
            Self::ColDragging => "col_dragging",
            Self::ColMoving => "col_moving",
            Self::RowDragging => "row_dragging",
            Self::RowMoving => "row_moving",
        }
    }
}

impl HitState {
    /// The state's discriminant.
    #[must_use]
    pub fn kind(&self) -> HitKind {
        match self {
            Self::None => HitKind::None,
            Self::Cell { .. } => HitKind::Cell,
            Self::Col { .. } => HitKind::Col,
            Self::ColResize { .. } => HitKind::ColResize,
            Self::HeaderResize { .. } => HitKind::HeaderResize,
            Self::ColResizing { .. } => HitKind::ColResizing,
            Self::HeaderResizing { .. } => HitKind::HeaderResizing,
            Self::ColDragging { .. } => HitKind::ColDragging,
            Self::ColMoving { .. } => HitKind::ColMoving,
            Self::RowDragging { .. } => HitKind::RowDragging,
            Self::RowMoving { .. } => HitKind::RowMoving,
        }
    }

    /// Returns `true` while a button is held: a resize, drag or move.
    ///
    /// Pointer capture is held exactly while this is `true`.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            Self::ColResizing { .. }
                | Self::HeaderResizing { .. }
                | Self::ColDragging { .. }
                | Self::ColMoving { .. }
                | Self::RowDragging { .. }
                | Self::RowMoving { .. }
        )
    }

    /// Hovered or pressed body cell, if any.
    #[must_use]
    pub fn cell(&self) -> Option<(usize, usize)> {
        match *self {
            Self::Cell { row, field, .. } | Self::RowDragging { row, field, .. } => {
                Some((row, field))
            }
            _ => None,
        }
    }
}

/// Pointer capture change requested by an input handler.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Capture {
    /// Keep the current capture state.
    #[default]
    Unchanged,
    /// Route all pointer events to the grid until released.
    Acquire,
    /// Stop routing pointer events to the grid.
    Release,
}

/// Outcome of an input handler.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PointerResponse {
    /// Capture change the host should apply.
    pub capture: Capture,
    /// The event was consumed by the grid.
    pub handled: bool,
}

impl PointerResponse {
    /// Event not consumed.
    pub const IGNORED: Self = Self {
        capture: Capture::Unchanged,
        handled: false,
    };

    /// Event consumed, capture unchanged.
    pub const HANDLED: Self = Self {
        capture: Capture::Unchanged,
        handled: true,
    };

    /// Event consumed; capture the pointer.
    pub const ACQUIRE: Self = Self {
        capture: Capture::Acquire,
        handled: true,
    };

    /// Event consumed; release the pointer.
    pub const RELEASE: Self = Self {
        capture: Capture::Release,
        handled: true,
    };
}

bitflags! {
    /// Keyboard modifiers held during a pointer event.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 1 << 0;
        /// Control.
        const CTRL  = 1 << 1;
        /// Alt / Option.
        const ALT   = 1 << 2;
        /// Meta / Command.
        const META  = 1 << 3;
    }
}

/// Resolves the hover state under `p` (grid coordinates).
///
/// Candidates are tried in order and the first match wins:
///
/// 1. header resize: vertical grids only, within the tolerance of the
///    header's trailing edge;
/// 2. column resize: horizontal grids, within the tolerance of a field's
///    trailing edge in the header; vertical grids, within the tolerance of
///    the first row's trailing edge;
/// 3. header cell;
/// 4. body cell.
///
/// `expandable_depth(row)` returns the tree depth of `row` if it has
/// children, which makes its indent area hit the expand/collapse sign.
#[must_use]
pub fn hit_test(
    config: &GridConfig,
    layout: &GridLayout,
    scroll: Vec2,
    p: Point,
    expandable_depth: impl Fn(usize) -> Option<usize>,
) -> HitState {
    let tol = config.resize_tolerance;
    let horizontal = config.orientation.is_horizontal();
    let header = layout.header();
    let client = layout.client_rect();
    let in_header = header.contains(p);
    let in_client = client.contains(p);
    let cp = layout.content_point(p, scroll);

    if !horizontal {
        let container = layout.container();
        let dx = p.x - header.x1;
        if dx.abs() <= tol && p.y >= 0.0 && p.y <= container.height {
            return HitState::HeaderResize { grab: dx };
        }
    }

    if horizontal {
        if in_header {
            for (fi, g) in layout.fields().iter().enumerate() {
                let dx = cp.x - g.end();
                if dx.abs() <= tol {
                    return HitState::ColResize {
                        target: ResizeTarget::Field(fi),
                        grab: dx,
                    };
                }
            }
        }
    } else if in_client && layout.row_count() > 0 {
        let dx = cp.x - config.cell_w;
        if dx.abs() <= tol {
            return HitState::ColResize {
                target: ResizeTarget::CellWidth,
                grab: dx,
            };
        }
    }

    let axis = config.orientation.axis();
    if in_header {
        let along = axis.field_main(cp);
        for (fi, g) in layout.fields().iter().enumerate() {
            if g.contains(along) {
                return HitState::Col {
                    field: fi,
                    grab: along - g.offset,
                };
            }
        }
    }

    if in_client {
        let main = axis.row_main(cp);
        let row_size = layout.row_size();
        if main < 0.0 || row_size <= 0.0 {
            return HitState::None;
        }
        let row = to_index(libm::floor(main / row_size));
        if row >= layout.row_count() {
            return HitState::None;
        }
        let along = axis.field_main(cp);
        for (fi, g) in layout.fields().iter().enumerate() {
            if g.contains(along) {
                let origin = axis.point(layout.row_offset(row), g.offset);
                let grab = cp - origin;
                let indent = config.field_has_indent(fi)
                    && expandable_depth(row)
                        .is_some_and(|depth| grab.x <= config.indent_offset(depth));
                return HitState::Cell {
                    row,
                    field: fi,
                    indent,
                    grab,
                };
            }
        }
    }

    HitState::None
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::Size;

    use super::*;
    use crate::field::Field;
    use crate::orientation::Orientation;

    fn setup(orientation: Orientation) -> (GridConfig, GridLayout) {
        let cfg = GridConfig {
            orientation,
            ..GridConfig::default()
        };
        let fields: Vec<Field> = [100.0, 80.0]
            .iter()
            .map(|w| Field::new("f").with_width(*w))
            .collect();
        let layout = GridLayout::compute(&cfg, &fields, 50, Size::new(400.0, 300.0), None);
        (cfg, layout)
    }

    fn flat(_: usize) -> Option<usize> {
        None
    }

    #[test]
    fn resize_wins_over_header_cell() {
        let (cfg, l) = setup(Orientation::Horizontal);
        // Field 0 ends at content x 100, grid x 101.
        let s = hit_test(&cfg, &l, Vec2::ZERO, Point::new(98.0, 10.0), flat);
        assert_eq!(
            s,
            HitState::ColResize {
                target: ResizeTarget::Field(0),
                grab: -3.0
            }
        );
        let s = hit_test(&cfg, &l, Vec2::ZERO, Point::new(50.0, 10.0), flat);
        assert_eq!(s, HitState::Col { field: 0, grab: 49.0 });
    }

    #[test]
    fn body_cells_are_bucketed_by_row() {
        let (cfg, l) = setup(Orientation::Horizontal);
        // Grid y 26 + 1 border + 2 rows of 26 + 3.
        let s = hit_test(&cfg, &l, Vec2::ZERO, Point::new(121.0, 82.0), flat);
        assert_eq!(s.cell(), Some((2, 1)));
        let s = hit_test(&cfg, &l, Vec2::new(0.0, 260.0), Point::new(121.0, 82.0), flat);
        assert_eq!(s.cell(), Some((12, 1)));
        assert!(!s.is_active());
    }

    #[test]
    fn indent_is_hit_only_on_parents() {
        let (cfg, l) = setup(Orientation::Horizontal);
        let p = Point::new(15.0, 40.0);
        let s = hit_test(&cfg, &l, Vec2::ZERO, p, |_| Some(0));
        assert!(matches!(s, HitState::Cell { indent: true, .. }));
        let s = hit_test(&cfg, &l, Vec2::ZERO, p, flat);
        assert!(matches!(s, HitState::Cell { indent: false, .. }));
    }

    #[test]
    fn vertical_grids_resize_header_and_row_width() {
        let (cfg, l) = setup(Orientation::Vertical);
        let s = hit_test(&cfg, &l, Vec2::ZERO, Point::new(123.0, 100.0), flat);
        assert_eq!(s, HitState::HeaderResize { grab: 3.0 });
        // First row's trailing edge: view x 120 + border 1 + cell_w 120.
        let s = hit_test(&cfg, &l, Vec2::ZERO, Point::new(240.0, 10.0), flat);
        assert_eq!(
            s,
            HitState::ColResize {
                target: ResizeTarget::CellWidth,
                grab: -1.0
            }
        );
        let s = hit_test(&cfg, &l, Vec2::ZERO, Point::new(60.0, 30.0), flat);
        assert_eq!(s, HitState::Col { field: 1, grab: 3.0 });
    }

    #[test]
    fn kind_names() {
        assert_eq!(HitState::None.kind().as_str(), "none");
        let s = HitState::RowMoving {
            row: 0,
            field: 0,
            grab: 0.0,
        };
        assert_eq!(s.kind().as_str(), "row_moving");
        assert!(s.is_active());
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Events reported to the host, and the grid's update options.

use bitflags::bitflags;
use understory_frame::UpdateOptions;

use crate::field::SortDir;
use crate::source::RowMoveRequest;

/// A cell address.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRef {
    /// Row index.
    pub row: usize,
    /// Field index.
    pub field: usize,
}

impl CellRef {
    /// Creates a cell address.
    #[must_use]
    pub const fn new(row: usize, field: usize) -> Self {
        Self { row, field }
    }
}

/// Something the host may want to react to.
///
/// Events queue up inside the grid and are collected with
/// [`Grid::drain_events`](crate::Grid::drain_events).
#[derive(Clone, Debug, PartialEq)]
pub enum GridEvent {
    /// A body cell was clicked.
    CellClick(CellRef),
    /// A body cell was double-clicked outside its tree indent.
    CellDoubleClick(CellRef),
    /// A header was clicked without dragging it.
    HeaderClick {
        /// Field index.
        field: usize,
    },
    /// A header click changed a field's sort direction.
    SortToggled {
        /// Field index.
        field: usize,
        /// New direction, `None` when no longer sorted.
        dir: Option<SortDir>,
        /// Other sort keys were kept.
        multi: bool,
    },
    /// The focused cell changed.
    FocusChanged {
        /// The new focused cell, if any.
        cell: Option<CellRef>,
    },
    /// The host should open an editor on a cell.
    OpenEditor(CellRef),
    /// A tree node's expand/collapse sign was pressed.
    ToggleCollapsed {
        /// Row index.
        row: usize,
        /// Descendants are toggled too.
        recursive: bool,
    },
    /// A column move was committed.
    FieldMoved {
        /// Index the field was moved from.
        from: usize,
        /// Index the field ends up at.
        to: usize,
    },
    /// A row move was committed.
    RowsReordered(RowMoveRequest),
    /// A column resize was committed.
    FieldResized {
        /// Field index.
        field: usize,
        /// New width.
        width: f64,
    },
    /// The header of a vertical grid was resized.
    HeaderResized {
        /// New header width.
        width: f64,
    },
    /// The row width of a vertical grid was resized.
    CellWidthResized {
        /// New row width.
        width: f64,
    },
}

bitflags! {
    /// What a grid must redo on its next update.
    ///
    /// This is the grid's [`UpdateOptions`] record: requests merge by union.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct GridChanges: u8 {
        /// Field list, widths or sort state changed.
        const FIELDS = 1 << 0;
        /// Row count or row contents changed.
        const ROWS   = 1 << 1;
        /// Container size changed.
        const SIZE   = 1 << 2;
        /// Scroll offsets changed.
        const SCROLL = 1 << 3;
        /// Hover state changed.
        const HOVER  = 1 << 4;
        /// Focus or editor state changed.
        const FOCUS  = 1 << 5;
        /// Colors changed.
        const THEME  = 1 << 6;
        /// A move session changed positions.
        const MOVE   = 1 << 7;
    }
}

impl GridChanges {
    /// Changes that require a new layout before painting.
    pub const LAYOUT: Self = Self::FIELDS.union(Self::ROWS).union(Self::SIZE);

    /// Returns `true` if these changes invalidate the layout.
    #[must_use]
    pub fn needs_layout(self) -> bool {
        self.intersects(Self::LAYOUT)
    }
}

impl UpdateOptions for GridChanges {
    fn everything() -> Self {
        Self::all()
    }

    fn merge(&mut self, other: Self) {
        *self |= other;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changes_merge_by_union() {
        let mut c = GridChanges::SCROLL;
        c.merge(GridChanges::HOVER);
        assert_eq!(c, GridChanges::SCROLL | GridChanges::HOVER);
        assert!(!c.needs_layout());
        c.merge(GridChanges::ROWS);
        assert!(c.needs_layout());
        assert!(GridChanges::everything().contains(GridChanges::THEME));
    }
}

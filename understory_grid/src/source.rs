// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The data collaborator: rows, values, cell drawing and commit sinks.

use core::ops::Range;

use bitflags::bitflags;
use kurbo::Size;
use peniko::Color;

use crate::canvas::Canvas;
use crate::field::Align;

bitflags! {
    /// Per-cell state that affects how a cell is painted.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct CellState: u8 {
        /// The cell is part of the selection.
        const SELECTED = 1 << 0;
        /// The cell's value failed validation.
        const INVALID  = 1 << 1;
        /// The cell's value differs from the stored one.
        const MODIFIED = 1 << 2;
        /// The cell cannot be edited.
        const DISABLED = 1 << 3;
        /// The value is null.
        const NULL     = 1 << 4;
        /// The value is an empty string.
        const EMPTY    = 1 << 5;
    }
}

bitflags! {
    /// Per-row state that affects how a row is painted.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct RowState: u8 {
        /// The row was added and not saved yet.
        const NEW     = 1 << 0;
        /// The row is marked for removal; it gets a strike line.
        const REMOVED = 1 << 1;
        /// The row failed validation; it gets an error border.
        const INVALID = 1 << 2;
    }
}

/// What [`GridSource::draw_cell`] needs to draw a value.
///
/// The canvas is translated to the top-left of the padded content box and
/// clipped to it; `size` is the size of that box. Tree indents are already
/// applied.
#[derive(Copy, Clone, Debug)]
pub struct CellPaint {
    /// Row index.
    pub row: usize,
    /// Field index.
    pub field: usize,
    /// Size of the padded content box.
    pub size: Size,
    /// Text color chosen for the cell's state.
    pub fg: Color,
    /// Field alignment.
    pub align: Align,
    /// Font size.
    pub font_size: f64,
    /// The cell is focused.
    pub focused: bool,
    /// The cell is drawn wider than its column to show all of its content.
    pub full_width: bool,
}

/// Describes a committed row move.
///
/// All indices refer to row positions before the move is applied.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowMoveRequest {
    /// Rows that moved, as one contiguous block.
    pub rows: Range<usize>,
    /// Row the block lands in front of, or the row count to append.
    pub insert_before: usize,
    /// Index of the block's first row once the move is applied.
    pub final_index: usize,
    /// Parent adopting the block in a tree, `None` for the root.
    pub parent: Option<usize>,
}

impl RowMoveRequest {
    /// Returns `true` if applying the request would leave rows in place.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.final_index == self.rows.start
    }

    /// Where row `old` ends up once the request is applied.
    #[must_use]
    pub fn map_index(&self, old: usize) -> usize {
        let n = self.rows.len();
        if self.rows.contains(&old) {
            return self.final_index + (old - self.rows.start);
        }
        let without = if old >= self.rows.end { old - n } else { old };
        if without >= self.final_index {
            without + n
        } else {
            without
        }
    }
}

/// The rows of a grid and the operations the grid requests on them.
///
/// Rows are addressed by index and fields by their position in the grid's
/// field list. Only [`row_count`](Self::row_count),
/// [`cell_value`](Self::cell_value) and [`draw_cell`](Self::draw_cell) are
/// required. Tree hooks default to a flat row set.
pub trait GridSource {
    /// Cell value type.
    type Value;

    /// Number of rows.
    fn row_count(&self) -> usize;

    /// Value of cell (`row`, `field`).
    fn cell_value(&self, row: usize, field: usize) -> Self::Value;

    /// Draws `value` into the cell's content box.
    fn draw_cell(
        &mut self,
        row: usize,
        field: usize,
        value: &Self::Value,
        canvas: &mut dyn Canvas,
        cell: &CellPaint,
    );

    /// Width the content of cell (`row`, `field`) needs, padding excluded.
    ///
    /// Focused and hovered cells are drawn this wide when their content
    /// overflows the column.
    fn measure_cell(
        &mut self,
        row: usize,
        field: usize,
        value: &Self::Value,
        canvas: &mut dyn Canvas,
    ) -> f64 {
        let _ = (row, field, value, canvas);
        0.0
    }

    /// State of cell (`row`, `field`).
    fn cell_state(&self, row: usize, field: usize) -> CellState {
        let _ = (row, field);
        CellState::empty()
    }

    /// State of `row`.
    fn row_state(&self, row: usize) -> RowState {
        let _ = row;
        RowState::empty()
    }

    /// Moves field `from` so that it ends up at index `to`.
    fn move_field(&mut self, from: usize, to: usize) {
        let _ = (from, to);
    }

    /// Applies a row move.
    fn reorder_rows(&mut self, request: &RowMoveRequest) {
        let _ = request;
    }

    /// Stores a new width for `field`.
    fn set_field_width(&mut self, field: usize, width: f64) {
        let _ = (field, width);
    }

    /// Collapses or expands `row`, and its descendants too if `recursive`.
    fn toggle_collapsed(&mut self, row: usize, recursive: bool) {
        let _ = (row, recursive);
    }

    /// Returns `false` to veto row moving.
    fn can_move_rows(&self) -> bool {
        true
    }

    /// Returns `true` if rows form a tree.
    fn is_tree(&self) -> bool {
        false
    }

    /// Number of ancestors of `row`.
    fn row_depth(&self, row: usize) -> usize {
        let _ = row;
        0
    }

    /// Parent of `row`.
    fn row_parent(&self, row: usize) -> Option<usize> {
        let _ = row;
        None
    }

    /// Returns `true` if `row` has child rows.
    fn has_children(&self, row: usize) -> bool {
        let _ = row;
        false
    }

    /// Returns `true` if `row`'s children are hidden.
    fn is_collapsed(&self, row: usize) -> bool {
        let _ = row;
        false
    }

    /// Returns `true` if rows may be moved under `row`.
    fn can_have_children(&self, row: usize) -> bool {
        let _ = row;
        true
    }

    /// Number of visible descendants following `row`.
    fn expanded_descendant_count(&self, row: usize) -> usize {
        let _ = row;
        0
    }

    /// Rows a move of `row` may travel over.
    ///
    /// By default the whole row set, or the parent's subtree when parents
    /// cannot change.
    fn row_move_range(&self, row: usize, can_change_parent: bool) -> Range<usize> {
        let all = 0..self.row_count();
        if can_change_parent || !self.is_tree() {
            return all;
        }
        match self.row_parent(row) {
            Some(parent) => {
                let start = parent + 1;
                start..(start + self.expanded_descendant_count(parent)).min(all.end)
            }
            None => all,
        }
    }

    /// Rows that move together with `row`: the row and its visible
    /// descendants.
    fn row_move_block(&self, row: usize) -> Range<usize> {
        let end = row + 1 + if self.is_tree() {
            self.expanded_descendant_count(row)
        } else {
            0
        };
        row..end.min(self.row_count())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    /// 0
    /// ├ 1
    /// │ └ 2
    /// └ 3
    /// 4
    struct Tree;

    impl GridSource for Tree {
        type Value = ();

        fn row_count(&self) -> usize {
            5
        }

        fn cell_value(&self, _row: usize, _field: usize) {}

        fn draw_cell(&mut self, _: usize, _: usize, _: &(), _: &mut dyn Canvas, _: &CellPaint) {}

        fn is_tree(&self) -> bool {
            true
        }

        fn row_parent(&self, row: usize) -> Option<usize> {
            [None, Some(0), Some(1), Some(0), None][row]
        }

        fn expanded_descendant_count(&self, row: usize) -> usize {
            [3, 1, 0, 0, 0][row]
        }
    }

    #[test]
    fn move_range_stays_under_the_parent() {
        assert_eq!(Tree.row_move_range(3, false), 1..4);
        assert_eq!(Tree.row_move_range(2, false), 2..3);
        assert_eq!(Tree.row_move_range(3, true), 0..5);
        assert_eq!(Tree.row_move_range(4, false), 0..5);
    }

    #[test]
    fn request_maps_indices() {
        // Rows 2..4 dropped in front of row 6.
        let req = RowMoveRequest {
            rows: 2..4,
            insert_before: 6,
            final_index: 4,
            parent: None,
        };
        let mapped: Vec<usize> = (0..7).map(|i| req.map_index(i)).collect();
        assert_eq!(mapped, [0, 1, 4, 5, 2, 3, 6]);

        let back = RowMoveRequest {
            rows: 4..5,
            insert_before: 1,
            final_index: 1,
            parent: None,
        };
        let mapped: Vec<usize> = (0..6).map(|i| back.map_index(i)).collect();
        assert_eq!(mapped, [0, 2, 3, 4, 1, 5]);
    }

    #[test]
    fn move_block_carries_descendants() {
        assert_eq!(Tree.row_move_block(1), 1..3);
        assert_eq!(Tree.row_move_block(0), 0..4);
        assert_eq!(Tree.row_move_block(4), 4..5);
    }
}

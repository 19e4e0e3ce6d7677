// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid geometry, tolerances and behavior policy.

use crate::orientation::Orientation;

/// Configuration of a [`Grid`](crate::Grid).
///
/// All sizes are in pixels. The defaults describe a 14px-font table with
/// 26px rows. Policy flags mirror the interactions a host may want to turn
/// off, such as column reordering or tree re-parenting.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    /// Row/field mapping onto the screen.
    pub orientation: Orientation,

    /// Row height (horizontal) or field height (vertical).
    pub cell_h: f64,
    /// Header height in horizontal grids.
    pub header_h: f64,
    /// Header width in vertical grids.
    pub header_w: f64,
    /// Row width in vertical grids.
    pub cell_w: f64,
    /// Width of vertical cell borders.
    pub border_v: f64,
    /// Width of horizontal cell borders.
    pub border_h: f64,
    /// Horizontal cell padding.
    pub padding_x: f64,
    /// Vertical cell padding.
    pub padding_y: f64,
    /// Font size, which also drives tree indent and sort glyph sizes.
    pub font_size: f64,
    /// Thickness of the host's vertical scrollbar.
    pub scrollbar_w: f64,
    /// Thickness of the host's horizontal scrollbar.
    pub scrollbar_h: f64,

    /// Stretch columns to fill the view (horizontal only).
    pub auto_cols_w: bool,
    /// Size the grid to its content instead of scrolling.
    pub auto_expand: bool,
    /// Rows drawn past each end of the viewport.
    pub overscan: usize,

    /// Distance from a boundary within which resizing is offered.
    pub resize_tolerance: f64,
    /// Pointer travel before a drag becomes a move.
    pub drag_deadzone: f64,
    /// Seconds between re-evaluations of a stationary row move.
    pub row_move_interval: f64,
    /// Ease window of rows displaced by a row move, in seconds.
    pub move_ease_duration: f64,
    /// Smallest row width of a vertical grid.
    pub min_cell_w: f64,
    /// Smallest header width of a vertical grid.
    pub min_header_w: f64,

    /// Columns can be reordered by dragging their header.
    pub can_reorder_fields: bool,
    /// Clicking a sortable header toggles its sort direction.
    pub can_sort_rows: bool,
    /// Rows can be reordered by dragging (the source may also veto).
    pub can_move_rows: bool,
    /// Moved tree rows may be adopted by a new parent.
    pub can_change_parent: bool,
    /// Clicking a header focuses the cell of the focused row in that field.
    pub focus_cell_on_click_header: bool,
    /// Pressing a cell opens its editor.
    pub enter_edit_on_click: bool,
    /// Pressing an already focused cell opens its editor.
    pub enter_edit_on_click_focused: bool,
    /// Double-clicking a cell opens its editor.
    pub enter_edit_on_dblclick: bool,
    /// Field showing the tree indent, if the rows form a tree.
    pub tree_field: Option<usize>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            cell_h: 26.0,
            header_h: 26.0,
            header_w: 120.0,
            cell_w: 120.0,
            border_v: 1.0,
            border_h: 1.0,
            padding_x: 6.0,
            padding_y: 4.0,
            font_size: 14.0,
            scrollbar_w: 12.0,
            scrollbar_h: 12.0,
            auto_cols_w: false,
            auto_expand: false,
            overscan: 2,
            resize_tolerance: 5.0,
            drag_deadzone: 8.0,
            row_move_interval: 0.1,
            move_ease_duration: 0.1,
            min_cell_w: 20.0,
            min_header_w: 20.0,
            can_reorder_fields: true,
            can_sort_rows: true,
            can_move_rows: true,
            can_change_parent: true,
            focus_cell_on_click_header: false,
            enter_edit_on_click: false,
            enter_edit_on_click_focused: false,
            enter_edit_on_dblclick: true,
            tree_field: Some(0),
        }
    }
}

impl GridConfig {
    /// Size of one row along the row axis.
    #[must_use]
    pub fn row_size(&self) -> f64 {
        match self.orientation {
            Orientation::Horizontal => self.cell_h,
            Orientation::Vertical => self.cell_w,
        }
    }

    /// Horizontal offset of tree row content at `depth`.
    #[must_use]
    pub fn indent_offset(&self, depth: usize) -> f64 {
        libm::floor(self.font_size * 1.5 + self.font_size * 1.2 * depth as f64)
    }

    /// Returns `true` if `field` carries the tree indent.
    ///
    /// Only horizontal grids draw tree indents.
    #[must_use]
    pub fn field_has_indent(&self, field: usize) -> bool {
        self.orientation.is_horizontal() && self.tree_field == Some(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indent_grows_with_depth() {
        let cfg = GridConfig::default();
        assert_eq!(cfg.indent_offset(0), 21.0);
        assert_eq!(cfg.indent_offset(1), 37.0);
        assert_eq!(cfg.indent_offset(3), 71.0);
    }

    #[test]
    fn row_axis_follows_orientation() {
        let mut cfg = GridConfig::default();
        cfg.cell_w = 90.0;
        assert_eq!(cfg.row_size(), 26.0);
        cfg.orientation = Orientation::Vertical;
        assert_eq!(cfg.row_size(), 90.0);
        assert!(!cfg.field_has_indent(0));
    }
}

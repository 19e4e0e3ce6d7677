// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid colors.

use peniko::Color;

/// Colors used when painting a grid.
///
/// Optional border colors suppress that border entirely when `None`.
#[derive(Clone, Debug)]
pub struct GridTheme {
    /// Plain cell background, also used behind the hover outline.
    pub bg: Color,
    /// Background of even rows.
    pub bg_alt: Color,
    /// Cell text.
    pub fg: Color,
    /// Null, empty and disabled values.
    pub fg_dim: Color,
    /// Header background.
    pub bg_header: Color,
    /// Header text and sort glyphs.
    pub fg_header: Color,
    /// Vertical header borders.
    pub header_border_v: Option<Color>,
    /// Horizontal header borders.
    pub header_border_h: Option<Color>,
    /// Vertical body borders.
    pub cell_border_v: Option<Color>,
    /// Horizontal body borders.
    pub cell_border_h: Option<Color>,
    /// Invalid cells and the border of invalid rows.
    pub bg_error: Color,
    /// Selected cell while the grid is not focused.
    pub bg_unfocused: Color,
    /// Focused cell.
    pub bg_focused: Color,
    /// Focused cell while the grid is not focused.
    pub bg_unselected: Color,
    /// Focused, selected cell while the grid is not focused.
    pub bg_unfocused_selected: Color,
    /// Text of [`bg_unfocused_selected`](Self::bg_unfocused_selected) cells.
    pub fg_unfocused_selected: Color,
    /// Focused, selected cell.
    pub bg_focused_selected: Color,
    /// Focused, invalid cell.
    pub bg_focused_invalid: Color,
    /// Selected cell.
    pub bg_selected: Color,
    /// Text of selected cells.
    pub fg_selected: Color,
    /// Other cells of the focused row, and the cell being edited.
    pub bg_row_focused: Color,
    /// Cells of newly added rows.
    pub bg_new: Color,
    /// Modified cells.
    pub bg_modified: Color,
    /// Modified cells of newly added rows.
    pub bg_new_modified: Color,
    /// Cells and headers that are being dragged.
    pub bg_moving: Color,
}

impl Default for GridTheme {
    fn default() -> Self {
        Self {
            bg: Color::from_rgb8(0xff, 0xff, 0xff),
            bg_alt: Color::from_rgb8(0xf4, 0xf5, 0xf7),
            fg: Color::from_rgb8(0x1f, 0x23, 0x28),
            fg_dim: Color::from_rgb8(0x8a, 0x8f, 0x98),
            bg_header: Color::from_rgb8(0xff, 0xff, 0xff),
            fg_header: Color::from_rgb8(0x55, 0x5b, 0x66),
            header_border_v: Some(Color::from_rgb8(0xc4, 0xc8, 0xcf)),
            header_border_h: Some(Color::from_rgb8(0xe1, 0xe4, 0xe8)),
            cell_border_v: None,
            cell_border_h: Some(Color::from_rgb8(0xe1, 0xe4, 0xe8)),
            bg_error: Color::from_rgb8(0xf0, 0x4d, 0x4d),
            bg_unfocused: Color::from_rgb8(0xd6, 0xdb, 0xe3),
            bg_focused: Color::from_rgb8(0xd2, 0xe3, 0xfc),
            bg_unselected: Color::from_rgb8(0xe6, 0xe8, 0xeb),
            bg_unfocused_selected: Color::from_rgb8(0xb8, 0xc0, 0xcc),
            fg_unfocused_selected: Color::from_rgb8(0x1f, 0x23, 0x28),
            bg_focused_selected: Color::from_rgb8(0x3d, 0x7e, 0xe8),
            bg_focused_invalid: Color::from_rgb8(0xf7, 0x8c, 0x8c),
            bg_selected: Color::from_rgb8(0x9c, 0xc1, 0xf7),
            fg_selected: Color::from_rgb8(0xff, 0xff, 0xff),
            bg_row_focused: Color::from_rgb8(0xee, 0xf4, 0xfd),
            bg_new: Color::from_rgb8(0xe9, 0xf7, 0xe1),
            bg_modified: Color::from_rgb8(0xfd, 0xf3, 0xd8),
            bg_new_modified: Color::from_rgb8(0xdd, 0xee, 0xc6),
            bg_moving: Color::from_rgba8(0xe6, 0xee, 0xfa, 0xf0),
        }
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing passes.
//!
//! A pass clears the canvas, draws the body cells of the visible rows and
//! then the header cells. While a column or a row block is being moved, the
//! stationary cells are drawn first and the moving ones layered on top. In a
//! plain pass the focused cell and then the hovered cell are drawn last so
//! their highlight is never covered by a neighbor.

use alloc::vec::Vec;
use core::ops::Range;

use kurbo::{Point, Rect, Size, Vec2};
use peniko::Color;
use understory_live_move::{Clock, LiveMove};

use crate::canvas::{Canvas, Dash, FontRole, Glyph};
use crate::config::GridConfig;
use crate::events::CellRef;
use crate::field::{Align, Field, FieldGeometry};
use crate::layout::GridLayout;
use crate::row_move::RowMoveSession;
use crate::source::{CellPaint, CellState, GridSource, RowState};
use crate::theme::GridTheme;

const HOVER_DASH: Dash = (1.0, 3.0);

/// Counts of what a paint pass drew.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PaintStats {
    /// Body cells drawn, including the deferred focused and hovered cells.
    pub cells: usize,
    /// Header cells drawn.
    pub headers: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Stage {
    Plain,
    StationaryCols,
    MovingCols,
    StationaryRows,
    MovingRows,
}

impl Stage {
    fn is_moving(self) -> bool {
        matches!(self, Self::MovingCols | Self::MovingRows)
    }
}

/// Everything a pass reads besides the source and the canvas.
pub(crate) struct PaintCx<'a, C> {
    pub(crate) config: &'a GridConfig,
    pub(crate) theme: &'a GridTheme,
    pub(crate) fields: &'a [Field],
    pub(crate) layout: &'a GridLayout,
    pub(crate) scroll: Vec2,
    pub(crate) visible: Range<usize>,
    pub(crate) focus: Option<CellRef>,
    pub(crate) has_focus: bool,
    pub(crate) editor_open: bool,
    pub(crate) hover: Option<CellRef>,
    pub(crate) col_move: Option<(usize, &'a LiveMove)>,
    pub(crate) row_move: Option<&'a RowMoveSession<C>>,
}

impl<C: Clock> PaintCx<'_, C> {
    /// Runs a full pass.
    pub(crate) fn paint<S: GridSource + ?Sized>(
        &self,
        source: &mut S,
        canvas: &mut dyn Canvas,
    ) -> PaintStats {
        let mut stats = PaintStats::default();
        let all = 0..self.fields.len();
        canvas.clear();

        if let Some(session) = self.row_move {
            let moving = session.moving_rows();
            let candidates = self.visible.start.saturating_sub(moving.len())
                ..(self.visible.end + moving.len()).min(self.layout.row_count());
            let stationary: Vec<usize> = candidates
                .filter(|ri| !session.is_moving(*ri) && self.row_in_view(*ri))
                .collect();
            let moving: Vec<usize> = moving.filter(|ri| self.row_in_view(*ri)).collect();
            self.cells(source, canvas, &stationary, all.clone(), Stage::StationaryRows, &mut stats);
            self.cells(source, canvas, &moving, all.clone(), Stage::MovingRows, &mut stats);
            self.headers(canvas, all, Stage::Plain, &mut stats);
        } else if let Some((fi, _)) = self.col_move {
            let rows: Vec<usize> = self.visible.clone().collect();
            self.cells(source, canvas, &rows, all.clone(), Stage::StationaryCols, &mut stats);
            self.cells(source, canvas, &rows, fi..fi + 1, Stage::MovingCols, &mut stats);
            self.headers(canvas, all, Stage::StationaryCols, &mut stats);
            self.headers(canvas, fi..fi + 1, Stage::MovingCols, &mut stats);
        } else {
            let rows: Vec<usize> = self.visible.clone().collect();
            self.cells(source, canvas, &rows, all.clone(), Stage::Plain, &mut stats);
            self.headers(canvas, all, Stage::Plain, &mut stats);
        }

        gtrace!(
            cells = stats.cells,
            headers = stats.headers,
            "paint pass"
        );
        stats
    }

    fn field_geometry(&self, fi: usize) -> FieldGeometry {
        let g = self.layout.field(fi).unwrap_or_default();
        match self.col_move {
            Some((_, live)) if live.range().contains(&fi) => FieldGeometry {
                offset: live.offset_of(fi),
                size: g.size,
            },
            _ => g,
        }
    }

    fn row_offset(&self, ri: usize) -> f64 {
        match self.row_move {
            Some(session) => session.row_offset(ri),
            None => self.layout.row_offset(ri),
        }
    }

    fn row_in_view(&self, ri: usize) -> bool {
        let axis = self.config.orientation.axis();
        let start = axis.row_main(self.scroll.to_point());
        let end = start + axis.main_size(self.layout.client());
        let offset = self.row_offset(ri);
        offset + self.layout.row_size() >= start && offset <= end
    }

    fn cell_rect(&self, ri: usize, fi: usize) -> Rect {
        let g = self.field_geometry(fi);
        self.config
            .orientation
            .axis()
            .rect(self.row_offset(ri), self.layout.row_size(), g.offset, g.size)
    }

    fn row_rect(&self, ri: usize) -> Rect {
        self.config.orientation.axis().rect(
            self.row_offset(ri),
            self.layout.row_size(),
            0.0,
            self.layout.fields_extent(),
        )
    }

    fn cells<S: GridSource + ?Sized>(
        &self,
        source: &mut S,
        canvas: &mut dyn Canvas,
        rows: &[usize],
        fields: Range<usize>,
        stage: Stage,
        stats: &mut PaintStats,
    ) {
        canvas.save();
        canvas.clip_rect(self.layout.client_rect());
        let origin = self.layout.view().origin().to_vec2();
        canvas.translate(origin - self.scroll + self.layout.border());

        let skip = match (stage, self.col_move) {
            (Stage::StationaryCols, Some((fi, _))) => Some(fi),
            _ => None,
        };
        // Focused and hovered cells go last within the pass that owns them.
        let in_pass = |c: &CellRef| {
            rows.contains(&c.row) && fields.contains(&c.field) && skip != Some(c.field)
        };
        let hover = self.hover.filter(in_pass);
        let mut focus = self.focus.filter(in_pass);
        if focus.is_some() && focus == hover {
            focus = None;
        }

        for &ri in rows {
            for fi in fields.clone() {
                let cell = CellRef::new(ri, fi);
                if skip == Some(fi) || hover == Some(cell) || focus == Some(cell) {
                    continue;
                }
                self.cell(source, canvas, cell, self.cell_rect(ri, fi), stage, false);
                stats.cells += 1;
            }
            if source.row_state(ri).contains(RowState::REMOVED) {
                self.strike_line(canvas, self.row_rect(ri));
            }
        }

        if let Some(cell) = focus {
            let rect = self.cell_rect(cell.row, cell.field);
            self.cell(source, canvas, cell, rect, stage, true);
            stats.cells += 1;
        }
        let hovered = hover.map(|cell| {
            let rect = self.cell_rect(cell.row, cell.field);
            stats.cells += 1;
            self.cell(source, canvas, cell, rect, stage, true)
        });

        for &ri in rows {
            if source.row_state(ri).contains(RowState::INVALID) {
                let r = self.row_rect(ri);
                canvas.stroke_rect(
                    Rect::from_origin_size(
                        (r.x0 + 0.5, r.y0 + 0.5),
                        Size::new(r.width() - 1.0, r.height()),
                    ),
                    1.0,
                    self.theme.bg_error,
                    None,
                );
            }
        }

        if let Some(rect) = hovered {
            self.hover_outline(canvas, rect);
        }

        canvas.restore();
    }

    /// Draws one body cell and returns the rectangle it covered.
    fn cell<S: GridSource + ?Sized>(
        &self,
        source: &mut S,
        canvas: &mut dyn Canvas,
        cell: CellRef,
        mut rect: Rect,
        stage: Stage,
        deferred: bool,
    ) -> Rect {
        let CellRef { row: ri, field: fi } = cell;
        let config = self.config;
        let theme = self.theme;
        let field = &self.fields[fi];
        let value = source.cell_value(ri, fi);
        let state = source.cell_state(ri, fi);
        let row_state = source.row_state(ri);

        let (bx, by) = (config.border_v, config.border_h);
        let px = config.padding_x + bx;
        let py = config.padding_y + by;

        let row_focused = self.focus.is_some_and(|f| f.row == ri);
        let cell_focused = self.focus == Some(cell);
        let editing = self.editor_open && cell_focused;
        let selected = state.contains(CellState::SELECTED);
        let invalid = state.contains(CellState::INVALID);
        let modified = state.contains(CellState::MODIFIED);
        let full_width = deferred && stage == Stage::Plain;

        if full_width {
            let w = rect.width();
            let needed = source.measure_cell(ri, fi, &value, canvas) + 2.0 * px;
            let w1 = w.max(needed);
            let shift = match field.align {
                Align::Left => 0.0,
                Align::Center => libm::round((w1 - w) / 2.0),
                Align::Right => w1 - w,
            };
            rect = Rect::from_origin_size((rect.x0 - shift, rect.y0), Size::new(w1, rect.height()));
        }

        let mut indent_x = 0.0;
        let mut collapsed = None;
        if config.field_has_indent(fi) && source.is_tree() {
            indent_x = config.indent_offset(source.row_depth(ri));
            if source.has_children(ri) {
                collapsed = Some(source.is_collapsed(ri));
            }
            if let Some(session) = self.row_move {
                // The adopting parent shows as expanded.
                if session.parent() == Some(ri) && collapsed.is_none() {
                    collapsed = Some(false);
                }
                if stage == Stage::MovingRows {
                    indent_x += session.indent_shift(config);
                }
            }
        }

        let mut bg = stage.is_moving().then_some(theme.bg_moving);
        let mut fg = theme.fg;
        if editing {
            bg = Some(theme.bg_row_focused);
        } else if cell_focused {
            bg = Some(if invalid {
                theme.bg_focused_invalid
            } else if selected {
                if self.has_focus {
                    fg = theme.fg_selected;
                    theme.bg_focused_selected
                } else {
                    fg = theme.fg_unfocused_selected;
                    theme.bg_unfocused_selected
                }
            } else if self.has_focus {
                theme.bg_focused
            } else {
                theme.bg_unselected
            });
        } else if invalid {
            bg = Some(theme.bg_error);
        } else if selected {
            bg = Some(if self.has_focus {
                theme.bg_selected
            } else {
                theme.bg_unfocused
            });
            fg = theme.fg_selected;
        } else if row_state.contains(RowState::NEW) {
            bg = Some(if modified {
                theme.bg_new_modified
            } else {
                theme.bg_new
            });
        } else if modified {
            bg = Some(theme.bg_modified);
        } else if row_focused {
            bg = Some(theme.bg_row_focused);
        }
        if bg.is_none() {
            if ri % 2 == 0 {
                bg = Some(theme.bg_alt);
            } else if full_width {
                bg = Some(theme.bg);
            }
        }
        if state.intersects(CellState::NULL | CellState::EMPTY | CellState::DISABLED) {
            fg = theme.fg_dim;
        }

        let (w, h) = (rect.width(), rect.height());
        canvas.save();
        canvas.translate(rect.origin().to_vec2());
        if let Some(bg) = bg {
            canvas.fill_rect(Rect::new(0.0, 0.0, w, h), bg);
        }
        self.borders(canvas, Size::new(w, h), theme.cell_border_v, theme.cell_border_h, stage);

        if !editing {
            canvas.save();
            canvas.translate(Vec2::new(px, py));
            let cw = w - 2.0 * px;
            let ch = h - 2.0 * py;
            canvas.clip_rect(Rect::new(0.0, 0.0, cw, ch));
            if let Some(collapsed) = collapsed {
                let glyph = if collapsed {
                    Glyph::TreeCollapsed
                } else {
                    Glyph::TreeExpanded
                };
                let color = if selected { fg } else { theme.bg_focused_selected };
                let at = Point::new(indent_x - config.font_size - 4.0, libm::round(ch / 2.0));
                canvas.fill_glyph(glyph, at, Align::Left, FontRole::Text, color);
            }
            canvas.translate(Vec2::new(indent_x, 0.0));
            let paint = CellPaint {
                row: ri,
                field: fi,
                size: Size::new((cw - indent_x).max(0.0), ch.max(0.0)),
                fg,
                align: field.align,
                font_size: config.font_size,
                focused: cell_focused,
                full_width,
            };
            source.draw_cell(ri, fi, &value, canvas, &paint);
            canvas.restore();
        }

        canvas.restore();
        rect
    }

    fn headers(
        &self,
        canvas: &mut dyn Canvas,
        fields: Range<usize>,
        stage: Stage,
        stats: &mut PaintStats,
    ) {
        let config = self.config;
        let horizontal = config.orientation.is_horizontal();
        let header = self.layout.header();
        let border = self.layout.border();
        canvas.save();
        canvas.clip_rect(header);
        let offset = if horizontal {
            Vec2::new(-self.scroll.x + border.x, 0.0)
        } else {
            Vec2::new(0.0, -self.scroll.y + border.y)
        };
        canvas.translate(header.origin().to_vec2() + offset);

        let skip = match (stage, self.col_move) {
            (Stage::StationaryCols, Some((fi, _))) => Some(fi),
            _ => None,
        };
        let axis = config.orientation.axis();
        let depth = axis.main_size(header.size());
        for fi in fields {
            if skip == Some(fi) {
                continue;
            }
            let g = self.field_geometry(fi);
            let rect = axis.rect(0.0, depth, g.offset, g.size);
            self.header_cell(canvas, &self.fields[fi], rect, stage);
            stats.headers += 1;
        }
        canvas.restore();
    }

    fn header_cell(&self, canvas: &mut dyn Canvas, field: &Field, rect: Rect, stage: Stage) {
        let config = self.config;
        let theme = self.theme;
        let horizontal = config.orientation.is_horizontal();
        let (bx, by) = (config.border_v, config.border_h);
        let (px, py) = (config.padding_x, config.padding_y);
        let (mut w, h) = (rect.width(), rect.height());

        canvas.save();
        canvas.translate(rect.origin().to_vec2());
        self.borders(canvas, Size::new(w, h), theme.header_border_v, theme.header_border_h, stage);
        let bg = if stage == Stage::MovingCols {
            theme.bg_moving
        } else {
            theme.bg_header
        };
        canvas.fill_rect(Rect::new(0.0, 0.0, w - bx, h - by), bg);

        if let Some(dir) = field.sort {
            let right = horizontal && field.align == Align::Right;
            let glyph = Glyph::Sort {
                dir,
                vertical: !horizontal,
                secondary: field.sort_priority > 0,
            };
            let at = Point::new(if right { 2.0 * px } else { w - 2.0 * px }, libm::round(h / 2.0));
            let align = if right { Align::Left } else { Align::Right };
            canvas.fill_glyph(glyph, at, align, FontRole::Header, theme.fg_header);
            let iw = config.font_size * 1.5;
            w -= iw;
            if right {
                canvas.translate(Vec2::new(iw, 0.0));
            }
        }

        canvas.translate(Vec2::new(px, py));
        let cw = w - 2.0 * px;
        let ch = h - 2.0 * py;
        canvas.clip_rect(Rect::new(0.0, 0.0, cw, ch));
        let (x, align) = if horizontal {
            let x = match field.align {
                Align::Left => 0.0,
                Align::Center => cw / 2.0,
                Align::Right => cw,
            };
            (x, field.align)
        } else {
            (0.0, Align::Left)
        };
        canvas.fill_text(
            &field.label,
            Point::new(x, libm::round(ch / 2.0)),
            align,
            FontRole::Header,
            theme.fg_header,
        );
        canvas.restore();
    }

    /// Trailing borders of a cell, plus the leading one while its column
    /// floats.
    fn borders(
        &self,
        canvas: &mut dyn Canvas,
        size: Size,
        color_v: Option<Color>,
        color_h: Option<Color>,
        stage: Stage,
    ) {
        let (bx, by) = (self.config.border_v, self.config.border_h);
        let horizontal = self.config.orientation.is_horizontal();
        let bw = size.width - 0.5;
        let bh = size.height - 0.5;
        let zz = -0.5;
        if let Some(color) = color_h
            && by > 0.0
        {
            if !horizontal && stage == Stage::MovingCols {
                canvas.stroke_line(Point::new(zz, zz), Point::new(bw, zz), by, color);
            }
            canvas.stroke_line(Point::new(zz, bh), Point::new(bw, bh), by, color);
        }
        if let Some(color) = color_v
            && bx > 0.0
        {
            if horizontal && stage == Stage::MovingCols {
                canvas.stroke_line(Point::new(zz, zz), Point::new(zz, bh), bx, color);
            }
            canvas.stroke_line(Point::new(bw, zz), Point::new(bw, bh), bx, color);
        }
    }

    fn strike_line(&self, canvas: &mut dyn Canvas, r: Rect) {
        let (from, to) = if self.config.orientation.is_horizontal() {
            let y = r.y0 + r.height() / 2.0 + 0.5;
            (Point::new(r.x0, y), Point::new(r.x1, y))
        } else {
            let x = r.x0 + r.width() / 2.0;
            (Point::new(x, r.y0 + 0.5), Point::new(x, r.y1 + 0.5))
        };
        canvas.stroke_line(from, to, 1.0, self.theme.fg);
    }

    fn hover_outline(&self, canvas: &mut dyn Canvas, rect: Rect) {
        let width = if self.config.border_v > 0.0 {
            self.config.border_v
        } else {
            self.config.border_h
        };
        let outline = Rect::new(-0.5, -0.5, rect.width() - 0.5, rect.height() - 0.5);
        canvas.save();
        canvas.translate(rect.origin().to_vec2());
        // Solid underlay hides the borders beneath the dashes.
        canvas.stroke_rect(outline, width, self.theme.bg, None);
        canvas.stroke_rect(outline, width, self.theme.fg, Some(HOVER_DASH));
        canvas.restore();
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint passes recorded with `RecordingCanvas`.

mod common;

use common::{Table, cell_point, fields, grid};
use kurbo::{Point, Rect, Size};
use understory_grid::{
    Align, Canvas, CanvasOp, CellPaint, CellRef, CellState, FontRole, Glyph, Grid, GridConfig,
    GridSource, Modifiers, RecordingCanvas, RowState, SortDir,
};
use understory_live_move::ManualClock;

/// Twenty flat rows with a few states set.
struct Styled;

impl GridSource for Styled {
    type Value = ();

    fn row_count(&self) -> usize {
        20
    }

    fn cell_value(&self, _row: usize, _field: usize) {}

    fn draw_cell(
        &mut self,
        row: usize,
        field: usize,
        _: &(),
        canvas: &mut dyn Canvas,
        cell: &CellPaint,
    ) {
        let text = format!("{row}:{field}");
        canvas.fill_text(&text, Point::ZERO, Align::Left, FontRole::Text, cell.fg);
    }

    fn measure_cell(&mut self, row: usize, field: usize, _: &(), _: &mut dyn Canvas) -> f64 {
        if (row, field) == (1, 0) { 300.0 } else { 0.0 }
    }

    fn cell_state(&self, row: usize, field: usize) -> CellState {
        if (row, field) == (2, 1) {
            CellState::SELECTED
        } else {
            CellState::empty()
        }
    }

    fn row_state(&self, row: usize) -> RowState {
        match row {
            4 => RowState::REMOVED,
            6 => RowState::INVALID,
            _ => RowState::empty(),
        }
    }
}

fn styled() -> Grid<Styled, RecordingCanvas, ManualClock> {
    let mut g = Grid::new(
        GridConfig::default(),
        fields(&[100.0, 80.0]),
        Styled,
        RecordingCanvas::new(14.0),
        ManualClock::new(),
    );
    g.attach(Size::new(400.0, 300.0));
    g
}

fn count(canvas: &RecordingCanvas, text: &str) -> usize {
    canvas.texts().filter(|t| *t == text).count()
}

#[test]
fn focused_then_hovered_cells_are_drawn_last() {
    let (mut g, _) = grid(Table::flat(20), &[100.0, 80.0], GridConfig::default());
    g.set_focused_cell(Some(CellRef::new(3, 0)));
    g.pointer_move(cell_point(&g, 5, 1), Modifiers::empty());
    let changes = g.take_changes();
    let stats = g.apply_changes(changes);
    // Rows 0..13: eleven in view plus overscan.
    assert_eq!(stats.cells, 26);
    assert_eq!(stats.headers, 2);

    let c = g.canvas();
    let focus = c.position_of_text("3:0").unwrap();
    let hover = c.position_of_text("5:1").unwrap();
    assert!(c.position_of_text("12:1").unwrap() < focus);
    assert!(focus < hover);
    assert!(hover < c.position_of_text("f0").unwrap());
    assert!(c.position_of_text("13:0").is_none());
    assert_eq!(c.save_depth(), 0);
    assert!(g.pending_changes().is_empty());
}

#[test]
fn hovering_the_focused_cell_draws_it_once() {
    let (mut g, _) = grid(Table::flat(20), &[100.0, 80.0], GridConfig::default());
    g.set_focused_cell(Some(CellRef::new(3, 0)));
    g.pointer_move(cell_point(&g, 3, 0), Modifiers::empty());
    let stats = g.paint();
    assert_eq!(stats.cells, 26);
    assert_eq!(count(g.canvas(), "3:0"), 1);
}

#[test]
fn hovered_cell_expands_to_its_content() {
    let mut g = styled();
    g.pointer_move(cell_point_styled(&g, 1, 0), Modifiers::empty());
    g.paint();

    // 300px of content plus padding and border on both sides.
    let expanded = Rect::new(1.0, 53.0, 315.0, 79.0);
    let events = g.canvas().events();
    assert!(
        events.iter().any(|e| {
            matches!(e.op, CanvasOp::FillRect { .. }) && e.surface_rect() == Some(expanded)
        }),
        "full-width background"
    );
    let outline = events
        .iter()
        .rev()
        .find(|e| matches!(e.op, CanvasOp::StrokeRect { dash: Some(_), .. }))
        .expect("dashed hover outline");
    assert_eq!(outline.surface_rect(), Some(Rect::new(0.5, 52.5, 314.5, 78.5)));
}

#[test]
fn removed_and_invalid_rows_are_marked() {
    let mut g = styled();
    g.paint();
    let events = g.canvas().events();
    // Row 4 spans 104..130 in content coordinates.
    assert!(events.iter().any(|e| matches!(
        e.op,
        CanvasOp::StrokeLine { from, to, .. }
            if from == Point::new(0.0, 117.5) && to == Point::new(180.0, 117.5)
    )));
    let border = Rect::from_origin_size((0.5, 156.5), Size::new(179.0, 26.0));
    assert!(events.iter().any(|e| matches!(
        e.op,
        CanvasOp::StrokeRect { rect, dash: None, .. } if rect == border
    )));
}

#[test]
fn headers_show_sort_keys() {
    let (mut g, _) = grid(Table::flat(3), &[100.0, 80.0], GridConfig::default());
    g.toggle_sort(0, false);
    g.toggle_sort(1, true);
    g.toggle_sort(1, true);
    g.paint();
    let glyphs: Vec<Glyph> = g
        .canvas()
        .events()
        .iter()
        .filter_map(|e| match e.op {
            CanvasOp::FillGlyph { glyph, .. } => Some(glyph),
            _ => None,
        })
        .collect();
    assert_eq!(
        glyphs,
        [
            Glyph::Sort {
                dir: SortDir::Asc,
                vertical: false,
                secondary: false
            },
            Glyph::Sort {
                dir: SortDir::Desc,
                vertical: false,
                secondary: true
            },
        ]
    );
}

#[test]
fn tree_nodes_show_their_state() {
    let (mut g, _) = grid(Table::tree(&[0, 1, 0]), &[100.0, 80.0], GridConfig::default());
    g.paint();
    let glyph_of = |c: &RecordingCanvas| {
        c.events()
            .iter()
            .find_map(|e| match e.op {
                CanvasOp::FillGlyph { glyph, at, .. } => Some((glyph, at.x)),
                _ => None,
            })
    };
    // Indent 21 - font 14 - 4.
    assert_eq!(glyph_of(g.canvas()), Some((Glyph::TreeExpanded, 3.0)));

    g.source_mut().collapsed.push(0);
    g.canvas_mut().clear_events();
    g.paint();
    assert_eq!(glyph_of(g.canvas()).map(|(glyph, _)| glyph), Some(Glyph::TreeCollapsed));
}

#[test]
fn empty_grid_draws_only_headers() {
    let (mut g, _) = grid(Table::flat(0), &[100.0, 80.0], GridConfig::default());
    assert!(g.is_empty());
    assert_eq!(g.visible_row_range(), 0..0);
    let stats = g.paint();
    assert_eq!(stats.cells, 0);
    assert_eq!(stats.headers, 2);
    assert_eq!(g.canvas().texts().collect::<Vec<_>>(), ["f0", "f1"]);
}

#[test]
fn detached_grids_do_not_paint() {
    let (mut g, _) = grid(Table::flat(5), &[100.0, 80.0], GridConfig::default());
    g.detach();
    let stats = g.apply_changes(understory_grid::GridChanges::all());
    assert_eq!(stats.cells, 0);
    assert!(g.canvas().events().is_empty());
}

fn cell_point_styled(
    g: &Grid<Styled, RecordingCanvas, ManualClock>,
    row: usize,
    field: usize,
) -> Point {
    let rect = g.cell_rect(row, field);
    g.layout().grid_point(rect.center(), g.viewport().scroll())
}

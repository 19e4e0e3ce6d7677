// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for the grid integration tests.

#![allow(dead_code, reason = "Each test binary uses a subset of the fixtures")]

use kurbo::{Point, Size};
use understory_grid::{
    Align, Canvas, CellPaint, Field, FontRole, Grid, GridConfig, GridSource, RecordingCanvas,
    RowMoveRequest,
};
use understory_live_move::ManualClock;

/// Rows identified by id, optionally arranged as a tree.
///
/// `depths` lists the visible rows in pre-order; a row's children are the
/// deeper rows that follow it. Cells draw as `"<id>:<field>"`.
#[derive(Debug, Default)]
pub struct Table {
    pub ids: Vec<usize>,
    pub depths: Vec<usize>,
    pub tree: bool,
    pub collapsed: Vec<usize>,
    pub field_moves: Vec<(usize, usize)>,
    pub reorders: Vec<RowMoveRequest>,
    pub widths: Vec<(usize, f64)>,
    pub toggles: Vec<(usize, bool)>,
}

impl Table {
    pub fn flat(rows: usize) -> Self {
        Self {
            ids: (0..rows).collect(),
            depths: vec![0; rows],
            ..Self::default()
        }
    }

    pub fn tree(depths: &[usize]) -> Self {
        Self {
            ids: (0..depths.len()).collect(),
            depths: depths.to_vec(),
            tree: true,
            ..Self::default()
        }
    }
}

impl GridSource for Table {
    type Value = usize;

    fn row_count(&self) -> usize {
        self.ids.len()
    }

    fn cell_value(&self, row: usize, _field: usize) -> usize {
        self.ids[row]
    }

    fn draw_cell(
        &mut self,
        _row: usize,
        field: usize,
        value: &usize,
        canvas: &mut dyn Canvas,
        cell: &CellPaint,
    ) {
        let text = format!("{value}:{field}");
        let y = cell.size.height / 2.0;
        canvas.fill_text(&text, Point::new(0.0, y), Align::Left, FontRole::Text, cell.fg);
    }

    fn move_field(&mut self, from: usize, to: usize) {
        self.field_moves.push((from, to));
    }

    fn reorder_rows(&mut self, request: &RowMoveRequest) {
        self.reorders.push(request.clone());
        let block: Vec<(usize, usize)> = request
            .rows
            .clone()
            .map(|r| (self.ids[r], self.depths[r]))
            .collect();
        let depth_shift = match request.parent {
            Some(parent) => self.depths[parent] as isize + 1 - block[0].1 as isize,
            None => -(block[0].1 as isize),
        };
        self.ids.drain(request.rows.clone());
        self.depths.drain(request.rows.clone());
        for (i, (id, depth)) in block.into_iter().enumerate() {
            self.ids.insert(request.final_index + i, id);
            let depth = if self.tree {
                (depth as isize + depth_shift).max(0) as usize
            } else {
                depth
            };
            self.depths.insert(request.final_index + i, depth);
        }
    }

    fn set_field_width(&mut self, field: usize, width: f64) {
        self.widths.push((field, width));
    }

    fn toggle_collapsed(&mut self, row: usize, recursive: bool) {
        self.toggles.push((row, recursive));
        if let Some(i) = self.collapsed.iter().position(|r| *r == row) {
            self.collapsed.remove(i);
        } else {
            self.collapsed.push(row);
        }
    }

    fn is_tree(&self) -> bool {
        self.tree
    }

    fn row_depth(&self, row: usize) -> usize {
        self.depths[row]
    }

    fn row_parent(&self, row: usize) -> Option<usize> {
        let depth = self.depths[row];
        if depth == 0 {
            return None;
        }
        (0..row).rev().find(|r| self.depths[*r] < depth)
    }

    fn has_children(&self, row: usize) -> bool {
        self.depths
            .get(row + 1)
            .is_some_and(|d| *d > self.depths[row])
    }

    fn is_collapsed(&self, row: usize) -> bool {
        self.collapsed.contains(&row)
    }

    fn expanded_descendant_count(&self, row: usize) -> usize {
        let depth = self.depths[row];
        self.depths[row + 1..]
            .iter()
            .take_while(|d| **d > depth)
            .count()
    }
}

pub type TestGrid = Grid<Table, RecordingCanvas, ManualClock>;

/// Fields `f0..fN` with the given widths.
pub fn fields(widths: &[f64]) -> Vec<Field> {
    widths
        .iter()
        .enumerate()
        .map(|(i, w)| Field::new(format!("f{i}")).with_width(*w))
        .collect()
}

/// An attached 400×300 grid.
pub fn grid(table: Table, widths: &[f64], config: GridConfig) -> (TestGrid, ManualClock) {
    let clock = ManualClock::new();
    let mut grid = Grid::new(
        config,
        fields(widths),
        table,
        RecordingCanvas::new(14.0),
        clock.clone(),
    );
    grid.attach(Size::new(400.0, 300.0));
    (grid, clock)
}

/// Center of cell (`row`, `field`) in grid coordinates, at the current
/// scroll offset.
pub fn cell_point(grid: &TestGrid, row: usize, field: usize) -> Point {
    let rect = grid.cell_rect(row, field);
    grid.layout()
        .grid_point(rect.center(), grid.viewport().scroll())
}

/// A point inside the header cell of `field` in a horizontal grid, `dx`
/// pixels past its leading edge.
pub fn header_point(grid: &TestGrid, field: usize, dx: f64) -> Point {
    let layout = grid.layout();
    let g = layout.field(field).unwrap_or_default();
    let x = g.offset + dx + layout.border().x - grid.viewport().scroll().x;
    Point::new(x, layout.header().height() / 2.0)
}

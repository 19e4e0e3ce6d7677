// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understory_grid`: layout, virtual scrolling and painting.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size, Vec2};

use understory_grid::{
    Align, Canvas, CellPaint, Field, FontRole, Grid, GridConfig, GridLayout, GridSource,
    GridViewport, RecordingCanvas,
};
use understory_live_move::ManualClock;

struct Numbers(usize);

impl GridSource for Numbers {
    type Value = usize;

    fn row_count(&self) -> usize {
        self.0
    }

    fn cell_value(&self, row: usize, field: usize) -> usize {
        row * 31 + field
    }

    fn draw_cell(
        &mut self,
        _row: usize,
        _field: usize,
        value: &usize,
        canvas: &mut dyn Canvas,
        cell: &CellPaint,
    ) {
        let text = value.to_string();
        let at = Point::new(0.0, cell.size.height / 2.0);
        canvas.fill_text(&text, at, Align::Right, FontRole::Text, cell.fg);
    }
}

fn fields(n: usize) -> Vec<Field> {
    (0..n)
        .map(|i| Field::new(format!("col{i}")).with_width(60.0 + (i % 3) as f64 * 20.0))
        .collect()
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_layout");
    let container = Size::new(1280.0, 800.0);
    for &n in &[8_usize, 64] {
        let fs = fields(n);
        group.bench_with_input(BenchmarkId::new("fixed", n), &fs, |b, fs| {
            let config = GridConfig::default();
            b.iter(|| black_box(GridLayout::compute(&config, fs, 100_000, container, None)));
        });
        let stretch = GridConfig {
            auto_cols_w: true,
            ..GridConfig::default()
        };
        group.bench_with_input(BenchmarkId::new("stretch", n), &fs, |b, fs| {
            b.iter(|| black_box(GridLayout::compute(&stretch, fs, 100_000, container, None)));
        });
    }
    group.finish();
}

fn bench_scroll(c: &mut Criterion) {
    let config = GridConfig::default();
    let container = Size::new(1280.0, 800.0);
    let layout = GridLayout::compute(&config, &fields(8), 1_000_000, container, None);
    c.bench_function("grid_viewport_scroll", |b| {
        let mut viewport = GridViewport::new(&layout, config.overscan);
        let max = viewport.max_scroll().y;
        let mut y = 0.0;
        b.iter(|| {
            y = (y + 137.0) % max;
            viewport.set_scroll(Vec2::new(0.0, y));
            black_box(viewport.visible_rows())
        });
    });
}

fn bench_paint(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_paint");
    for &n in &[8_usize, 32] {
        let mut grid = Grid::new(
            GridConfig::default(),
            fields(n),
            Numbers(100_000),
            RecordingCanvas::new(14.0),
            ManualClock::new(),
        );
        grid.attach(Size::new(1280.0, 800.0));
        grid.scroll_to_row(50_000);
        group.bench_function(BenchmarkId::new("pass", n), |b| {
            b.iter(|| {
                grid.canvas_mut().clear_events();
                black_box(grid.paint())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layout, bench_scroll, bench_paint);
criterion_main!(benches);

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Column stretching and the resize freeze.

mod common;

use common::{Table, fields, grid};
use kurbo::{Point, Size};
use understory_grid::{
    Field, GridConfig, GridEvent, GridLayout, HitState, Modifiers, Overflow, ResizeFreeze,
    ResizeTarget,
};

fn stretch() -> GridConfig {
    GridConfig {
        auto_cols_w: true,
        ..GridConfig::default()
    }
}

fn sizes(layout: &GridLayout) -> Vec<f64> {
    layout.fields().iter().map(|g| g.size).collect()
}

#[test]
fn stretch_shares_free_width_by_minimum_width() {
    let fs = fields(&[100.0, 50.0]);
    let l = GridLayout::compute(&stretch(), &fs, 5, Size::new(400.0, 300.0), None);
    // The vertical scrollbar is always shown while stretching: 400 - 12 - 1.
    assert_eq!(l.overflow(), (Overflow::Auto, Overflow::Scroll));
    assert_eq!(l.client(), Size::new(388.0, 274.0));
    assert_eq!(sizes(&l), [258.0, 129.0]);
    assert_eq!(l.fields_extent(), 387.0);
    assert_eq!(l.content().width, 388.0);
}

#[test]
fn last_column_absorbs_what_capped_columns_leave() {
    let fs = vec![
        Field::new("a").with_width(100.0).with_bounds(22.0, 120.0),
        Field::new("b").with_width(50.0),
    ];
    let l = GridLayout::compute(&stretch(), &fs, 5, Size::new(400.0, 300.0), None);
    assert_eq!(sizes(&l), [120.0, 267.0]);
}

#[test]
fn freeze_suspends_stretch_and_holds_content_width() {
    let freeze = ResizeFreeze {
        widths: vec![60.0, 129.0],
        content_width: 388.0,
    };
    let l = GridLayout::compute(
        &stretch(),
        &fields(&[100.0, 50.0]),
        5,
        Size::new(400.0, 300.0),
        Some(&freeze),
    );
    assert_eq!(sizes(&l), [60.0, 129.0]);
    assert_eq!(l.content().width, 388.0);
    assert_eq!(l.overflow().1, Overflow::Auto);
}

#[test]
fn resizing_a_stretched_column_never_shrinks_content() {
    let (mut g, _) = grid(Table::flat(5), &[100.0, 50.0], stretch());
    assert_eq!(g.layout().content().width, 388.0);

    // Field 0 ends at content x 258, grid x 259.
    let p = Point::new(257.0, 13.0);
    g.pointer_move(p, Modifiers::empty());
    assert_eq!(
        g.hit_state(),
        HitState::ColResize {
            target: ResizeTarget::Field(0),
            grab: -2.0
        }
    );
    g.pointer_down(p, Modifiers::empty());

    g.pointer_move(Point::new(157.0, 13.0), Modifiers::empty());
    assert_eq!(g.fields()[0].width, 158.0);
    assert_eq!(sizes(g.layout()), [158.0, 129.0]);
    assert_eq!(g.layout().content().width, 388.0);

    g.pointer_up(Point::new(157.0, 13.0), Modifiers::empty());
    assert_eq!(g.source().widths, [(0, 158.0)]);
    assert!(
        g.drain_events()
            .contains(&GridEvent::FieldResized { field: 0, width: 158.0 })
    );
    // Stretch resumes once the resize is over.
    assert_eq!(g.layout().fields_extent(), 387.0);
    assert_eq!(g.hit_state(), HitState::None);
}

#[test]
fn resize_respects_field_bounds() {
    let (mut g, _) = grid(Table::flat(5), &[100.0, 50.0], GridConfig::default());
    // Field 0 ends at content x 100, grid x 101.
    g.pointer_move(Point::new(101.0, 13.0), Modifiers::empty());
    g.pointer_down(Point::new(101.0, 13.0), Modifiers::empty());
    g.pointer_move(Point::new(5.0, 13.0), Modifiers::empty());
    assert_eq!(g.fields()[0].width, Field::DEFAULT_MIN_WIDTH);
    g.pointer_up(Point::new(5.0, 13.0), Modifiers::empty());
    assert_eq!(g.layout().field(1).map(|f| f.offset), Some(Field::DEFAULT_MIN_WIDTH));
}

#[test]
fn cancelled_resize_restores_the_width() {
    let (mut g, _) = grid(Table::flat(5), &[100.0, 50.0], GridConfig::default());
    g.pointer_move(Point::new(101.0, 13.0), Modifiers::empty());
    g.pointer_down(Point::new(101.0, 13.0), Modifiers::empty());
    g.pointer_move(Point::new(181.0, 13.0), Modifiers::empty());
    assert_eq!(g.fields()[0].width, 180.0);
    g.cancel_interaction();
    assert_eq!(g.fields()[0].width, 100.0);
    assert_eq!(sizes(g.layout()), [100.0, 50.0]);
    assert!(g.source().widths.is_empty());
}

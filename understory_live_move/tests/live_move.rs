// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tiling, determinism and clamping of live-move sessions.

use understory_live_move::{LiveMove, MoveOutcome};

/// Small deterministic generator for sizes and pointer sweeps.
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1_u64 << 53) as f64
    }
}

fn sizes(seed: u64, n: usize) -> Vec<f64> {
    let mut rng = Lcg(seed);
    (0..n).map(|_| (5.0 + rng.next_f64() * 60.0).round()).collect()
}

/// Asserts the targets tile `[origin, origin + total)` without gaps or overlaps.
fn assert_tiles(mv: &LiveMove, sizes: &[f64], origin: f64) {
    let range = mv.range();
    let mut spans: Vec<(f64, f64)> = range
        .clone()
        .map(|i| (mv.target_of(i), sizes[i - range.start]))
        .collect();
    spans.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut expected = origin;
    for (offset, size) in spans {
        assert!(
            (offset - expected).abs() < 1e-9,
            "gap or overlap at {offset}, expected {expected}"
        );
        expected += size;
    }
}

#[test]
fn targets_always_tile_the_range() {
    for seed in 1..20 {
        let s = sizes(seed, 12);
        for (move_index, move_count) in [(0, 1), (5, 1), (11, 1), (3, 4), (0, 12)] {
            let mut mv = LiveMove::start(move_index, move_count, 0..12, 40.0, |i| s[i]);
            let total: f64 = s.iter().sum();
            let mut rng = Lcg(seed * 31 + move_index as u64);
            for _ in 0..50 {
                let offset = rng.next_f64() * (total + 200.0) - 100.0;
                mv.update(offset);
                assert_tiles(&mv, &s, 40.0);
            }
        }
    }
}

#[test]
fn same_inputs_give_same_insertion_sequence() {
    let s = sizes(7, 30);
    let sweep: Vec<f64> = {
        let mut rng = Lcg(99);
        (0..200).map(|_| rng.next_f64() * 1500.0).collect()
    };
    let run = || {
        let mut mv = LiveMove::start(4, 3, 0..30, 0.0, |i| s[i]);
        sweep
            .iter()
            .map(|offset| {
                mv.update(*offset);
                mv.insertion_index()
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn extremes_clamp_to_first_and_last_insertion_points() {
    let s = [30.0, 40.0, 50.0, 60.0];
    let mut mv = LiveMove::start(1, 2, 0..4, 0.0, |i| s[i]);

    mv.update(-1e9);
    assert_eq!(mv.insertion_index(), 0);
    assert_eq!(mv.moving_offset(), 0.0);
    assert_eq!(mv.stop().final_index, 0);

    mv.update(1e9);
    assert_eq!(mv.insertion_index(), 4);
    assert_eq!(mv.moving_offset(), 90.0);
    let out = mv.stop();
    assert_eq!(out.insert_before, 4);
    assert_eq!(out.final_index, 2);
}

#[test]
fn multi_element_block_moves_rigidly() {
    let s = [10.0, 20.0, 30.0, 40.0, 50.0];
    let mut mv = LiveMove::start(1, 2, 0..5, 0.0, |i| s[i]);
    assert_eq!(mv.moving_size(), 50.0);

    let offsets = mv.update(57.0).to_vec();
    assert_eq!(offsets[1], 57.0);
    assert_eq!(offsets[2], 77.0);

    // The block's combined size displaces element 3 as one unit.
    assert_eq!(mv.insertion_index(), 4);
    assert_eq!(mv.target_of(3), 10.0);
    assert_eq!(mv.target_of(1), 50.0);
    assert_eq!(mv.target_of(2), 70.0);
    assert_eq!(mv.target_of(4), 100.0);
}

#[test]
fn dragging_a_column_past_its_neighbours() {
    let widths = [120.0, 90.0, 100.0, 80.0, 80.0, 70.0];
    let mut mv = LiveMove::start(2, 1, 0..6, 0.0, |i| widths[i]);
    let rest: Vec<f64> = mv.positions().to_vec();

    // Just short of column 4's midpoint: only column 3 has moved.
    mv.update(210.0 + 119.0);
    assert_eq!(mv.insertion_index(), 4);
    assert_eq!(mv.offset_of(3), rest[3] - 100.0);
    assert_eq!(mv.offset_of(4), rest[4]);

    // Past it: columns 3 and 4 both shifted left by column 2's width.
    mv.update(210.0 + 121.0);
    assert_eq!(mv.offset_of(3), rest[3] - 100.0);
    assert_eq!(mv.offset_of(4), rest[4] - 100.0);
    assert_eq!(mv.offset_of(5), rest[5]);
    assert_eq!(mv.offset_of(2), 331.0);

    assert_eq!(
        mv.stop(),
        MoveOutcome {
            from: 2,
            count: 1,
            insert_before: 5,
            final_index: 4,
        }
    );
}

#[test]
fn returning_to_the_start_is_unchanged() {
    let mut mv = LiveMove::start(2, 1, 0..5, 0.0, |_| 10.0);
    mv.update(45.0);
    mv.update(20.0);
    assert!(mv.stop().is_unchanged());
}

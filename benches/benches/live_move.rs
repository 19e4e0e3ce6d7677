// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understory_live_move`.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use understory_live_move::{AnimatedMove, LiveMove, ManualClock};

fn size_of(i: usize) -> f64 {
    20.0 + (i % 7) as f64 * 3.0
}

fn bench_start(c: &mut Criterion) {
    let mut group = c.benchmark_group("live_move_start");
    for &n in &[100_usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("flat", n), &n, |b, &n| {
            b.iter(|| black_box(LiveMove::start(n / 2, 3, 0..n, 0.0, size_of)));
        });
        group.bench_with_input(BenchmarkId::new("grouped", n), &n, |b, &n| {
            b.iter(|| {
                black_box(LiveMove::start_grouped(
                    n / 2,
                    3,
                    0..n,
                    0.0,
                    size_of,
                    |i| 1 + i % 4,
                ))
            });
        });
    }
    group.finish();
}

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("live_move_sweep");
    for &n in &[100_usize, 1_000] {
        let session = LiveMove::start(0, 1, 0..n, 0.0, size_of);
        let end = (0..n).map(size_of).sum::<f64>();
        group.bench_with_input(BenchmarkId::new("update", n), &n, |b, _| {
            b.iter_batched(
                || session.clone(),
                |mut live| {
                    let mut offset = 0.0;
                    while offset < end {
                        black_box(live.update(offset));
                        offset += 5.0;
                    }
                    live.stop()
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_with_input(BenchmarkId::new("animated", n), &n, |b, _| {
            b.iter_batched(
                || {
                    let clock = ManualClock::new();
                    (AnimatedMove::new(session.clone(), clock.clone()), clock)
                },
                |(mut anim, clock)| {
                    let mut offset = 0.0;
                    while offset < end {
                        black_box(anim.update(offset));
                        clock.advance(0.016);
                        anim.tick();
                        offset += 5.0;
                    }
                    anim.stop()
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_start, bench_sweep);
criterion_main!(benches);

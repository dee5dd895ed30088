//! Tick-planning benchmarks for gridbot_core.
//!
//! Run with: `cargo bench -p gridbot_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gridbot_core::prelude::*;
use gridbot_test_utils::fixtures::SnapshotBuilder;

/// A mid-game 16x16 position: full economy on both sides plus a
/// handful of combat units, around 40 units total.
fn midgame_snapshot() -> WorldSnapshot {
    let mut b = SnapshotBuilder::new(16, 16);

    b.depot(PlayerId(0), 2, 2);
    b.barracks(PlayerId(0), 4, 2);
    for i in 0..5 {
        b.worker(PlayerId(0), i, 5);
    }
    for i in 0..4 {
        b.ranged(PlayerId(0), i, 7);
        b.light(PlayerId(0), i, 8);
    }

    b.depot(PlayerId(1), 13, 13);
    b.barracks(PlayerId(1), 11, 13);
    for i in 0..5 {
        b.worker(PlayerId(1), 15 - i, 10);
    }
    for i in 0..4 {
        b.ranged(PlayerId(1), 15 - i, 9);
    }

    for i in 0..4 {
        b.pile(7, 6 + i);
        b.pile(8, 6 + i);
    }

    b.resources(PlayerId(0), 12);
    b.resources(PlayerId(1), 12);
    b.build()
}

pub fn plan_tick_benchmark(c: &mut Criterion) {
    let snapshot = midgame_snapshot();
    let mut agent = Agent::new(UnitTypeCatalog::standard()).expect("standard catalog resolves");

    c.bench_function("plan_tick_midgame_16x16", |b| {
        b.iter(|| black_box(agent.get_action(PlayerId(0), black_box(&snapshot))))
    });

    let empty = SnapshotBuilder::new(8, 8).build();
    c.bench_function("plan_tick_empty_8x8", |b| {
        b.iter(|| black_box(agent.get_action(PlayerId(0), black_box(&empty))))
    });
}

criterion_group!(benches, plan_tick_benchmark);
criterion_main!(benches);

use criterion::{criterion_group, criterion_main, Criterion};
use rand::prelude::*;
use rand::rngs::StdRng;
use std::hint::black_box;
use steal_four::board::State;
use steal_four::threat;
use steal_four::win::{self, Avx2, RunDetector, Scalar};
use steal_four::zobrist::ZobristTable;

/// Play ~20 random moves on a fresh board to create a realistic mid-game position.
/// Uses a fixed seed for reproducibility across benchmark runs.
fn setup_midgame(table: &ZobristTable) -> State<'_> {
    let mut state = State::new(table);
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..20 {
        let moves = state.available_moves();
        if state.status().is_terminal() || moves.is_empty() {
            break;
        }
        let mv = moves.get(rng.random_range(0..moves.len())).unwrap();
        state.step(mv).unwrap();
    }
    state
}

fn random_masks(n: usize) -> Vec<(u64, u64)> {
    let mut rng = StdRng::seed_from_u64(7);
    (0..n)
        .map(|_| {
            let occupied = rng.random::<u64>() & rng.random::<u64>() & ((1u64 << 63) - 1);
            let split = rng.random::<u64>();
            (occupied & split, occupied & !split)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Microbenchmarks
// ---------------------------------------------------------------------------

fn bench_available_moves(c: &mut Criterion) {
    let table = ZobristTable::standard();
    let state = setup_midgame(&table);
    c.bench_function("available_moves", |b| {
        b.iter(|| black_box(black_box(&state).available_moves()))
    });
}

fn bench_iterate_moves(c: &mut Criterion) {
    let table = ZobristTable::standard();
    let state = setup_midgame(&table);
    c.bench_function("iterate_moves", |b| {
        b.iter(|| black_box(&state).available_moves().iter().map(|m| m.index() as u32).sum::<u32>())
    });
}

fn bench_step(c: &mut Criterion) {
    let table = ZobristTable::standard();
    let state = setup_midgame(&table);
    let mv = state.available_moves().first().unwrap();
    c.bench_function("step_unchecked", |b| {
        b.iter(|| {
            let mut next = *black_box(&state);
            next.step_unchecked(mv);
            black_box(next)
        })
    });
}

fn bench_status(c: &mut Criterion) {
    let table = ZobristTable::standard();
    let state = setup_midgame(&table);
    c.bench_function("status", |b| b.iter(|| black_box(black_box(&state).status())));
}

fn bench_connects_four(c: &mut Criterion) {
    let masks = random_masks(1024);
    c.bench_function("connects_four_scalar", |b| {
        b.iter(|| masks.iter().filter(|(m, _)| Scalar.connects_four(black_box(*m))).count())
    });
    if let Some(avx2) = Avx2::detect() {
        c.bench_function("connects_four_avx2", |b| {
            b.iter(|| masks.iter().filter(|(m, _)| avx2.connects_four(black_box(*m))).count())
        });
    }
    c.bench_function("connects_four_selected", |b| {
        b.iter(|| masks.iter().filter(|(m, _)| win::connects_four(black_box(*m))).count())
    });
}

fn bench_threats(c: &mut Criterion) {
    let masks = random_masks(1024);
    c.bench_function("threats_scalar", |b| {
        b.iter(|| masks.iter().fold(0u64, |acc, &(m, t)| acc ^ threat::scalar(m, t)))
    });
    if let Some(avx2) = Avx2::detect() {
        c.bench_function("threats_avx2", |b| {
            b.iter(|| {
                masks
                    .iter()
                    .fold(0u64, |acc, &(m, t)| acc ^ avx2.potentially_winning_moves(m, t))
            })
        });
    }
}

// ---------------------------------------------------------------------------
// Integration benchmarks
// ---------------------------------------------------------------------------

fn bench_random_playout(c: &mut Criterion) {
    let table = ZobristTable::standard();
    c.bench_function("random_playout", |b| {
        b.iter(|| {
            let mut state = State::new(&table);
            let mut rng = StdRng::seed_from_u64(123);
            while !state.status().is_terminal() {
                let moves = state.available_moves();
                let mv = moves.get(rng.random_range(0..moves.len())).unwrap();
                state.step_unchecked(mv);
            }
            black_box(state.hash())
        })
    });
}

criterion_group!(
    benches,
    bench_available_moves,
    bench_iterate_moves,
    bench_step,
    bench_status,
    bench_connects_four,
    bench_threats,
    bench_random_playout,
);
criterion_main!(benches);

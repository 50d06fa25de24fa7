//! Criterion benchmarks for the optimistic-value LP.
//! Focus sizes: S in {3, 8}, known pairs in {10, 50, 200} (corners always included).

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use envelope::sample::{draw_simplex_points, HyperplaneCfg, ReplayToken};
use envelope::{compute_optimistic_value, envelope_value, simplex_corner_vertices, Vertex};

fn known_pairs(s: usize, count: usize, seed: u64) -> Vec<Vertex> {
    let tok = ReplayToken::new(seed, 0);
    let hs = envelope::sample::draw_hyperplanes(HyperplaneCfg::default(), s, 6, tok);
    let mut known = simplex_corner_vertices(&hs).unwrap();
    for p in draw_simplex_points(s, count, tok.next_index()) {
        let value = envelope_value(&hs, &p).unwrap();
        known.push(Vertex::new(p, value));
    }
    known
}

fn bench_optimistic(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_optimistic_value");
    for &s in &[3usize, 8] {
        for &count in &[10usize, 50, 200] {
            let known = known_pairs(s, count, 44);
            group.bench_with_input(BenchmarkId::new(format!("S{s}"), count), &known, |b, known| {
                b.iter_batched(
                    || draw_simplex_points(s, 1, ReplayToken::new(45, 0)).remove(0),
                    |p| {
                        let _bound = compute_optimistic_value(&p, known).unwrap();
                    },
                    BatchSize::SmallInput,
                )
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_optimistic);
criterion_main!(benches);

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use sweeptrace::events::RectFilters;
use sweeptrace::generators::{grid, scatter, staircase};
use sweeptrace::trace::{dominance, hull, pair_sweep, prefix_pairs, rect_count};

fn bench_dominance(c: &mut Criterion) {
    let mut group = c.benchmark_group("dominance");
    for n in [50, 200, 500] {
        let points = scatter(n, 128, 1);
        group.bench_with_input(BenchmarkId::from_parameter(n), &points, |b, points| {
            b.iter(|| dominance::trace(points));
        });
    }
    group.finish();
}

fn bench_hull(c: &mut Criterion) {
    let mut group = c.benchmark_group("hull");
    for n in [50, 200, 500] {
        let points = scatter(n, 128, 2);
        group.bench_with_input(BenchmarkId::from_parameter(n), &points, |b, points| {
            b.iter(|| hull::trace(points));
        });
    }
    group.finish();
}

fn bench_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairs");
    for n in [25, 100] {
        let points = staircase(n);
        group.bench_with_input(BenchmarkId::new("sweep", n), &points, |b, points| {
            b.iter(|| pair_sweep::trace(points));
        });
        group.bench_with_input(BenchmarkId::new("prefix", n), &points, |b, points| {
            b.iter(|| prefix_pairs::trace(points));
        });
    }
    group.finish();
}

fn bench_rect_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("rect_count");
    let filters = RectFilters::default();
    for side in [4, 6] {
        let points = grid(side, side);
        group.bench_with_input(BenchmarkId::from_parameter(side), &points, |b, points| {
            b.iter(|| rect_count::trace(points, &filters));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_dominance,
    bench_hull,
    bench_pairs,
    bench_rect_count
);
criterion_main!(benches);

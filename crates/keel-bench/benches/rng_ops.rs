//! Criterion micro-benchmarks for the xorshift generator.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use keel_core::Xorshift32;

fn bench_next_u32(c: &mut Criterion) {
    let mut rng = Xorshift32::new(42);
    c.bench_function("xorshift_next_u32", |b| {
        b.iter(|| black_box(rng.next_u32()));
    });
}

fn bench_range(c: &mut Criterion) {
    let mut rng = Xorshift32::new(42);
    c.bench_function("xorshift_range", |b| {
        b.iter(|| black_box(rng.range(black_box(16), black_box(4096))));
    });
}

fn bench_unit_f32(c: &mut Criterion) {
    let mut rng = Xorshift32::new(42);
    c.bench_function("xorshift_unit_f32", |b| {
        b.iter(|| black_box(rng.unit_f32()));
    });
}

criterion_group!(benches, bench_next_u32, bench_range, bench_unit_f32);
criterion_main!(benches);

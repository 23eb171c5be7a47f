//! Criterion benchmarks comparing the trivial and construct/destruct
//! transfer strategies on the same payload.

use std::hint::black_box;
use std::mem::MaybeUninit;

use criterion::{criterion_group, criterion_main, Criterion};
use keel_transfer::{copy, relocate_to_vec, ConstructDestruct, Trivial};

const LEN: usize = 64 * 1024;

fn payload() -> Vec<u64> {
    (0..LEN as u64).collect()
}

fn bench_copy_trivial(c: &mut Criterion) {
    let src = payload();
    let mut dst = vec![MaybeUninit::<u64>::uninit(); LEN];
    c.bench_function("copy_trivial_64k_u64", |b| {
        b.iter(|| {
            let out = copy::<Trivial, _>(&mut dst, &src, LEN);
            black_box(out[LEN - 1]);
        });
    });
}

fn bench_copy_construct(c: &mut Criterion) {
    let src = payload();
    let mut dst = vec![MaybeUninit::<u64>::uninit(); LEN];
    c.bench_function("copy_construct_64k_u64", |b| {
        b.iter(|| {
            let out = copy::<ConstructDestruct, _>(&mut dst, &src, LEN);
            black_box(out[LEN - 1]);
        });
    });
}

fn bench_grow_strings(c: &mut Criterion) {
    let strings: Vec<String> = (0..4096).map(|i| format!("entry-{i}")).collect();
    c.bench_function("relocate_construct_4k_strings", |b| {
        b.iter_batched(
            || strings.clone(),
            |v| black_box(relocate_to_vec::<ConstructDestruct, _>(v, 8192)),
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_copy_trivial,
    bench_copy_construct,
    bench_grow_strings
);
criterion_main!(benches);

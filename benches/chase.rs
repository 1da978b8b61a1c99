use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pagechase::{fill_offset_array, run_sample, OffsetMode, Strategy};
use rand::rngs::SmallRng;
use rand::SeedableRng;

const MEMORY_SIZE: usize = 8 * 1024 * 1024;
const STRIDE: usize = 4096 / 8;

fn bench_fill_offset_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_offset_array");
    let len = MEMORY_SIZE / 8;

    group.bench_function("strided", |b| {
        let mut rng = SmallRng::seed_from_u64(1);
        b.iter(|| {
            black_box(fill_offset_array(
                OffsetMode::Strided,
                black_box(len),
                STRIDE,
                &mut rng,
            ))
        })
    });

    group.bench_function("randomized", |b| {
        let mut rng = SmallRng::seed_from_u64(1);
        b.iter(|| {
            black_box(fill_offset_array(
                OffsetMode::Randomized,
                black_box(len),
                STRIDE,
                &mut rng,
            ))
        })
    });

    group.finish();
}

fn bench_chase(c: &mut Criterion) {
    let mut group = c.benchmark_group("chase");
    group.sample_size(10);

    let mut rng = SmallRng::seed_from_u64(1);
    let strided = fill_offset_array(OffsetMode::Strided, MEMORY_SIZE / 8, STRIDE, &mut rng);
    let randomized = fill_offset_array(OffsetMode::Randomized, MEMORY_SIZE / 8, STRIDE, &mut rng);

    group.bench_function("default_alloc_strided", |b| {
        b.iter(|| black_box(run_sample(&Strategy::Default, &strided, MEMORY_SIZE, 1)))
    });

    group.bench_function("default_alloc_randomized", |b| {
        b.iter(|| black_box(run_sample(&Strategy::Default, &randomized, MEMORY_SIZE, 1)))
    });

    group.finish();
}

criterion_group!(benches, bench_fill_offset_array, bench_chase);
criterion_main!(benches);

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;
use zorder_region::aabb::AABB;
use zorder_region::morton::{Dim2, Morton2D};

fn bench_morton_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("morton_encode");

    let mut rng = StdRng::seed_from_u64(42);
    let mut coords = Vec::new();

    coords.push((0u32, 0u32));
    coords.push((0xffff_ffffu32, 0xffff_ffffu32));

    for _ in 0..10 {
        coords.push((rng.random::<u32>(), rng.random::<u32>()));
    }

    for (x, y) in coords {
        group.bench_with_input(
            BenchmarkId::new("encode", format!("{x}_{y}")),
            &(x, y),
            |b, &(x, y)| {
                b.iter(|| Morton2D::encode(black_box([x, y])));
            },
        );
    }
    group.finish();
}

fn bench_morton_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("morton_decode");

    let mut rng = StdRng::seed_from_u64(43);
    let mut codes = Vec::new();

    codes.push(Morton2D::encode([0, 0]));
    codes.push(Morton2D::encode([0xffff_ffff, 0xffff_ffff]));

    for _ in 0..10 {
        codes.push(Morton2D::encode([rng.random::<u32>(), rng.random::<u32>()]));
    }

    for code in codes {
        group.bench_with_input(BenchmarkId::new("decode", code.raw()), &code, |b, &code| {
            b.iter(|| code.decode());
        });
    }
    group.finish();
}

fn bench_aabb_to_intervals(c: &mut Criterion) {
    let mut group = c.benchmark_group("aabb_to_intervals");
    let mut rng = StdRng::seed_from_u64(44);

    for width_bits in [4u32, 8, 12, 16] {
        let span = 1u64 << width_bits;
        let min = rng.random_range(0..(u64::MAX - span));
        let aabb: AABB<Dim2> = AABB::new(min, min + span);
        group.throughput(Throughput::Elements(span));
        group.bench_with_input(
            BenchmarkId::new("to_intervals", width_bits),
            &aabb,
            |b, aabb| {
                b.iter(|| black_box(*aabb).to_intervals());
            },
        );
    }
    group.finish();
}

fn bench_aabb_to_cells(c: &mut Criterion) {
    let mut group = c.benchmark_group("aabb_to_cells");
    let mut rng = StdRng::seed_from_u64(45);

    for width_bits in [4u32, 8, 12, 16] {
        let span = 1u64 << width_bits;
        let min = rng.random_range(0..(u64::MAX - span));
        let aabb: AABB<Dim2> = AABB::new(min, min + span);
        group.throughput(Throughput::Elements(span));
        group.bench_with_input(BenchmarkId::new("to_cells", width_bits), &aabb, |b, aabb| {
            b.iter(|| black_box(*aabb).to_cells());
        });
    }
    group.finish();
}

fn bench_region_algebra(c: &mut Criterion) {
    let mut group = c.benchmark_group("region_algebra");
    let a: AABB<Dim2> = AABB::new(0, 1 << 16);
    let b: AABB<Dim2> = AABB::new(1 << 14, (1 << 16) + (1 << 14));
    let ra = a.to_intervals();
    let rb = b.to_intervals();

    group.bench_function("union", |bencher| {
        bencher.iter(|| black_box(&ra).union(black_box(&rb)));
    });
    group.bench_function("intersection", |bencher| {
        bencher.iter(|| black_box(&ra).intersection(black_box(&rb)));
    });
    group.bench_function("difference", |bencher| {
        bencher.iter(|| black_box(&ra).difference(black_box(&rb)));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_morton_encode,
    bench_morton_decode,
    bench_aabb_to_intervals,
    bench_aabb_to_cells,
    bench_region_algebra,
);
criterion_main!(benches);

// benches/resample_benchmark.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shape_dataset::generator::{ShapeGenerator, ShapeKind};
use shape_dataset::geometry::Point2;
use shape_dataset::resample::resample_closed;

fn create_test_outlines(rng: &mut impl Rng) -> Vec<Vec<Point2>> {
    const NUM_BENCH_OUTLINES: usize = 100;
    let mut outlines = Vec::with_capacity(NUM_BENCH_OUTLINES);
    for _ in 0..NUM_BENCH_OUTLINES {
        let arms = rng.gen_range(5..10);
        let outer = rng.gen_range(0.1..1.0);
        let inner = outer / rng.gen_range(1.5..4.0);
        outlines.push(ShapeGenerator::star_points(arms, outer, inner));
    }
    outlines
}

fn resample_benchmark_fn(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let outlines = create_test_outlines(&mut rng);

    let mut group = c.benchmark_group("ShapeOperations");

    group.bench_function("resample_100_stars_to_128", |b| {
        let mut outline_iter = outlines.iter().cycle();
        b.iter(|| {
            let outline = outline_iter.next().unwrap();
            resample_closed(black_box(outline), black_box(128))
        })
    });

    group.bench_function("generate_random_shape_each_kind", |b| {
        let mut kind_iter = ShapeKind::ALL.iter().cycle();
        b.iter(|| {
            let kind = *kind_iter.next().unwrap();
            ShapeGenerator::random_shape(black_box(kind), None, &mut rng)
        })
    });
    group.finish();
}

criterion_group!(benches, resample_benchmark_fn);
criterion_main!(benches);

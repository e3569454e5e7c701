use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use nalgebra::{Matrix3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use geopotential::acceleration::GravityField;
use geopotential::gravity_model::GravityModel;
use geopotential::normalization::NormalizationTable;
use geopotential::triangular::TriangularTable;

/// Body-fixed position uniform on the sphere, radius in LEO..GEO.
#[inline]
fn rand_position(rng: &mut StdRng) -> Vector3<f64> {
    let r = rng.random_range(6_600.0..42_000.0);
    let sin_lat: f64 = rng.random_range(-1.0..1.0);
    let lon = rng.random::<f64>() * std::f64::consts::TAU;
    let cos_lat = (1.0 - sin_lat * sin_lat).sqrt();
    Vector3::new(r * cos_lat * lon.cos(), r * cos_lat * lon.sin(), r * sin_lat)
}

/// Full degree/order model with small random coefficients (timing does not depend on values).
fn synthetic_model(degree: usize, rng: &mut StdRng) -> GravityModel {
    let mut c = TriangularTable::zeros(degree);
    let mut s = TriangularTable::zeros(degree);
    c[(0, 0)] = 1.0;
    for n in 2..=degree {
        for m in 0..=n {
            c[(n, m)] = rng.random_range(-1e-6..1e-6);
            if m > 0 {
                s[(n, m)] = rng.random_range(-1e-6..1e-6);
            }
        }
    }
    GravityModel::new(398_600.441_5, 6_378.136_3, degree, degree, c, s).unwrap()
}

/// Single evaluations at increasing degree and order.
fn bench_single(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xDEADBEEF);
    let samples = 1_000usize;
    let rot = Matrix3::identity();

    for degree in [4usize, 20, 70, 180] {
        let field = GravityField::new(synthetic_model(degree, &mut rng)).unwrap();
        let mut scratch = field.scratch();

        c.bench_function(&format!("gravity_field/acceleration_n{degree}"), |b| {
            b.iter_batched(
                || (0..samples).map(|_| rand_position(&mut rng)).collect::<Vec<_>>(),
                |positions| {
                    for p in positions {
                        let a = field
                            .acceleration_with_scratch(&mut scratch, black_box(&p), &rot)
                            .unwrap();
                        black_box(a);
                    }
                },
                BatchSize::LargeInput,
            )
        });
    }
}

/// Parallel batch over the rayon pool.
fn bench_batch(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xBADF00D);
    let field = GravityField::new(synthetic_model(70, &mut rng)).unwrap();
    let positions: Vec<_> = (0..10_000).map(|_| rand_position(&mut rng)).collect();
    let rot = Matrix3::identity();

    c.bench_function("gravity_field/batch_n70_10k", |b| {
        b.iter(|| {
            let out = field.acceleration_batch(black_box(&positions), &rot);
            black_box(out.ok());
        })
    });
}

/// One-off cost of the normalization factors.
fn bench_normalization(c: &mut Criterion) {
    c.bench_function("gravity_field/normalization_table_n360", |b| {
        b.iter(|| black_box(NormalizationTable::new(black_box(360), 360).unwrap()))
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_single, bench_batch, bench_normalization
);
criterion_main!(benches);

mod common;

use geopotential::acceleration::GravityField;
use geopotential::constants::{EARTH_MU, EARTH_RADIUS};
use geopotential::gravity_model::GravityModel;
use geopotential::triangular::TriangularTable;
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::{assert_vector_close, random_position};

/// Degree/order 8 field with every coefficient of order 1e-3, so that each tesseral
/// and sectorial term contributes visibly to the acceleration.
fn rough_model(seed: u64) -> GravityModel {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut c = TriangularTable::zeros(8);
    let mut s = TriangularTable::zeros(8);
    c[(0, 0)] = 1.0;
    for n in 2..=8 {
        for m in 0..=n {
            c[(n, m)] = rng.random_range(-1e-3..1e-3);
            if m > 0 {
                s[(n, m)] = rng.random_range(-1e-3..1e-3);
            }
        }
    }
    GravityModel::new(EARTH_MU, EARTH_RADIUS, 8, 8, c, s).unwrap()
}

/// Central-difference gradient of the potential.
fn numerical_gradient(field: &GravityField, p: &Vector3<f64>, h: f64) -> Vector3<f64> {
    let mut grad = Vector3::zeros();
    for i in 0..3 {
        let mut step = Vector3::zeros();
        step[i] = h;
        let up = field.potential(&(p + step)).unwrap();
        let down = field.potential(&(p - step)).unwrap();
        grad[i] = (up - down) / (2.0 * h);
    }
    grad
}

#[test]
fn test_acceleration_is_gradient_of_potential() {
    let field = GravityField::new(rough_model(7)).unwrap();
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);

    for _ in 0..50 {
        let p = random_position(&mut rng, 6_700.0, 20_000.0);
        let accel = field.body_fixed_acceleration(&p).unwrap();
        let grad = numerical_gradient(&field, &p, 1e-2);
        assert_vector_close(&accel, &grad, 1e-8);

        // perturbation alone, with the central term removed on both sides
        let r = p.norm();
        let central = -EARTH_MU / (r * r * r) * p;
        assert_vector_close(&(accel - central), &(grad - central), 1e-5);
    }
}

#[test]
fn test_egm96_gradient_near_the_pole() {
    let field = GravityField::new(GravityModel::egm96_low_degree()).unwrap();

    for p in [
        Vector3::new(1e-3, 2e-3, 7_100.0),
        Vector3::new(-150.0, 80.0, -6_950.0),
    ] {
        let accel = field.body_fixed_acceleration(&p).unwrap();
        let grad = numerical_gradient(&field, &p, 1e-2);
        assert_vector_close(&accel, &grad, 1e-8);
    }
}

#[test]
fn test_sectorial_term_points_along_longitude() {
    // C̄22 only: U = μ/r · ρ² · P̄22(sin φ) C̄22 cos 2λ, P̄22 = (√15 / 2) cos² φ
    let c22 = 2.4e-6;
    let model = GravityModel::new(
        EARTH_MU,
        EARTH_RADIUS,
        2,
        2,
        TriangularTable::zeros(2),
        TriangularTable::zeros(2),
    )
    .unwrap()
    .with_coefficient(0, 0, 1.0, 0.0)
    .unwrap()
    .with_coefficient(2, 2, c22, 0.0)
    .unwrap();
    let field = GravityField::new(model).unwrap();

    // At λ = 45°, ∂U/∂λ = -√15 μ/r ρ² C̄22 sin 2λ, i.e. a pure westward pull.
    let r = 7_000.0_f64;
    let p = Vector3::new(r, r, 0.0) / 2f64.sqrt();
    let accel = field.body_fixed_acceleration(&p).unwrap();

    let rho2 = (EARTH_RADIUS / r).powi(2);
    let east = Vector3::new(-1.0, 1.0, 0.0) / 2f64.sqrt();
    let expected_east = -15f64.sqrt() * EARTH_MU / (r * r) * rho2 * c22;
    approx::assert_relative_eq!(accel.dot(&east), expected_east, max_relative = 1e-10);
}

#![allow(dead_code)]

use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::Rng;

/// Relative closeness of two vectors, measured on the norm of their difference.
pub fn assert_vector_close(actual: &Vector3<f64>, expected: &Vector3<f64>, rel: f64) {
    let err = (actual - expected).norm() / expected.norm();
    assert!(
        err <= rel,
        "vectors differ: actual = {actual:?}, expected = {expected:?}, relative error = {err:e}"
    );
}

/// Body-fixed position drawn uniformly on the sphere, radius in `[r_min, r_max)`.
pub fn random_position(rng: &mut StdRng, r_min: f64, r_max: f64) -> Vector3<f64> {
    let r = rng.random_range(r_min..r_max);
    let sin_lat: f64 = rng.random_range(-1.0..1.0);
    let lon = rng.random_range(0.0..std::f64::consts::TAU);
    let cos_lat = (1.0 - sin_lat * sin_lat).sqrt();
    Vector3::new(r * cos_lat * lon.cos(), r * cos_lat * lon.sin(), r * sin_lat)
}

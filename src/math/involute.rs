//! Involute-of-circle evaluation.
//!
//! With base radius `rb`, unwind angle `φ` and initial (phase) angle `φ0`:
//!
//! ```text
//! x = rb · (cos φ + (φ − φ0) · sin φ)
//! y = rb · (sin φ − (φ − φ0) · cos φ)
//! ```
//!
//! `φ0 = 0` gives the textbook involute.

use nalgebra::Point2;

use crate::math::sampling::lin_space;

/// Point on the involute of a circle of radius `rb`.
pub fn involute_point(rb: f64, phi: f64, phi0: f64) -> Point2<f64> {
    let (sin, cos) = phi.sin_cos();
    let unwound = phi - phi0;
    Point2::new(rb * (cos + unwound * sin), rb * (sin - unwound * cos))
}

/// Sample an involute uniformly in angle over `[0, end_angle]`.
pub fn sample_involute(rb: f64, phi0: f64, end_angle: f64, samples: usize) -> Vec<Point2<f64>> {
    lin_space(0.0, end_angle, samples)
        .into_iter()
        .map(|phi| involute_point(rb, phi, phi0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn involute_starts_on_base_circle() {
        let p = involute_point(2.0, 0.0, 0.0);
        assert!((p.x - 2.0).abs() < 1e-15);
        assert!(p.y.abs() < 1e-15);
    }

    #[test]
    fn involute_radius_grows_with_unwound_length() {
        // |p|² = rb² (1 + (φ − φ0)²)
        let rb = 1.5;
        for &phi in &[0.5, 3.0, 10.0] {
            let p = involute_point(rb, phi, -1.0);
            let expected = rb * (1.0 + (phi + 1.0) * (phi + 1.0)).sqrt();
            assert!((p.coords.norm() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn sample_involute_is_deterministic() {
        let a = sample_involute(1.5288, 0.0, 17.7195, 1000);
        let b = sample_involute(1.5288, 0.0, 17.7195, 1000);
        assert_eq!(a.len(), 1000);
        assert_eq!(a, b);
    }
}

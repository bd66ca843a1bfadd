//! Uniform sampling and nearest-point search.
//!
//! Both helpers are deterministic: the same inputs always produce the same
//! sequence, and ties resolve to the earliest index.

use nalgebra::Point2;

/// Generate `steps` evenly spaced points between `start` and `end` (inclusive).
///
/// `steps` is clamped to at least 2 so both endpoints are always present.
pub fn lin_space(start: f64, end: f64, steps: usize) -> Vec<f64> {
    let steps = steps.max(2);
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + i as f64 * step).collect()
}

/// Index of the point whose distance to `center` deviates least from `radius`.
///
/// Linear scan; the first minimum wins ties. Returns `None` for an empty slice
/// or when every deviation is NaN.
pub fn nearest_to_circle(points: &[Point2<f64>], center: &Point2<f64>, radius: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, p) in points.iter().enumerate() {
        let deviation = ((p - center).norm() - radius).abs();
        let better = match best {
            Some((_, d)) => deviation < d,
            None => !deviation.is_nan(),
        };
        if better {
            best = Some((i, deviation));
        }
    }
    best.map(|(i, _)| i)
}

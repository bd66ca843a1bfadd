//! Orbiting-scroll transform.
//!
//! The orbiting wrap is the fixed wrap reflected through the origin and
//! shifted by the orbiting radius along the static orbit angle
//! `Θ = fie − θ_crank − π/2`:
//!
//! ```text
//! (x, y) ↦ (−x + ro·cos Θ, −y + ro·sin Θ)
//! ```

use std::f64::consts::FRAC_PI_2;

use nalgebra::{Matrix2, Point2, Vector2};

use crate::domain::{Millimeters, ScrollProfile, ScrollSide};
use crate::error::{GeometryError, Stage};

/// Crank angle used for the static (non-animated) orbit position.
pub const CRANK_ANGLE: f64 = 0.0;

/// Affine map from fixed-scroll to orbiting-scroll coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitTransform {
    /// Point reflection through the origin (`−I`).
    pub linear: Matrix2<f64>,
    pub translation: Vector2<f64>,
}

impl OrbitTransform {
    pub fn new(orbiting_radius: Millimeters, fie: f64) -> Self {
        let theta = fie - CRANK_ANGLE - FRAC_PI_2;
        let (sin, cos) = theta.sin_cos();
        let ro = orbiting_radius.get();
        Self {
            linear: -Matrix2::identity(),
            translation: Vector2::new(ro * cos, ro * sin),
        }
    }

    pub fn apply(&self, p: &Point2<f64>) -> Point2<f64> {
        Point2::from(self.linear * p.coords + self.translation)
    }
}

/// Derive the orbiting-scroll profile from the fixed one.
pub fn orbit_profile(
    fixed: &ScrollProfile,
    orbiting_radius: Millimeters,
    fie: f64,
) -> Result<ScrollProfile, GeometryError> {
    let transform = OrbitTransform::new(orbiting_radius, fie);
    if !(transform.translation.x.is_finite() && transform.translation.y.is_finite()) {
        return Err(GeometryError::degenerate(
            Stage::OrbitTransform,
            format!("non-finite orbit offset (ro={orbiting_radius}, fie={fie})"),
        ));
    }
    tracing::debug!(
        dx = transform.translation.x,
        dy = transform.translation.y,
        "orbiting profile transform"
    );
    Ok(fixed.map_points(ScrollSide::Orbiting, |p| transform.apply(p)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Curve, CurveKind};

    #[test]
    fn linear_part_is_an_involution() {
        let t = OrbitTransform::new(Millimeters(2.668), 17.7195);
        assert_eq!(t.linear * t.linear, Matrix2::identity());

        let p = Point2::new(1.25, -3.5);
        let twice = t.linear * (t.linear * p.coords);
        assert_eq!(twice, p.coords);
    }

    #[test]
    fn reference_offset() {
        let t = OrbitTransform::new(Millimeters(2.6682645608080757), 17.7195);
        assert!((t.translation.x - -2.413274652895218).abs() < 1e-9);
        assert!((t.translation.y - -1.1383062927691212).abs() < 1e-9);
    }

    #[test]
    fn points_are_reflected_then_shifted() {
        let line = Curve::new(CurveKind::Line, vec![Point2::new(1.0, 2.0), Point2::new(-3.0, 0.5)]);
        let fixed = ScrollProfile {
            side: ScrollSide::Fixed,
            arc1: line.clone(),
            arc2: line.clone(),
            inv1: line.clone(),
            inv2: line.clone(),
            line,
        };
        let orbiting = orbit_profile(&fixed, Millimeters(2.0), FRAC_PI_2).unwrap();
        // Θ = 0, so the shift is (ro, 0).
        assert_eq!(orbiting.side, ScrollSide::Orbiting);
        assert_eq!(orbiting.line.points, vec![Point2::new(1.0, -2.0), Point2::new(5.0, -0.5)]);
        assert_eq!(orbiting.point_count(), fixed.point_count());

        let err = orbit_profile(&fixed, Millimeters(f64::NAN), FRAC_PI_2).unwrap_err();
        assert_eq!(err.stage(), Stage::OrbitTransform);
    }
}

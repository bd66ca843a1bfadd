//! Fixed-scroll profile construction.
//!
//! Steps:
//!
//! 1. connect the two tip arcs with their tangent line segment
//! 2. sample both involutes densely from angle 0 to their end angles
//! 3. trim each involute at the sample closest to its arc (first minimum wins)
//! 4. sweep each arc from the tangent-line endpoint to the trimmed involute start
//!
//! The five resulting curves are kept separate; each has its own point order.

use std::f64::consts::TAU;

use nalgebra::{Point2, Vector2};

use crate::domain::{
    ArcGeometry, Curve, CurveKind, DesignParameters, FittedDimensions, ScrollProfile, ScrollSide,
    SolverSettings,
};
use crate::error::{GeometryError, Stage};
use crate::math::{lin_space, nearest_to_circle, sample_involute};

/// Relative slack on `d ≥ r1 + r2`.
///
/// The solved arcs touch each other, so the centre distance equals the radius
/// sum up to rounding.
const TANGENCY_REL_TOL: f64 = 1e-9;

/// Endpoints of the line joining the two tip arcs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentSegment {
    /// Attachment point on arc 1.
    pub start: Point2<f64>,
    /// Attachment point on arc 2.
    pub end: Point2<f64>,
}

/// Build the fixed-scroll profile (millimeters).
pub fn build_fixed_profile(
    dims: &FittedDimensions,
    arcs: &ArcGeometry,
    params: &DesignParameters,
    settings: &SolverSettings,
) -> Result<ScrollProfile, GeometryError> {
    let rb = dims.base_radius.get();
    let (c1, r1) = (arcs.center_a1, arcs.radius_a1.get());
    let (c2, r2) = (arcs.center_a2, arcs.radius_a2.get());

    let tangent = tangent_segment(&c1, r1, &c2, r2)?;

    let inv1 = sample_involute(rb, params.fi0, params.fie, settings.involute_samples);
    let inv2 = sample_involute(rb, params.fo0, params.foe, settings.involute_samples);
    let inv1 = trim_at_arc(inv1, &c1, r1, "inv1")?;
    let inv2 = trim_at_arc(inv2, &c2, r2, "inv2")?;

    let arc1 = sweep_arc(&c1, r1, &tangent.start, &inv1[0], settings.inner_arc_samples);
    let arc2 = sweep_arc(&c2, r2, &tangent.end, &inv2[0], settings.outer_arc_samples);

    tracing::debug!(
        inv1 = inv1.len(),
        inv2 = inv2.len(),
        arc1 = arc1.len(),
        arc2 = arc2.len(),
        "fixed profile built"
    );

    Ok(ScrollProfile {
        side: ScrollSide::Fixed,
        arc1: Curve::new(CurveKind::Arc, arc1),
        arc2: Curve::new(CurveKind::Arc, arc2),
        inv1: Curve::new(CurveKind::Involute, inv1),
        inv2: Curve::new(CurveKind::Involute, inv2),
        line: Curve::new(CurveKind::Line, vec![tangent.start, tangent.end]),
    })
}

/// Tangent segment between two circles that lie on opposite sides of it.
///
/// The segment leaves circle 1 at angle `atan2(Δ) + acos((r1 + r2) / d)` and
/// runs perpendicular to that radius for `√(d² − (r1 + r2)²)`.
pub fn tangent_segment(
    c1: &Point2<f64>,
    r1: f64,
    c2: &Point2<f64>,
    r2: f64,
) -> Result<TangentSegment, GeometryError> {
    let delta = c2 - c1;
    let d = delta.norm();
    let r_sum = r1 + r2;

    if !(d.is_finite() && r_sum.is_finite()) {
        return Err(GeometryError::degenerate(
            Stage::ProfileBuild,
            format!("non-finite arc geometry (d={d}, r1+r2={r_sum})"),
        ));
    }
    if d == 0.0 {
        return Err(GeometryError::degenerate(Stage::ProfileBuild, "arc centres coincide"));
    }
    if d < r_sum * (1.0 - TANGENCY_REL_TOL) {
        return Err(GeometryError::degenerate(
            Stage::ProfileBuild,
            format!("arcs overlap: centre distance {d} < r1 + r2 = {r_sum}"),
        ));
    }

    let alpha = delta.y.atan2(delta.x);
    let beta = (r_sum / d).min(1.0).acos();
    let theta = alpha + beta;
    let length = (d * d - r_sum * r_sum).max(0.0).sqrt();

    let (sin, cos) = theta.sin_cos();
    let start = c1 + Vector2::new(cos, sin) * r1;
    let end = start + Vector2::new(sin, -cos) * length;
    Ok(TangentSegment { start, end })
}

/// Drop the involute samples that lie before its tangency with the arc.
fn trim_at_arc(
    mut samples: Vec<Point2<f64>>,
    center: &Point2<f64>,
    radius: f64,
    name: &str,
) -> Result<Vec<Point2<f64>>, GeometryError> {
    let Some(idx) = nearest_to_circle(&samples, center, radius) else {
        return Err(GeometryError::degenerate(
            Stage::ProfileBuild,
            format!("{name} has no sample with a finite distance to its arc"),
        ));
    };
    Ok(samples.split_off(idx))
}

/// Sample an arc from the tangent attachment `from` to the involute start `to`.
///
/// The sweep always runs counter-clockwise: if the end angle is not strictly
/// greater than the start angle, one full turn is added.
fn sweep_arc(
    center: &Point2<f64>,
    radius: f64,
    from: &Point2<f64>,
    to: &Point2<f64>,
    samples: usize,
) -> Vec<Point2<f64>> {
    let start = angle_about(center, from);
    let mut end = angle_about(center, to);
    if end <= start {
        end += TAU;
    }
    lin_space(start, end, samples)
        .into_iter()
        .map(|a| {
            let (sin, cos) = a.sin_cos();
            Point2::new(center.x + radius * cos, center.y + radius * sin)
        })
        .collect()
}

fn angle_about(center: &Point2<f64>, p: &Point2<f64>) -> f64 {
    (p.y - center.y).atan2(p.x - center.x)
}

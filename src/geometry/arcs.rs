//! Tip-arc solve.
//!
//! The scroll tip blends the inner and outer involutes with two circular arcs.
//! Given the involute start points `Pi` (at `fis`) and `Po` (at `fos`) and the
//! displacement `d = Pi − Po`, the larger arc radius `r2` solves
//!
//! ```text
//! wa·r² + wb·r + wc = 0
//! wa = cos(fos − fis) + 1
//! wb = ro·wa − dx·(sin fos − sin fis) + dy·(cos fos − cos fis)
//! wc = ro·(dx·sin fis − dy·cos fis) − |d|²/2
//! ```
//!
//! and `r1` follows linearly from `r2`. Each centre sits on the normal of its
//! involute at the start point. All terms are homogeneous in length, so the
//! solve runs directly in millimeters.

use nalgebra::Point2;

use crate::domain::{ArcGeometry, FittedDimensions, Millimeters};
use crate::error::{GeometryError, Stage};
use crate::math::involute_point;

/// Phase offset applied to the outer involute's start angle (radians).
///
/// The two involutes wind in opposite senses; the outer start point is taken on
/// the involute with this phase.
pub const OUTER_START_OFFSET: f64 = 1.39626;

/// Below this, `wa` is treated as zero (start angles exactly opposed).
const WA_EPS: f64 = 1e-12;

/// Solve the two tip-arc radii and centres.
pub fn solve_arcs(dims: &FittedDimensions, fis: f64, fos: f64) -> Result<ArcGeometry, GeometryError> {
    let rb = dims.base_radius.get();
    let ro = dims.orbiting_radius.get();

    let (sin_is, cos_is) = fis.sin_cos();
    let (sin_os, cos_os) = fos.sin_cos();

    let p_is = involute_point(rb, fis, 0.0);
    let p_os = involute_point(rb, fos, -OUTER_START_OFFSET);
    let d = p_is - p_os;
    let (dx, dy) = (d.x, d.y);
    let d_sq = dx * dx + dy * dy;

    let wa = (fos - fis).cos() + 1.0;
    if wa.abs() < WA_EPS {
        return Err(GeometryError::degenerate(
            Stage::ArcSolve,
            format!("start angles fis={fis} and fos={fos} are opposed; arc equation has no quadratic term"),
        ));
    }
    let wb = ro * wa - dx * (sin_os - sin_is) + dy * (cos_os - cos_is);
    let wc = ro * (dx * sin_is - dy * cos_is) - d_sq / 2.0;

    let discriminant = wb * wb - 4.0 * wa * wc;
    if discriminant < 0.0 {
        return Err(GeometryError::degenerate(
            Stage::ArcSolve,
            format!("negative discriminant ({discriminant:e}) in r_a2 solve; check input angles"),
        ));
    }
    let r2 = (-wb + discriminant.sqrt()) / (2.0 * wa);

    let numerator = 0.5 * d_sq + r2 * (dx * sin_os - dy * cos_os);
    let denominator = r2 * wa + dx * sin_is - dy * cos_is;
    let r1 = numerator / denominator;

    for (name, r) in [("r_a1", r1), ("r_a2", r2)] {
        if !(r.is_finite() && r > 0.0) {
            return Err(GeometryError::degenerate(
                Stage::ArcSolve,
                format!("{name}={r} is not a positive finite radius"),
            ));
        }
    }

    let center_a1 = Point2::new(p_is.x - sin_is * r1, p_is.y + cos_is * r1);
    let center_a2 = Point2::new(p_os.x - sin_os * r2, p_os.y + cos_os * r2);

    tracing::debug!(r_a1 = r1, r_a2 = r2, discriminant, "tip arcs solved");

    Ok(ArcGeometry {
        radius_a1: Millimeters(r1),
        radius_a2: Millimeters(r2),
        center_a1,
        center_a2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DesignParameters, SolverSettings};
    use crate::fit::fit_volume;

    fn reference_dims() -> FittedDimensions {
        fit_volume(&DesignParameters::default(), &SolverSettings::default()).unwrap()
    }

    #[test]
    fn reference_design_matches_known_arcs() {
        let p = DesignParameters::default();
        let arcs = solve_arcs(&reference_dims(), p.fis, p.fos).unwrap();

        assert!((arcs.radius_a1.get() - 3.498148987929597).abs() < 1e-6);
        assert!((arcs.radius_a2.get() - 0.8298844271215237).abs() < 1e-6);
        assert!((arcs.center_a1.x - -1.528796537819384).abs() < 1e-6);
        assert!((arcs.center_a1.y - 1.3047178608738852).abs() < 1e-6);
        assert!((arcs.center_a2.x - 1.9760823431901309).abs() < 1e-6);
        assert!((arcs.center_a2.y - -1.2345137692167132).abs() < 1e-6);
    }

    #[test]
    fn consistent_inputs_give_positive_non_overlapping_arcs() {
        let dims = reference_dims();
        for &(fis, fos) in &[(3.14159, 0.296706), (3.14159, 1.0), (1.0, 0.296706), (2.0, 0.5), (0.0, 0.296706)] {
            let arcs = solve_arcs(&dims, fis, fos).unwrap();
            let r1 = arcs.radius_a1.get();
            let r2 = arcs.radius_a2.get();
            assert!(r1 > 0.0 && r2 > 0.0);
            let distance = (arcs.center_a2 - arcs.center_a1).norm();
            assert!(distance >= r1 + r2 - 1e-9 * (r1 + r2), "fis={fis} fos={fos}");
        }
    }

    #[test]
    fn radii_differ_by_orbiting_radius() {
        let dims = reference_dims();
        let arcs = solve_arcs(&dims, 2.0, 0.5).unwrap();
        let gap = arcs.radius_a1.get() - arcs.radius_a2.get();
        assert!((gap - dims.orbiting_radius.get()).abs() < 1e-9);
    }

    #[test]
    fn opposed_start_angles_are_degenerate() {
        let err = solve_arcs(&reference_dims(), 0.0, std::f64::consts::PI).unwrap_err();
        assert!(matches!(
            err,
            GeometryError::DegenerateGeometry { stage: Stage::ArcSolve, .. }
        ));
    }

    #[test]
    fn solve_is_deterministic() {
        let dims = reference_dims();
        assert_eq!(solve_arcs(&dims, 3.14159, 0.296706), solve_arcs(&dims, 3.14159, 0.296706));
    }
}

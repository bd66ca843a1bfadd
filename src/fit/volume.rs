//! Volume fitting: choose the base radius whose displaced volume matches the target.
//!
//! For each candidate base radius `rb` (meters) we derive:
//!
//! - wall thickness `ts = rb · (fi0 − fo0)`
//! - scroll height `h = ts / ratio`
//! - orbiting radius `ro = rb · π − ts`
//! - displaced volume `V = −π · h · rb · ro · (3π − 2·fie + fi0 + fo0)`
//!
//! and keep the candidate with the smallest `|V − target/2|`. Results are
//! converted to millimeters exactly once, when a candidate is recorded.

use std::f64::consts::PI;

use crate::domain::{DesignParameters, FittedDimensions, Meters, SolverSettings};
use crate::error::GeometryError;
use crate::fit::radius_grid::RadiusGrid;

const CC_PER_M3: f64 = 1e6;

/// Dimensions derived from one base-radius candidate, all in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub base_radius: f64,
    pub wall_thickness: f64,
    pub scroll_height: f64,
    pub orbiting_radius: f64,
    pub displaced_volume_cc: f64,
}

impl Candidate {
    pub fn evaluate(rb: f64, params: &DesignParameters) -> Self {
        let ts = rb * (params.fi0 - params.fo0);
        let h = ts / params.thickness_height_ratio;
        let ro = rb * PI - ts;
        let wrap = 3.0 * PI - 2.0 * params.fie + params.fi0 + params.fo0;
        let volume_m3 = -PI * h * rb * ro * wrap;
        Self {
            base_radius: rb,
            wall_thickness: ts,
            scroll_height: h,
            orbiting_radius: ro,
            displaced_volume_cc: volume_m3 * CC_PER_M3,
        }
    }

    fn into_dimensions(self, fit_error_cc: f64) -> FittedDimensions {
        FittedDimensions {
            base_radius: Meters(self.base_radius).to_millimeters(),
            wall_thickness: Meters(self.wall_thickness).to_millimeters(),
            scroll_height: Meters(self.scroll_height).to_millimeters(),
            orbiting_radius: Meters(self.orbiting_radius).to_millimeters(),
            displaced_volume_cc: self.displaced_volume_cc,
            fit_error_cc,
        }
    }
}

/// Scan the base-radius grid and return the best-fitting dimensions (millimeters).
///
/// The first candidate with the minimum error wins ties. With
/// `settings.early_exit_tolerance_cc = Some(tol)` the scan stops as soon as a
/// candidate's error drops below `tol`; with `None` every candidate is visited.
pub fn fit_volume(
    params: &DesignParameters,
    settings: &SolverSettings,
) -> Result<FittedDimensions, GeometryError> {
    validate_parameters(params)?;
    let grid = RadiusGrid::new(params.rb_min, params.rb_max, params.rb_step)?;
    let target_cc = params.target_volume_cc / 2.0;

    let mut best: Option<(Candidate, f64)> = None;
    let mut visited = 0usize;
    for rb in grid.iter() {
        visited += 1;
        let candidate = Candidate::evaluate(rb, params);
        let error = (candidate.displaced_volume_cc - target_cc).abs();

        let better = match best {
            Some((_, best_error)) => error < best_error,
            None => !error.is_nan(),
        };
        if better {
            best = Some((candidate, error));
        }

        if let Some(tol) = settings.early_exit_tolerance_cc {
            if error < tol {
                break;
            }
        }
    }

    let Some((candidate, error)) = best else {
        return Err(GeometryError::InvalidRange {
            reason: format!("no base-radius candidate in [{}, {}) produced a finite volume", params.rb_min, params.rb_max),
        });
    };

    tracing::debug!(
        visited,
        rb_m = candidate.base_radius,
        volume_cc = candidate.displaced_volume_cc,
        error_cc = error,
        "volume fit complete"
    );

    Ok(candidate.into_dimensions(error))
}

fn validate_parameters(params: &DesignParameters) -> Result<(), GeometryError> {
    for (name, value) in params.named_values() {
        if !value.is_finite() {
            return Err(GeometryError::InvalidParameter {
                name,
                reason: format!("{value} is not a finite number"),
            });
        }
    }
    if params.thickness_height_ratio <= 0.0 {
        return Err(GeometryError::InvalidParameter {
            name: "thickness_height_ratio",
            reason: format!("{} must be positive", params.thickness_height_ratio),
        });
    }
    Ok(())
}

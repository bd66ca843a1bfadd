//! Shared geometry pipeline used by the CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! volume fit -> tip arcs -> fixed profile -> orbiting profile -> safety check
//!
//! Each stage is a pure function of its inputs; the first failure ends the run.

use serde::{Deserialize, Serialize};

use crate::domain::{
    ArcGeometry, DesignParameters, FittedDimensions, SafetyResult, ScrollProfile, SolverSettings,
};
use crate::error::GeometryError;
use crate::fit::fit_volume;
use crate::geometry::{build_fixed_profile, orbit_profile, solve_arcs};
use crate::safety::{WallLoad, check_safety};

/// All computed outputs of a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutput {
    pub params: DesignParameters,
    pub settings: SolverSettings,
    pub dimensions: FittedDimensions,
    pub arcs: ArcGeometry,
    pub fixed: ScrollProfile,
    pub orbiting: ScrollProfile,
    pub safety: SafetyResult,
}

/// Execute the full pipeline and return the computed outputs.
pub fn run_pipeline(
    params: &DesignParameters,
    settings: &SolverSettings,
) -> Result<RunOutput, GeometryError> {
    // 1) Fit the base radius to the target volume (meters in, millimeters out).
    let dimensions = fit_volume(params, settings)?;

    // 2) Solve the tip arcs.
    let arcs = solve_arcs(&dimensions, params.fis, params.fos)?;

    // 3) Build the fixed wrap.
    let fixed = build_fixed_profile(&dimensions, &arcs, params, settings)?;

    // 4) Derive the orbiting wrap.
    let orbiting = orbit_profile(&fixed, dimensions.orbiting_radius, params.fie)?;

    // 5) Check the wall against the applied pressure.
    let safety = check_safety(&WallLoad {
        wall_thickness: dimensions.wall_thickness.get(),
        scroll_height: dimensions.scroll_height.get(),
        pressure: params.pressure,
        elastic_modulus: params.elastic_modulus,
        yield_strength: params.yield_strength,
    });

    tracing::info!(
        rb_mm = dimensions.base_radius.get(),
        fixed_points = fixed.point_count(),
        safe = safety.is_safe(),
        "pipeline complete"
    );

    Ok(RunOutput {
        params: params.clone(),
        settings: settings.clone(),
        dimensions,
        arcs,
        fixed,
        orbiting,
        safety,
    })
}

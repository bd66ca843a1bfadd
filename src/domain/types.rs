//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed by value from one pipeline stage to the next
//! - exported to JSON/DXF
//! - reloaded later for plotting

use std::path::PathBuf;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::domain::units::{Meters, Millimeters};

/// Raw design inputs.
///
/// Angles are in radians, base-radius bounds in meters, pressure and material
/// properties in N/mm².
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignParameters {
    /// Final (suction) volume in cc; the fitter targets half of it per pocket pair.
    pub target_volume_cc: f64,
    /// Initial angle of the inner involute.
    pub fi0: f64,
    /// Initial angle of the outer involute.
    pub fo0: f64,
    /// End angle of the inner involute.
    pub fie: f64,
    /// End angle of the outer involute.
    pub foe: f64,
    /// Starting angle of the inner involute (tip arc attachment).
    pub fis: f64,
    /// Starting angle of the outer involute (tip arc attachment).
    pub fos: f64,
    /// Wall thickness divided by scroll height.
    pub thickness_height_ratio: f64,
    pub rb_min: Meters,
    pub rb_max: Meters,
    pub rb_step: Meters,
    /// Pressure acting on the wrap walls.
    pub pressure: f64,
    /// Young's modulus of the wrap material.
    pub elastic_modulus: f64,
    pub yield_strength: f64,
}

impl Default for DesignParameters {
    fn default() -> Self {
        Self {
            target_volume_cc: 6.0,
            fi0: 0.0,
            fo0: -1.39626,
            fie: 17.7195,
            foe: 17.7195,
            fis: 3.14159,
            fos: 0.296706,
            thickness_height_ratio: 0.25,
            rb_min: Meters(1e-4),
            rb_max: Meters(4e-3),
            rb_step: Meters(1e-7),
            pressure: 1.8,
            elastic_modulus: 73_000.0,
            yield_strength: 280.0,
        }
    }
}

impl DesignParameters {
    /// All scalar inputs with their names, in declaration order.
    pub fn named_values(&self) -> [(&'static str, f64); 14] {
        [
            ("target_volume_cc", self.target_volume_cc),
            ("fi0", self.fi0),
            ("fo0", self.fo0),
            ("fie", self.fie),
            ("foe", self.foe),
            ("fis", self.fis),
            ("fos", self.fos),
            ("thickness_height_ratio", self.thickness_height_ratio),
            ("rb_min", self.rb_min.get()),
            ("rb_max", self.rb_max.get()),
            ("rb_step", self.rb_step.get()),
            ("pressure", self.pressure),
            ("elastic_modulus", self.elastic_modulus),
            ("yield_strength", self.yield_strength),
        ]
    }
}

/// Numerical knobs that have no physical derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Stop the base-radius scan once the volume error drops below this (cc).
    ///
    /// `None` scans the full range.
    pub early_exit_tolerance_cc: Option<f64>,
    /// Samples per involute, from angle 0 to the end angle.
    pub involute_samples: usize,
    /// Samples along the inner tip arc (arc1).
    pub inner_arc_samples: usize,
    /// Samples along the outer tip arc (arc2).
    pub outer_arc_samples: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            early_exit_tolerance_cc: Some(1e-3),
            involute_samples: 1000,
            inner_arc_samples: 600,
            outer_arc_samples: 300,
        }
    }
}

/// Best-fit scroll dimensions (millimeters).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedDimensions {
    pub base_radius: Millimeters,
    pub wall_thickness: Millimeters,
    pub scroll_height: Millimeters,
    pub orbiting_radius: Millimeters,
    pub displaced_volume_cc: f64,
    /// `|displaced_volume_cc - target_volume_cc / 2|`.
    pub fit_error_cc: f64,
}

/// Tip arcs blending the two involutes (millimeters).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcGeometry {
    pub radius_a1: Millimeters,
    pub radius_a2: Millimeters,
    pub center_a1: Point2<f64>,
    pub center_a2: Point2<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveKind {
    Involute,
    Arc,
    Line,
}

/// An ordered polyline. Point order is the drawing/export direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub kind: CurveKind,
    pub points: Vec<Point2<f64>>,
}

impl Curve {
    pub fn new(kind: CurveKind, points: Vec<Point2<f64>>) -> Self {
        Self { kind, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Which wrap a profile belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollSide {
    Fixed,
    Orbiting,
}

impl ScrollSide {
    pub fn display_name(self) -> &'static str {
        match self {
            ScrollSide::Fixed => "Fixed scroll",
            ScrollSide::Orbiting => "Orbiting scroll",
        }
    }

    /// File name used for the DXF export.
    pub fn dxf_file_name(self) -> &'static str {
        match self {
            ScrollSide::Fixed => "fixed_scroll.dxf",
            ScrollSide::Orbiting => "orbiting_scroll.dxf",
        }
    }
}

/// The five boundary curves of one scroll wrap (millimeters).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollProfile {
    pub side: ScrollSide,
    pub arc1: Curve,
    pub arc2: Curve,
    pub inv1: Curve,
    pub inv2: Curve,
    pub line: Curve,
}

impl ScrollProfile {
    /// Curves in canonical order: arc1, arc2, inv1, inv2, line.
    pub fn curves(&self) -> [(&'static str, &Curve); 5] {
        [
            ("arc1", &self.arc1),
            ("arc2", &self.arc2),
            ("inv1", &self.inv1),
            ("inv2", &self.inv2),
            ("line", &self.line),
        ]
    }

    /// Build a new profile by mapping every point, preserving curve identity and order.
    pub fn map_points<F>(&self, side: ScrollSide, f: F) -> ScrollProfile
    where
        F: Fn(&Point2<f64>) -> Point2<f64>,
    {
        let map = |c: &Curve| Curve::new(c.kind, c.points.iter().map(&f).collect());
        ScrollProfile {
            side,
            arc1: map(&self.arc1),
            arc2: map(&self.arc2),
            inv1: map(&self.inv1),
            inv2: map(&self.inv2),
            line: map(&self.line),
        }
    }

    pub fn point_count(&self) -> usize {
        self.curves().iter().map(|(_, c)| c.len()).sum()
    }

    /// Axis-aligned bounds `(min, max)` over all curves.
    pub fn bounds(&self) -> Option<(Point2<f64>, Point2<f64>)> {
        let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for (_, curve) in self.curves() {
            for p in &curve.points {
                min.x = min.x.min(p.x);
                min.y = min.y.min(p.y);
                max.x = max.x.max(p.x);
                max.y = max.y.max(p.y);
            }
        }
        if min.x.is_finite() && min.y.is_finite() && max.x.is_finite() && max.y.is_finite() {
            Some((min, max))
        } else {
            None
        }
    }
}

/// Outcome of the factor-of-safety sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "UPPERCASE")]
pub enum SafetyResult {
    Safe {
        factor_of_safety: f64,
        /// N/mm².
        allowable_pressure: f64,
        /// mm.
        max_deflection: f64,
    },
    Fail {
        reason: String,
    },
}

impl SafetyResult {
    pub fn is_safe(&self) -> bool {
        matches!(self, SafetyResult::Safe { .. })
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from defaults, an optional parameter file and CLI flags.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub params: DesignParameters,
    pub settings: SolverSettings,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    /// Directory receiving `fixed_scroll.dxf` and `orbiting_scroll.dxf`.
    pub dxf_dir: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            params: DesignParameters::default(),
            settings: SolverSettings::default(),
            plot: true,
            plot_width: 80,
            plot_height: 32,
            dxf_dir: None,
            export_json: None,
        }
    }
}

//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - length units at stage boundaries (`Meters`, `Millimeters`)
//! - design inputs and solver knobs (`DesignParameters`, `SolverSettings`)
//! - stage outputs (`FittedDimensions`, `ArcGeometry`, `ScrollProfile`, `SafetyResult`)

pub mod types;
pub mod units;

pub use types::*;
pub use units::*;

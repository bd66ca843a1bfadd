//! Input/output helpers.
//!
//! - CAD export of scroll profiles (`dxf`)
//! - design-parameter JSON read/write (`params`)
//! - run JSON read/write (`run`)

pub mod dxf;
pub mod params;
pub mod run;

pub use dxf::*;
pub use params::*;
pub use run::*;

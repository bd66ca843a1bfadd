//! Scroll wrap geometry.
//!
//! - tip-arc solve (`arcs`)
//! - fixed-scroll profile construction (`profile`)
//! - orbiting-scroll transform (`orbit`)

pub mod arcs;
pub mod orbit;
pub mod profile;

pub use arcs::*;
pub use orbit::*;
pub use profile::*;

//! Base-radius fitting.
//!
//! Responsibilities:
//!
//! - enumerate the candidate base radii on a fixed grid
//! - evaluate the displaced volume for each candidate
//! - keep the candidate closest to the target (first minimum wins)

pub mod radius_grid;
pub mod volume;

pub use radius_grid::*;
pub use volume::*;

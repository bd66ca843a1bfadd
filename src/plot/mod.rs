//! Terminal rendering of scroll profiles.

pub mod ascii;
pub mod viewport;

pub use ascii::*;
pub use viewport::*;

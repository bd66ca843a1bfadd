//! Mathematical utilities: involute evaluation and sampling helpers.

pub mod involute;
pub mod sampling;

pub use involute::*;
pub use sampling::*;

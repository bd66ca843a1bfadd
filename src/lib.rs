//! `scroll-profile` library crate.
//!
//! The binary (`scroll`) is a thin wrapper around this library so that:
//!
//! - core geometry is testable without spawning processes
//! - the CLI and TUI share one pipeline
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod geometry;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
pub mod safety;
pub mod tui;

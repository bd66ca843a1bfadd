//! Read/write run JSON files.
//!
//! Run JSON is the portable representation of a computed design:
//! parameters, solver settings, fitted dimensions, tip arcs, both profiles and
//! the safety result. `scroll plot --run` reloads it without recomputing.

use std::fs::File;
use std::path::Path;

use crate::app::pipeline::RunOutput;
use crate::error::AppError;

/// Write a run JSON file.
pub fn write_run_json(path: &Path, run: &RunOutput) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create run JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, run)
        .map_err(|e| AppError::new(2, format!("Failed to write run JSON: {e}")))?;
    tracing::info!(path = %path.display(), "wrote run JSON");
    Ok(())
}

/// Read a run JSON file.
pub fn read_run_json(path: &Path) -> Result<RunOutput, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open run JSON '{}': {e}", path.display())))?;
    let run: RunOutput =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid run JSON: {e}")))?;
    Ok(run)
}

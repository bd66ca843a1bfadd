//! Read/write design-parameter JSON files.
//!
//! A parameter file may list any subset of the fourteen design parameters;
//! missing fields fall back to the reference design defaults.

use std::fs::File;
use std::path::Path;

use crate::domain::DesignParameters;
use crate::error::AppError;

/// Read a parameter JSON file.
pub fn read_params_json(path: &Path) -> Result<DesignParameters, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open parameter JSON '{}': {e}", path.display())))?;
    let params: DesignParameters = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid parameter JSON '{}': {e}", path.display())))?;
    Ok(params)
}

/// Write a parameter JSON file.
pub fn write_params_json(path: &Path, params: &DesignParameters) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create parameter JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, params)
        .map_err(|e| AppError::new(2, format!("Failed to write parameter JSON: {e}")))?;
    Ok(())
}

/// Render parameters as pretty JSON.
pub fn params_to_json(params: &DesignParameters) -> Result<String, AppError> {
    serde_json::to_string_pretty(params)
        .map_err(|e| AppError::new(2, format!("Failed to serialize parameters: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Meters;

    #[test]
    fn partial_files_fall_back_to_defaults() {
        let params: DesignParameters =
            serde_json::from_str(r#"{ "target_volume_cc": 12.0, "rb_step": 1e-6 }"#).unwrap();
        assert_eq!(params.target_volume_cc, 12.0);
        assert_eq!(params.rb_step, Meters(1e-6));
        assert_eq!(params.fie, DesignParameters::default().fie);
    }

    #[test]
    fn params_survive_a_file_round_trip() {
        let path = std::env::temp_dir().join(format!("scroll-params-{}.json", std::process::id()));
        let params = DesignParameters {
            pressure: 2.5,
            ..DesignParameters::default()
        };
        write_params_json(&path, &params).unwrap();
        assert_eq!(read_params_json(&path).unwrap(), params);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_params_json(Path::new("/nonexistent/params.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}

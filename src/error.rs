use thiserror::Error;

/// Pipeline stage that produced a geometry failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    VolumeFit,
    ArcSolve,
    ProfileBuild,
    OrbitTransform,
}

impl Stage {
    pub fn display_name(self) -> &'static str {
        match self {
            Stage::VolumeFit => "volume fit",
            Stage::ArcSolve => "arc solve",
            Stage::ProfileBuild => "profile build",
            Stage::OrbitTransform => "orbit transform",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Terminal failure of the geometry pipeline.
///
/// Every variant short-circuits the run; no stage substitutes defaults for
/// another stage's failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A design parameter is unusable before any search starts.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The base-radius search interval is empty or does not advance.
    #[error("invalid base-radius range: {reason}")]
    InvalidRange { reason: String },

    /// The requested geometry cannot be built (infeasible angles, overlapping arcs, ...).
    #[error("degenerate geometry during {stage}: {reason}")]
    DegenerateGeometry { stage: Stage, reason: String },
}

impl GeometryError {
    pub fn degenerate(stage: Stage, reason: impl Into<String>) -> Self {
        GeometryError::DegenerateGeometry {
            stage,
            reason: reason.into(),
        }
    }

    /// The stage that failed.
    pub fn stage(&self) -> Stage {
        match self {
            GeometryError::InvalidParameter { .. } | GeometryError::InvalidRange { .. } => {
                Stage::VolumeFit
            }
            GeometryError::DegenerateGeometry { stage, .. } => *stage,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<GeometryError> for AppError {
    fn from(err: GeometryError) -> Self {
        let exit_code = match err {
            GeometryError::InvalidParameter { .. } | GeometryError::InvalidRange { .. } => 3,
            GeometryError::DegenerateGeometry { .. } => 4,
        };
        AppError::new(exit_code, format!("Calculation failed ({}): {err}", err.stage()))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

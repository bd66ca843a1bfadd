//! Length units used at stage boundaries.
//!
//! Design inputs arrive in **meters**; every dimensional result leaves the
//! volume fitter in **millimeters**. Keeping the two as distinct types makes
//! the single conversion point explicit.

use serde::{Deserialize, Serialize};

const MM_PER_M: f64 = 1000.0;

/// A length in meters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// A length in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl Meters {
    pub fn get(self) -> f64 {
        self.0
    }

    pub fn to_millimeters(self) -> Millimeters {
        Millimeters(self.0 * MM_PER_M)
    }
}

impl Millimeters {
    pub fn get(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Meters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} m", self.0)
    }
}

impl std::fmt::Display for Millimeters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Honour `{:.4}` and friends on the number, then append the unit.
        match f.precision() {
            Some(p) => write!(f, "{:.*} mm", p, self.0),
            None => write!(f, "{} mm", self.0),
        }
    }
}

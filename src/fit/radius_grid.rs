//! Base-radius candidate grid.
//!
//! We fit the base radius using a deterministic grid scan over `[rb_min, rb_max)`.
//!
//! Candidates are generated by index (`rb_min + i * rb_step`) rather than by
//! repeated addition, so halving the step yields a superset of the coarse grid
//! and rounding does not drift over long scans.

use crate::domain::Meters;
use crate::error::GeometryError;

/// A validated, non-empty base-radius scan range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusGrid {
    min: f64,
    max: f64,
    step: f64,
}

impl RadiusGrid {
    pub fn new(min: Meters, max: Meters, step: Meters) -> Result<Self, GeometryError> {
        let (min, max, step) = (min.get(), max.get(), step.get());
        if !(min.is_finite() && max.is_finite() && step.is_finite()) {
            return Err(GeometryError::InvalidRange {
                reason: format!("rb_min={min}, rb_max={max}, rb_step={step} must be finite"),
            });
        }
        if min >= max {
            return Err(GeometryError::InvalidRange {
                reason: format!("rb_min={min} must be below rb_max={max}"),
            });
        }
        if step <= 0.0 || min + step <= min {
            return Err(GeometryError::InvalidRange {
                reason: format!("rb_step={step} does not advance from rb_min={min}"),
            });
        }
        Ok(Self { min, max, step })
    }

    /// Iterate candidates in ascending order (meters).
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0u64..)
            .map(move |i| self.min + i as f64 * self.step)
            .take_while(move |rb| *rb < self.max)
    }

    /// Number of candidates an exhaustive scan visits.
    pub fn candidate_count(&self) -> usize {
        self.iter().count()
    }
}

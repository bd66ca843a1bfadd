//! Factor-of-safety sweep for the wrap wall.
//!
//! The wall is modelled as a cantilever beam of thickness `ts` and height `h`
//! under uniform pressure `P`:
//!
//! - allowable pressure `= (Ys / FOS) · ts² / (3 · h²)`
//! - tip deflection `= 3 · P · h⁴ / (2 · E · ts³)`
//!
//! Candidate factors are scanned in ascending order and the first adequate one
//! is reported (the most economical choice).

use crate::domain::SafetyResult;

/// Smallest candidate factor of safety.
pub const FOS_MIN: f64 = 1.5;
/// Spacing between candidate factors.
pub const FOS_STEP: f64 = 0.1;
/// Number of candidates (1.5, 1.6, ..., 2.2).
pub const FOS_COUNT: usize = 8;

/// Wall and material inputs for the sweep (mm and N/mm²).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallLoad {
    pub wall_thickness: f64,
    pub scroll_height: f64,
    pub pressure: f64,
    pub elastic_modulus: f64,
    pub yield_strength: f64,
}

/// Candidate factors in scan order.
pub fn fos_candidates() -> impl Iterator<Item = f64> {
    (0..FOS_COUNT).map(|i| FOS_MIN + i as f64 * FOS_STEP)
}

pub fn allowable_pressure(load: &WallLoad, fos: f64) -> f64 {
    let sigma_allowable = load.yield_strength / fos;
    sigma_allowable * load.wall_thickness.powi(2) / (3.0 * load.scroll_height.powi(2))
}

pub fn max_deflection(load: &WallLoad) -> f64 {
    3.0 * load.pressure * load.scroll_height.powi(4)
        / (2.0 * load.elastic_modulus * load.wall_thickness.powi(3))
}

/// Return the first candidate whose allowable pressure covers the applied pressure.
pub fn check_safety(load: &WallLoad) -> SafetyResult {
    for fos in fos_candidates() {
        let allowable = allowable_pressure(load, fos);
        if allowable >= load.pressure {
            return SafetyResult::Safe {
                factor_of_safety: fos,
                allowable_pressure: allowable,
                max_deflection: max_deflection(load),
            };
        }
    }

    let last = FOS_MIN + (FOS_COUNT - 1) as f64 * FOS_STEP;
    tracing::warn!(pressure = load.pressure, "no candidate factor of safety is adequate");
    SafetyResult::Fail {
        reason: format!("Beam may fail for all tested FOS values ({FOS_MIN:.1}-{last:.1})."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_load(pressure: f64) -> WallLoad {
        WallLoad {
            wall_thickness: 1.0,
            scroll_height: 4.0,
            pressure,
            elastic_modulus: 73_000.0,
            yield_strength: 280.0,
        }
    }

    #[test]
    fn candidates_span_one_point_five_to_two_point_two() {
        let v: Vec<f64> = fos_candidates().collect();
        assert_eq!(v.len(), 8);
        assert_eq!(v[0], 1.5);
        assert!((v[7] - 2.2).abs() < 1e-12);
    }

    #[test]
    fn boundary_factors_match_hand_computation() {
        let load = reference_load(1.8);
        // (280 / 1.5) · 1 / (3 · 16) = 3.8888...
        assert!((allowable_pressure(&load, 1.5) - 280.0 / 1.5 / 48.0).abs() < 1e-12);
        assert!((allowable_pressure(&load, 1.5) - 3.888888888888889).abs() < 1e-12);
        // (280 / 2.2) / 48 = 2.6515...
        assert!((allowable_pressure(&load, 2.2) - 2.6515151515151514).abs() < 1e-12);
        // 3 · 1.8 · 256 / (2 · 73000) = 0.0094684...
        assert!((max_deflection(&load) - 0.009468493150684932).abs() < 1e-15);
    }

    #[test]
    fn reference_scenario_selects_smallest_factor() {
        match check_safety(&reference_load(1.8)) {
            SafetyResult::Safe {
                factor_of_safety,
                allowable_pressure,
                max_deflection,
            } => {
                assert_eq!(factor_of_safety, 1.5);
                assert!((allowable_pressure - 3.888888888888889).abs() < 1e-12);
                assert!((max_deflection - 0.009468493150684932).abs() < 1e-15);
            }
            SafetyResult::Fail { reason } => panic!("unexpected failure: {reason}"),
        }
    }

    #[test]
    fn excessive_pressure_fails_with_tested_range() {
        let result = check_safety(&reference_load(4.0));
        assert_eq!(
            result,
            SafetyResult::Fail {
                reason: "Beam may fail for all tested FOS values (1.5-2.2).".to_string()
            }
        );
    }

    #[test]
    fn pressure_at_the_limit_is_safe() {
        let load = reference_load(280.0 / 1.5 / 48.0);
        assert!(check_safety(&load).is_safe());
    }
}

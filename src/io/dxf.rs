//! Export scroll profiles as minimal DXF.
//!
//! Layout (one group code / value per line):
//!
//! ```text
//! 0 SECTION / 2 ENTITIES
//!   per curve: 0 LWPOLYLINE / 100 AcDbEntity / 100 AcDbPolyline / 90 <n> / 70 0
//!              per point: 10 <x> / 20 <y>
//! 0 ENDSEC / 0 EOF
//! ```
//!
//! Curves are written in canonical order (arc1, arc2, inv1, inv2, line), and
//! coordinates with six decimals.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{Curve, ScrollProfile};
use crate::error::AppError;

/// Render a profile as DXF text.
pub fn profile_to_dxf(profile: &ScrollProfile) -> String {
    let mut out = String::from("0\nSECTION\n2\nENTITIES\n");
    for (_, curve) in profile.curves() {
        push_polyline(&mut out, curve);
    }
    out.push_str("0\nENDSEC\n0\nEOF\n");
    out
}

/// Write a profile to `dir/<side>.dxf` and return the path written.
pub fn write_profile_dxf(dir: &Path, profile: &ScrollProfile) -> Result<PathBuf, AppError> {
    fs::create_dir_all(dir)
        .map_err(|e| AppError::new(2, format!("Failed to create output dir '{}': {e}", dir.display())))?;
    let path = dir.join(profile.side.dxf_file_name());
    fs::write(&path, profile_to_dxf(profile))
        .map_err(|e| AppError::new(2, format!("Failed to write DXF '{}': {e}", path.display())))?;
    tracing::info!(path = %path.display(), "wrote DXF");
    Ok(path)
}

fn push_polyline(out: &mut String, curve: &Curve) {
    out.push_str("0\nLWPOLYLINE\n100\nAcDbEntity\n100\nAcDbPolyline\n");
    // Writing into a String cannot fail.
    let _ = write!(out, "90\n{}\n70\n0\n", curve.len());
    for p in &curve.points {
        let _ = write!(out, "10\n{}\n20\n{}\n", fixed6(p.x), fixed6(p.y));
    }
}

/// Six-decimal fixed notation with halves rounded away from zero.
///
/// Rust's float formatting rounds exact ties to even; CAD consumers of this
/// format expect ties rounded up in magnitude. Negative zero prints as `0.000000`.
fn fixed6(v: f64) -> String {
    if v == 0.0 {
        return "0.000000".to_string();
    }
    let magnitude = v.abs();
    let rounded = if is_tie_at_6(magnitude) {
        format!("{:.6}", magnitude + 2.5e-7)
    } else {
        format!("{magnitude:.6}")
    };
    if v.is_sign_negative() {
        format!("-{rounded}")
    } else {
        rounded
    }
}

/// True when the exact decimal value of `v` ends in a 5 at the seventh decimal.
fn is_tie_at_6(v: f64) -> bool {
    let exact = format!("{v:.40}");
    let Some((_, frac)) = exact.split_once('.') else {
        return false;
    };
    let bytes = frac.as_bytes();
    bytes.len() > 6 && bytes[6] == b'5' && bytes[7..].iter().all(|&b| b == b'0')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CurveKind, ScrollSide};
    use nalgebra::Point2;

    fn tiny_profile() -> ScrollProfile {
        let c = |kind, pts: &[(f64, f64)]| {
            Curve::new(kind, pts.iter().map(|&(x, y)| Point2::new(x, y)).collect())
        };
        ScrollProfile {
            side: ScrollSide::Fixed,
            arc1: c(CurveKind::Arc, &[(1.0, 2.5)]),
            arc2: c(CurveKind::Arc, &[(-0.25, 0.0)]),
            inv1: c(CurveKind::Involute, &[(0.1234567, -9.8765432)]),
            inv2: c(CurveKind::Involute, &[(3.0, 4.0)]),
            line: c(CurveKind::Line, &[(0.0, 0.0), (-0.0, 1.0)]),
        }
    }

    #[test]
    fn dxf_golden_snapshot() {
        let dxf = profile_to_dxf(&tiny_profile());
        let header = "0\nLWPOLYLINE\n100\nAcDbEntity\n100\nAcDbPolyline\n";
        let expected = [
            "0\nSECTION\n2\nENTITIES\n".to_string(),
            format!("{header}90\n1\n70\n0\n10\n1.000000\n20\n2.500000\n"),
            format!("{header}90\n1\n70\n0\n10\n-0.250000\n20\n0.000000\n"),
            format!("{header}90\n1\n70\n0\n10\n0.123457\n20\n-9.876543\n"),
            format!("{header}90\n1\n70\n0\n10\n3.000000\n20\n4.000000\n"),
            format!("{header}90\n2\n70\n0\n10\n0.000000\n20\n0.000000\n10\n0.000000\n20\n1.000000\n"),
            "0\nENDSEC\n0\nEOF\n".to_string(),
        ]
        .concat();
        assert_eq!(dxf, expected);
    }

    #[test]
    fn exact_ties_round_away_from_zero() {
        // 2^-7 = 0.0078125 is exactly representable.
        assert_eq!(fixed6(0.0078125), "0.007813");
        assert_eq!(fixed6(-0.0078125), "-0.007813");
        assert_eq!(fixed6(0.0078124), "0.007812");
        assert_eq!(fixed6(-1e-9), "-0.000000");
    }

    #[test]
    fn write_profile_dxf_uses_side_file_name() {
        let dir = std::env::temp_dir().join(format!("scroll-dxf-{}", std::process::id()));
        let path = write_profile_dxf(&dir, &tiny_profile()).unwrap();
        assert!(path.ends_with("fixed_scroll.dxf"));
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("0\nENDSEC\n0\nEOF\n"));
        let _ = fs::remove_dir_all(&dir);
    }
}

//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the geometry code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::app::pipeline::RunOutput;
use crate::domain::SafetyResult;

/// Format the full run summary (fitted dimensions, tip arcs, safety).
pub fn format_run_summary(run: &RunOutput) -> String {
    let mut out = String::new();
    let d = &run.dimensions;
    let p = &run.params;

    out.push_str("=== scroll - Scroll Wrap Profile ===\n");
    out.push_str(&format!(
        "Target volume: {:.4} cc (displaced {:.4} cc, error {:.2e} cc)\n",
        p.target_volume_cc, d.displaced_volume_cc, d.fit_error_cc
    ));

    out.push_str("\nDimensions:\n");
    out.push_str(&fmt_item("Base Radius (rb)", d.base_radius.get(), "mm"));
    out.push_str(&fmt_item("Wall Thickness (ts)", d.wall_thickness.get(), "mm"));
    out.push_str(&fmt_item("Scroll Height (h)", d.scroll_height.get(), "mm"));
    out.push_str(&fmt_item("Orbiting Radius (ro)", d.orbiting_radius.get(), "mm"));
    out.push_str(&fmt_item("Radius A1 (r_a1)", run.arcs.radius_a1.get(), "mm"));
    out.push_str(&fmt_item("Max Radius A2 (r_a2_max)", run.arcs.radius_a2.get(), "mm"));

    out.push_str("\nProfiles:\n");
    for profile in [&run.fixed, &run.orbiting] {
        let counts: Vec<String> = profile
            .curves()
            .iter()
            .map(|(name, c)| format!("{name}={}", c.len()))
            .collect();
        out.push_str(&format!("- {:<16} {}\n", profile.side.display_name(), counts.join(" ")));
    }

    out.push('\n');
    out.push_str(&format_safety(&run.safety));
    out
}

/// Format the factor-of-safety outcome.
pub fn format_safety(safety: &SafetyResult) -> String {
    match safety {
        SafetyResult::Safe {
            factor_of_safety,
            allowable_pressure,
            max_deflection,
        } => format!(
            "System is SAFE\n- Safe FOS: {factor_of_safety:.1}\n- Max Allowable Pressure: {allowable_pressure:.4} N/mm²\n- Calculated Max Deflection: {max_deflection:.4} mm\n"
        ),
        SafetyResult::Fail { reason } => format!("System may FAIL\n- {reason}\n"),
    }
}

fn fmt_item(label: &str, value: f64, unit: &str) -> String {
    format!("- {label:<26} {value:>10.4} {unit}\n")
}

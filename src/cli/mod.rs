//! Command-line parsing for the scroll profile generator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the geometry code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "scroll", version, about = "Scroll compressor wrap profile generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit the wrap, print the summary, and optionally plot/export.
    Run(RunArgs),
    /// Plot a previously exported run JSON.
    Plot(PlotArgs),
    /// Print (or write) the effective design parameters as JSON.
    Params(ParamsArgs),
    /// Launch the interactive profile viewer.
    ///
    /// This uses the same underlying pipeline as `scroll run`, but renders the
    /// profiles in a terminal UI using Ratatui.
    Tui(RunArgs),
}

/// Individual design-parameter overrides.
///
/// Each flag, when given, replaces the value from the defaults or `--params` file.
#[derive(Debug, Args, Clone, Default)]
pub struct ParamOverrides {
    /// Final (suction) volume in cc.
    #[arg(long = "volume", value_name = "CC")]
    pub target_volume_cc: Option<f64>,

    /// Initial angle of the inner involute (rad).
    #[arg(long, allow_negative_numbers = true)]
    pub fi0: Option<f64>,

    /// Initial angle of the outer involute (rad).
    #[arg(long, allow_negative_numbers = true)]
    pub fo0: Option<f64>,

    /// End angle of the inner involute (rad).
    #[arg(long, allow_negative_numbers = true)]
    pub fie: Option<f64>,

    /// End angle of the outer involute (rad).
    #[arg(long, allow_negative_numbers = true)]
    pub foe: Option<f64>,

    /// Starting angle of the inner involute (rad).
    #[arg(long, allow_negative_numbers = true)]
    pub fis: Option<f64>,

    /// Starting angle of the outer involute (rad).
    #[arg(long, allow_negative_numbers = true)]
    pub fos: Option<f64>,

    /// Wall thickness / scroll height.
    #[arg(long = "ratio")]
    pub thickness_height_ratio: Option<f64>,

    /// Smallest base radius to try (m).
    #[arg(long, value_name = "M")]
    pub rb_min: Option<f64>,

    /// Upper bound (exclusive) of the base radius scan (m).
    #[arg(long, value_name = "M")]
    pub rb_max: Option<f64>,

    /// Base radius scan step (m).
    #[arg(long, value_name = "M")]
    pub rb_step: Option<f64>,

    /// Pressure on the wrap walls (N/mm²).
    #[arg(long)]
    pub pressure: Option<f64>,

    /// Young's modulus of the wrap material (N/mm²).
    #[arg(long)]
    pub elastic_modulus: Option<f64>,

    /// Yield strength of the wrap material (N/mm²).
    #[arg(long)]
    pub yield_strength: Option<f64>,
}

/// Numerical solver knobs.
#[derive(Debug, Args, Clone, Default)]
pub struct SettingsArgs {
    /// Stop the base-radius scan once the volume error is below this (cc).
    #[arg(long, value_name = "CC", conflicts_with = "no_early_exit")]
    pub early_exit_tol: Option<f64>,

    /// Scan the full base-radius range.
    #[arg(long)]
    pub no_early_exit: bool,

    /// Samples per involute.
    #[arg(long)]
    pub involute_samples: Option<usize>,

    /// Samples along the inner tip arc.
    #[arg(long)]
    pub inner_arc_samples: Option<usize>,

    /// Samples along the outer tip arc.
    #[arg(long)]
    pub outer_arc_samples: Option<usize>,
}

/// Options for running the pipeline (and for the TUI).
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Design parameter JSON (see `scroll params`). Flags override its values.
    #[arg(long, value_name = "JSON")]
    pub params: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: ParamOverrides,

    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Render ASCII plots in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plots.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 32)]
    pub height: usize,

    /// Write `fixed_scroll.dxf` and `orbiting_scroll.dxf` into this directory.
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Export the full run (parameters, dimensions, profiles, safety) to JSON.
    #[arg(long = "export-json", value_name = "PATH")]
    pub export_json: Option<PathBuf>,
}

/// Options for plotting a saved run.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Run JSON file produced by `scroll run --export-json`.
    #[arg(long, value_name = "JSON")]
    pub run: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 32)]
    pub height: usize,
}

/// Options for the parameter template command.
#[derive(Debug, Parser)]
pub struct ParamsArgs {
    /// Start from this parameter JSON instead of the built-in defaults.
    #[arg(long, value_name = "JSON")]
    pub params: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: ParamOverrides,

    /// Write the parameters to this file instead of printing them.
    #[arg(long, value_name = "PATH")]
    pub write: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_flags_parse() {
        let cli = Cli::parse_from([
            "scroll", "run", "--fo0", "-1.2", "--volume", "8", "--no-early-exit", "--no-plot",
            "--out-dir", "out",
        ]);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.overrides.fo0, Some(-1.2));
        assert_eq!(args.overrides.target_volume_cc, Some(8.0));
        assert!(args.settings.no_early_exit);
        assert!(args.no_plot);
        assert_eq!(args.out_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn early_exit_flags_conflict() {
        let res = Cli::try_parse_from(["scroll", "run", "--early-exit-tol", "0.1", "--no-early-exit"]);
        assert!(res.is_err());
    }
}

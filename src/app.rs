//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - layers defaults, the parameter file and flags into a `RunConfig`
//! - runs the geometry pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::cli::{Command, ParamOverrides, ParamsArgs, PlotArgs, RunArgs, SettingsArgs};
use crate::domain::{DesignParameters, Meters, RunConfig, ScrollSide, SolverSettings};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `scroll` binary.
pub fn run() -> Result<(), AppError> {
    // We want `scroll` and `scroll --volume 8` to behave like `scroll run ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    init_tracing(matches!(cli.command, Command::Tui(_)));

    match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Plot(args) => handle_plot(args),
        Command::Params(args) => handle_params(args),
        Command::Tui(args) => handle_tui(args),
    }
}

/// Install the global subscriber (`RUST_LOG`, default `warn`).
///
/// The TUI owns the terminal, so it gets a filter-only registry.
fn init_tracing(tui: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if tui {
        let _ = tracing_subscriber::registry().with(env_filter).try_init();
        return;
    }

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .try_init();
}

fn handle_run(args: RunArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args)?;
    let run = pipeline::run_pipeline(&config.params, &config.settings)?;

    println!("{}", crate::report::format_run_summary(&run));

    if config.plot {
        for profile in [&run.fixed, &run.orbiting] {
            let plot = crate::plot::render_ascii_profile(
                profile,
                config.plot_width,
                config.plot_height,
                plot_char(profile.side),
            );
            println!("{plot}");
        }
    }

    // Optional exports.
    if let Some(dir) = &config.dxf_dir {
        for profile in [&run.fixed, &run.orbiting] {
            let path = crate::io::write_profile_dxf(dir, profile)?;
            println!("Wrote {}", path.display());
        }
    }
    if let Some(path) = &config.export_json {
        crate::io::write_run_json(path, &run)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

fn handle_tui(args: RunArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args)?;
    crate::tui::run(config)
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let run = crate::io::read_run_json(&args.run)?;

    for profile in [&run.fixed, &run.orbiting] {
        let plot = crate::plot::render_ascii_profile(profile, args.width, args.height, plot_char(profile.side));
        println!("{plot}");
    }
    Ok(())
}

fn plot_char(side: ScrollSide) -> char {
    match side {
        ScrollSide::Fixed => '#',
        ScrollSide::Orbiting => 'o',
    }
}

fn handle_params(args: ParamsArgs) -> Result<(), AppError> {
    let params = layered_params(args.params.as_deref(), &args.overrides)?;
    match &args.write {
        Some(path) => {
            crate::io::write_params_json(path, &params)?;
            println!("Wrote {}", path.display());
        }
        None => println!("{}", crate::io::params_to_json(&params)?),
    }
    Ok(())
}

/// Defaults, then the optional parameter file, then individual flags.
pub fn run_config_from_args(args: &RunArgs) -> Result<RunConfig, AppError> {
    Ok(RunConfig {
        params: layered_params(args.params.as_deref(), &args.overrides)?,
        settings: settings_from_args(&args.settings),
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        dxf_dir: args.out_dir.clone(),
        export_json: args.export_json.clone(),
    })
}

fn layered_params(
    file: Option<&std::path::Path>,
    overrides: &ParamOverrides,
) -> Result<DesignParameters, AppError> {
    let mut params = match file {
        Some(path) => crate::io::read_params_json(path)?,
        None => DesignParameters::default(),
    };
    apply_overrides(&mut params, overrides);
    Ok(params)
}

/// Replace every parameter whose flag was given.
pub fn apply_overrides(params: &mut DesignParameters, o: &ParamOverrides) {
    let scalars = [
        (&mut params.target_volume_cc, o.target_volume_cc),
        (&mut params.fi0, o.fi0),
        (&mut params.fo0, o.fo0),
        (&mut params.fie, o.fie),
        (&mut params.foe, o.foe),
        (&mut params.fis, o.fis),
        (&mut params.fos, o.fos),
        (&mut params.thickness_height_ratio, o.thickness_height_ratio),
        (&mut params.pressure, o.pressure),
        (&mut params.elastic_modulus, o.elastic_modulus),
        (&mut params.yield_strength, o.yield_strength),
    ];
    for (slot, value) in scalars {
        if let Some(v) = value {
            *slot = v;
        }
    }
    if let Some(v) = o.rb_min {
        params.rb_min = Meters(v);
    }
    if let Some(v) = o.rb_max {
        params.rb_max = Meters(v);
    }
    if let Some(v) = o.rb_step {
        params.rb_step = Meters(v);
    }
}

pub fn settings_from_args(args: &SettingsArgs) -> SolverSettings {
    let defaults = SolverSettings::default();
    SolverSettings {
        early_exit_tolerance_cc: if args.no_early_exit {
            None
        } else {
            args.early_exit_tol.or(defaults.early_exit_tolerance_cc)
        },
        involute_samples: args.involute_samples.unwrap_or(defaults.involute_samples),
        inner_arc_samples: args.inner_arc_samples.unwrap_or(defaults.inner_arc_samples),
        outer_arc_samples: args.outer_arc_samples.unwrap_or(defaults.outer_arc_samples),
    }
}

/// Rewrite argv so `scroll` defaults to `scroll run`.
///
/// Rules:
/// - `scroll`                      -> `scroll run`
/// - `scroll --volume 8 ...`       -> `scroll run --volume 8 ...`
/// - `scroll --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "run" | "plot" | "params" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "run flags".
    if arg1.starts_with('-') {
        argv.insert(1, "run".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn run_args(args: &[&str]) -> RunArgs {
        match Cli::parse_from(rewrite_args(argv(args))).command {
            Command::Run(a) => a,
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn bare_invocation_defaults_to_run() {
        assert_eq!(rewrite_args(argv(&["scroll"])), argv(&["scroll", "run"]));
        assert_eq!(
            rewrite_args(argv(&["scroll", "--no-plot"])),
            argv(&["scroll", "run", "--no-plot"])
        );
        assert_eq!(rewrite_args(argv(&["scroll", "--help"])), argv(&["scroll", "--help"]));
        assert_eq!(rewrite_args(argv(&["scroll", "tui"])), argv(&["scroll", "tui"]));
    }

    #[test]
    fn defaults_produce_reference_config() {
        let config = run_config_from_args(&run_args(&["scroll"])).unwrap();
        assert_eq!(config.params, DesignParameters::default());
        assert_eq!(config.settings, SolverSettings::default());
        assert!(config.plot);
        assert_eq!(config.dxf_dir, None);
    }

    #[test]
    fn flags_override_parameter_file() {
        let path = std::env::temp_dir().join(format!("scroll-layer-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "target_volume_cc": 10.0, "pressure": 2.5 }"#).unwrap();

        let path_str = path.to_string_lossy().to_string();
        let args = run_args(&["scroll", "--params", path_str.as_str(), "--pressure", "3.0", "--rb-step", "1e-6"]);
        let config = run_config_from_args(&args).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(config.params.target_volume_cc, 10.0);
        assert_eq!(config.params.pressure, 3.0);
        assert_eq!(config.params.rb_step, Meters(1e-6));
        assert_eq!(config.params.fie, DesignParameters::default().fie);
    }

    #[test]
    fn missing_parameter_file_is_an_io_error() {
        let args = run_args(&["scroll", "--params", "/nonexistent/scroll-params.json"]);
        let err = run_config_from_args(&args).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn solver_flags_map_to_settings() {
        let config =
            run_config_from_args(&run_args(&["scroll", "--no-early-exit", "--involute-samples", "500"]))
                .unwrap();
        assert_eq!(config.settings.early_exit_tolerance_cc, None);
        assert_eq!(config.settings.involute_samples, 500);
        assert_eq!(config.settings.inner_arc_samples, 600);

        let config = run_config_from_args(&run_args(&["scroll", "--early-exit-tol", "0.05"])).unwrap();
        assert_eq!(config.settings.early_exit_tolerance_cc, Some(0.05));
    }

    #[test]
    fn no_plot_wins_over_plot() {
        let config = run_config_from_args(&run_args(&["scroll", "--no-plot"])).unwrap();
        assert!(!config.plot);
    }
}

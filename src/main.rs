use std::path::PathBuf;

use clap::{Parser, Subcommand};

use cityrank::input::{Scenario, load_scenario};
use cityrank::logging::init_logging;
use cityrank::model::{ScoringProfile, ZeroVariancePolicy};
use cityrank::pipeline::stage3_merge::validate_weights;
use cityrank::pipeline::stage5_report::{ReportFormat, render_reports, write_reports};
use cityrank::pipeline::{RunError, score_scenario};
use cityrank::report::{LevelSelection, format_percent_1};

#[derive(Parser, Debug)]
#[command(name = "cityrank")]
#[command(about = "Rank candidate cities against weighted criteria", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a scenario and report the rankings
    Run {
        /// Scenario file (.yaml, .yml or .json, optionally .gz)
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory (defaults to stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Report format
        #[arg(short, long, value_enum, default_value = "text")]
        format: ReportFormat,

        /// Which tree levels to report (overrides the scenario setting)
        #[arg(long, value_enum)]
        levels: Option<LevelSelection>,

        /// Allowed deviation of explicit merge weights from 1.0
        #[arg(long, value_parser = parse_tolerance)]
        weight_tolerance: Option<f64>,

        /// What to do with an axis whose values are all equal
        #[arg(long, value_enum)]
        zero_variance: Option<ZeroVariancePolicy>,

        /// Increase log verbosity (-v info, -vv debug)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbose: u8,
    },
    /// Validate a scenario and print the effective weight of every axis
    Check {
        /// Scenario file (.yaml, .yml or .json, optionally .gz)
        #[arg(short, long)]
        input: PathBuf,

        /// Allowed deviation of explicit merge weights from 1.0
        #[arg(long, value_parser = parse_tolerance)]
        weight_tolerance: Option<f64>,

        /// Increase log verbosity (-v info, -vv debug)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbose: u8,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), RunError> {
    match cli.command {
        Commands::Run {
            input,
            out,
            format,
            levels,
            weight_tolerance,
            zero_variance,
            verbose,
        } => {
            init_logging(verbose);
            let scenario = load_scenario(&input)?;
            let profile = scenario
                .settings
                .profile()
                .with_overrides(weight_tolerance, zero_variance);
            let levels = levels
                .or(scenario.settings.levels)
                .unwrap_or(LevelSelection::All);
            tracing::info!(?profile, ?levels, "scoring");

            let report = score_scenario(&scenario, &profile, levels)?;
            match out {
                Some(dir) => {
                    write_reports(&report, &dir, format)?;
                }
                None => print!("{}", render_reports(&report, format)?),
            }
            Ok(())
        }
        Commands::Check {
            input,
            weight_tolerance,
            verbose,
        } => {
            init_logging(verbose);
            let scenario = load_scenario(&input)?;
            let profile = scenario
                .settings
                .profile()
                .with_overrides(weight_tolerance, None);
            print!("{}", check_scenario(&scenario, &profile)?);
            Ok(())
        }
    }
}

fn parse_tolerance(s: &str) -> Result<f64, String> {
    let value = s
        .parse::<f64>()
        .map_err(|e| format!("invalid number `{s}`: {e}"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("tolerance must be a non-negative number, got {s}"));
    }
    Ok(value)
}

/// Runs the merge weight checks `run` would apply, then renders the weight table.
fn check_scenario(scenario: &Scenario, profile: &ScoringProfile) -> Result<String, RunError> {
    validate_weights(&scenario.tree.root, profile)?;
    Ok(render_weights(scenario))
}

fn render_weights(scenario: &Scenario) -> String {
    let root = &scenario.tree.root;
    let weights = root.effective_weights();
    let width = weights
        .iter()
        .map(|(l, _)| l.len())
        .max()
        .unwrap_or(0)
        .max("total".len());

    let mut out = String::new();
    out.push_str(&format!(
        "{} alternatives, {} axes, {} composite nodes\n",
        scenario.alternatives.len(),
        weights.len(),
        root.composite_count()
    ));
    for (label, weight) in &weights {
        out.push_str(&format!(
            "  {:<width$}  {:>6}%\n",
            label,
            format_percent_1(100.0 * weight)
        ));
    }
    let total: f64 = weights.iter().map(|(_, w)| w).sum();
    out.push_str(&format!(
        "  {:<width$}  {:>6}%\n",
        "total",
        format_percent_1(100.0 * total)
    ));
    out
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;

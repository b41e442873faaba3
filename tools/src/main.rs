//! complaint-runner: batch runner for the synthetic complaint dataset.
//!
//! Usage:
//!   complaint-runner generate --rows 10000 --seed 42 --out cybercrime_dataset.csv
//!   complaint-runner analyze  --input cybercrime_dataset.csv --charts-dir eda_plots
//!   complaint-runner all      (generate, then analyze the file just written)
//!
//! Every flag is optional; defaults reproduce the reference dataset.

use anyhow::{bail, Context, Result};
use cybercrime_core::{
    config::{AnalysisConfig, GeneratorConfig, DEFAULT_DATASET_PATH},
    pipeline::{self, AnalysisRun, GenerationRun},
    report,
};
use std::env;
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mode = args
        .get(1)
        .filter(|a| !a.starts_with("--"))
        .map(String::as_str)
        .unwrap_or("all");

    match mode {
        "generate" => {
            generate(&args)?;
        }
        "analyze" => analyze(&args, None)?,
        "all" => {
            let run = generate(&args)?;
            analyze(&args, Some(run.output))?;
        }
        other => bail!("unknown mode '{other}' (expected generate, analyze or all)"),
    }
    Ok(())
}

fn generate(args: &[String]) -> Result<GenerationRun> {
    let mut config = match flag_value(args, "--config") {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    config.rows = parse_arg(args, "--rows", config.rows)?;
    config.seed = parse_arg(args, "--seed", config.seed)?;
    let out = PathBuf::from(flag_value(args, "--out").unwrap_or(DEFAULT_DATASET_PATH));

    println!("Generating dataset...");
    println!("  rows:  {}", config.rows);
    println!("  seed:  {}", config.seed);
    println!("  out:   {}", out.display());
    println!();

    let run = pipeline::run_generation(config, &out)
        .with_context(|| format!("generation into {} failed", out.display()))?;

    let high_risk = run.records.iter().filter(|r| r.is_high_risk).count();
    println!("Generated {} rows.", run.records.len());
    print!("{}", report::column_nulls(&run.null_counts));
    print!(
        "{}",
        report::risk_distribution(&cybercrime_core::analysis::RiskDistribution {
            high_risk,
            low_risk: run.records.len() - high_risk,
        })
    );
    println!("Dataset saved to {}", run.output.display());
    println!();
    Ok(run)
}

fn analyze(args: &[String], generated: Option<PathBuf>) -> Result<()> {
    let mut config = AnalysisConfig::default();
    if let Some(path) = generated {
        config.input = path;
    }
    if let Some(input) = flag_value(args, "--input") {
        config.input = PathBuf::from(input);
    }
    if let Some(dir) = flag_value(args, "--charts-dir") {
        config.charts_dir = PathBuf::from(dir);
    }
    config.fast_withdrawal_minutes =
        parse_arg(args, "--fast-minutes", config.fast_withdrawal_minutes)?;

    println!("Loading dataset...");
    let AnalysisRun {
        loaded,
        analysis,
        charts,
    } = pipeline::run_analysis(&config)
        .with_context(|| format!("analysis of {} failed", config.input.display()))?;

    println!();
    print!("{}", report::structure(&loaded));
    println!();
    print!("{}", report::null_counts(&loaded));
    println!();
    print!("{}", report::summary_statistics(&analysis));
    println!();
    print!("{}", report::fraud_type_frequency(&analysis));
    println!();
    println!(
        "--- {} visualizations saved to '{}/' ---",
        charts.len(),
        config.charts_dir.display()
    );
    println!();
    print!("{}", report::findings(&analysis));

    if let Some(path) = flag_value(args, "--summary-json") {
        let json = serde_json::to_string_pretty(&analysis)?;
        std::fs::write(path, json).with_context(|| format!("cannot write {path}"))?;
        log::info!("Wrote analysis summary to {path}");
    }
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Value of `flag` parsed as `T`, or `default` when the flag is absent.
/// A present flag with a missing or unparsable value is an error.
fn parse_arg<T>(args: &[String], flag: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Some(pos) = args.iter().position(|a| a == flag) else {
        return Ok(default);
    };
    let Some(raw) = args.get(pos + 1) else {
        bail!("{flag} requires a value");
    };
    match raw.parse() {
        Ok(value) => Ok(value),
        Err(e) => bail!("invalid value '{raw}' for {flag}: {e}"),
    }
}

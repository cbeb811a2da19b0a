//! SRS Tester Application
//!
//! Generates the SRS of a batch of UEs for one subframe and reports the
//! cross-correlation between them.

mod report;
mod scenario;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use report::Report;
use scenario::Scenario;

/// LTE SRS generation and cross-correlation tester
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML scenario file (built-in four-UE suite if omitted)
    #[arg(short, long)]
    scenario: Option<String>,

    /// Subframe index shared by all UEs
    #[arg(long)]
    subframe: Option<u32>,

    /// Correlation threshold for highlighted pairs
    #[arg(long)]
    threshold: Option<f64>,

    /// IDFT size
    #[arg(long)]
    transform_size: Option<usize>,

    /// Report bandwidth clipping and dropped samples as errors
    #[arg(long)]
    strict: bool,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();

    let mut scenario = match &args.scenario {
        Some(path) => Scenario::from_toml_file(path)
            .with_context(|| format!("Failed to load scenario {}", path))?,
        None => Scenario::reference()?,
    };

    // Command line values override the scenario file
    if let Some(subframe) = args.subframe {
        scenario.subframe = subframe;
    }
    if let Some(threshold) = args.threshold {
        scenario.threshold = threshold;
    }
    if let Some(transform_size) = args.transform_size {
        scenario.transform_size = transform_size;
    }
    scenario.strict |= args.strict;

    let report = Report::run(&scenario)?;

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report);
    }

    Ok(())
}

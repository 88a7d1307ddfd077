use anyhow::Context;
use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use cwcore::prelude::{SimulationError, NORMAL_EXIT};
use log::{error, info, LevelFilter};
use report::{write_summary, RunSummary};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use workflow::config::{HeterodyneConfig, LocationConfig, RunConfig, TimingConfig};

mod generator;
mod io;
mod report;
mod workflow;

/// Exit code for command-line parse failures.
const ARGUMENT_EXIT: u8 = 2;

#[derive(Parser)]
#[command(
    author,
    version,
    disable_help_flag = true,
    about = "Injects Taylor-parameterized continuous-wave signals into a detector time series"
)]
struct Args {
    /// Source file, one polynomial frequency model per line
    #[arg(short = 's', value_name = "SOURCEFILE")]
    source: Option<PathBuf>,
    /// Detector response file (frequency series of complex gains)
    #[arg(short = 'r', value_name = "RESPFILE")]
    response: Option<PathBuf>,
    /// Detector site and Earth/Sun ephemeris files
    #[arg(short = 'l', num_args = 3, value_names = ["SITE", "EARTHFILE", "SUNFILE"])]
    location: Option<Vec<String>>,
    /// Output file for the injected time series
    #[arg(short = 'o', value_name = "OUTFILE")]
    output: Option<PathBuf>,
    /// Output start time, sample count and sampling interval
    #[arg(
        short = 't',
        num_args = 4,
        allow_negative_numbers = true,
        value_names = ["SEC", "NSEC", "NPT", "DT"]
    )]
    timing: Option<Vec<String>>,
    /// Heterodyne reference epoch and frequency
    #[arg(
        short = 'h',
        num_args = 3,
        allow_negative_numbers = true,
        value_names = ["HSEC", "HNSEC", "FH"]
    )]
    heterodyne: Option<Vec<String>>,
    /// Verbosity: 0 warnings, 1 info, 2 debug, 3 trace
    #[arg(short = 'd', value_name = "DEBUGLEVEL")]
    debug: Option<u8>,
    /// Load the run configuration from YAML; flags override its values
    #[arg(long, value_name = "YAML")]
    config: Option<PathBuf>,
    /// Write a JSON run summary
    #[arg(long, value_name = "JSON")]
    summary: Option<PathBuf>,
    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

fn level_filter(debug_level: u8) -> LevelFilter {
    match debug_level {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logging(debug_level: u8) {
    env_logger::Builder::new()
        .filter_level(level_filter(debug_level))
        .parse_default_env()
        .init();
}

fn build_config(args: &Args) -> anyhow::Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if let Some(source) = &args.source {
        config.source_file = Some(source.clone());
    }
    if let Some(response) = &args.response {
        config.response_file = Some(response.clone());
    }
    if let Some(values) = &args.location {
        config.location = Some(LocationConfig::from_args(values)?);
    }
    if let Some(output) = &args.output {
        config.output_file = Some(output.clone());
    }
    if let Some(values) = &args.timing {
        config.timing = TimingConfig::from_args(values)?;
    }
    if let Some(values) = &args.heterodyne {
        config.heterodyne = Some(HeterodyneConfig::from_args(values)?);
    }
    if let Some(level) = args.debug {
        config.debug_level = level;
    }
    Ok(config)
}

fn simulate(config: RunConfig, summary_path: Option<&Path>) -> anyhow::Result<()> {
    let output_file = config.output_file.clone();
    let result = workflow::runner::run(config)?;

    if let Some(path) = &output_file {
        io::write_output(path, &result.output)
            .with_context(|| format!("writing output {}", path.display()))?;
        info!("wrote {} samples to {}", result.output.len(), path.display());
    }
    if let Some(path) = summary_path {
        write_summary(path, &RunSummary::from_result(&result))?;
    }
    Ok(())
}

fn exit_code(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<SimulationError>())
        .map_or(1, SimulationError::exit_code)
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::from(NORMAL_EXIT),
                _ => ExitCode::from(ARGUMENT_EXIT),
            };
        }
    };

    let config = build_config(&args);
    let debug_level = match &config {
        Ok(config) => config.debug_level,
        Err(_) => args.debug.unwrap_or(0),
    };
    init_logging(debug_level);

    match config.and_then(|config| simulate(config, args.summary.as_deref())) {
        Ok(()) => {
            info!("Normal exit");
            ExitCode::from(NORMAL_EXIT)
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

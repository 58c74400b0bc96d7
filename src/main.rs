use clap::Parser;
use colored::*;
use conservation_hmm::cli::Cli;
use conservation_hmm::{ConservationError, StatisticsOutcome};
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // CONSERVATION_LOG sets the default level, RUST_LOG wins when present
    let log_level = if cli.quiet {
        "error".to_string()
    } else {
        match cli.verbose {
            0 => std::env::var("CONSERVATION_LOG").unwrap_or_else(|_| "warn".to_string()),
            1 => "info".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .with_target(false)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);

        let exit_code = match e.downcast_ref::<ConservationError>() {
            Some(ConservationError::Config(_)) => 2,
            Some(ConservationError::Io(_)) => 3,
            Some(ConservationError::Parse(_)) | Some(ConservationError::InvalidInput(_)) => 4,
            Some(ConservationError::LengthMismatch { .. })
            | Some(ConservationError::FeatureCount { .. }) => 5,
            Some(ConservationError::Tool(_)) => 6,
            None => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.resolve_config()?;
    debug!("Resolved configuration: {:?}", config);

    let request = cli.request(&config);
    let report = conservation_hmm::run_conservation_hmm(&config, &request)?;

    match &report.outcome {
        StatisticsOutcome::Success(columns) => info!(
            "Scored {} residues over {} alignment columns",
            report.residues,
            columns.len()
        ),
        StatisticsOutcome::NoAlignment | StatisticsOutcome::ToolFailure(_) => debug!(
            "Placeholder features written to {} and {}",
            report.feature_file.display(),
            report.freqgap_file.display()
        ),
    }
    Ok(())
}

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use patron_load::{log_path, LoadConfig, PatronLoad};

/// Prepare staff and student patron loads for downstream ingestion
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the JSON config file
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Force a full load regardless of the config
    #[arg(long, conflicts_with = "incremental")]
    full: bool,

    /// Force an incremental load regardless of the config
    #[arg(long)]
    incremental: bool,

    /// Log to stderr instead of a file under logFileDirectory
    #[arg(long)]
    no_log_file: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let started = Local::now();

    let mut config = LoadConfig::load(&args.config)
        .with_context(|| format!("failed to load config from {}", args.config.display()))?;
    if args.full {
        config.full_load = true;
    }
    if args.incremental {
        config.full_load = false;
    }
    config.validate()?;

    init_tracing(&config, args.no_log_file, &started)?;

    info!("Starting patron-load v{}", patron_load::VERSION);
    info!(
        "Load mode: {}",
        if config.full_load { "full" } else { "incremental" }
    );

    let summary = PatronLoad::new(config, started)?
        .with_config_path(args.config)
        .run()?;
    summary.log();

    Ok(())
}

/// Send log output to a timestamped file under the configured log
/// directory, or to stderr when asked.
fn init_tracing(
    config: &LoadConfig,
    no_log_file: bool,
    started: &chrono::DateTime<Local>,
) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    if no_log_file {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    } else {
        fs::create_dir_all(&config.log_file_directory)?;
        let path = log_path(&config.log_file_directory, started);
        let file = File::create(&path)
            .with_context(|| format!("cannot create log file {}", path.display()))?;
        eprintln!("Saving log to {}", path.display());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .init();
    }
    Ok(())
}

//! Kotei CLI - keeps Sonarr monitoring canon anime episodes.

use anyhow::{Context, Result};
use clap::Parser;
use kotei::config::Config;
use kotei::console::Console;
use kotei::report::Reporter;
use kotei::scheduler::{self, Checker};
use kotei::{FillerListClient, SonarrClient};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Monitors the canon episodes of long-running anime in Sonarr.
#[derive(Parser, Debug)]
#[command(name = "kotei")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the config file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Report what would change without touching Sonarr.
    #[arg(long)]
    dry_run: bool,

    /// Run once and exit, even if a schedule is configured.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let console = Console::new();
    match run(console).await {
        Ok(true) => ExitCode::FAILURE,
        Ok(false) => ExitCode::SUCCESS,
        Err(e) => {
            console.error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the run ended with hard errors.
async fn run(console: Console) -> Result<bool> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    console.section("Kotei - Canon Episode Monitor");

    // Load configuration
    let config_path = match args.config {
        Some(path) => path,
        None => Config::config_path()?,
    };
    let mut config = Config::load_from(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;

    // Check if this is first run (API key not configured)
    if !config.sonarr.is_configured() {
        console.warning(&format!(
            "Sonarr API key not configured. Please edit: {}",
            config_path.display()
        ));
        console.info("Set your Sonarr URL, API key and anime list in the config file and run again.");
        return Ok(false);
    }

    config.dry_run |= args.dry_run;
    config.validate().context("Invalid configuration")?;

    if config.dry_run {
        console.warning("Dry run enabled: Sonarr will not be modified.");
    }

    let source = FillerListClient::new(&config.fillerlist)
        .context("Failed to set up the filler list client")?;
    let sonarr = SonarrClient::new(&config.sonarr).context("Failed to set up the Sonarr client")?;

    let cron = if args.once {
        None
    } else {
        config.schedule.cron().map(str::to_string)
    };

    let checker = Arc::new(Checker::new(
        &config,
        Arc::new(source),
        Arc::new(sonarr),
        Reporter::new(console),
    ));

    scheduler::run(checker, cron.as_deref(), console).await
}

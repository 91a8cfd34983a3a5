use anyhow::{Context, Result, anyhow};
use clap::Parser;
use thermapp_calibration::cli::Cli;
use thermapp_calibration::runner;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!(e))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing()?;
    let config = Cli::parse().into_config();

    let summary = runner::run(&config)
        .await
        .inspect_err(|e| error!("{e}"))
        .context("calibration download failed")?;

    info!(
        session = %summary.session_id,
        "Saved {} files ({} bytes) to {}",
        summary.files.len(),
        summary.total_bytes(),
        summary.directory.display()
    );

    Ok(())
}

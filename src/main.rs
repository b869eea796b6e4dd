use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tfsync::aws::{auth, client::AwsClient};
use tfsync::config::Config;
use tfsync::sync::{self, SyncOptions};
use tfsync::terraform::TerraformRunner;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Log file produced in the current working directory, truncated per run
const LOG_FILE: &str = "tfsync.log";

/// Sync Terraform state with live AWS resources
#[derive(Parser, Debug)]
#[command(name = "tfsync", version, about, long_about = None)]
struct Args {
    /// Path to the Terraform config files
    path: PathBuf,

    /// Optional backend config file for terraform init
    #[arg(long)]
    backend_config: Option<PathBuf>,

    /// Debug level logging
    #[arg(short = 'D', long)]
    debug: bool,

    /// Turn off color in terraform output
    #[arg(long)]
    no_color: bool,

    /// AWS region (overrides config file and environment discovery)
    #[arg(short, long)]
    region: Option<String>,
}

fn setup_logging(debug: bool) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    // File::create truncates the log left by the previous run
    let file = std::fs::File::create(LOG_FILE)
        .with_context(|| format!("Failed to create log file {}", LOG_FILE))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let level = if debug { Level::DEBUG } else { Level::INFO };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(non_blocking.and(std::io::stdout))
        .with_ansi(false)
        .with_target(true)
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Held until exit so the file writer flushes everything
    let _log_guard = setup_logging(args.debug)?;

    tracing::info!("Start tfsync");

    let config = Config::load();

    let region = args
        .region
        .clone()
        .or_else(|| config.region.clone())
        .or_else(auth::get_default_region)
        .unwrap_or_else(|| "us-east-1".to_string());
    tracing::info!("Using region: {}", region);

    let client = AwsClient::new(&region, config.endpoint_url.as_deref()).await?;
    let runner = TerraformRunner::new(config.terraform_bin(), args.no_color);

    let opts = SyncOptions {
        path: args.path,
        backend_config: args.backend_config,
    };

    sync::run(&opts, &runner, &client).await?;

    tracing::info!("tfsync finished");
    Ok(())
}

//! platformd daemon entry point.
//!
//! Loads configuration, initializes logging, starts the request broker
//! over the simulated backend, and serves until interrupted.

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

use platformd::backend::{SimBackend, SimBackendConfig};
use platformd::broker::{lifecycle, BrokerConfig};
use platformd::config::ConfigFile;
use platformd::logging::init_logging;

#[derive(Parser)]
#[command(name = "platformd")]
#[command(about = "Platform hardware state broker daemon", long_about = None)]
#[command(version = platformd::VERSION)]
struct Args {
    /// Config file path (defaults to ~/.platformd/config.ini)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the log directory from the config file
    #[arg(long)]
    log_dir: Option<String>,

    /// Number of fans in the simulated inventory
    #[arg(long, default_value = "4")]
    fans: u32,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    if let Err(e) = run(args).await {
        eprintln!("platformd: {}", e);
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };

    let log_dir = args
        .log_dir
        .unwrap_or_else(|| config.logging.directory.clone());
    let _logging_guard = init_logging(&log_dir, &config.logging.file_name)?;

    info!(version = platformd::VERSION, "platformd starting");

    let backend = Box::new(SimBackend::new(SimBackendConfig {
        fan_count: args.fans,
        ..SimBackendConfig::default()
    }));

    let runtime = match lifecycle::start(BrokerConfig::from(&config.broker), backend).await {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "Broker startup failed");
            return Err(e.into());
        }
    };

    info!("platformd ready");

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    runtime.shutdown().await?;
    Ok(())
}

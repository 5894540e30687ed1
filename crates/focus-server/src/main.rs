//! Focus server entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use focus_engine::FocusWindowResolver;
use focus_server::{config::Config, start_server, store, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Focus-window suggestion service
#[derive(Parser, Debug)]
#[command(name = "focus-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config and PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.json_logs);

    tracing::info!("Starting focus-server v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    config
        .apply_env(|key| std::env::var(key).ok())
        .context("Invalid environment override")?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate().context("Invalid configuration")?;

    let hours = config.hours.work_hours()?;
    let store = store::from_config(&config.store).context("Failed to set up event store")?;
    tracing::info!(
        start_hour = hours.start_hour(),
        end_hour = hours.end_hour(),
        timezone = %hours.timezone(),
        "work hours"
    );

    let state = AppState::new(FocusWindowResolver::new(hours), config.duration, store);
    start_server(&config.server, state)
        .await
        .context("Server error")?;

    Ok(())
}

fn init_tracing(json_logs: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("focus_server=info,focus_engine=info,tower_http=info"));

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

use autodiag_core::config::RelayConfig;
use autodiag_relay::config::AppConfig;
use autodiag_relay::http_server;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "relay-daemon",
    about = "HTTP relay between the vehicle diagnosis chat and a hosted assistant"
)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// HTTP server address
    #[arg(long, env = "AUTODIAG_HTTP_ADDR")]
    http_addr: Option<String>,

    /// Assistant service API key
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// Assistant to run on each turn
    #[arg(short, long)]
    assistant_id: Option<String>,

    /// Base URL of the assistant service
    #[arg(long)]
    base_url: Option<String>,

    /// Milliseconds between run status checks
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Status checks before a run is reported as timed out
    #[arg(long)]
    max_poll_attempts: Option<u32>,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn overrides(&self) -> RelayConfig {
        RelayConfig {
            api_key: self.api_key.clone(),
            assistant_id: self.assistant_id.clone(),
            base_url: self.base_url.clone(),
            poll_interval_ms: self.poll_interval_ms,
            max_poll_attempts: self.max_poll_attempts,
            listen_addr: self.http_addr.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    info!("Starting relay daemon");

    let config = AppConfig::load(
        args.config.as_deref(),
        &RelayConfig::from_env(),
        &args.overrides(),
    )?;

    if let Err(e) = http_server::run_server(config).await {
        error!("HTTP server error: {}", e);
        return Err(e);
    }

    info!("Relay daemon stopped");
    Ok(())
}

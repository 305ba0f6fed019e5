use anyhow::{Context, Result};
use autodiag_core::config::{get_default_config_file, RelayConfig};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const APP_NAME: &str = "autodiag";

/// Resolved daemon configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub relay: RelayConfig,
    pub http_addr: SocketAddr,
}

impl AppConfig {
    /// Layers the configuration: defaults, then the TOML file, then the
    /// environment, then command-line overrides.
    ///
    /// `config_path` falls back to `~/.config/autodiag/config.toml`; a
    /// missing file is not an error.
    pub fn load(
        config_path: Option<&Path>,
        env: &RelayConfig,
        overrides: &RelayConfig,
    ) -> Result<Self> {
        let path = match config_path {
            Some(path) => path.to_path_buf(),
            None => default_config_path(),
        };

        let file = RelayConfig::load_from_file(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
        if path.exists() {
            info!("Loaded configuration from {}", path.display());
        } else {
            debug!("No configuration file at {}, using defaults", path.display());
        }

        let relay = file.merge(env).merge(overrides);
        let http_addr = relay
            .listen_addr()
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid listen address: {}", relay.listen_addr()))?;

        Ok(Self { relay, http_addr })
    }
}

fn default_config_path() -> PathBuf {
    get_default_config_file(APP_NAME).unwrap_or_else(|_| PathBuf::from("config.toml"))
}

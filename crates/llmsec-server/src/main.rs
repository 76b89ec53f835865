//! LLM security HTTP server.
//!
//! # Environment variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PORT` | `8080` | TCP port to listen on. |
//! | `LLMSEC_CONFIG` | *(none)* | Path to a TOML config file. |
//! | `RUST_LOG` | `info` | Log filter. |

use std::path::PathBuf;
use std::sync::Arc;

use llmsec_core::{Adapters, Orchestrator, SecurityCoreConfig};
use llmsec_server::SecurityServer;
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "LLMSEC_CONFIG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let mut config = SecurityCoreConfig::load(config_path.as_deref())?;
    config.apply_port_env()?;
    let adapters = Adapters::from_config(&config)?;

    tracing::info!(mode = adapters.mode().as_str(), "Starting security core");

    let orchestrator = Arc::new(Orchestrator::new(adapters));
    SecurityServer::new(config.server, orchestrator).run().await?;
    Ok(())
}

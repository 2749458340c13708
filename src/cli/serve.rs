//! Serve command handler
//!
//! Starts the HTTP server in foreground mode.

use crate::config::Config;
use crate::error::Result;
use crate::server;
use clap::Args;
use tracing::{info, warn};

/// Serve command arguments
#[derive(Args)]
pub struct ServeArgs {
    /// Host address to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, short = 'p')]
    pub port: Option<u16>,
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    // Load and optionally override config
    let mut config = Config::load()?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    if config.maps_js_key().is_none() {
        warn!("No Maps JavaScript key configured; the map view will be unavailable");
    }

    info!(
        "Starting gay2z server v{} on {}",
        env!("CARGO_PKG_VERSION"),
        config.server_addr()
    );

    // Run the server
    server::run(config).await
}

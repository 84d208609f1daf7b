//! Demo server hosting the middleware stack.
//!
//! ```text
//!   Client ──▶ trace / request-id / timeout
//!                  │
//!                  ▼
//!            cache_control      (stamps Cache-Control on the way out)
//!                  │
//!                  ▼
//!            rewrite_subdomain  (blog.example.com/x → /blog/x/)
//!                  │
//!                  ▼
//!               Router          (configured routes, optional AJAX guard)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use cas_middleware::config::{load_config, MiddlewareConfig};
use cas_middleware::observability::init_logging;
use cas_middleware::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "cas-middleware")]
#[command(about = "Subdomain rewriting and cache policy middleware server", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Validate the configuration and exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => MiddlewareConfig::default(),
    };

    init_logging(&config.observability);
    tracing::info!("cas-middleware v{} starting", env!("CARGO_PKG_VERSION"));

    let bind_address = config.listener.bind_address.clone();
    let server = HttpServer::new(config)?;

    if cli.check {
        tracing::info!("Configuration OK");
        return Ok(());
    }

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    // Held for the lifetime of the server; Ctrl+C also stops it.
    let shutdown = Shutdown::new();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

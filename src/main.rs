//! SpecForge server.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │                    SPECFORGE                      │
//!                    │                                                   │
//!  GET /generate_api │  ┌───────────┐   ┌───────────┐   ┌─────────────┐  │
//!  ──────────────────┼─▶│ generator │──▶│ MockStore │   │  artifact   │  │
//!                    │  │ (slug,key)│   │ (1 config)│   │ render+write│  │
//!                    │  └─────┬─────┘   └─────▲─────┘   └─────────────┘  │
//!                    │        │ install       │ read-through             │
//!                    │        ▼               │                          │
//!  GET /<a>to<b>     │  ┌───────────┐   ┌─────┴─────┐                    │
//!  ──────────────────┼─▶│LiveRouter │──▶│ AuthGuard │──▶ envelope / 401  │
//!                    │  └───────────┘   └───────────┘                    │
//!                    └──────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use specforge::config::{load_config, ServiceConfig};
use specforge::observability::{logging, metrics};
use specforge::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "specforge")]
#[command(about = "Generate mock APIs and serve them live", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "SPECFORGE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!("specforge v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        output_dir = %config.generator.output_dir,
        credential_header = %config.generator.credential_header,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signals();

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

//! Gateway entry point: CLI parsing, configuration, logging, serve loop.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ssmgr_gateway::config::loader::load_config;
use ssmgr_gateway::config::validation::validate_config;
use ssmgr_gateway::{GatewayConfig, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "ssmgr-gateway", version)]
#[command(about = "REST gateway for the shadowsocks-manager UDP control protocol")]
#[command(after_help = "\
Examples:
  curl http://localhost:8080/healthcheck
  curl http://localhost:8080/ports
  curl -X POST http://localhost:8080/ports/12345 -d MyPassword
  curl -X DELETE http://localhost:8080/ports/12345
")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Manager daemon hostname or IP (overrides config)
    #[arg(long)]
    hostname: Option<String>,

    /// Manager daemon port (overrides config)
    #[arg(long)]
    port: Option<u16>,

    /// Local HTTP listen port (overrides config)
    #[arg(long)]
    listen: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(hostname) = cli.hostname {
        config.upstream.host = hostname;
    }
    if let Some(port) = cli.port {
        config.upstream.port = port;
    }
    if let Some(listen) = cli.listen {
        config.listener.bind_address = format!("0.0.0.0:{}", listen);
    }
    if let Err(errors) = validate_config(&config) {
        for error in &errors {
            eprintln!("configuration error: {}", error);
        }
        return Err("invalid configuration".into());
    }

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "ssmgr_gateway={},tower_http=info",
                    config.observability.log_level
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "ssmgr-gateway starting");
    tracing::info!(
        host = %config.upstream.host,
        port = config.upstream.port,
        "Upstream manager"
    );

    // Initialize metrics exporter
    if config.observability.metrics_enabled {
        // Address validity is checked by validate_config above.
        if let Ok(addr) = config.observability.metrics_address.parse() {
            ssmgr_gateway::observability::metrics::init_metrics(addr);
        }
    }

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    // Wire SIGINT to graceful shutdown
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            shutdown.trigger();
        }
    });

    // Create and run HTTP server
    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

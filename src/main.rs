//! OCS server.
//!
//! Serves the OCS `config` endpoint and answers every other path with an
//! OCS "Not Found" envelope, in JSON or XML depending on `?format=`.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use ocs_response::config::{apply_overrides, load_config, OcsServiceConfig};
use ocs_response::lifecycle::{signals, Shutdown};
use ocs_response::observability::init_logging;
use ocs_response::HttpServer;

#[derive(Parser)]
#[command(name = "ocs-server")]
#[command(about = "Serve OCS endpoints in JSON or XML", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => OcsServiceConfig::default(),
    };
    let config = apply_overrides(config, cli.bind)?;

    init_logging(&config.observability)?;

    tracing::info!("ocs-server v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        prefix = %config.ocs.prefix,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::forward_signals(&shutdown);

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

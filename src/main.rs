// Copyright 2026 The Postsmith Project
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use postsmith::config::{self, ConfigSource};
use postsmith::gemini::GeminiClient;
use postsmith::server;
use postsmith::service::ContentService;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "postsmith", about = "Social media content generator (web form)")]
struct Cli {
    /// Path to the config file. Falls back to $POSTSMITH_CONFIG, then ./postsmith.yaml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::from(server::DEFAULT_HOST)), env = "POSTSMITH_HOST")]
    host: IpAddr,

    /// Port to listen on
    #[arg(long, default_value_t = server::DEFAULT_PORT, env = "POSTSMITH_PORT")]
    port: u16,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let addr = SocketAddr::new(cli.host, cli.port);
    tracing::info!(%addr, "postsmith starting");

    let source = config::FileSource::locate(cli.config.clone());
    let config = match config::load_config(&source) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(path = %source.describe(), "failed to load config: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        source = %source.describe(),
        version = %config.version,
        environment = %config.environment,
        model = %config.gemini.model,
        base_url = %config.gemini.base_url,
        config_hash = %config.config_hash,
        "config loaded"
    );

    let client = Arc::new(GeminiClient::new(config.gemini));
    let service = Arc::new(ContentService::new(client));
    let app = server::build_router(service);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(%addr, "failed to bind: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(%addr, "postsmith listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {e}");
        std::process::exit(1);
    }
}

//! Keycodec Web Server Binary
//!
//! This binary starts the keycodec HTTP API used by the browser frontend
//! to encode and decode text.
//!
//! # Usage
//!
//! ```bash
//! # Start with settings from config.toml (port 5000 by default)
//! keycodec-web
//!
//! # Override port and layouts file
//! keycodec-web --port 8080 --layouts-file ~/my-layouts.json
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use keycodec::config::Config;
use keycodec::web;

/// Keycodec Web Server - HTTP API for keyboard position encoding
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Layouts JSON file.
    /// Defaults to `layouts.json` in the platform config directory:
    /// - Linux: ~/.config/keycodec/
    /// - macOS: ~/Library/Application Support/keycodec/
    /// - Windows: %APPDATA%\keycodec\
    #[arg(short, long)]
    layouts_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::load().context("Failed to load configuration")?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(path) = args.layouts_file {
        config.storage.layouts_file = Some(path);
    }
    config.validate()?;

    info!("Layouts file: {}", config.layouts_file()?.display());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid host or port")?;

    web::run_server(config, addr).await
}

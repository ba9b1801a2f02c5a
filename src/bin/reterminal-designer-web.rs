//! reTerminal Designer Web Server Binary
//!
//! This binary starts the web server that provides the layout REST API for
//! the dashboard editor and for devices.
//!
//! # Usage
//!
//! ```bash
//! # Start with settings from config.toml (127.0.0.1:8099 by default)
//! reterminal-designer-web
//!
//! # Specify port and layouts directory
//! reterminal-designer-web --port 8080 --layouts-dir ~/my-layouts
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reterminal_designer::config::Config;
use reterminal_designer::web;

/// reTerminal Designer Web Server - REST API for the dashboard editor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on (defaults to the configured port)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (defaults to the configured host)
    #[arg(long)]
    host: Option<String>,

    /// Directory containing layout files.
    /// Defaults to the configured layouts directory:
    /// - Linux: ~/.config/ReTerminalDesigner/layouts/
    /// - macOS: ~/Library/Application Support/ReTerminalDesigner/layouts/
    /// - Windows: %APPDATA%\ReTerminalDesigner\layouts\
    #[arg(long)]
    layouts_dir: Option<PathBuf>,

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

    let config = Config::load().context("Failed to load configuration")?;

    let layouts_dir = match args.layouts_dir {
        Some(path) => path,
        None => config.layouts_dir()?,
    };
    info!("Layouts directory: {}", layouts_dir.display());

    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("Invalid listen address {host}:{port}"))?;

    web::run_server(config, layouts_dir, addr).await
}

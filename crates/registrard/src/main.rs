//! registrard — the registrar daemon.
//!
//! Single binary that serves either of the registrar's HTTP surfaces:
//! - REST API over the SQLite store (`serve`)
//! - Department admin panel backed by the REST API (`dashboard`)
//!
//! # Usage
//!
//! ```text
//! registrard serve --port 7000 --database registrar.db
//! registrard dashboard --port 3000 --api-url http://localhost:7000
//! registrard --config registrar.toml serve
//! ```

mod config;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use config::RegistrarConfig;
use registrar_client::{ClientConfig, RegistrarClient};
use registrar_dashboard::DashboardState;
use registrar_state::Store;

#[derive(Parser)]
#[command(name = "registrard", about = "Registrar daemon")]
struct Cli {
    /// Optional registrar.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the REST API.
    Serve {
        /// Port to listen on.
        #[arg(long)]
        port: Option<u16>,

        /// SQLite database file.
        #[arg(long)]
        database: Option<PathBuf>,
    },
    /// Serve the department admin panel.
    Dashboard {
        /// Port to listen on.
        #[arg(long)]
        port: Option<u16>,

        /// REST API origin.
        #[arg(long)]
        api_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,registrard=debug,registrar=debug")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = RegistrarConfig::load(cli.config.as_deref())
        .with_context(|| format!("failed to load config {:?}", cli.config))?;

    match cli.command {
        Command::Serve { port, database } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(database) = database {
                config.server.database = database;
            }
            run_api(config).await
        }
        Command::Dashboard { port, api_url } => {
            if let Some(port) = port {
                config.dashboard.port = port;
            }
            if api_url.is_some() {
                config.dashboard.api_url = api_url;
            }
            run_dashboard(config).await
        }
    }
}

async fn run_api(config: RegistrarConfig) -> anyhow::Result<()> {
    info!("registrar API starting");

    let db_path = &config.server.database;
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let store = Store::open(db_path)
        .with_context(|| format!("failed to open database {}", db_path.display()))?;
    info!(path = ?db_path, "store opened");

    let router = registrar_api::build_router(store);
    serve(router, config.server.port, "REST API").await
}

async fn run_dashboard(config: RegistrarConfig) -> anyhow::Result<()> {
    info!("registrar dashboard starting");

    let client_config = match config.dashboard.api_url {
        Some(url) => ClientConfig::new(url),
        None => ClientConfig::from_env(),
    };
    info!(api_url = %client_config.base_url, "using REST API");

    let state = DashboardState::new(Arc::new(RegistrarClient::new(client_config)));
    let router = registrar_dashboard::dashboard_router(state);
    serve(router, config.dashboard.port, "dashboard").await
}

async fn serve(router: axum::Router, port: u16, surface: &'static str) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, surface, "server starting");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    // Graceful shutdown on Ctrl-C.
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            info!("shutdown signal received");
        })
        .await?;

    info!(surface, "registrar daemon stopped");
    Ok(())
}

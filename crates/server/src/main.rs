//! techtrends server entry point.
//!
//! Runs either the NewsAPI proxy or the demo/static server over HTTP.
//! Logs are JSON on stderr.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use axum::{Json, Router, response::IntoResponse};
use clap::{Parser, Subcommand};
use serde_json::json;
use techtrends_core::{AppConfig, RequestCache};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod demo;
mod error;
mod proxy;

#[derive(Parser)]
#[command(name = "techtrends-server")]
#[command(about = "NewsAPI proxy and demo news server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Forward sanitized requests to NewsAPI with the server-held key.
    Proxy {
        /// Listen address (overrides TECHTRENDS_PROXY_ADDR).
        #[arg(long)]
        addr: Option<SocketAddr>,

        /// Also accept GET /api/proxy with query parameters.
        #[arg(long)]
        permissive: bool,
    },
    /// Serve the fixed demo records and static files.
    Demo {
        /// Listen address (overrides TECHTRENDS_DEMO_ADDR).
        #[arg(long)]
        addr: Option<SocketAddr>,

        /// Static asset directory (overrides TECHTRENDS_STATIC_DIR).
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();
    let mut config = AppConfig::load().context("loading configuration")?;

    let (addr, app) = match args.command {
        Command::Proxy { addr, permissive } => {
            config.permissive_methods |= permissive;
            let forwarder = proxy::Forwarder::new(&config)?;
            let state = proxy::ProxyState::new(&config, forwarder, RequestCache::new(config.proxy_cache_ttl()));
            tracing::info!(
                permissive = config.permissive_methods,
                production = config.is_production(),
                "starting proxy server"
            );
            (addr.unwrap_or(config.proxy_addr), proxy::router(state))
        }
        Command::Demo { addr, static_dir } => {
            let static_dir = static_dir.unwrap_or_else(|| config.static_dir.clone());
            tracing::info!(static_dir = %static_dir.display(), "starting demo server");
            (addr.unwrap_or(config.demo_addr), demo::router(demo::DemoState::new(demo::seed_items()), &static_dir))
        }
    };

    serve(addr, app).await
}

async fn serve(addr: SocketAddr, app: Router) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    tracing::info!("listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received terminate signal, shutting down"),
    }
}

/// Liveness endpoint shared by both servers.
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

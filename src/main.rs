use anyhow::Context;
use clap::Parser;
use dispatch_relay::config::Settings;
use dispatch_relay::github::GitHubClient;
use dispatch_relay::{create_app, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Relay Docker Hub push webhooks to GitHub repository_dispatch events
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Listen port, overrides PORT
    #[arg(long)]
    port: Option<u16>,

    /// Read environment variables from this file instead of ./.env
    #[arg(long)]
    env_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.env_file {
        Some(path) => Settings::load_from_file(path),
        None => Settings::load(),
    }
    .context("Failed to load application settings")?;

    if let Some(port) = cli.port {
        settings.server.port = port;
    }

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "dispatch_relay=info,tower_http=debug".into()),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let missing = settings.github.missing_vars();
    if missing.is_empty() {
        if let Ok(target) = settings.github.target() {
            info!("Dispatching to {} via {}", target.full_name(), settings.github.api_url);
        }
    } else {
        warn!(
            "Missing configuration: {}. Webhooks will be answered with 500 until it is set.",
            missing.join(", ")
        );
    }

    let dispatcher = GitHubClient::from_settings(&settings.github)
        .context("Failed to initialize GitHub client")?;

    let app = create_app(AppState {
        config: settings.clone(),
        dispatcher: Arc::new(dispatcher),
    });

    let listener = tokio::net::TcpListener::bind(&settings.server.address())
        .await
        .context("Failed to bind to server address")?;

    info!("Listening on {}", settings.server.address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutdown completed");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
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
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }
}

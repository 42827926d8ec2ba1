use std::net::SocketAddr;

use anyhow::Result;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use loot_collector::app_state::AppState;
use loot_collector::config::Config;
use loot_collector::create_router;
use loot_collector::dedup::DuplicateSuppressor;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("FATAL ERROR: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // .env may set RUST_LOG, so it is read before the subscriber starts.
    let env_result = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loot_collector=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("=== Loot Collector Starting ===");
    tracing::info!("Process ID: {}", std::process::id());
    match env_result {
        Ok(path) => tracing::info!("Environment variables loaded from {}", path.display()),
        Err(_) => tracing::info!("No .env file found, using system environment variables"),
    }

    let config = Config::from_env()?;
    tracing::info!("Server port: {}", config.port);
    tracing::info!("CORS policy: {}", config.cors);
    tracing::info!("Dedup window: {:?}", config.dedup_window);

    let state = AppState::new(DuplicateSuppressor::new(config.dedup_window));
    let app = create_router(state, &config.cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, shutting down gracefully...");
        },
    }
}

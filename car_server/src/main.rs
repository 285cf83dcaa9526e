//! Car API server.
//!
//! Serves the car catalog search endpoint over the `cars` MongoDB collection.

use std::net::{IpAddr, SocketAddr};

use clap::Parser;

use car_server::{car_router, CarRouterState, CarsConfig, MongoCarStore};

/// Connection string used when `DB_URL` is not set.
const DEFAULT_DB_URL: &str = "mongodb://localhost:27017";

#[derive(Parser)]
#[command(name = "car-api", about = "Car catalog read API")]
struct Cli {
    /// Server port
    #[arg(short, long, env = "CARS_PORT", default_value = "8000")]
    port: u16,

    /// Bind address
    #[arg(long, env = "CARS_HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// MongoDB connection URL
    #[arg(long, env = "DB_URL")]
    db_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real deployments set the environment directly.
    let dotenv = dotenvy::dotenv();

    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info".into()),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info".into()),
            )
            .init();
    }

    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let cli = Cli::parse();

    tracing::info!("Starting car API server...");

    let db_url = cli.db_url.unwrap_or_else(|| {
        tracing::warn!("DB_URL not set -- falling back to {}", DEFAULT_DB_URL);
        DEFAULT_DB_URL.to_string()
    });

    let config = CarsConfig::from_env();
    let store = MongoCarStore::connect(&db_url, &config).await?;

    let app = car_router(CarRouterState::new(store), &config);

    car_server::metrics::init_metrics();

    let addr = SocketAddr::new(cli.host, cli.port);
    tracing::info!(
        origins = ?config.allowed_origins,
        "Car API listening on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}

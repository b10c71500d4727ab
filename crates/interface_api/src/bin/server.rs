//! Claim Settlement Ledger - API Server Binary
//!
//! This binary starts the HTTP API server for the claim settlement
//! ledger.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration (in-memory ledger)
//! cargo run --bin claim-ledger-api
//!
//! # Run with environment variables
//! API_HOST=0.0.0.0 API_PORT=8080 DATABASE_URL=postgres://... cargo run --bin claim-ledger-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_JWT_SECRET` - JWT signing secret (required in production)
//! * `API_JWT_EXPIRATION_SECS` - JWT token expiration in seconds (default: 3600)
//! * `API_DATABASE_URL` - PostgreSQL connection string; in-memory when unset
//! * `API_BOOTSTRAP_ADMIN` - Principal seeded with both roles on first boot
//! * `API_FRAUD_THRESHOLD` - Fraud score above which claims reject (default: 10)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use core_kernel::PrincipalId;
use domain_ledger::{ClaimLedger, LedgerConfig};
use infra_store::{create_pool, PgLedgerStore, StoreConfig};
use interface_api::{config::ApiConfig, create_router};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = load_config();

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting Claim Settlement Ledger API Server"
    );

    let ledger = Arc::new(build_ledger(&config).await?);

    let app = create_router(ledger, config.clone());

    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables.
///
/// Falls back to individual variables and then defaults when the prefixed
/// block is incomplete.
fn load_config() -> ApiConfig {
    ApiConfig::from_env().unwrap_or_else(|_| {
        let defaults = ApiConfig::default();
        ApiConfig {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            jwt_secret: std::env::var("API_JWT_SECRET").unwrap_or(defaults.jwt_secret),
            jwt_expiration_secs: std::env::var("API_JWT_EXPIRATION_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.jwt_expiration_secs),
            database_url: std::env::var("DATABASE_URL")
                .or_else(|_| std::env::var("API_DATABASE_URL"))
                .ok(),
            log_level: std::env::var("API_LOG_LEVEL")
                .or_else(|_| std::env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            bootstrap_admin: std::env::var("API_BOOTSTRAP_ADMIN")
                .unwrap_or(defaults.bootstrap_admin),
            fraud_threshold: std::env::var("API_FRAUD_THRESHOLD")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.fraud_threshold),
        }
    })
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Builds the ledger, durable when a database URL is configured.
///
/// With a database the full claim, role, and event history is reloaded
/// before the server accepts traffic. Without one the ledger starts
/// empty and loses everything on shutdown.
async fn build_ledger(config: &ApiConfig) -> Result<ClaimLedger, Box<dyn std::error::Error>> {
    let ledger_config = LedgerConfig {
        fraud_threshold: config.fraud_threshold,
        ..LedgerConfig::default()
    };
    let bootstrap = PrincipalId::new(config.bootstrap_admin.clone());

    match &config.database_url {
        Some(url) => {
            tracing::info!("Connecting to database...");
            let pool = create_pool(&StoreConfig::new(url.clone())).await?;
            let store = PgLedgerStore::new(pool);
            store.migrate().await?;

            let ledger = ClaimLedger::restore(ledger_config, bootstrap, Arc::new(store)).await?;
            tracing::info!("Ledger restored from database");
            Ok(ledger)
        }
        None => {
            tracing::warn!("No database URL configured, running with an in-memory ledger");
            Ok(ClaimLedger::new(ledger_config, bootstrap))
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown of the server, allowing in-flight
/// requests to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

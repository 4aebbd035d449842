//! Finance API Binary
//!
//! Starts the JSON API behind the finance dashboard.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin finance-api
//! ```
//!
//! # Environment Variables
//!
//! - `CONFIG_PATH`: Path of the YAML config (default: config.yaml)
//! - `HTTP_PORT`, `NATIVE_CURRENCY`, `SEED_PATH`, `LOG_LEVEL`, `LOG_FORMAT`:
//!   interpolated into the default config.yaml
//! - `RUST_LOG`: Overrides the configured log level

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use finance_api::config::{Config, load_config};
use finance_api::observability::{init_metrics, init_tracing};
use finance_api::{AppState, Container, InMemoryRepositories, SeedData, Translator, create_router};
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config_path = std::env::var("CONFIG_PATH").ok();
    let config = load_config(config_path.as_deref()).context("failed to load configuration")?;

    init_tracing(&config.observability.logging).context("failed to initialize tracing")?;
    init_metrics().context("failed to initialize metrics")?;

    tracing::info!("Starting Finance API");
    log_config(&config);

    let repositories = load_repositories(&config)?;
    let translator =
        Translator::load(&config.localization).context("failed to load translation tables")?;
    let container = Arc::new(Container::new(repositories, &config));
    let state = AppState::new(
        container,
        Arc::new(translator),
        env!("CARGO_PKG_VERSION"),
    );

    let addr: SocketAddr = format!(
        "{}:{}",
        config.server.bind_address, config.server.http_port
    )
    .parse()
    .context("invalid bind address")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, "HTTP server listening");
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("Finance API stopped");
    Ok(())
}

/// Load .env file from current or ancestor directories.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }
    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

fn log_config(config: &Config) {
    tracing::info!(
        native_currency = %config.application.native_currency,
        default_user_group = config.application.default_user_group,
        page_size = config.application.page_size,
        locales = ?config.localization.locales,
        dashboard_ttl_secs = config.cache.dashboard_ttl_secs,
        "Configuration loaded"
    );
}

/// Fill the in-memory store from the seed file, or start empty.
fn load_repositories(config: &Config) -> anyhow::Result<InMemoryRepositories> {
    let seed_path = config.application.seed_path.trim();
    if seed_path.is_empty() {
        tracing::warn!("No seed file configured, starting with an empty store");
        return Ok(InMemoryRepositories::new());
    }
    let seed = SeedData::load(Path::new(seed_path))
        .with_context(|| format!("failed to load seed data from '{seed_path}'"))?;
    Ok(InMemoryRepositories::from_seed(seed))
}

/// Resolve when SIGINT or SIGTERM arrives.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}

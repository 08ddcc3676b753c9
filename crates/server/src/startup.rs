use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Resolve `server.host` (IPv4, IPv6 or a hostname) together with `server.port`.
async fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let host = cfg.server.host.trim_start_matches('[').trim_end_matches(']');
    tokio::net::lookup_host((host, cfg.server.port))
        .await
        .map_err(|e| StartupError::InvalidConfig(format!("server address {host}: {e}")))?
        .next()
        .ok_or_else(|| StartupError::InvalidConfig(format!("server address {host}: no addresses")))
}

/// Connect, migrate and assemble the router for `cfg`.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    models::db::test_connection(&db)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;

    if cfg.database.auto_migrate {
        models::db::migrate(&db).await.map_err(|e| StartupError::Database(e.to_string()))?;
        info!(service = "server", event = "migrated", "database migrations applied");
    }

    if cfg.auth.uses_dev_secret() {
        warn!(service = "server", event = "dev_secret", "JWT_SECRET not set; using the development secret");
    }

    let state = ServerState::new(db, &cfg.auth, &cfg.nearby);
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app from a loaded configuration and serve until
/// Ctrl+C, then drain in-flight requests.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;
    let addr = bind_addr(&cfg).await?;
    info!(%addr, "starting server crate");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!(service = "server", event = "shutdown_signal", "received Ctrl+C, shutting down");
        })
        .await?;
    Ok(())
}

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use service::advertisement::repo::SeaOrmAdvertisementRepository;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{routes, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!(event = "shutdown_signal", "draining connections");
}

/// Connect, migrate, then serve until a shutdown signal arrives.
/// Logging and configuration are set up by the caller.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    models::db::migrate(&db).await?;

    let repo = Arc::new(SeaOrmAdvertisementRepository::new(db.clone()));
    let state = ServerState::new(repo);
    let app: Router = routes::build_router(state, build_cors());

    let listener = tokio::net::TcpListener::bind(cfg.server.bind_addr()).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!(%addr, "starting advertisement service");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    models::db::close(db).await?;
    info!("server stopped");
    Ok(())
}

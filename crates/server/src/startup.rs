use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use service::expense::{repo::seaorm::SeaOrmExpenseRepository, repository::ExpenseRepository, ExpenseService};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::auth::{ServerAuthConfig, ServerState};
use crate::errors::StartupError;
use crate::routes;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Assemble the application over any expense store.
pub fn build_app(repo: Arc<dyn ExpenseRepository>, auth: ServerAuthConfig) -> Router {
    let state = ServerState::new(ExpenseService::new(repo), auth);
    routes::build_router(state, build_cors())
}

/// Public entry: connect the database, apply migrations when enabled, and serve until shutdown
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let addr = cfg
        .server
        .bind_addr()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;

    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Migration(e.to_string()))?;
        info!(service = "server", event = "migrations_applied", "database schema up to date");
    }

    let repo: Arc<dyn ExpenseRepository> = Arc::new(SeaOrmExpenseRepository { db });
    let app = build_app(repo, ServerAuthConfig { jwt_secret: cfg.auth.jwt_secret.clone() });

    let listener = TcpListener::bind(addr).await?;
    info!(service = "server", event = "listening", %addr, "expense server started");
    serve(listener, app).await
}

/// Serve `app` on an already bound listener, stopping on Ctrl+C or SIGTERM.
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), StartupError> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!(service = "server", event = "stop", "server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!(service = "server", event = "shutdown_signal", "received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!(service = "server", event = "shutdown_signal", "received SIGTERM, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
}

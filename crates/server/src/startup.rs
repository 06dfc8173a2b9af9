use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, StoreBackend};
use migration::MigratorTrait;
use service::storage::{InstanceStore, MemoryInstanceStore, SeaOrmInstanceStore};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Build the configured backend store.
///
/// For Postgres this connects, pings and (unless disabled) creates the
/// `instances` table; any failure aborts startup.
pub async fn build_store(cfg: &AppConfig) -> Result<Arc<dyn InstanceStore>, StartupError> {
    match cfg.store.backend {
        StoreBackend::Memory => {
            info!(backend = "memory", "using volatile instance store");
            Ok(Arc::new(MemoryInstanceStore::new()))
        }
        StoreBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database)
                .await
                .map_err(|e| StartupError::Database(e.to_string()))?;
            if cfg.database.auto_migrate {
                migration::Migrator::up(&db, None)
                    .await
                    .map_err(|e| StartupError::Migration(e.to_string()))?;
            }
            info!(backend = "postgres", dbname = %cfg.database.dbname, "using durable instance store");
            Ok(Arc::new(SeaOrmInstanceStore::new(db)))
        }
    }
}

pub fn build_app(store: Arc<dyn InstanceStore>) -> Router {
    routes::build_router(AppState::new(store), build_cors())
}

/// Serve `app` on an already-bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await
}

/// Run with an explicit configuration.
pub async fn run_with_config<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let store = build_store(&cfg).await?;
    let app = build_app(store);

    let addr: SocketAddr = cfg
        .bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {}: {e}", cfg.bind_addr())))?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, backend = ?cfg.store.backend, "starting server");
    serve(listener, app, shutdown).await?;
    info!("server stopped");
    Ok(())
}

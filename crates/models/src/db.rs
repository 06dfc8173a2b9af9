use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

/// Open a pooled connection using the given settings and verify it with a ping.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    let mut opt = ConnectOptions::new(cfg.connection_url());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);

    let db = Database::connect(opt).await?;
    db.ping().await?;
    info!(host = %cfg.host, dbname = %cfg.dbname, "connected to the database");
    Ok(db)
}

/// Connect using `DATABASE_URL` and default pool settings.
pub async fn connect() -> Result<DatabaseConnection, sea_orm::DbErr> {
    let mut cfg = DatabaseConfig::default();
    if let Ok(url) = std::env::var("DATABASE_URL") {
        cfg.url = url;
    }
    connect_with_config(&cfg).await
}

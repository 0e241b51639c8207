//! Connection pool construction and one-time schema bootstrap.

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::info;

use crate::config::db::DbConfig;
use crate::entities::todos;
use crate::error::AppError;

/// Build the application pool *and* guarantee the `todos` table exists.
///
/// Schema bootstrap runs exactly once here, during startup; the statement is
/// `CREATE TABLE IF NOT EXISTS`, so pointing the service at an already
/// provisioned database is a no-op.
pub async fn connect_db(cfg: &DbConfig) -> Result<DatabaseConnection, AppError> {
    let db = build_pool(cfg).await?;
    ensure_schema(&db).await?;
    Ok(db)
}

pub async fn build_pool(cfg: &DbConfig) -> Result<DatabaseConnection, AppError> {
    let mut opt = ConnectOptions::new(&cfg.url);
    opt.min_connections(cfg.pool_min)
        .max_connections(cfg.pool_max)
        .acquire_timeout(Duration::from_millis(cfg.acquire_timeout_ms))
        .sqlx_logging(false);

    let db = Database::connect(opt)
        .await
        .map_err(|e| AppError::config(format!("failed to connect to database: {e}")))?;

    info!(
        "pool=create min={} max={} acquire_timeout_ms={}",
        cfg.pool_min, cfg.pool_max, cfg.acquire_timeout_ms
    );
    Ok(db)
}

/// Idempotent creation of the `todos` table, derived from the entity so the
/// DDL follows the connected backend's dialect.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), AppError> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut stmt = schema.create_table_from_entity(todos::Entity);
    stmt.if_not_exists();

    db.execute(backend.build(&stmt))
        .await
        .map_err(|e| AppError::config(format!("failed to create todos table: {e}")))?;

    info!("schema=ready table=todos");
    Ok(())
}

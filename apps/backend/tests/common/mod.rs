#![allow(dead_code)]

// tests/common/mod.rs

use todo_backend::config::db::DbConfig;
use todo_backend::infra::db::connect_db;
use todo_backend::state::app_state::AppState;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_test_writer())
        .try_init();
}

/// Fresh application state over a private in-memory SQLite database with the
/// schema already bootstrapped. Every call yields a fully isolated store, so
/// tests never need serialization.
pub async fn test_state() -> AppState {
    let db = connect_db(&DbConfig::sqlite_memory())
        .await
        .expect("build test database");
    AppState::new(db)
}

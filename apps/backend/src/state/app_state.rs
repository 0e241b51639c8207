use sea_orm::DatabaseConnection;

/// Application state containing shared resources.
///
/// The connection pool is built once at startup and injected here; nothing
/// below this layer constructs or closes connections itself. Dropping the
/// last clone on shutdown releases the pool.
#[derive(Debug, Clone)]
pub struct AppState {
    db: DatabaseConnection,
}

impl AppState {
    /// Create a new AppState with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Shared connection pool handle
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

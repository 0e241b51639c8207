use std::env;
use std::str::FromStr;

use crate::error::AppError;

/// Connection pool configuration, sourced from the environment.
///
/// `DATABASE_URL` accepts anything SeaORM can connect to; in practice a
/// `postgresql://...` URL in production and `sqlite::memory:` in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub url: String,
    pub pool_min: u32,
    pub pool_max: u32,
    pub acquire_timeout_ms: u64,
}

impl DbConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            url: must_var("DATABASE_URL")?,
            pool_min: var_or("TODO_POOL_MIN", 1)?,
            pool_max: var_or("TODO_POOL_MAX", 10)?,
            acquire_timeout_ms: var_or("TODO_ACQUIRE_TIMEOUT_MS", 2_000)?,
        })
    }

    /// Hermetic single-connection pool over an in-memory SQLite database.
    ///
    /// One connection only: every in-memory SQLite connection is its own
    /// database instance, so a wider pool would scatter rows across
    /// disconnected databases.
    pub fn sqlite_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            pool_min: 1,
            pool_max: 1,
            acquire_timeout_ms: 2_000,
        }
    }
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}

/// Get an optional environment variable, falling back to `default`; a set but
/// unparsable value is a configuration error, not a silent fallback.
fn var_or<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw.parse::<T>().map_err(|_| {
            AppError::config(format!("Environment variable '{name}' has invalid value '{raw}'"))
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::DbConfig;

    // Single test so the environment mutations cannot race each other.
    #[test]
    fn test_from_env() {
        env::remove_var("DATABASE_URL");
        assert!(DbConfig::from_env().is_err());

        env::set_var("DATABASE_URL", "sqlite::memory:");
        let cfg = DbConfig::from_env().unwrap();
        assert_eq!(cfg.url, "sqlite::memory:");
        assert_eq!(cfg.pool_min, 1);
        assert_eq!(cfg.pool_max, 10);
        assert_eq!(cfg.acquire_timeout_ms, 2_000);

        env::set_var("TODO_POOL_MAX", "32");
        let cfg = DbConfig::from_env().unwrap();
        assert_eq!(cfg.pool_max, 32);

        env::set_var("TODO_POOL_MAX", "not-a-number");
        assert!(DbConfig::from_env().is_err());

        env::remove_var("TODO_POOL_MAX");
        env::remove_var("DATABASE_URL");
    }

    #[test]
    fn test_sqlite_memory_is_single_connection() {
        let cfg = DbConfig::sqlite_memory();
        assert_eq!(cfg.pool_max, 1);
        assert_eq!(cfg.url, "sqlite::memory:");
    }
}

//! Database client for Connectify
//!
//! Wraps a `sqlx::Any` pool so the stores can run against SQLite or PostgreSQL
//! with the same code. The few statements that differ between the two engines
//! (row locks, advisory locks) branch on [`DbBackend`].

use crate::error::DbError;
use connectify_config::{AppConfig, DatabaseConfig};
use sqlx::pool::PoolOptions;
use sqlx::{Pool, Transaction};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, error, info};

/// Type alias for a database transaction
pub type DbTransaction<'a> = Transaction<'a, sqlx::Any>;

/// The engine behind a [`DbClient`], derived from the URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbBackend {
    Sqlite,
    Postgres,
}

impl DbBackend {
    /// Detects the backend from a connection URL.
    pub fn from_url(db_url: &str) -> Result<Self, DbError> {
        if db_url.starts_with("sqlite:") {
            Ok(DbBackend::Sqlite)
        } else if db_url.starts_with("postgres://") || db_url.starts_with("postgresql://") {
            Ok(DbBackend::Postgres)
        } else {
            Err(DbError::UrlError(format!(
                "Unsupported database URL scheme: {}",
                db_url.split(':').next().unwrap_or_default()
            )))
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DbBackend::Sqlite => "sqlite",
            DbBackend::Postgres => "postgres",
        }
    }
}

/// Database client for Connectify
///
/// Cloning is cheap: clones share the pool and the SQLite write gate.
#[derive(Debug, Clone)]
pub struct DbClient {
    /// The database connection pool
    pool: Pool<sqlx::Any>,
    backend: DbBackend,
    /// Serialises write transactions on SQLite, which has a single writer.
    write_gate: Arc<Mutex<()>>,
}

impl DbClient {
    /// Create a new database client from the application configuration
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    ///
    /// * The database configuration is missing
    /// * The database URL is empty or has an unsupported scheme
    /// * The database connection fails
    pub async fn new(config: &Arc<AppConfig>) -> Result<Self, DbError> {
        let db_config = config
            .database
            .as_ref()
            .ok_or_else(|| DbError::ConfigError("Database configuration is missing".to_string()))?;

        Self::from_config(db_config).await
    }

    /// Create a new database client from a database configuration
    pub async fn from_config(db_config: &DatabaseConfig) -> Result<Self, DbError> {
        if db_config.url.is_empty() {
            return Err(DbError::ConfigError("Database URL is empty".to_string()));
        }

        Self::from_url(&db_config.url).await
    }

    /// Create a new database client from a database URL
    ///
    /// Accepted forms are `sqlite::memory:`, `sqlite://<path>`, `sqlite:<path>`
    /// and `postgres://...` (the latter needs the `postgres` feature).
    pub async fn from_url(db_url: &str) -> Result<Self, DbError> {
        if db_url.is_empty() {
            return Err(DbError::UrlError("Database URL is empty".to_string()));
        }

        let backend = DbBackend::from_url(db_url)?;
        let pool = Self::create_pool(db_url, backend).await?;

        Ok(Self {
            pool,
            backend,
            write_gate: Arc::new(Mutex::new(())),
        })
    }

    async fn create_pool(db_url: &str, backend: DbBackend) -> Result<Pool<sqlx::Any>, DbError> {
        debug!("Creating {} database pool", backend.as_str());

        // Registers every driver compiled in through the crate features
        sqlx::any::install_default_drivers();

        let in_memory = is_memory_url(db_url);
        let pool_options = if in_memory {
            // Each SQLite memory connection is its own database; keep exactly one alive
            PoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .acquire_timeout(Duration::from_secs(3))
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            PoolOptions::new()
                .max_connections(5)
                .acquire_timeout(Duration::from_secs(3))
                .idle_timeout(Duration::from_secs(600))
        };

        if backend == DbBackend::Sqlite && !in_memory {
            ensure_sqlite_file(db_url)?;
        }

        let connect_options = sqlx::any::AnyConnectOptions::from_str(db_url)
            .map_err(|e| DbError::UrlError(e.to_string()))?;

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                error!("Failed to create database pool: {}", e);
                DbError::PoolError(e.to_string())
            })?;

        info!("Database pool created successfully ({})", backend.as_str());
        Ok(pool)
    }

    /// Get the database connection pool
    pub fn pool(&self) -> &Pool<sqlx::Any> {
        &self.pool
    }

    pub fn backend(&self) -> DbBackend {
        self.backend
    }

    /// Waits for the right to open a write transaction.
    ///
    /// Returns a guard on SQLite and `None` on PostgreSQL, where the stores
    /// rely on row and advisory locks instead. Take the guard before
    /// [`DbClient::begin`] so no pooled connection is held while waiting.
    pub async fn write_lock(&self) -> Option<OwnedMutexGuard<()>> {
        match self.backend {
            DbBackend::Sqlite => Some(self.write_gate.clone().lock_owned().await),
            DbBackend::Postgres => None,
        }
    }

    /// Begin a transaction
    pub async fn begin(&self) -> Result<DbTransaction<'_>, DbError> {
        self.pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))
    }

    /// Execute a statement that returns no rows, yielding the number of rows affected
    pub async fn execute(&self, query: &str) -> Result<u64, DbError> {
        sqlx::query(query)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| DbError::QueryError(e.to_string()))
    }

    /// Check if the database answers a trivial query
    pub async fn is_healthy(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

impl std::fmt::Display for DbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DbClient({})", self.backend.as_str())
    }
}

fn is_memory_url(db_url: &str) -> bool {
    db_url.starts_with("sqlite:") && db_url.contains(":memory:")
}

/// Strips the scheme and query string from a SQLite URL.
fn sqlite_path(db_url: &str) -> &str {
    let path = db_url
        .strip_prefix("sqlite://")
        .or_else(|| db_url.strip_prefix("sqlite:"))
        .unwrap_or(db_url);
    path.split('?').next().unwrap_or(path)
}

/// The `Any` options cannot set `create_if_missing`, so create the file up front.
fn ensure_sqlite_file(db_url: &str) -> Result<(), DbError> {
    let db_path = sqlite_path(db_url);
    if db_path.is_empty() {
        return Err(DbError::UrlError("SQLite URL has no path".to_string()));
    }

    let path = Path::new(db_path);
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            debug!("Creating directory for SQLite database: {:?}", dir);
            std::fs::create_dir_all(dir).map_err(|e| {
                error!("Failed to create directory for SQLite database: {}", e);
                DbError::PoolError(format!("Failed to create directory: {}", e))
            })?;
        }
    }

    if !path.exists() {
        debug!("Creating empty SQLite database file: {}", db_path);
        std::fs::File::create(path).map_err(|e| {
            error!("Failed to create SQLite database file: {}", e);
            DbError::PoolError(format!("Failed to create database file: {}", e))
        })?;
    }

    Ok(())
}

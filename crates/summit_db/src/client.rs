//! Database client for the Summit registration service
//!
//! This module provides a database client built on the SQLx `Any` driver, so
//! the same code runs against MySQL in production and SQLite locally and in
//! tests.

use crate::error::DbError;
use sqlx::pool::{PoolConnection, PoolOptions};
use sqlx::{Any, Pool};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use summit_config::DatabaseSettings;
use tracing::{debug, error, info, warn};

/// The SQL dialect behind a client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    MySql,
    Sqlite,
}

impl Backend {
    /// Determine the backend from a connection URL scheme.
    pub fn from_url(db_url: &str) -> Result<Self, DbError> {
        if db_url.starts_with("mysql:") || db_url.starts_with("mariadb:") {
            Ok(Backend::MySql)
        } else if db_url.starts_with("sqlite:") {
            Ok(Backend::Sqlite)
        } else {
            let scheme = db_url.split(':').next().unwrap_or_default();
            Err(DbError::UrlError(format!(
                "unsupported database scheme {scheme:?}"
            )))
        }
    }
}

/// Database client
///
/// Wraps a connection pool. Connections handed out by [`DbClient::acquire`]
/// go back to the pool when dropped, whatever path the caller leaves by.
#[derive(Debug, Clone)]
pub struct DbClient {
    /// The database connection pool
    pool: Pool<Any>,
    backend: Backend,
}

impl DbClient {
    /// Create a new database client from a database URL
    ///
    /// Makes a single connection attempt.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    ///
    /// * The database URL is empty or has an unsupported scheme
    /// * The database connection fails
    pub async fn from_url(db_url: &str, settings: &DatabaseSettings) -> Result<Self, DbError> {
        if db_url.is_empty() {
            return Err(DbError::UrlError("Database URL is empty".to_string()));
        }
        let backend = Backend::from_url(db_url)?;

        // Create the connection pool
        let pool = Self::create_pool(db_url, backend, settings).await?;

        Ok(Self { pool, backend })
    }

    /// Create a new database client, retrying the initial connection.
    ///
    /// Up to `attempts` connections are tried, `settings.retry_delay_secs`
    /// apart. Configuration errors are not retried.
    pub async fn connect_with_retry(
        db_url: &str,
        settings: &DatabaseSettings,
        attempts: u32,
    ) -> Result<Self, DbError> {
        let attempts = attempts.max(1);
        let mut attempt = 1;
        loop {
            match Self::from_url(db_url, settings).await {
                Ok(client) => return Ok(client),
                Err(err) if err.is_configuration() || attempt >= attempts => {
                    error!("Could not connect to the database after {attempt} attempt(s): {err}");
                    return Err(err);
                }
                Err(err) => {
                    warn!("Connection attempt {attempt}/{attempts} failed: {err}");
                    tokio::time::sleep(Duration::from_secs(settings.retry_delay_secs)).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Create a connection pool
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    ///
    /// * The database URL is invalid
    /// * The SQLite file cannot be created
    /// * The database connection fails
    async fn create_pool(
        db_url: &str,
        backend: Backend,
        settings: &DatabaseSettings,
    ) -> Result<Pool<Any>, DbError> {
        // Register the MySQL and SQLite drivers with the "any" driver
        sqlx::any::install_default_drivers();

        let pool_options = PoolOptions::<Any>::new()
            .max_connections(settings.max_connections.max(1))
            .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(settings.idle_timeout_secs));

        // We can't set create_if_missing through AnyConnectOptions, so make
        // sure the file and its directory exist first
        if backend == Backend::Sqlite {
            Self::ensure_sqlite_file(db_url)?;
        }

        let options = sqlx::any::AnyConnectOptions::from_str(db_url)
            .map_err(|e| DbError::UrlError(e.to_string()))?;

        let pool = pool_options.connect_with(options).await.map_err(|e| {
            error!("Failed to create database pool: {}", e);
            DbError::ConnectionError(e.to_string())
        })?;

        info!("Database pool created successfully ({:?})", backend);
        Ok(pool)
    }

    fn ensure_sqlite_file(db_url: &str) -> Result<(), DbError> {
        // Handle both "sqlite:example.db" and "sqlite://example.db" formats
        let db_path = db_url
            .strip_prefix("sqlite://")
            .or_else(|| db_url.strip_prefix("sqlite:"))
            .unwrap_or(db_url);
        let db_path = db_path.split('?').next().unwrap_or_default();

        if db_path.is_empty() || db_path.contains(":memory:") {
            return Ok(());
        }

        let path = Path::new(db_path);
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            if !dir.exists() {
                debug!("Creating directory for SQLite database: {:?}", dir);
                std::fs::create_dir_all(dir).map_err(|e| {
                    DbError::ConfigError(format!("Failed to create directory: {}", e))
                })?;
            }
        }

        if !path.exists() {
            debug!("Creating empty SQLite database file: {}", db_path);
            std::fs::File::create(path).map_err(|e| {
                DbError::ConfigError(format!("Failed to create database file: {}", e))
            })?;
        }
        Ok(())
    }

    /// Get the database connection pool
    pub fn pool(&self) -> &Pool<Any> {
        &self.pool
    }

    /// The SQL dialect of this client
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Check out a connection.
    ///
    /// Waits at most the configured acquire timeout.
    pub async fn acquire(&self) -> Result<PoolConnection<Any>, DbError> {
        self.pool
            .acquire()
            .await
            .map_err(|e| DbError::ConnectionError(e.to_string()))
    }

    /// Execute a statement that returns no rows
    ///
    /// # Returns
    ///
    /// The number of rows affected
    pub async fn execute(&self, query: &str) -> Result<u64, DbError> {
        sqlx::query(query)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| DbError::QueryError(e.to_string()))
    }

    /// Run `SELECT 1` against the database.
    pub async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| DbError::ConnectionError(e.to_string()))
    }

    /// Number of connections currently checked out of the pool.
    pub fn connections_in_use(&self) -> usize {
        (self.pool.size() as usize).saturating_sub(self.pool.num_idle())
    }
}

impl std::fmt::Display for DbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DbClient({:?})", self.backend)
    }
}

//! Lazily connected database client.
//!
//! The application builds one [`LazyDbClient`] at startup and shares it. The
//! first caller resolves the connection target and opens the pool; the result
//! is kept for the life of the process. A failed attempt is not remembered, so
//! the next caller tries again (the database may simply not be up yet).
//!
//! Connecting happens outside the cell. Callers racing on a cold client each
//! connect on their own and the first pool to land wins; the others are
//! closed. A stalled database therefore costs every caller one connect
//! timeout, never the sum of everyone queued ahead of it.

use crate::client::DbClient;
use crate::error::DbError;
use summit_config::{ConnectionResolver, DatabaseSettings};
use tokio::sync::{OnceCell, SetError};
use tracing::debug;

/// A database client that connects on first use
#[derive(Debug)]
pub struct LazyDbClient {
    resolver: Option<ConnectionResolver>,
    settings: DatabaseSettings,
    client: OnceCell<DbClient>,
}

impl LazyDbClient {
    /// Create a client that resolves its target with `resolver` on first use.
    pub fn new(resolver: ConnectionResolver, settings: DatabaseSettings) -> Self {
        Self {
            resolver: Some(resolver),
            settings,
            client: OnceCell::new(),
        }
    }

    /// Wrap an already connected client.
    pub fn from_client(client: DbClient) -> Self {
        Self {
            resolver: None,
            settings: DatabaseSettings::default(),
            client: OnceCell::from(client),
        }
    }

    /// Get the client, connecting with a single attempt if needed.
    pub async fn get(&self) -> Result<&DbClient, DbError> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = self.connect(1).await?;
        self.install(client).await
    }

    /// Get the client, connecting with the configured number of attempts.
    ///
    /// Meant for process start, where waiting for a slow database is fine.
    pub async fn warm_up(&self) -> Result<&DbClient, DbError> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = self.connect(self.settings.connect_attempts).await?;
        self.install(client).await
    }

    /// Whether a pool has been opened.
    pub fn is_connected(&self) -> bool {
        self.client.initialized()
    }

    /// Whether the database currently answers `SELECT 1`.
    pub async fn is_healthy(&self) -> bool {
        match self.get().await {
            Ok(client) => client.ping().await.is_ok(),
            Err(_) => false,
        }
    }

    async fn install(&self, client: DbClient) -> Result<&DbClient, DbError> {
        if let Err(SetError::AlreadyInitializedError(extra) | SetError::InitializingError(extra)) =
            self.client.set(client)
        {
            debug!("Another caller connected first, closing the extra pool");
            extra.pool().close().await;
        }
        self.client
            .get()
            .ok_or_else(|| DbError::ConnectionError("connection pool was not installed".to_string()))
    }

    async fn connect(&self, attempts: u32) -> Result<DbClient, DbError> {
        let resolver = self
            .resolver
            .as_ref()
            .ok_or_else(|| DbError::ConfigError("no connection resolver configured".to_string()))?;

        // Resolve every time we get here: configuration may have been fixed
        // since the last failed attempt
        let resolved = resolver.resolve()?;
        let url = resolved.url()?;
        debug!("Connecting to {}", resolved.redacted_url());

        DbClient::connect_with_retry(&url, &self.settings, attempts).await
    }
}

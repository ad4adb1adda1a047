//! Database integration for the Summit registration service
//!
//! This crate provides a database client on top of SQLx's `Any` driver. The
//! service runs against MySQL; SQLite is supported for local development and
//! for tests.
//!
//! # Features
//!
//! - Connection pooling with a short acquire timeout
//! - Bounded retry of the initial connection
//! - Lazy, resolve-once connection through [`LazyDbClient`]
//!
//! # Example
//!
//! ```rust,no_run
//! use summit_config::{ConnectionResolver, DatabaseSettings};
//! use summit_db::LazyDbClient;
//!
//! async fn setup_db() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = DatabaseSettings::default();
//!     let db = LazyDbClient::new(ConnectionResolver::from_env(&settings), settings);
//!     let client = db.warm_up().await?;
//!     client.ping().await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod lazy;

// Re-export the client types for ease of use
pub use client::{Backend, DbClient};
pub use error::DbError;
pub use lazy::LazyDbClient;

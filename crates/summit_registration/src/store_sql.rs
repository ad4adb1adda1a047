//! SQL implementation of the registration store
//!
//! Runs on the shared [`LazyDbClient`]. MySQL and SQLite differ only in the
//! table definition and in how `created_at` is read back as text.

use crate::models::{NewRegistration, Registration};
use crate::store::{RegistrationSession, RegistrationStore};
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::any::AnyRow;
use sqlx::pool::PoolConnection;
use sqlx::{Any, AnyConnection, Connection, Row};
use std::sync::Arc;
use summit_db::{Backend, DbError, LazyDbClient};
use tokio::sync::OnceCell;
use tracing::{debug, error, info, warn};

const MYSQL_CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS registrations (
        id BIGINT AUTO_INCREMENT PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email VARCHAR(255) NOT NULL,
        message TEXT,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        UNIQUE KEY uq_registrations_email (email)
    ) DEFAULT CHARSET=utf8mb4
"#;

const SQLITE_CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS registrations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        message TEXT,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
"#;

const MYSQL_COLUMNS: &str = "id, name, email, COALESCE(message, '') AS message, \
     DATE_FORMAT(created_at, '%Y-%m-%d %H:%i:%s') AS created_at";

const SQLITE_COLUMNS: &str =
    "id, name, email, COALESCE(message, '') AS message, CAST(created_at AS TEXT) AS created_at";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn create_table_sql(backend: Backend) -> &'static str {
    match backend {
        Backend::MySql => MYSQL_CREATE_TABLE,
        Backend::Sqlite => SQLITE_CREATE_TABLE,
    }
}

fn select_sql(backend: Backend, filter: &str) -> String {
    let columns = match backend {
        Backend::MySql => MYSQL_COLUMNS,
        Backend::Sqlite => SQLITE_COLUMNS,
    };
    format!("SELECT {columns} FROM registrations {filter}")
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

fn row_to_registration(row: &AnyRow) -> Result<Registration, DbError> {
    let created_at: Option<String> = row.try_get("created_at")?;
    Ok(Registration {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        message: row.try_get("message")?,
        created_at: created_at.as_deref().and_then(parse_timestamp),
    })
}

/// Keep unique constraint rejections recognisable after wrapping.
fn query_error(err: sqlx::Error) -> DbError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            DbError::UniqueViolation(db_err.message().to_string())
        }
        _ => DbError::QueryError(err.to_string()),
    }
}

async fn create_table(conn: &mut AnyConnection, backend: Backend) -> Result<(), DbError> {
    debug!("Initializing registrations schema");
    sqlx::query(create_table_sql(backend))
        .execute(conn)
        .await
        .map_err(|e| {
            error!("Failed to create registrations table: {}", e);
            DbError::QueryError(e.to_string())
        })?;
    info!("Registrations schema initialized successfully");
    Ok(())
}

async fn insert_row(
    conn: &mut AnyConnection,
    backend: Backend,
    registration: &NewRegistration,
) -> Result<Registration, DbError> {
    let result = sqlx::query("INSERT INTO registrations (name, email, message) VALUES (?, ?, ?)")
        .bind(registration.name())
        .bind(registration.email())
        .bind(registration.message())
        .execute(&mut *conn)
        .await
        .map_err(query_error)?;

    let id = match backend {
        Backend::MySql => result.last_insert_id().ok_or_else(|| {
            DbError::QueryError("database did not report the new id".to_string())
        })?,
        // The Any driver leaves last_insert_id empty for SQLite
        Backend::Sqlite => sqlx::query_scalar::<_, i64>("SELECT last_insert_rowid()")
            .fetch_one(&mut *conn)
            .await
            .map_err(query_error)?,
    };

    // Read back inside the transaction to pick up the database's timestamp
    let sql = select_sql(backend, "WHERE id = ?");
    let row = sqlx::query(&sql)
        .bind(id)
        .fetch_one(&mut *conn)
        .await
        .map_err(query_error)?;
    row_to_registration(&row)
}

/// SQL implementation of the registration store
#[derive(Debug, Clone)]
pub struct SqlRegistrationStore {
    db: Arc<LazyDbClient>,
    /// Set once the table is known to exist
    schema_ready: Arc<OnceCell<()>>,
}

impl SqlRegistrationStore {
    /// Create a new SQL registration store
    ///
    /// # Arguments
    ///
    /// * `db` - The shared, lazily connected database client
    pub fn new(db: Arc<LazyDbClient>) -> Self {
        Self {
            db,
            schema_ready: Arc::new(OnceCell::new()),
        }
    }

    /// The database client behind this store
    pub fn db(&self) -> &LazyDbClient {
        &self.db
    }

    /// Create the registrations table now instead of on first use.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        let mut session = self.open().await?;
        session.ensure_schema().await
    }
}

impl RegistrationStore for SqlRegistrationStore {
    type Session = SqlRegistrationSession;

    async fn open(&self) -> Result<SqlRegistrationSession, DbError> {
        let client = self.db.get().await?;
        let conn = client.acquire().await?;
        Ok(SqlRegistrationSession {
            conn,
            backend: client.backend(),
            schema_ready: Arc::clone(&self.schema_ready),
        })
    }
}

/// A checked out connection plus what the queries need to know about it
///
/// The connection goes back to the pool when the session is dropped.
#[derive(Debug)]
pub struct SqlRegistrationSession {
    conn: PoolConnection<Any>,
    backend: Backend,
    schema_ready: Arc<OnceCell<()>>,
}

impl RegistrationSession for SqlRegistrationSession {
    async fn ensure_schema(&mut self) -> Result<(), DbError> {
        let Self {
            conn,
            backend,
            schema_ready,
        } = self;
        let backend = *backend;
        schema_ready
            .get_or_try_init(|| create_table(&mut **conn, backend))
            .await?;
        Ok(())
    }

    async fn find_by_email(&mut self, email: &str) -> Result<Option<Registration>, DbError> {
        let sql = select_sql(self.backend, "WHERE email = ?");
        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&mut *self.conn)
            .await
            .map_err(|e| {
                error!("Failed to look up registration: {}", e);
                DbError::QueryError(e.to_string())
            })?;
        row.as_ref().map(row_to_registration).transpose()
    }

    async fn insert(&mut self, registration: &NewRegistration) -> Result<Registration, DbError> {
        let backend = self.backend;
        let mut tx = self
            .conn
            .begin()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;

        match insert_row(&mut tx, backend, registration).await {
            Ok(stored) => {
                tx.commit()
                    .await
                    .map_err(|e| DbError::TransactionError(e.to_string()))?;
                debug!("Registration {} committed", stored.id);
                Ok(stored)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Rollback after failed insert also failed: {}", rollback_err);
                }
                Err(err)
            }
        }
    }

    async fn list_all(&mut self) -> Result<Vec<Registration>, DbError> {
        let sql = select_sql(self.backend, "ORDER BY id DESC");
        let rows = sqlx::query(&sql)
            .fetch_all(&mut *self.conn)
            .await
            .map_err(|e| {
                error!("Failed to list registrations: {}", e);
                DbError::QueryError(e.to_string())
            })?;
        rows.iter().map(row_to_registration).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp() {
        let parsed = parse_timestamp("2026-03-14 09:30:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-03-14T09:30:00+00:00");
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_select_sql_per_backend() {
        let mysql = select_sql(Backend::MySql, "WHERE id = ?");
        assert!(mysql.contains("DATE_FORMAT"));
        assert!(mysql.ends_with("FROM registrations WHERE id = ?"));

        let sqlite = select_sql(Backend::Sqlite, "ORDER BY id DESC");
        assert!(sqlite.contains("CAST(created_at AS TEXT)"));
        assert!(!sqlite.contains("DATE_FORMAT"));
    }

    #[test]
    fn test_both_schemas_enforce_unique_email() {
        assert!(create_table_sql(Backend::MySql).contains("UNIQUE KEY uq_registrations_email (email)"));
        assert!(create_table_sql(Backend::Sqlite).contains("email TEXT NOT NULL UNIQUE"));
    }
}

//! # Storage Error Types
//!
//! Error types for slot storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError::Store (in gudang-app)                                       │
//! │       │                                                                 │
//! │       ├── Reads: logged, degrade to seeded defaults / empty lists      │
//! │       └── Writes: retried once, then surfaced to the caller            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Slot storage errors.
///
/// These errors wrap sqlx and serde_json errors and provide additional
/// context for debugging and user feedback.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("migration failed: {0}")]
    MigrationFailed(String),

    /// Slot read or write failed at the SQL layer.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// A slot holds a payload that no longer deserializes.
    ///
    /// ## When This Occurs
    /// - Truncated write from a crash mid-save
    /// - Manual edits to the database file
    /// The app layer treats this like an absent slot and falls back to
    /// defaults, after logging.
    #[error("slot '{key}' holds a corrupt payload: {source}")]
    CorruptPayload {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A slot value failed to serialize before writing.
    #[error("failed to encode slot payload: {0}")]
    EncodeFailed(serde_json::Error),

    /// Pool exhausted (all connections in use).
    #[error("connection pool exhausted")]
    PoolExhausted,

    /// Internal storage error.
    #[error("internal storage error: {0}")]
    Internal(String),
}

/// Convert sqlx errors to StoreError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::PoolTimedOut   → StoreError::PoolExhausted
/// sqlx::Error::PoolClosed     → StoreError::ConnectionFailed
/// sqlx::Error::Database       → StoreError::QueryFailed
/// Other                       → StoreError::Internal
/// ```
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => StoreError::QueryFailed(db_err.message().to_string()),
            sqlx::Error::PoolTimedOut => StoreError::PoolExhausted,
            sqlx::Error::PoolClosed => StoreError::ConnectionFailed("pool is closed".to_string()),
            _ => StoreError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

//! # Application Error Type
//!
//! The exhaustive error sum the presentation layer matches on.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Gudang                                 │
//! │                                                                         │
//! │  Presentation                 gudang-app                                │
//! │  ────────────                 ──────────                                │
//! │                                                                         │
//! │  add_item(fields)                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Operation                                                       │  │
//! │  │  Result<T, AppError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Rule violated? ── ValidationError ── AppError::Validation ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Id vanished? ──────────────────── AppError::ItemNotFound ─────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Write failed twice? ── StoreError ── AppError::Store ─────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  match err {                                                            │
//! │    Validation(e)   => blocking message dialog (e.to_string())           │
//! │    ItemNotFound{_} => "item no longer exists" dialog + list refresh     │
//! │    Store(e)        => "save failed" dialog, state may be ahead of disk  │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use gudang_core::ValidationError;
use gudang_store::StoreError;

/// Application operation errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// A business rule rejected the input. Recovered locally; the `Display`
    /// text is the user-facing message.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The operation targeted an item id that no longer exists.
    ///
    /// Surfaced deliberately: the original behavior was a silent no-op,
    /// which left the UI with a success-shaped nothing.
    #[error("item not found: {id}")]
    ItemNotFound { id: String },

    /// Durable storage failed. For writes this means the retry also failed
    /// and the in-memory state may be ahead of disk.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

// =============================================================================
// Unit Tests
// =============================================================================

//! # gudang-store: Slot Storage Layer for Gudang
//!
//! This crate provides durable storage for the Gudang state slots.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Gudang Data Flow                                 │
//! │                                                                         │
//! │  gudang-app (AppState mutation)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   gudang-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │     Store     │    │SlotRepository │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (slots.rs)   │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ load / save   │    │ 001_create_  │  │   │
//! │  │   │ Connection    │    │ remove        │    │ slots.sql    │  │   │
//! │  │   │ Management    │    │ retry-once    │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   slots(key, value, updated_at) - one row per state slot        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`slots`] - Slot repository (load/save/remove, per-slot wrappers)
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gudang_store::{Store, StoreConfig};
//!
//! // Open (creates the file and applies migrations)
//! let store = Store::open(StoreConfig::new("path/to/gudang.db")).await?;
//!
//! // Whole-value slot access
//! store.slots().save_items(&items).await?;
//! let items = store.slots().load_items().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod slots;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use pool::{Store, StoreConfig};
pub use slots::{
    SlotRepository, HISTORY_SLOT, INVENTORY_SLOT, SESSION_SLOT, USERS_SLOT,
};

//! # gudang-core: Pure Business Logic for Gudang
//!
//! This crate is the **heart** of Gudang, a single-warehouse inventory
//! tracker. It contains all business rules as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Gudang Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation Layer (external)                   │   │
//! │  │    Login UI ──► Inventory UI ──► History UI ──► Manage UI       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    gudang-app (AppState)                        │   │
//! │  │    login, plan/commit transaction, add/update/delete item       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ gudang-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐        ┌───────────┐        ┌───────────┐      │   │
//! │  │   │   types   │        │ validation│        │   error   │      │   │
//! │  │   │ User/Item │        │   login   │        │ rule-level│      │   │
//! │  │   │  History  │        │  quantity │        │  variants │      │   │
//! │  │   └───────────┘        └───────────┘        └───────────┘      │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 gudang-store (Slot Storage)                     │   │
//! │  │          four JSON slots in a local SQLite file                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Item, HistoryEntry) and seeded defaults
//! - [`validation`] - Business rule validation (credentials, quantities)
//! - [`error`] - Validation error variants
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system and clock access are FORBIDDEN here
//! 3. **Explicit Errors**: All errors are typed, never strings or panics
//! 4. **Snapshot History**: History entries copy values, never reference live entities

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use gudang_core::Item` instead of
// `use gudang_core::types::Item`

pub use error::{ValidationError, ValidationResult};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Marker token on a history entry's location indicating a waste (spoilage)
/// transaction rather than a normal outbound shipment.
///
/// ## Data Format
/// An OUT entry recorded with the waste flag stores its location as
/// `"[RUSAK] <note>"`. Both halves of the contract live here:
/// [`types::waste_location`] writes the prefix, and
/// [`types::HistoryEntry::is_waste`] / [`types::HistoryEntry::display_location`]
/// detect and strip it.
pub const WASTE_MARKER: &str = "[RUSAK]";

/// Placeholder stored when the caller left the location note blank.
pub const NO_LOCATION: &str = "-";

/// Fixed location label recorded on DELETE history entries.
pub const DELETED_ITEM_LOCATION: &str = "Penghapusan Data Permanen";

/// Actor name recorded when no user session exists at transaction time.
pub const UNKNOWN_ACTOR: &str = "Unknown";

//! # Domain Types
//!
//! Core domain types used throughout Gudang.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │      Item       │   │  HistoryEntry   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id (millis)    │       │
//! │  │  username (uniq)│   │  code (unique)  │   │  date (display) │       │
//! │  │  password       │   │  name           │   │  kind IN/OUT/DEL│       │
//! │  │  role           │   │  qty, min_stock │   │  item_name …    │       │
//! │  │  name           │   │  unit           │   │  (snapshots)    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │      Role       │   │ TransactionKind │                             │
//! │  │  Owner          │   │  In  (receive)  │                             │
//! │  │  Employee       │   │  Out (ship)     │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot History Pattern
//! A [`HistoryEntry`] copies the item name, quantity, unit and actor name at
//! the moment of the transaction. It never references a live `Item` or
//! `User`, so past entries stay accurate after an item is renamed or deleted.
//!
//! ## Wire Format
//! The serde field names below are the persisted JSON contract
//! (`qty`, `minStock`, `itemName`, role token `karyawan`). An existing
//! database written by an earlier release must keep loading, so these names
//! must not change.

use serde::{Deserialize, Serialize};

use crate::{NO_LOCATION, WASTE_MARKER};

// =============================================================================
// Role
// =============================================================================

/// A user's role, deciding which management screens they may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Full access: item management, user registration.
    #[serde(rename = "owner")]
    Owner,
    /// Stock transactions only. On-disk token is `karyawan`.
    #[serde(rename = "karyawan")]
    Employee,
}

// =============================================================================
// User
// =============================================================================

/// An account that can log in.
///
/// Users are created by registration or seeded defaults and never edited or
/// deleted. Invariant: `username` is unique across the user set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (millisecond timestamp string).
    pub id: String,

    /// Login name - unique across the user set.
    pub username: String,

    /// Plaintext password. Deliberate: the data model stores credentials
    /// as-is and credential hardening is outside this layer's scope.
    pub password: String,

    /// Role deciding access level.
    pub role: Role,

    /// Display name, snapshotted into history entries as the actor.
    pub name: String,
}

impl User {
    /// Checks whether this user may manage items and register users.
    #[inline]
    pub fn is_owner(&self) -> bool {
        self.role == Role::Owner
    }
}

// =============================================================================
// Item
// =============================================================================

/// A stocked item in the warehouse catalog.
///
/// Invariants:
/// - `code` is unique across the item set (enforced on create and on edit)
/// - `qty` never goes negative; transaction validation is the sole guard,
///   there is no clamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier (millisecond timestamp string).
    pub id: String,

    /// Business code shown on labels - unique across the item set.
    pub code: String,

    /// Display name.
    pub name: String,

    /// Current stock level.
    pub qty: u32,

    /// Threshold below which the item counts as low stock.
    #[serde(rename = "minStock")]
    pub min_stock: u32,

    /// Unit label ("Kg", "Sak", ...). Free-form, snapshotted into history.
    pub unit: String,
}

impl Item {
    /// Checks whether stock has fallen below the reorder threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.qty < self.min_stock
    }
}

// =============================================================================
// Transactions & History
// =============================================================================

/// Direction of a stock transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Stock received into the warehouse.
    #[serde(rename = "IN")]
    In,
    /// Stock shipped out (or discarded, when flagged as waste).
    #[serde(rename = "OUT")]
    Out,
}

/// What a history entry records.
///
/// `In` and `Out` come from transactions; `Delete` is written when an item
/// is removed from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "OUT")]
    Out,
    #[serde(rename = "DELETE")]
    Delete,
}

impl From<TransactionKind> for EntryKind {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::In => EntryKind::In,
            TransactionKind::Out => EntryKind::Out,
        }
    }
}

/// One immutable line in the transaction history.
///
/// Entries are prepended (newest first) and never edited. The whole list may
/// be cleared in one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique identifier derived from the creation timestamp.
    pub id: String,

    /// Display-formatted local timestamp.
    pub date: String,

    /// IN, OUT or DELETE.
    #[serde(rename = "type")]
    pub kind: EntryKind,

    /// Item name at the time of the action (snapshot).
    #[serde(rename = "itemName")]
    pub item_name: String,

    /// Quantity moved; for DELETE, the final stock level.
    pub qty: u32,

    /// Unit label at the time of the action (snapshot).
    pub unit: String,

    /// Display name of the logged-in user, or "Unknown".
    pub actor: String,

    /// Source/destination note, `"-"` when blank. OUT entries flagged as
    /// waste carry the `[RUSAK]` prefix.
    pub location: String,
}

impl HistoryEntry {
    /// Checks whether this entry recorded a waste (spoilage) transaction.
    pub fn is_waste(&self) -> bool {
        self.location.contains(WASTE_MARKER)
    }

    /// Returns the location with the waste prefix stripped, for display.
    pub fn display_location(&self) -> &str {
        self.location
            .strip_prefix(WASTE_MARKER)
            .map(str::trim_start)
            .unwrap_or(&self.location)
    }
}

// =============================================================================
// Location Helpers
// =============================================================================

/// Prefixes a location note with the waste marker.
pub fn waste_location(location: &str) -> String {
    format!("{} {}", WASTE_MARKER, location)
}

/// Resolves the location note stored on a history entry.
///
/// Blank input becomes `"-"`; the waste flag prepends the `[RUSAK]` marker.
pub fn resolve_location(input: &str, waste: bool) -> String {
    let trimmed = input.trim();
    let base = if trimmed.is_empty() {
        NO_LOCATION
    } else {
        trimmed
    };
    if waste {
        waste_location(base)
    } else {
        base.to_string()
    }
}

// =============================================================================
// Stock Summaries
// =============================================================================

/// Total stock across the whole catalog (dashboard figure).
pub fn total_stock(items: &[Item]) -> u64 {
    items.iter().map(|i| u64::from(i.qty)).sum()
}

/// Number of items below their reorder threshold (dashboard figure).
pub fn low_stock_count(items: &[Item]) -> usize {
    items.iter().filter(|i| i.is_low_stock()).count()
}

// =============================================================================
// Seeded Defaults
// =============================================================================

/// The user set a fresh install starts with.
pub fn default_users() -> Vec<User> {
    vec![
        User {
            id: "1".to_string(),
            username: "owner".to_string(),
            password: "123".to_string(),
            role: Role::Owner,
            name: "Pak Ketua".to_string(),
        },
        User {
            id: "2".to_string(),
            username: "budi".to_string(),
            password: "123".to_string(),
            role: Role::Employee,
            name: "Budi Santoso".to_string(),
        },
    ]
}

/// The catalog a fresh install starts with.
pub fn default_items() -> Vec<Item> {
    vec![
        Item {
            id: "1".to_string(),
            code: "KOPI-R-01".to_string(),
            name: "Robusta Grade A".to_string(),
            qty: 500,
            min_stock: 100,
            unit: "Kg".to_string(),
        },
        Item {
            id: "2".to_string(),
            code: "KOPI-A-01".to_string(),
            name: "Arabica Full Wash".to_string(),
            qty: 40,
            min_stock: 50,
            unit: "Kg".to_string(),
        },
        Item {
            id: "3".to_string(),
            code: "KOPI-L-99".to_string(),
            name: "Liberica Dark".to_string(),
            qty: 15,
            min_stock: 20,
            unit: "Kg".to_string(),
        },
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Validation Module
//!
//! Business rule validation for Gudang.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (external)                                      │
//! │  ├── Input collection, confirmation dialogs                            │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (pure business rules)                            │
//! │  ├── Credential check (validate_login)                                 │
//! │  ├── Quantity & stock-sufficiency check (validate_transaction)         │
//! │  └── Field presence / min-stock parsing                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: gudang-app (collection-level invariants)                     │
//! │  ├── Code uniqueness across the item set                               │
//! │  └── Username uniqueness across the user set                           │
//! │                                                                         │
//! │  validate_transaction is the SOLE stock-sufficiency guarantee:         │
//! │  qty ≥ 0 holds because every OUT is checked here before it applies.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use gudang_core::types::{default_items, default_users, TransactionKind};
//! use gudang_core::validation::{validate_login, validate_transaction};
//!
//! let users = default_users();
//! let user = validate_login(&users, "budi", "123").unwrap();
//! assert_eq!(user.name, "Budi Santoso");
//!
//! let items = default_items();
//! let qty = validate_transaction(&items[0], TransactionKind::Out, "25").unwrap();
//! assert_eq!(qty, 25);
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::types::{Item, TransactionKind, User};

// =============================================================================
// Credential Validation
// =============================================================================

/// Validates login credentials against the current user set.
///
/// ## Rules
/// - Exact match on both username and password
/// - Failure is always [`ValidationError::InvalidCredentials`]: the message
///   never reveals whether the username exists
///
/// ## Returns
/// The matched user record, borrowed from the set.
pub fn validate_login<'a>(
    users: &'a [User],
    username: &str,
    password: &str,
) -> ValidationResult<&'a User> {
    users
        .iter()
        .find(|u| u.username == username && u.password == password)
        .ok_or(ValidationError::InvalidCredentials)
}

// =============================================================================
// Transaction Validation
// =============================================================================

/// Validates a stock transaction's quantity input.
///
/// ## Rules
/// - Input must parse to a positive integer
/// - For OUT, the item must hold at least that much stock
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Stock Out                                                              │
/// │                                                                         │
/// │  User enters quantity: "20"                                            │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_transaction(item, Out, "20") ← THIS FUNCTION                 │
/// │       │                                                                 │
/// │       ├── not a number / ≤ 0? → "quantity must be a positive number"   │
/// │       │                                                                 │
/// │       ├── item.qty < 20? → "insufficient stock, only N available"      │
/// │       │                                                                 │
/// │       └── OK → Ok(20), caller proceeds to the confirm step             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// ## Returns
/// The parsed quantity. Pure: the item is not touched.
pub fn validate_transaction(
    item: &Item,
    kind: TransactionKind,
    qty_input: &str,
) -> ValidationResult<u32> {
    let qty: u32 = qty_input
        .trim()
        .parse()
        .map_err(|_| ValidationError::QuantityNotPositive)?;

    if qty == 0 {
        return Err(ValidationError::QuantityNotPositive);
    }

    if kind == TransactionKind::Out && item.qty < qty {
        return Err(ValidationError::InsufficientStock {
            available: item.qty,
        });
    }

    Ok(qty)
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates that a required text field is present and non-blank.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

/// Parses a minimum-stock input field.
///
/// ## Rules
/// - Must be present
/// - Must parse to a non-negative integer (zero is allowed: "never warn")
pub fn validate_min_stock(input: &str) -> ValidationResult<u32> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::required("minimum stock"));
    }

    input.parse().map_err(|_| ValidationError::InvalidMinStock)
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Error Types
//!
//! Validation error variants for gudang-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  gudang-core errors (this file)                                        │
//! │  └── ValidationError  - Business rule violations                       │
//! │                                                                         │
//! │  gudang-store errors (separate crate)                                  │
//! │  └── StoreError       - Slot storage failures                          │
//! │                                                                         │
//! │  gudang-app errors (separate crate)                                    │
//! │  └── AppError         - What the presentation layer matches on        │
//! │                                                                         │
//! │  Flow: ValidationError → AppError → Presentation Layer                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (code, username, available stock)
//! 3. Errors are enum variants, never String
//! 4. Each variant's `Display` text is the user-facing message

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Business rule violations.
///
/// These errors are always recovered locally: the presentation layer shows
/// the `Display` text in a blocking dialog and no state changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Credentials did not match any user.
    ///
    /// ## Why One Variant For Both Failures
    /// Unknown-username and wrong-password deliberately produce the same
    /// message so a failed login never leaks which half was wrong.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Transaction quantity failed to parse, or parsed to zero or less.
    #[error("quantity must be a positive number")]
    QuantityNotPositive,

    /// An OUT transaction asked for more than the item holds.
    ///
    /// ## User Workflow
    /// ```text
    /// Stock Out (qty: 20)
    ///      │
    ///      ▼
    /// Check stock: available=15
    ///      │
    ///      ▼
    /// InsufficientStock { available: 15 }
    ///      │
    ///      ▼
    /// UI shows: "insufficient stock, only 15 available"
    /// ```
    #[error("insufficient stock, only {available} available")]
    InsufficientStock { available: u32 },

    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Minimum stock input did not parse to a non-negative integer.
    #[error("minimum stock must be a non-negative number")]
    InvalidMinStock,

    /// Item code already taken by another item.
    #[error("item code '{code}' already exists")]
    DuplicateCode { code: String },

    /// Username already taken by another user.
    #[error("username '{username}' already exists")]
    DuplicateUsername { username: String },
}

impl ValidationError {
    /// Creates a Required error for the given field name.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

//! # Transaction Plan
//!
//! The pending-change value between validation and consent.
//!
//! ## Plan/Commit Split
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Stock Transaction in Two Steps                         │
//! │                                                                         │
//! │  UI: user fills qty "10", location "Petani Budi", taps Save            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  plan_transaction(item_id, In, "10", "Petani Budi", false)             │
//! │       │                                                                 │
//! │       ├── Err? → blocking message dialog, nothing changed              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TransactionPlan { item_name, qty, new_qty, location, ... }            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  UI renders confirm dialog from the plan's fields                      │
//! │       │                                                                 │
//! │       ├── Cancel → plan is dropped, nothing changed                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  commit_transaction(plan) → stock applied, history entry written       │
//! │                                                                         │
//! │  The core never pauses inside an operation waiting for a UI modal.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use gudang_core::{TransactionKind, WASTE_MARKER};

/// A validated, not-yet-applied stock transaction.
///
/// ## Design Notes
/// Carries frozen copies of the item's display fields so the confirm dialog
/// can render without another lookup. Holding a plan does not lock anything;
/// [`commit_transaction`](crate::state::AppState::commit_transaction)
/// re-checks the item before applying.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionPlan {
    /// Target item id.
    pub item_id: String,

    /// Item code at planning time (frozen, for display).
    pub item_code: String,

    /// Item name at planning time (frozen, snapshotted into history).
    pub item_name: String,

    /// Unit label at planning time (frozen).
    pub unit: String,

    /// Direction of the transaction.
    pub kind: TransactionKind,

    /// Validated quantity to move.
    pub qty: u32,

    /// Stock level at planning time.
    pub current_qty: u32,

    /// Stock level after the transaction applies.
    pub new_qty: u32,

    /// Resolved location note: trimmed, `"-"` when blank, waste-prefixed
    /// when the caller flagged an OUT as spoilage.
    pub location: String,
}

impl TransactionPlan {
    /// Checks whether this plan was flagged as waste.
    pub fn is_waste(&self) -> bool {
        self.location.contains(WASTE_MARKER)
    }
}

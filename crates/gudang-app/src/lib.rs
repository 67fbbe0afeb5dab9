//! # gudang-app: Application State Store for Gudang
//!
//! This crate owns the application's in-memory state and exposes every
//! mutation the presentation layer may perform.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Gudang Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation Layer (external)                   │   │
//! │  │   renders state, collects input, shows confirmation dialogs    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ owns an AppState handle                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ gudang-app (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐        ┌───────────┐        ┌───────────┐      │   │
//! │  │   │   state   │        │   plan    │        │   error   │      │   │
//! │  │   │ AppState  │        │ pending   │        │ AppError  │      │   │
//! │  │   │ all ops   │        │ change    │        │  sum type │      │   │
//! │  │   └───────────┘        └───────────┘        └───────────┘      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │        gudang-core (rules)     │     gudang-store (slots)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No Hidden Singleton
//! `AppState` is an explicitly constructed handle: [`state::AppState::load`]
//! reads the four slots and returns the only mutator of the state. Callers
//! that need the pre-login snapshot simply keep the handle around.
//!
//! ## Confirmation Dialogs
//! Destructive operations (`logout`, `delete_item`, `clear_history`) run
//! unconditionally once called; their confirm/cancel dialogs are wholly the
//! caller's job. The one operation that used to validate mid-dialog is split
//! into [`state::AppState::plan_transaction`] (pure) and
//! [`state::AppState::commit_transaction`] (applies), so the core never
//! waits on a UI modal.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod plan;
pub mod state;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{AppError, AppResult};
pub use plan::TransactionPlan;
pub use state::{AppState, NewItem, NewUser};

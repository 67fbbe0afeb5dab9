//! # Application State
//!
//! The single owner and mutator of the in-memory application state.
//!
//! ## State & Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        AppState Operations                              │
//! │                                                                         │
//! │  Presentation Action       Operation               State Change         │
//! │  ───────────────────       ─────────               ────────────         │
//! │                                                                         │
//! │  Login form ─────────────► login() ──────────────► session = Some(u)   │
//! │  Logout confirm ─────────► logout() ─────────────► session = None      │
//! │  Stock form ─────────────► plan_transaction() ───► (pure, no change)   │
//! │  Save confirm ───────────► commit_transaction() ─► qty ±, history +    │
//! │  New item form ──────────► add_item() ───────────► items + 1           │
//! │  Edit item form ─────────► update_item() ────────► code/name replaced  │
//! │  Delete confirm ─────────► delete_item() ────────► items - 1, DELETE   │
//! │  New employee form ──────► add_user() ───────────► users + 1           │
//! │  Clear-history confirm ──► clear_history() ──────► history = []        │
//! │                                                                         │
//! │  Every mutation: validate → mutate in-memory → persist → Result.       │
//! │  Collections are rebuilt wholesale, never edited in place, so any      │
//! │  clone handed out earlier stays a valid snapshot.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Single Logical Mutator
//! Every mutation takes `&mut self`, so the borrow checker enforces the
//! one-operation-in-flight model: no locking discipline is needed because
//! no concurrent access can exist through one handle.

use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::plan::TransactionPlan;
use gudang_core::validation::{
    validate_login, validate_min_stock, validate_required, validate_transaction,
};
use gudang_core::{
    default_items, default_users, low_stock_count, resolve_location, total_stock, EntryKind,
    HistoryEntry, Item, Role, TransactionKind, User, ValidationError, DELETED_ITEM_LOCATION,
    UNKNOWN_ACTOR,
};
use gudang_store::{Store, StoreError};

/// Display format for history entry dates (local time).
const DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

// =============================================================================
// Operation Inputs
// =============================================================================

/// Fields collected by the new-item form.
///
/// `min_stock` stays a raw string: parsing it is part of validation, and a
/// non-numeric threshold must be rejected rather than stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewItem {
    pub code: String,
    pub name: String,
    pub unit: String,
    #[serde(rename = "minStock")]
    pub min_stock: String,
}

/// Fields collected by the employee-registration form.
///
/// The role is not an input: registration always creates employees; the
/// single owner account comes from the seeded defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub name: String,
}

// =============================================================================
// Application State
// =============================================================================

/// The application state handle.
///
/// Constructed once at startup by [`AppState::load`] and owned by the
/// presentation boundary. There is no process-wide singleton.
#[derive(Debug)]
pub struct AppState {
    store: Store,
    users: Vec<User>,
    items: Vec<Item>,
    history: Vec<HistoryEntry>,
    session: Option<User>,
    /// Millisecond timestamp of the last generated id, guarding against
    /// same-millisecond collisions.
    last_id_millis: i64,
}

impl AppState {
    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    /// Loads the application state from the store.
    ///
    /// ## Read Degradation
    /// A failed or corrupt slot read is logged and replaced with its
    /// default (seeded users/items, empty history, anonymous session), so
    /// a damaged database never blocks startup. Write failures, by
    /// contrast, are surfaced by every mutation.
    pub async fn load(store: Store) -> AppResult<Self> {
        let slots = store.slots();

        let users = Self::slot_or(slots.load_users().await, "users_data", default_users);
        let items = Self::slot_or(slots.load_items().await, "inventory_data", default_items);
        let history = Self::slot_or(slots.load_history().await, "history_data", Vec::new);
        let session = match slots.load_session().await {
            Ok(session) => session,
            Err(e) => {
                warn!(slot = "user_session", error = %e, "Slot read failed, starting anonymous");
                None
            }
        };

        info!(
            users = users.len(),
            items = items.len(),
            history = history.len(),
            logged_in = session.is_some(),
            "Application state loaded"
        );

        Ok(AppState {
            store,
            users,
            items,
            history,
            session,
            last_id_millis: 0,
        })
    }

    /// Unwraps a slot read, degrading to the default on absence or failure.
    fn slot_or<T>(
        result: Result<Option<T>, StoreError>,
        slot: &str,
        default: impl FnOnce() -> T,
    ) -> T {
        match result {
            Ok(Some(value)) => value,
            Ok(None) => default(),
            Err(e) => {
                warn!(slot = %slot, error = %e, "Slot read failed, using default");
                default()
            }
        }
    }

    // -------------------------------------------------------------------------
    // Read Accessors
    // -------------------------------------------------------------------------

    /// The logged-in user, if any.
    pub fn session(&self) -> Option<&User> {
        self.session.as_ref()
    }

    /// The item catalog.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The transaction history, newest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// The full user set.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// The non-owner users (the user-management screen's list).
    pub fn employees(&self) -> Vec<&User> {
        self.users
            .iter()
            .filter(|u| u.role == Role::Employee)
            .collect()
    }

    /// Total stock across the catalog (dashboard figure).
    pub fn total_stock(&self) -> u64 {
        total_stock(&self.items)
    }

    /// Number of items below their threshold (dashboard figure).
    pub fn low_stock_count(&self) -> usize {
        low_stock_count(&self.items)
    }

    // -------------------------------------------------------------------------
    // Session Operations
    // -------------------------------------------------------------------------

    /// Logs in against the current user set.
    ///
    /// On success the session is set and persisted. Failure is always the
    /// generic invalid-credentials message. No lockout or rate limiting.
    pub async fn login(&mut self, username: &str, password: &str) -> AppResult<User> {
        debug!(username = %username, "login");

        let user = validate_login(&self.users, username, password)?.clone();

        // Persist-then-swap, like every other mutation: a failed write must
        // not leave the session set while the caller sees an error
        self.store.slots().save_session(&user).await?;
        self.session = Some(user.clone());

        info!(username = %user.username, role = ?user.role, "User logged in");
        Ok(user)
    }

    /// Logs out, clearing the session from memory and storage.
    ///
    /// Unconditional once called: the confirm dialog is the caller's job
    /// and precedes this call.
    pub async fn logout(&mut self) -> AppResult<()> {
        debug!("logout");

        self.store.slots().clear_session().await?;
        self.session = None;

        info!("User logged out");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Stock Transactions (plan / commit)
    // -------------------------------------------------------------------------

    /// Validates a stock transaction and computes the pending change.
    ///
    /// Pure: no state changes. The returned plan carries everything the
    /// confirm dialog needs; pass it to [`AppState::commit_transaction`]
    /// once the user consents.
    ///
    /// ## Errors
    /// - [`AppError::ItemNotFound`] when the id no longer exists
    /// - `quantity must be a positive number` on bad input
    /// - `insufficient stock, only N available` on an OUT overdraw
    pub fn plan_transaction(
        &self,
        item_id: &str,
        kind: TransactionKind,
        qty_input: &str,
        location: &str,
        waste: bool,
    ) -> AppResult<TransactionPlan> {
        debug!(item_id = %item_id, ?kind, qty = %qty_input, "plan_transaction");

        let item = self.find_item(item_id)?;
        let qty = validate_transaction(item, kind, qty_input)?;

        let new_qty = match kind {
            TransactionKind::In => item.qty.saturating_add(qty),
            TransactionKind::Out => item.qty - qty,
        };

        // The waste marker only applies to outbound stock
        let location = resolve_location(location, waste && kind == TransactionKind::Out);

        Ok(TransactionPlan {
            item_id: item.id.clone(),
            item_code: item.code.clone(),
            item_name: item.name.clone(),
            unit: item.unit.clone(),
            kind,
            qty,
            current_qty: item.qty,
            new_qty,
            location,
        })
    }

    /// Applies a planned transaction: updates the stock level, persists the
    /// catalog, then prepends and persists the history snapshot.
    ///
    /// The item is re-checked against the live catalog, so a stale plan
    /// (item deleted, or stock drained by an intervening operation) fails
    /// instead of corrupting the quantity invariant.
    pub async fn commit_transaction(&mut self, plan: TransactionPlan) -> AppResult<HistoryEntry> {
        debug!(item_id = %plan.item_id, kind = ?plan.kind, qty = plan.qty, "commit_transaction");

        let index = self.find_item_index(&plan.item_id)?;
        let current = self.items[index].qty;

        let new_qty = match plan.kind {
            TransactionKind::In => current.saturating_add(plan.qty),
            TransactionKind::Out => {
                if current < plan.qty {
                    return Err(ValidationError::InsufficientStock { available: current }.into());
                }
                current - plan.qty
            }
        };

        let mut items = self.items.clone();
        items[index].qty = new_qty;
        self.store.slots().save_items(&items).await?;
        self.items = items;

        let entry = self.build_entry(
            plan.kind.into(),
            plan.item_name,
            plan.qty,
            plan.unit,
            plan.location,
        );
        self.prepend_history(entry.clone()).await?;

        info!(
            item_id = %plan.item_id,
            kind = ?plan.kind,
            qty = plan.qty,
            new_qty,
            "Transaction recorded"
        );
        Ok(entry)
    }

    // -------------------------------------------------------------------------
    // Item Management
    // -------------------------------------------------------------------------

    /// Adds a new item to the catalog, starting at zero stock.
    ///
    /// All four fields are required; the minimum stock must parse to a
    /// non-negative integer; the code must be unique.
    pub async fn add_item(&mut self, new: NewItem) -> AppResult<Item> {
        debug!(code = %new.code, "add_item");

        validate_required("code", &new.code)?;
        validate_required("name", &new.name)?;
        validate_required("unit", &new.unit)?;
        let min_stock = validate_min_stock(&new.min_stock)?;

        let code = new.code.trim().to_string();
        if self.items.iter().any(|i| i.code == code) {
            return Err(ValidationError::DuplicateCode { code }.into());
        }

        let item = Item {
            id: self.next_id(),
            code,
            name: new.name.trim().to_string(),
            qty: 0,
            min_stock,
            unit: new.unit.trim().to_string(),
        };

        let mut items = self.items.clone();
        items.push(item.clone());
        self.store.slots().save_items(&items).await?;
        self.items = items;

        info!(id = %item.id, code = %item.code, "Item added");
        Ok(item)
    }

    /// Replaces an item's code and name; quantity, threshold and unit stay
    /// untouched.
    ///
    /// The new code is re-checked against every OTHER item, so an edit can
    /// never break the code-uniqueness invariant that create enforces.
    pub async fn update_item(
        &mut self,
        id: &str,
        new_code: &str,
        new_name: &str,
    ) -> AppResult<Item> {
        debug!(id = %id, "update_item");

        validate_required("code", new_code)?;
        validate_required("name", new_name)?;

        let index = self.find_item_index(id)?;

        let code = new_code.trim().to_string();
        if self
            .items
            .iter()
            .enumerate()
            .any(|(i, item)| i != index && item.code == code)
        {
            return Err(ValidationError::DuplicateCode { code }.into());
        }

        let mut items = self.items.clone();
        items[index].code = code;
        items[index].name = new_name.trim().to_string();
        self.store.slots().save_items(&items).await?;
        self.items = items;

        let item = self.items[index].clone();
        info!(id = %item.id, code = %item.code, "Item updated");
        Ok(item)
    }

    /// Removes an item and writes a DELETE history entry snapshotting its
    /// final name, stock level and unit.
    ///
    /// Unconditional once called: the destructive-action dialog is the
    /// caller's job.
    pub async fn delete_item(&mut self, id: &str) -> AppResult<HistoryEntry> {
        debug!(id = %id, "delete_item");

        let index = self.find_item_index(id)?;
        let removed = self.items[index].clone();

        let mut items = self.items.clone();
        items.remove(index);
        self.store.slots().save_items(&items).await?;
        self.items = items;

        let entry = self.build_entry(
            EntryKind::Delete,
            removed.name,
            removed.qty,
            removed.unit,
            DELETED_ITEM_LOCATION.to_string(),
        );
        self.prepend_history(entry.clone()).await?;

        info!(id = %id, code = %removed.code, "Item deleted");
        Ok(entry)
    }

    // -------------------------------------------------------------------------
    // User Management
    // -------------------------------------------------------------------------

    /// Registers a new employee account.
    ///
    /// All fields are required; the username must be unique. The role is
    /// always employee.
    pub async fn add_user(&mut self, new: NewUser) -> AppResult<User> {
        debug!(username = %new.username, "add_user");

        validate_required("username", &new.username)?;
        validate_required("password", &new.password)?;
        validate_required("name", &new.name)?;

        let username = new.username.trim().to_string();
        if self.users.iter().any(|u| u.username == username) {
            return Err(ValidationError::DuplicateUsername { username }.into());
        }

        let user = User {
            id: self.next_id(),
            username,
            password: new.password,
            role: Role::Employee,
            name: new.name.trim().to_string(),
        };

        let mut users = self.users.clone();
        users.push(user.clone());
        self.store.slots().save_users(&users).await?;
        self.users = users;

        info!(id = %user.id, username = %user.username, "Employee registered");
        Ok(user)
    }

    // -------------------------------------------------------------------------
    // History
    // -------------------------------------------------------------------------

    /// Empties the transaction history and removes its slot entirely.
    ///
    /// Unconditional once called: the destructive-action dialog is the
    /// caller's job.
    pub async fn clear_history(&mut self) -> AppResult<()> {
        debug!(entries = self.history.len(), "clear_history");

        self.store.slots().clear_history().await?;
        self.history.clear();

        info!("History cleared");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn find_item(&self, id: &str) -> AppResult<&Item> {
        self.items
            .iter()
            .find(|i| i.id == id)
            .ok_or_else(|| AppError::ItemNotFound { id: id.to_string() })
    }

    fn find_item_index(&self, id: &str) -> AppResult<usize> {
        self.items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| AppError::ItemNotFound { id: id.to_string() })
    }

    /// Generates a millisecond-timestamp id, bumped past the previous one
    /// when two ids land in the same millisecond.
    fn next_id(&mut self) -> String {
        let mut millis = Utc::now().timestamp_millis();
        if millis <= self.last_id_millis {
            millis = self.last_id_millis + 1;
        }
        self.last_id_millis = millis;
        millis.to_string()
    }

    /// Builds a history snapshot stamped with the current time and actor.
    fn build_entry(
        &mut self,
        kind: EntryKind,
        item_name: String,
        qty: u32,
        unit: String,
        location: String,
    ) -> HistoryEntry {
        let actor = self
            .session
            .as_ref()
            .map(|u| u.name.clone())
            .unwrap_or_else(|| UNKNOWN_ACTOR.to_string());

        HistoryEntry {
            id: self.next_id(),
            date: Local::now().format(DATE_FORMAT).to_string(),
            kind,
            item_name,
            qty,
            unit,
            actor,
            location,
        }
    }

    /// Prepends an entry (newest first) and persists the history.
    async fn prepend_history(&mut self, entry: HistoryEntry) -> AppResult<()> {
        let mut history = Vec::with_capacity(self.history.len() + 1);
        history.push(entry);
        history.extend(self.history.iter().cloned());

        self.store.slots().save_history(&history).await?;
        self.history = history;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use gudang_core::EntryKind;
    use gudang_store::StoreConfig;

    /// Fresh state over an in-memory store, seeded with the defaults.
    async fn test_state() -> AppState {
        let store = Store::open(StoreConfig::in_memory()).await.unwrap();
        AppState::load(store).await.unwrap()
    }

    fn item_id(state: &AppState, code: &str) -> String {
        state
            .items()
            .iter()
            .find(|i| i.code == code)
            .unwrap()
            .id
            .clone()
    }

    fn new_item(code: &str) -> NewItem {
        NewItem {
            code: code.to_string(),
            name: "Excelsa Natural".to_string(),
            unit: "Kg".to_string(),
            min_stock: "10".to_string(),
        }
    }

    // -------------------------------------------------------------------------
    // Session
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_login_succeeds_for_every_seeded_user() {
        let mut state = test_state().await;

        for expected in default_users() {
            let user = state
                .login(&expected.username, &expected.password)
                .await
                .unwrap();
            assert_eq!(user, expected);
            assert_eq!(state.session(), Some(&expected));
        }
    }

    #[tokio::test]
    async fn test_login_failure_is_generic_and_leaves_no_session() {
        let mut state = test_state().await;

        for (username, password) in [("ghost", "123"), ("budi", "wrong")] {
            let err = state.login(username, password).await.unwrap_err();
            assert!(matches!(
                err,
                AppError::Validation(ValidationError::InvalidCredentials)
            ));
        }
        assert!(state.session().is_none());
    }

    #[tokio::test]
    async fn test_session_survives_reload_and_logout_clears_it() {
        let store = Store::open(StoreConfig::in_memory()).await.unwrap();

        let mut state = AppState::load(store.clone()).await.unwrap();
        state.login("owner", "123").await.unwrap();

        // A second handle over the same store sees the persisted session
        let reloaded = AppState::load(store.clone()).await.unwrap();
        assert_eq!(reloaded.session().unwrap().username, "owner");

        state.logout().await.unwrap();
        assert!(state.session().is_none());

        let reloaded = AppState::load(store).await.unwrap();
        assert!(reloaded.session().is_none());
    }

    // -------------------------------------------------------------------------
    // Stock Transactions
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_out_overdraw_rejected_and_stock_unchanged() {
        let state = test_state().await;
        let id = item_id(&state, "KOPI-L-99"); // qty 15

        let err = state
            .plan_transaction(&id, TransactionKind::Out, "20", "Cafe A", false)
            .unwrap_err();

        assert_eq!(err.to_string(), "insufficient stock, only 15 available");
        assert_eq!(state.items()[2].qty, 15);
        assert!(state.history().is_empty());
    }

    #[tokio::test]
    async fn test_in_transaction_adds_stock_and_one_entry() {
        let mut state = test_state().await;
        state.login("budi", "123").await.unwrap();
        let id = item_id(&state, "KOPI-L-99"); // qty 15

        let plan = state
            .plan_transaction(&id, TransactionKind::In, "10", "Petani Budi", false)
            .unwrap();
        assert_eq!(plan.qty, 10);
        assert_eq!(plan.current_qty, 15);
        assert_eq!(plan.new_qty, 25);

        let entry = state.commit_transaction(plan).await.unwrap();

        let item = state.items().iter().find(|i| i.id == id).unwrap();
        assert_eq!(item.qty, 25);

        // Exactly one entry, prepended, snapshotting the transaction
        assert_eq!(state.history().len(), 1);
        assert_eq!(state.history()[0], entry);
        assert_eq!(entry.kind, EntryKind::In);
        assert_eq!(entry.qty, 10);
        assert_eq!(entry.location, "Petani Budi");
        assert_eq!(entry.actor, "Budi Santoso");
    }

    #[tokio::test]
    async fn test_out_transaction_subtracts_and_allows_exact_drain() {
        let mut state = test_state().await;
        let id = item_id(&state, "KOPI-L-99"); // qty 15

        let plan = state
            .plan_transaction(&id, TransactionKind::Out, "15", "Cafe A", false)
            .unwrap();
        state.commit_transaction(plan).await.unwrap();

        let item = state.items().iter().find(|i| i.id == id).unwrap();
        assert_eq!(item.qty, 0);
    }

    #[tokio::test]
    async fn test_waste_flag_prefixes_location() {
        let mut state = test_state().await;
        let id = item_id(&state, "KOPI-R-01");

        let plan = state
            .plan_transaction(&id, TransactionKind::Out, "5", "Gudang Belakang", true)
            .unwrap();
        assert!(plan.is_waste());

        let entry = state.commit_transaction(plan).await.unwrap();
        assert_eq!(entry.location, "[RUSAK] Gudang Belakang");
        assert!(entry.is_waste());
        assert_eq!(entry.display_location(), "Gudang Belakang");
    }

    #[tokio::test]
    async fn test_waste_flag_ignored_for_inbound_stock() {
        let state = test_state().await;
        let id = item_id(&state, "KOPI-R-01");

        let plan = state
            .plan_transaction(&id, TransactionKind::In, "5", "Petani Budi", true)
            .unwrap();
        assert!(!plan.is_waste());
    }

    #[tokio::test]
    async fn test_blank_location_becomes_dash() {
        let mut state = test_state().await;
        let id = item_id(&state, "KOPI-R-01");

        let plan = state
            .plan_transaction(&id, TransactionKind::In, "1", "  ", false)
            .unwrap();
        let entry = state.commit_transaction(plan).await.unwrap();

        assert_eq!(entry.location, "-");
    }

    #[tokio::test]
    async fn test_anonymous_actor_is_unknown() {
        let mut state = test_state().await;
        let id = item_id(&state, "KOPI-R-01");

        let plan = state
            .plan_transaction(&id, TransactionKind::In, "1", "", false)
            .unwrap();
        let entry = state.commit_transaction(plan).await.unwrap();

        assert_eq!(entry.actor, "Unknown");
    }

    #[tokio::test]
    async fn test_plan_on_missing_item_is_reported() {
        let state = test_state().await;

        let err = state
            .plan_transaction("nope", TransactionKind::In, "1", "", false)
            .unwrap_err();
        assert!(matches!(err, AppError::ItemNotFound { ref id } if id == "nope"));
    }

    #[tokio::test]
    async fn test_stale_plan_fails_after_item_deleted() {
        let mut state = test_state().await;
        let id = item_id(&state, "KOPI-R-01");

        let plan = state
            .plan_transaction(&id, TransactionKind::Out, "5", "", false)
            .unwrap();
        state.delete_item(&id).await.unwrap();

        let err = state.commit_transaction(plan).await.unwrap_err();
        assert!(matches!(err, AppError::ItemNotFound { .. }));
    }

    #[tokio::test]
    async fn test_stale_plan_fails_after_stock_drained() {
        let mut state = test_state().await;
        let id = item_id(&state, "KOPI-L-99"); // qty 15

        let stale = state
            .plan_transaction(&id, TransactionKind::Out, "10", "", false)
            .unwrap();

        // Another operation drains the stock first
        let drain = state
            .plan_transaction(&id, TransactionKind::Out, "15", "", false)
            .unwrap();
        state.commit_transaction(drain).await.unwrap();

        let err = state.commit_transaction(stale).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::InsufficientStock { available: 0 })
        ));
    }

    // -------------------------------------------------------------------------
    // Item Management
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_add_item_starts_at_zero_stock() {
        let mut state = test_state().await;

        let item = state.add_item(new_item("KOPI-E-01")).await.unwrap();

        assert_eq!(item.qty, 0);
        assert_eq!(item.min_stock, 10);
        assert_eq!(state.items().len(), 4);
    }

    #[tokio::test]
    async fn test_add_item_rejects_duplicate_code() {
        let mut state = test_state().await;

        state.add_item(new_item("KOPI-E-01")).await.unwrap();
        let err = state.add_item(new_item("KOPI-E-01")).await.unwrap_err();

        assert!(matches!(
            err,
            AppError::Validation(ValidationError::DuplicateCode { ref code }) if code == "KOPI-E-01"
        ));
        // Second call always fails: the set grew by at most one
        assert_eq!(state.items().len(), 4);
    }

    #[tokio::test]
    async fn test_add_item_rejects_missing_fields_and_bad_min_stock() {
        let mut state = test_state().await;

        let mut missing = new_item("KOPI-E-01");
        missing.name = "  ".to_string();
        assert!(matches!(
            state.add_item(missing).await.unwrap_err(),
            AppError::Validation(ValidationError::Required { .. })
        ));

        let mut bad = new_item("KOPI-E-01");
        bad.min_stock = "plenty".to_string();
        assert!(matches!(
            state.add_item(bad).await.unwrap_err(),
            AppError::Validation(ValidationError::InvalidMinStock)
        ));

        assert_eq!(state.items().len(), 3);
    }

    #[tokio::test]
    async fn test_update_item_replaces_code_and_name_only() {
        let mut state = test_state().await;
        let id = item_id(&state, "KOPI-A-01"); // qty 40, min 50

        let updated = state
            .update_item(&id, "KOPI-A-02", "Arabica Honey")
            .await
            .unwrap();

        assert_eq!(updated.code, "KOPI-A-02");
        assert_eq!(updated.name, "Arabica Honey");
        assert_eq!(updated.qty, 40);
        assert_eq!(updated.min_stock, 50);
    }

    #[tokio::test]
    async fn test_update_item_enforces_code_uniqueness() {
        let mut state = test_state().await;
        let id = item_id(&state, "KOPI-A-01");

        // Taking another item's code is rejected
        let err = state
            .update_item(&id, "KOPI-R-01", "Arabica Honey")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::DuplicateCode { .. })
        ));

        // Keeping its own code is fine
        state
            .update_item(&id, "KOPI-A-01", "Arabica Honey")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_missing_item_is_reported() {
        let mut state = test_state().await;

        let err = state.update_item("nope", "X", "Y").await.unwrap_err();
        assert!(matches!(err, AppError::ItemNotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_item_writes_delete_entry() {
        let mut state = test_state().await;
        state.login("owner", "123").await.unwrap();
        let id = item_id(&state, "KOPI-L-99"); // qty 15

        let entry = state.delete_item(&id).await.unwrap();

        assert_eq!(state.items().len(), 2);
        assert_eq!(entry.kind, EntryKind::Delete);
        assert_eq!(entry.item_name, "Liberica Dark");
        assert_eq!(entry.qty, 15); // final stock level, snapshotted
        assert_eq!(entry.location, "Penghapusan Data Permanen");
        assert_eq!(entry.actor, "Pak Ketua");
    }

    #[tokio::test]
    async fn test_delete_missing_item_is_reported() {
        let mut state = test_state().await;

        let err = state.delete_item("nope").await.unwrap_err();
        assert!(matches!(err, AppError::ItemNotFound { .. }));
        assert_eq!(state.items().len(), 3);
    }

    // -------------------------------------------------------------------------
    // User Management
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_add_user_registers_employee() {
        let mut state = test_state().await;

        let user = state
            .add_user(NewUser {
                username: "siti".to_string(),
                password: "rahasia".to_string(),
                name: "Siti Aminah".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.role, Role::Employee);
        assert_eq!(state.users().len(), 3);
        assert_eq!(state.employees().len(), 2);

        // The new account can log in immediately
        let logged_in = state.login("siti", "rahasia").await.unwrap();
        assert_eq!(logged_in, user);
    }

    #[tokio::test]
    async fn test_add_user_rejects_duplicate_username() {
        let mut state = test_state().await;

        let err = state
            .add_user(NewUser {
                username: "budi".to_string(),
                password: "xyz".to_string(),
                name: "Budi Lain".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Validation(ValidationError::DuplicateUsername { ref username })
                if username == "budi"
        ));
        assert_eq!(state.users().len(), 2);
    }

    // -------------------------------------------------------------------------
    // History
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_clear_history_keeps_only_later_entries() {
        let mut state = test_state().await;
        let first = item_id(&state, "KOPI-L-99");
        let second = item_id(&state, "KOPI-A-01");

        state.delete_item(&first).await.unwrap();
        assert_eq!(state.history().len(), 1);

        state.clear_history().await.unwrap();
        assert!(state.history().is_empty());

        let entry = state.delete_item(&second).await.unwrap();

        // Exactly the post-clear entries remain
        assert_eq!(state.history().len(), 1);
        assert_eq!(state.history()[0], entry);
    }

    #[tokio::test]
    async fn test_history_is_newest_first_with_unique_ids() {
        let mut state = test_state().await;
        let id = item_id(&state, "KOPI-R-01");

        for n in 1..=3 {
            let plan = state
                .plan_transaction(&id, TransactionKind::In, &n.to_string(), "", false)
                .unwrap();
            state.commit_transaction(plan).await.unwrap();
        }

        assert_eq!(state.history().len(), 3);
        assert_eq!(state.history()[0].qty, 3); // latest first
        assert_eq!(state.history()[2].qty, 1);

        // Ids stay unique even when generated within one millisecond
        let mut ids: Vec<_> = state.history().iter().map(|e| e.id.clone()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_state_survives_reload() {
        let store = Store::open(StoreConfig::in_memory()).await.unwrap();

        let mut state = AppState::load(store.clone()).await.unwrap();
        state.add_item(new_item("KOPI-E-01")).await.unwrap();

        let id = item_id(&state, "KOPI-R-01");
        let plan = state
            .plan_transaction(&id, TransactionKind::Out, "100", "Cafe A", false)
            .unwrap();
        state.commit_transaction(plan).await.unwrap();

        let reloaded = AppState::load(store).await.unwrap();
        assert_eq!(reloaded.items().len(), 4);
        assert_eq!(
            reloaded.items().iter().find(|i| i.id == id).unwrap().qty,
            400
        );
        assert_eq!(reloaded.history().len(), 1);
        assert_eq!(reloaded.history()[0].location, "Cafe A");
    }

    #[tokio::test]
    async fn test_failed_session_write_leaves_session_anonymous() {
        let store = Store::open(StoreConfig::in_memory()).await.unwrap();
        let mut state = AppState::load(store.clone()).await.unwrap();

        // Closing the pool makes the session write fail, retry included
        store.close().await;

        let err = state.login("owner", "123").await.unwrap_err();
        assert!(matches!(err, AppError::Store(_)));

        // The operation reported failure, so no session may be set
        assert!(state.session().is_none());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_collections_unchanged() {
        let store = Store::open(StoreConfig::in_memory()).await.unwrap();
        let mut state = AppState::load(store.clone()).await.unwrap();
        let id = item_id(&state, "KOPI-L-99"); // qty 15

        store.close().await;

        let err = state.add_item(new_item("KOPI-E-01")).await.unwrap_err();
        assert!(matches!(err, AppError::Store(_)));
        assert_eq!(state.items().len(), 3);

        let plan = state
            .plan_transaction(&id, TransactionKind::In, "10", "", false)
            .unwrap();
        let err = state.commit_transaction(plan).await.unwrap_err();
        assert!(matches!(err, AppError::Store(_)));

        // Persist-then-swap: stock and history are exactly as loaded
        assert_eq!(
            state.items().iter().find(|i| i.id == id).unwrap().qty,
            15
        );
        assert!(state.history().is_empty());
    }

    #[tokio::test]
    async fn test_fresh_store_starts_from_seeded_defaults() {
        let state = test_state().await;

        assert_eq!(state.users().len(), 2);
        assert_eq!(state.items().len(), 3);
        assert!(state.history().is_empty());
        assert!(state.session().is_none());

        assert_eq!(state.total_stock(), 555);
        assert_eq!(state.low_stock_count(), 2);
    }
}

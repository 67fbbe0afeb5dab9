//! # Slot Repository
//!
//! Whole-value load/save/remove for the four state slots.
//!
//! ## Persistence Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Slot Persistence Model                               │
//! │                                                                         │
//! │  Every mutation in gudang-app rebuilds a collection and hands the      │
//! │  WHOLE value to this repository. There is no incremental or            │
//! │  append-style persistence.                                             │
//! │                                                                         │
//! │  save_items(&[..500 items..])                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  serde_json::to_string ──► UPSERT slots(key='inventory_data')          │
//! │       │                                                                 │
//! │       ├── write fails? retry ONCE, log the first failure               │
//! │       │        │                                                        │
//! │       │        └── retry fails? surface StoreError to the caller       │
//! │       │                                                                 │
//! │       └── OK                                                            │
//! │                                                                         │
//! │  load_items()                                                          │
//! │       │                                                                 │
//! │       ├── row absent      → Ok(None)   (caller seeds defaults)         │
//! │       ├── payload corrupt → Err(CorruptPayload)                        │
//! │       └── OK              → Ok(Some(items))                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Runtime-Bound Queries
//! The slot table stores opaque JSON, so there is no compile-time schema to
//! pin with `query!` macros; plain `sqlx::query` with binds is enough.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, error};

use crate::error::{StoreError, StoreResult};
use gudang_core::{HistoryEntry, Item, User};

// =============================================================================
// Slot Keys
// =============================================================================

/// Current logged-in user, or absent when logged out.
pub const SESSION_SLOT: &str = "user_session";

/// The item catalog.
pub const INVENTORY_SLOT: &str = "inventory_data";

/// The transaction history, newest first.
pub const HISTORY_SLOT: &str = "history_data";

/// The user set.
pub const USERS_SLOT: &str = "users_data";

// =============================================================================
// Slot Repository
// =============================================================================

/// Repository for slot storage operations.
///
/// ## Usage
/// ```rust,ignore
/// let slots = store.slots();
///
/// slots.save_users(&users).await?;
/// let users = slots.load_users().await?;
/// slots.remove(HISTORY_SLOT).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SlotRepository {
    pool: SqlitePool,
}

impl SlotRepository {
    /// Creates a new SlotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SlotRepository { pool }
    }

    /// Loads and deserializes a slot.
    ///
    /// ## Returns
    /// * `Ok(Some(value))` - Slot present and decoded
    /// * `Ok(None)` - Slot absent (fresh install, or removed)
    /// * `Err(CorruptPayload)` - Slot present but no longer decodes
    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        debug!(key = %key, "Loading slot");

        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM slots WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            None => Ok(None),
            Some((json,)) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|source| StoreError::CorruptPayload {
                    key: key.to_string(),
                    source,
                }),
        }
    }

    /// Serializes and overwrites a slot in full.
    ///
    /// ## Write Failure Policy
    /// A failed write is logged and retried once; if the retry also fails
    /// the error is returned, so no write failure goes unnoticed.
    pub async fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let json = serde_json::to_string(value).map_err(StoreError::EncodeFailed)?;

        debug!(key = %key, bytes = json.len(), "Saving slot");

        if let Err(first) = self.write(key, &json).await {
            error!(key = %key, error = %first, "Slot write failed, retrying once");
            self.write(key, &json).await?;
        }

        Ok(())
    }

    /// Removes a slot entirely.
    ///
    /// Removing an absent slot is not an error.
    pub async fn remove(&self, key: &str) -> StoreResult<()> {
        debug!(key = %key, "Removing slot");

        sqlx::query("DELETE FROM slots WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Single upsert attempt, shared by the first try and the retry.
    async fn write(&self, key: &str, json: &str) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO slots (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(json)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Per-Slot Wrappers
    // -------------------------------------------------------------------------

    /// Loads the persisted session, if any.
    pub async fn load_session(&self) -> StoreResult<Option<User>> {
        self.load(SESSION_SLOT).await
    }

    /// Persists the session after a successful login.
    pub async fn save_session(&self, user: &User) -> StoreResult<()> {
        self.save(SESSION_SLOT, user).await
    }

    /// Clears the session on logout.
    pub async fn clear_session(&self) -> StoreResult<()> {
        self.remove(SESSION_SLOT).await
    }

    /// Loads the item catalog, if one has been persisted.
    pub async fn load_items(&self) -> StoreResult<Option<Vec<Item>>> {
        self.load(INVENTORY_SLOT).await
    }

    /// Overwrites the item catalog.
    pub async fn save_items(&self, items: &[Item]) -> StoreResult<()> {
        self.save(INVENTORY_SLOT, items).await
    }

    /// Loads the transaction history, if one has been persisted.
    pub async fn load_history(&self) -> StoreResult<Option<Vec<HistoryEntry>>> {
        self.load(HISTORY_SLOT).await
    }

    /// Overwrites the transaction history.
    pub async fn save_history(&self, history: &[HistoryEntry]) -> StoreResult<()> {
        self.save(HISTORY_SLOT, history).await
    }

    /// Removes the history slot entirely (clear-history operation).
    pub async fn clear_history(&self) -> StoreResult<()> {
        self.remove(HISTORY_SLOT).await
    }

    /// Loads the user set, if one has been persisted.
    pub async fn load_users(&self) -> StoreResult<Option<Vec<User>>> {
        self.load(USERS_SLOT).await
    }

    /// Overwrites the user set.
    pub async fn save_users(&self, users: &[User]) -> StoreResult<()> {
        self.save(USERS_SLOT, users).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Store, StoreConfig};
    use gudang_core::{default_items, default_users};

    async fn test_slots() -> SlotRepository {
        let store = Store::open(StoreConfig::in_memory()).await.unwrap();
        store.slots()
    }

    #[tokio::test]
    async fn test_absent_slot_loads_as_none() {
        let slots = test_slots().await;

        assert!(slots.load_items().await.unwrap().is_none());
        assert!(slots.load_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_slot_round_trip() {
        let slots = test_slots().await;
        let items = default_items();

        slots.save_items(&items).await.unwrap();
        let loaded = slots.load_items().await.unwrap().unwrap();

        assert_eq!(loaded, items);
    }

    #[tokio::test]
    async fn test_save_overwrites_whole_value() {
        let slots = test_slots().await;
        let mut items = default_items();

        slots.save_items(&items).await.unwrap();

        items.remove(0);
        items[0].qty = 9999;
        slots.save_items(&items).await.unwrap();

        let loaded = slots.load_items().await.unwrap().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].qty, 9999);
    }

    #[tokio::test]
    async fn test_remove_slot() {
        let slots = test_slots().await;
        let users = default_users();

        slots.save_session(&users[0]).await.unwrap();
        assert!(slots.load_session().await.unwrap().is_some());

        slots.clear_session().await.unwrap();
        assert!(slots.load_session().await.unwrap().is_none());

        // Removing again is fine
        slots.clear_session().await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_payload_is_surfaced() {
        let store = Store::open(StoreConfig::in_memory()).await.unwrap();
        let slots = store.slots();

        // Simulate a truncated write
        sqlx::query("INSERT INTO slots (key, value, updated_at) VALUES (?1, ?2, ?3)")
            .bind(INVENTORY_SLOT)
            .bind("[{\"id\": \"1\", \"co")
            .bind("2026-01-01T00:00:00Z")
            .execute(store.pool())
            .await
            .unwrap();

        let err = slots.load_items().await.unwrap_err();
        assert!(matches!(err, StoreError::CorruptPayload { ref key, .. } if key == INVENTORY_SLOT));
    }

    #[tokio::test]
    async fn test_write_failure_is_surfaced_after_retry() {
        let store = Store::open(StoreConfig::in_memory()).await.unwrap();
        let slots = store.slots();

        // Closing the pool makes every write attempt fail, including the retry
        store.close().await;

        let err = slots.save_items(&default_items()).await.unwrap_err();
        assert!(matches!(err, StoreError::ConnectionFailed(_)));

        let err = slots.remove(HISTORY_SLOT).await.unwrap_err();
        assert!(matches!(err, StoreError::ConnectionFailed(_)));
    }

    #[tokio::test]
    async fn test_slots_are_independent() {
        let slots = test_slots().await;

        slots.save_users(&default_users()).await.unwrap();
        slots.save_items(&default_items()).await.unwrap();

        slots.remove(USERS_SLOT).await.unwrap();

        assert!(slots.load_users().await.unwrap().is_none());
        assert!(slots.load_items().await.unwrap().is_some());
    }
}

//! Traits for storage abstraction and external collaborators

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::events::{InventoryMovement, Order};
use crate::types::*;

/// Storage abstraction for the accounting subsystem
///
/// Allows the core to work with any backend (PostgreSQL, MySQL, SQLite,
/// in-memory, ...) by implementing these methods. Implementations must
/// support atomic multi-row writes: `insert_entry` persists the header and
/// all lines as one unit or not at all.
#[async_trait]
pub trait LedgerStorage: Send + Sync {
    /// Save a new account
    async fn save_account(&mut self, account: &Account) -> LedgerResult<()>;

    /// Get an account by code
    async fn get_account(&self, code: &str) -> LedgerResult<Option<Account>>;

    /// List accounts ordered by code, optionally restricted to active ones
    async fn list_accounts(&self, active_only: bool) -> LedgerResult<Vec<Account>>;

    /// Number of accounts in the chart, active or not
    async fn account_count(&self) -> LedgerResult<u64>;

    /// Update an existing account
    async fn update_account(&mut self, account: &Account) -> LedgerResult<()>;

    /// Persist a journal entry and its lines atomically, assigning its id
    ///
    /// Must reject a non-empty `reference` that already exists with
    /// [`LedgerError::DuplicateReference`]; automated writers rely on this
    /// to stay idempotent under concurrent posting.
    async fn insert_entry(&mut self, entry: &NewJournalEntry) -> LedgerResult<JournalEntry>;

    /// Get a journal entry with its lines
    async fn get_entry(&self, id: i64) -> LedgerResult<Option<JournalEntry>>;

    /// List journal entries matching the filter, ordered by
    /// `(entry_date desc, id desc)`
    async fn list_entries(&self, filter: &EntryFilter) -> LedgerResult<Vec<JournalEntry>>;

    /// Apply a header-only patch; lines are never touched
    async fn update_entry(&mut self, id: i64, patch: &EntryPatch) -> LedgerResult<JournalEntry>;

    /// Remove an entry's lines, then the entry; returns whether anything
    /// was removed
    async fn delete_entry(&mut self, id: i64) -> LedgerResult<bool>;

    /// Per-account debit/credit sums over reportable (posted) lines whose
    /// entry date falls in the given window
    async fn account_activity(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> LedgerResult<Vec<AccountActivity>>;

    /// Reportable lines for a single account within the window, each
    /// carrying its owning entry's date and description
    async fn account_lines(
        &self,
        account_code: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> LedgerResult<Vec<AccountLine>>;
}

/// Read accessor over the POS order store (owned by the order subsystem)
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// All completed orders, optionally restricted to a date window
    async fn completed_orders(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> LedgerResult<Vec<Order>>;
}

/// Read accessor over the inventory movement store (owned by the inventory
/// subsystem)
#[async_trait]
pub trait MovementSource: Send + Sync {
    /// The most recent `limit` stock movements, newest first
    async fn recent_movements(&self, limit: usize) -> LedgerResult<Vec<InventoryMovement>>;
}

//! Journal entry management

use crate::traits::LedgerStorage;
use crate::types::*;
use crate::utils::validation::{validate_description, validate_line_amounts};

/// Journal store
///
/// Enforces the balanced-entry invariant at write time: an entry whose
/// debits and credits differ by more than the tolerance is rejected before
/// anything touches storage, and storage itself persists header and lines
/// all-or-nothing.
pub struct Journal<S: LedgerStorage> {
    storage: S,
}

impl<S: LedgerStorage> Journal<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Create a journal entry with its lines as one atomic unit
    pub async fn create_entry(&mut self, entry: NewJournalEntry) -> LedgerResult<JournalEntry> {
        if entry.lines.is_empty() {
            return Err(LedgerError::Validation(
                "journal entry must have at least one line".to_string(),
            ));
        }

        validate_description(&entry.description)?;
        for line in &entry.lines {
            validate_line_amounts(line)?;
        }

        let debits = entry.total_debits();
        let credits = entry.total_credits();
        if (&debits - &credits).abs() > balance_tolerance() {
            return Err(LedgerError::UnbalancedEntry { debits, credits });
        }

        let stored = self.storage.insert_entry(&entry).await?;
        tracing::debug!(
            id = stored.id,
            entry_type = %stored.entry_type,
            total = %stored.total_amount,
            "journal entry created"
        );
        Ok(stored)
    }

    /// Get an entry with its lines
    pub async fn get_entry(&self, id: i64) -> LedgerResult<Option<JournalEntry>> {
        self.storage.get_entry(id).await
    }

    /// Get an entry, erroring when absent
    pub async fn get_entry_required(&self, id: i64) -> LedgerResult<JournalEntry> {
        self.storage
            .get_entry(id)
            .await?
            .ok_or(LedgerError::EntryNotFound(id))
    }

    /// List entries matching the filter, newest accounting date first
    pub async fn list_entries(&self, filter: &EntryFilter) -> LedgerResult<Vec<JournalEntry>> {
        self.storage.list_entries(filter).await
    }

    /// Whether any entry carries the given correlation reference
    pub async fn reference_exists(&self, reference: &str) -> LedgerResult<bool> {
        let matches = self
            .storage
            .list_entries(&EntryFilter::by_reference(reference))
            .await?;
        Ok(!matches.is_empty())
    }

    /// Update header fields (date, description, reference, status) only
    pub async fn update_entry(&mut self, id: i64, patch: EntryPatch) -> LedgerResult<JournalEntry> {
        if let Some(ref description) = patch.description {
            validate_description(description)?;
        }
        self.storage.update_entry(id, &patch).await
    }

    /// Delete an entry and its lines; returns whether anything was removed
    pub async fn delete_entry(&mut self, id: i64) -> LedgerResult<bool> {
        self.storage.delete_entry(id).await
    }
}

//! In-memory storage implementation for testing and development

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::traits::LedgerStorage;
use crate::types::*;

#[derive(Debug, Default)]
struct Inner {
    accounts: BTreeMap<String, Account>,
    entries: BTreeMap<i64, JournalEntry>,
    // uniqueness index over non-empty references
    references: HashMap<String, i64>,
    next_entry_id: i64,
}

/// In-memory `LedgerStorage` backend
///
/// Clones share the same underlying state, so a storage handle can be
/// handed to several managers the way a connection pool would be. The
/// entry insert takes one write lock for the header and all lines, which
/// makes it atomic with respect to every other operation.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all data (useful between tests)
    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap();
        inner.accounts.clear();
        inner.entries.clear();
        inner.references.clear();
        inner.next_entry_id = 0;
    }
}

fn in_window(date: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    if let Some(start) = start {
        if date < start {
            return false;
        }
    }
    if let Some(end) = end {
        if date > end {
            return false;
        }
    }
    true
}

fn reportable(entry: &JournalEntry) -> bool {
    entry.status == EntryStatus::Posted
}

#[async_trait]
impl LedgerStorage for MemoryStorage {
    async fn save_account(&mut self, account: &Account) -> LedgerResult<()> {
        let mut inner = self.inner.write().unwrap();
        if inner.accounts.contains_key(&account.code) {
            return Err(LedgerError::DuplicateCode(account.code.clone()));
        }
        inner.accounts.insert(account.code.clone(), account.clone());
        Ok(())
    }

    async fn get_account(&self, code: &str) -> LedgerResult<Option<Account>> {
        Ok(self.inner.read().unwrap().accounts.get(code).cloned())
    }

    async fn list_accounts(&self, active_only: bool) -> LedgerResult<Vec<Account>> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .accounts
            .values()
            .filter(|account| !active_only || account.active)
            .cloned()
            .collect())
    }

    async fn account_count(&self) -> LedgerResult<u64> {
        Ok(self.inner.read().unwrap().accounts.len() as u64)
    }

    async fn update_account(&mut self, account: &Account) -> LedgerResult<()> {
        let mut inner = self.inner.write().unwrap();
        if !inner.accounts.contains_key(&account.code) {
            return Err(LedgerError::AccountNotFound(account.code.clone()));
        }
        inner.accounts.insert(account.code.clone(), account.clone());
        Ok(())
    }

    async fn insert_entry(&mut self, entry: &NewJournalEntry) -> LedgerResult<JournalEntry> {
        let mut inner = self.inner.write().unwrap();

        if let Some(ref reference) = entry.reference {
            if !reference.is_empty() && inner.references.contains_key(reference) {
                return Err(LedgerError::DuplicateReference(reference.clone()));
            }
        }

        inner.next_entry_id += 1;
        let id = inner.next_entry_id;
        let stored = JournalEntry {
            id,
            entry_date: entry.entry_date,
            entry_type: entry.entry_type.clone(),
            description: entry.description.clone(),
            reference: entry.reference.clone(),
            total_amount: entry.total_debits(),
            status: entry.status,
            created_by: entry.created_by.clone(),
            created_at: chrono::Utc::now().naive_utc(),
            lines: entry.lines.clone(),
        };

        if let Some(ref reference) = stored.reference {
            if !reference.is_empty() {
                inner.references.insert(reference.clone(), id);
            }
        }
        inner.entries.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_entry(&self, id: i64) -> LedgerResult<Option<JournalEntry>> {
        Ok(self.inner.read().unwrap().entries.get(&id).cloned())
    }

    async fn list_entries(&self, filter: &EntryFilter) -> LedgerResult<Vec<JournalEntry>> {
        let inner = self.inner.read().unwrap();
        let mut matched: Vec<JournalEntry> = inner
            .entries
            .values()
            .filter(|entry| {
                filter
                    .entry_type
                    .as_ref()
                    .is_none_or(|t| &entry.entry_type == t)
                    && filter.status.is_none_or(|s| entry.status == s)
                    && filter
                        .reference
                        .as_ref()
                        .is_none_or(|r| entry.reference.as_ref() == Some(r))
                    && in_window(entry.entry_date, filter.start_date, filter.end_date)
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| {
            b.entry_date
                .cmp(&a.entry_date)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(matched)
    }

    async fn update_entry(&mut self, id: i64, patch: &EntryPatch) -> LedgerResult<JournalEntry> {
        let mut inner = self.inner.write().unwrap();

        if !inner.entries.contains_key(&id) {
            return Err(LedgerError::EntryNotFound(id));
        }

        if let Some(ref new_reference) = patch.reference {
            if let Some(&holder) = inner.references.get(new_reference) {
                if holder != id {
                    return Err(LedgerError::DuplicateReference(new_reference.clone()));
                }
            }
            let old_reference = inner
                .entries
                .get(&id)
                .and_then(|entry| entry.reference.clone());
            if let Some(old) = old_reference {
                inner.references.remove(&old);
            }
            if !new_reference.is_empty() {
                inner.references.insert(new_reference.clone(), id);
            }
        }

        let entry = inner
            .entries
            .get_mut(&id)
            .ok_or(LedgerError::EntryNotFound(id))?;
        if let Some(entry_date) = patch.entry_date {
            entry.entry_date = entry_date;
        }
        if let Some(ref description) = patch.description {
            entry.description = description.clone();
        }
        if let Some(ref reference) = patch.reference {
            entry.reference = Some(reference.clone());
        }
        if let Some(status) = patch.status {
            entry.status = status;
        }
        Ok(entry.clone())
    }

    async fn delete_entry(&mut self, id: i64) -> LedgerResult<bool> {
        let mut inner = self.inner.write().unwrap();
        match inner.entries.remove(&id) {
            Some(entry) => {
                if let Some(reference) = entry.reference {
                    inner.references.remove(&reference);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn account_activity(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> LedgerResult<Vec<AccountActivity>> {
        let inner = self.inner.read().unwrap();
        let mut by_code: BTreeMap<String, AccountActivity> = BTreeMap::new();

        for entry in inner.entries.values() {
            if !reportable(entry) || !in_window(entry.entry_date, start_date, end_date) {
                continue;
            }
            for line in &entry.lines {
                // unclassifiable lines (account missing from the chart)
                // cannot land in any report section
                let Some(account) = inner.accounts.get(&line.account_code) else {
                    continue;
                };
                let activity =
                    by_code
                        .entry(line.account_code.clone())
                        .or_insert_with(|| AccountActivity {
                            account_code: line.account_code.clone(),
                            account_name: line.account_name.clone(),
                            account_type: account.account_type,
                            total_debit: bigdecimal::BigDecimal::from(0),
                            total_credit: bigdecimal::BigDecimal::from(0),
                        });
                activity.total_debit += &line.debit;
                activity.total_credit += &line.credit;
            }
        }

        Ok(by_code.into_values().collect())
    }

    async fn account_lines(
        &self,
        account_code: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> LedgerResult<Vec<AccountLine>> {
        let inner = self.inner.read().unwrap();
        let mut keyed: Vec<(NaiveDate, i64, AccountLine)> = Vec::new();

        for entry in inner.entries.values() {
            if !reportable(entry) || !in_window(entry.entry_date, start_date, end_date) {
                continue;
            }
            for line in &entry.lines {
                if line.account_code == account_code {
                    keyed.push((
                        entry.entry_date,
                        entry.id,
                        AccountLine {
                            entry_date: entry.entry_date,
                            entry_description: entry.description.clone(),
                            debit: line.debit.clone(),
                            credit: line.credit.clone(),
                        },
                    ));
                }
            }
        }

        keyed.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        Ok(keyed.into_iter().map(|(_, _, line)| line).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry_spec(reference: Option<&str>) -> NewJournalEntry {
        let mut builder = EntryBuilder::new(date(2024, 1, 5), "journal")
            .description("Test entry")
            .debit("1000", "Cash", BigDecimal::from(100))
            .credit("4000", "Sales Revenue", BigDecimal::from(100));
        if let Some(reference) = reference {
            builder = builder.reference(reference);
        }
        builder.build()
    }

    #[tokio::test]
    async fn duplicate_reference_is_rejected_at_insert() {
        let mut storage = MemoryStorage::new();

        storage.insert_entry(&entry_spec(Some("ORD-1"))).await.unwrap();
        let err = storage
            .insert_entry(&entry_spec(Some("ORD-1")))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateReference(r) if r == "ORD-1"));

        // entries without a reference never collide
        storage.insert_entry(&entry_spec(None)).await.unwrap();
        storage.insert_entry(&entry_spec(None)).await.unwrap();
    }

    #[tokio::test]
    async fn deleting_an_entry_frees_its_reference() {
        let mut storage = MemoryStorage::new();

        let stored = storage.insert_entry(&entry_spec(Some("ORD-1"))).await.unwrap();
        assert!(storage.delete_entry(stored.id).await.unwrap());
        // the reference can be used again after the cascade delete
        storage.insert_entry(&entry_spec(Some("ORD-1"))).await.unwrap();
    }

    #[tokio::test]
    async fn patching_a_reference_keeps_the_uniqueness_index_consistent() {
        let mut storage = MemoryStorage::new();

        let first = storage.insert_entry(&entry_spec(Some("ORD-1"))).await.unwrap();
        storage.insert_entry(&entry_spec(Some("ORD-2"))).await.unwrap();

        // moving onto a taken reference fails
        let patch = EntryPatch {
            reference: Some("ORD-2".to_string()),
            ..EntryPatch::default()
        };
        let err = storage.update_entry(first.id, &patch).await.unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateReference(_)));

        // moving to a fresh reference releases the old one
        let patch = EntryPatch {
            reference: Some("ORD-9".to_string()),
            ..EntryPatch::default()
        };
        storage.update_entry(first.id, &patch).await.unwrap();
        storage.insert_entry(&entry_spec(Some("ORD-1"))).await.unwrap();
    }

    #[tokio::test]
    async fn ids_are_assigned_sequentially() {
        let mut storage = MemoryStorage::new();
        let a = storage.insert_entry(&entry_spec(None)).await.unwrap();
        let b = storage.insert_entry(&entry_spec(None)).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }
}

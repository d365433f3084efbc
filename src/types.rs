//! Core types and data structures for the accounting subsystem

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Actor recorded on automated postings when no user id is supplied.
pub const SYSTEM_ACTOR: &str = "system";

/// Maximum permitted difference between total debits and total credits
/// of a journal entry (0.01 currency units).
pub fn balance_tolerance() -> BigDecimal {
    BigDecimal::from(1) / BigDecimal::from(100)
}

/// Account types following standard accounting principles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// What the business owns (Cash, Inventory, Equipment, etc.)
    Asset,
    /// What the business owes (Accounts Payable, Loans, etc.)
    Liability,
    /// Owner's interest in the business (Capital, Retained Earnings)
    Equity,
    /// Money earned by the business
    Revenue,
    /// Costs incurred by the business
    Expense,
}

impl AccountType {
    /// Returns the side on which this account type normally carries its
    /// balance. Assets and expenses are debit-normal; liabilities, equity,
    /// and revenue are credit-normal.
    pub fn normal_balance(&self) -> BalanceSide {
        match self {
            AccountType::Asset | AccountType::Expense => BalanceSide::Debit,
            AccountType::Liability | AccountType::Equity | AccountType::Revenue => {
                BalanceSide::Credit
            }
        }
    }
}

/// The two sides of a double-entry posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceSide {
    Debit,
    Credit,
}

/// A chart-of-accounts entry
///
/// Accounts are keyed by `code` and are never deleted once referenced by a
/// journal line; retiring an account is modeled by `active = false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Short textual identifier, unique across the chart
    pub code: String,
    /// Display label
    pub name: String,
    pub account_type: AccountType,
    /// Optional grouping parent; advisory only, no tree invariant
    pub parent_code: Option<String>,
    /// Inactive accounts are excluded from default listings
    pub active: bool,
    pub created_at: NaiveDateTime,
}

impl Account {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        account_type: AccountType,
        parent_code: Option<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            account_type,
            parent_code,
            active: true,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Lifecycle state of a journal entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Excluded from all reports
    Draft,
    Posted,
    /// Kept for history but excluded from reports, like drafts
    Void,
}

/// A line within a journal entry
///
/// Lines are owned by their entry and immutable once written; corrections
/// are made by posting a new entry. `account_name` is stored redundantly so
/// historical reports survive later account renames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalLine {
    pub account_code: String,
    pub account_name: String,
    pub description: Option<String>,
    pub debit: BigDecimal,
    pub credit: BigDecimal,
}

impl JournalLine {
    /// Create a debit line
    pub fn debit(
        account_code: impl Into<String>,
        account_name: impl Into<String>,
        amount: BigDecimal,
    ) -> Self {
        Self {
            account_code: account_code.into(),
            account_name: account_name.into(),
            description: None,
            debit: amount,
            credit: BigDecimal::from(0),
        }
    }

    /// Create a credit line
    pub fn credit(
        account_code: impl Into<String>,
        account_name: impl Into<String>,
        amount: BigDecimal,
    ) -> Self {
        Self {
            account_code: account_code.into(),
            account_name: account_name.into(),
            description: None,
            debit: BigDecimal::from(0),
            credit: amount,
        }
    }
}

/// A persisted journal entry together with its lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Storage-assigned surrogate key
    pub id: i64,
    /// Accounting date, distinct from `created_at`
    pub entry_date: NaiveDate,
    /// Free-form classification tag ("journal", "sales_receipt", ...)
    pub entry_type: String,
    pub description: String,
    /// Correlation key back to the originating business event; the
    /// de-duplication key for automated posting
    pub reference: Option<String>,
    /// Sum of all debit amounts, stored redundantly for fast listing
    pub total_amount: BigDecimal,
    pub status: EntryStatus,
    pub created_by: String,
    pub created_at: NaiveDateTime,
    pub lines: Vec<JournalLine>,
}

/// Specification of a journal entry to be created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewJournalEntry {
    pub entry_date: NaiveDate,
    pub entry_type: String,
    pub description: String,
    pub reference: Option<String>,
    pub status: EntryStatus,
    pub created_by: String,
    pub lines: Vec<JournalLine>,
}

impl NewJournalEntry {
    /// Sum of all debit amounts
    pub fn total_debits(&self) -> BigDecimal {
        self.lines.iter().map(|l| &l.debit).sum()
    }

    /// Sum of all credit amounts
    pub fn total_credits(&self) -> BigDecimal {
        self.lines.iter().map(|l| &l.credit).sum()
    }

    /// Whether debits and credits agree within the balance tolerance
    pub fn is_balanced(&self) -> bool {
        let diff = self.total_debits() - self.total_credits();
        diff.abs() <= balance_tolerance()
    }
}

/// Builder for journal entry specifications
#[derive(Debug)]
pub struct EntryBuilder {
    entry: NewJournalEntry,
}

impl EntryBuilder {
    pub fn new(entry_date: NaiveDate, entry_type: impl Into<String>) -> Self {
        Self {
            entry: NewJournalEntry {
                entry_date,
                entry_type: entry_type.into(),
                description: String::new(),
                reference: None,
                status: EntryStatus::Posted,
                created_by: SYSTEM_ACTOR.to_string(),
                lines: Vec::new(),
            },
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.entry.description = description.into();
        self
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.entry.reference = Some(reference.into());
        self
    }

    pub fn status(mut self, status: EntryStatus) -> Self {
        self.entry.status = status;
        self
    }

    pub fn created_by(mut self, actor: impl Into<String>) -> Self {
        self.entry.created_by = actor.into();
        self
    }

    pub fn debit(
        mut self,
        account_code: impl Into<String>,
        account_name: impl Into<String>,
        amount: BigDecimal,
    ) -> Self {
        self.entry
            .lines
            .push(JournalLine::debit(account_code, account_name, amount));
        self
    }

    pub fn credit(
        mut self,
        account_code: impl Into<String>,
        account_name: impl Into<String>,
        amount: BigDecimal,
    ) -> Self {
        self.entry
            .lines
            .push(JournalLine::credit(account_code, account_name, amount));
        self
    }

    pub fn line(mut self, line: JournalLine) -> Self {
        self.entry.lines.push(line);
        self
    }

    pub fn build(self) -> NewJournalEntry {
        self.entry
    }
}

/// Filter for listing journal entries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryFilter {
    pub entry_type: Option<String>,
    pub status: Option<EntryStatus>,
    pub reference: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl EntryFilter {
    /// Filter matching a single correlation reference
    pub fn by_reference(reference: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
            ..Self::default()
        }
    }
}

/// Header-only update of a journal entry; lines are never touched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryPatch {
    pub entry_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub status: Option<EntryStatus>,
}

/// Per-account debit/credit activity over a reporting window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountActivity {
    pub account_code: String,
    pub account_name: String,
    pub account_type: AccountType,
    pub total_debit: BigDecimal,
    pub total_credit: BigDecimal,
}

/// A single account's line flattened with its owning entry's date and
/// description, for cash-flow grouping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountLine {
    pub entry_date: NaiveDate,
    pub entry_description: String,
    pub debit: BigDecimal,
    pub credit: BigDecimal,
}

/// Errors that can occur in the accounting subsystem
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("account code '{0}' already exists")]
    DuplicateCode(String),
    #[error("journal entry is not balanced: debits = {debits}, credits = {credits}")]
    UnbalancedEntry {
        debits: BigDecimal,
        credits: BigDecimal,
    },
    #[error("an entry with reference '{0}' already exists")]
    DuplicateReference(String),
    #[error("account not found: {0}")]
    AccountNotFound(String),
    #[error("journal entry not found: {0}")]
    EntryNotFound(i64),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("validation error: {0}")]
    Validation(String),
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

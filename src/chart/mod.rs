//! Chart of accounts management and the canonical default chart

use crate::traits::LedgerStorage;
use crate::types::*;
use crate::utils::validation::{validate_account_code, validate_account_name};

/// Account codes the automated posting rules depend on.
///
/// These are fixed conventions of the default chart; the event mapper
/// addresses accounts by these codes rather than by lookup.
pub mod codes {
    pub const CASH: &str = "1000";
    pub const BANK: &str = "1100";
    pub const ACCOUNTS_RECEIVABLE: &str = "1200";
    pub const INVENTORY: &str = "1300";
    pub const ACCOUNTS_PAYABLE: &str = "2000";
    pub const SALES_TAX_PAYABLE: &str = "2100";
    pub const SALES_REVENUE: &str = "4000";
    pub const COST_OF_GOODS_SOLD: &str = "5000";
    pub const WASTE_LOSS: &str = "5600";
}

/// The canonical restaurant chart seeded on first use.
const DEFAULT_CHART: &[(&str, &str, AccountType)] = &[
    // Assets
    ("1000", "Cash", AccountType::Asset),
    ("1100", "Bank Account", AccountType::Asset),
    ("1200", "Accounts Receivable", AccountType::Asset),
    ("1300", "Inventory", AccountType::Asset),
    ("1400", "Kitchen Equipment", AccountType::Asset),
    ("1500", "Furniture & Fixtures", AccountType::Asset),
    // Liabilities
    ("2000", "Accounts Payable", AccountType::Liability),
    ("2100", "Sales Tax Payable", AccountType::Liability),
    ("2200", "Wages Payable", AccountType::Liability),
    ("2300", "Loans Payable", AccountType::Liability),
    // Equity
    ("3000", "Owner's Capital", AccountType::Equity),
    ("3100", "Retained Earnings", AccountType::Equity),
    // Revenue
    ("4000", "Sales Revenue", AccountType::Revenue),
    ("4100", "Service Charges", AccountType::Revenue),
    ("4200", "Other Income", AccountType::Revenue),
    // Expenses
    ("5000", "Cost of Goods Sold", AccountType::Expense),
    ("5100", "Wages & Salaries", AccountType::Expense),
    ("5200", "Rent Expense", AccountType::Expense),
    ("5300", "Utilities Expense", AccountType::Expense),
    ("5400", "Supplies Expense", AccountType::Expense),
    ("5500", "Marketing Expense", AccountType::Expense),
    ("5600", "Miscellaneous Expenses (Waste/Loss)", AccountType::Expense),
];

/// Display name of an account in the canonical default chart
pub fn default_name(code: &str) -> Option<&'static str> {
    DEFAULT_CHART
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, name, _)| *name)
}

/// Chart of accounts store
///
/// Owns the set of named, typed accounts. Accounts referenced by journal
/// lines are never deleted; they are deactivated instead.
pub struct ChartOfAccounts<S: LedgerStorage> {
    storage: S,
}

impl<S: LedgerStorage> ChartOfAccounts<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// List accounts ordered by code; `active_only` hides retired accounts
    pub async fn list_accounts(&self, active_only: bool) -> LedgerResult<Vec<Account>> {
        self.storage.list_accounts(active_only).await
    }

    /// Get an account by code
    pub async fn get_account(&self, code: &str) -> LedgerResult<Option<Account>> {
        self.storage.get_account(code).await
    }

    /// Get an account by code, erroring when absent
    pub async fn get_account_required(&self, code: &str) -> LedgerResult<Account> {
        self.storage
            .get_account(code)
            .await?
            .ok_or_else(|| LedgerError::AccountNotFound(code.to_string()))
    }

    /// Add an account to the chart
    pub async fn add_account(
        &mut self,
        code: impl Into<String>,
        name: impl Into<String>,
        account_type: AccountType,
        parent_code: Option<String>,
    ) -> LedgerResult<Account> {
        let account = Account::new(code, name, account_type, parent_code);

        validate_account_code(&account.code)?;
        validate_account_name(&account.name)?;

        if self.storage.get_account(&account.code).await?.is_some() {
            return Err(LedgerError::DuplicateCode(account.code));
        }

        if let Some(ref parent) = account.parent_code {
            if self.storage.get_account(parent).await?.is_none() {
                return Err(LedgerError::Validation(format!(
                    "parent account '{}' does not exist",
                    parent
                )));
            }
        }

        self.storage.save_account(&account).await?;
        Ok(account)
    }

    /// Rename an account; historical journal lines keep the name they were
    /// written with
    pub async fn rename_account(
        &mut self,
        code: &str,
        name: impl Into<String>,
    ) -> LedgerResult<Account> {
        let mut account = self.get_account_required(code).await?;
        account.name = name.into();
        validate_account_name(&account.name)?;
        self.storage.update_account(&account).await?;
        Ok(account)
    }

    /// Retire an account from default listings without touching history
    pub async fn deactivate_account(&mut self, code: &str) -> LedgerResult<Account> {
        let mut account = self.get_account_required(code).await?;
        account.active = false;
        self.storage.update_account(&account).await?;
        Ok(account)
    }

    /// Seed the canonical default chart into an empty store
    ///
    /// Idempotent: any existing account means the chart has already been
    /// set up and nothing is inserted. Returns the number of accounts
    /// inserted (0 on an already-seeded store).
    pub async fn seed_defaults(&mut self) -> LedgerResult<usize> {
        if self.storage.account_count().await? > 0 {
            tracing::debug!("chart of accounts already seeded, skipping");
            return Ok(0);
        }

        for (code, name, account_type) in DEFAULT_CHART {
            let account = Account::new(*code, *name, *account_type, None);
            self.storage.save_account(&account).await?;
        }

        tracing::info!(accounts = DEFAULT_CHART.len(), "seeded default chart of accounts");
        Ok(DEFAULT_CHART.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_storage::MemoryStorage;

    #[tokio::test]
    async fn seed_defaults_is_idempotent() {
        let storage = MemoryStorage::new();
        let mut chart = ChartOfAccounts::new(storage.clone());

        assert_eq!(chart.seed_defaults().await.unwrap(), 22);
        assert_eq!(chart.seed_defaults().await.unwrap(), 0);

        let accounts = chart.list_accounts(true).await.unwrap();
        assert_eq!(accounts.len(), 22);
        // ordered by code
        assert_eq!(accounts[0].code, "1000");
        assert_eq!(accounts.last().unwrap().code, "5600");
    }

    #[tokio::test]
    async fn seed_guard_respects_manually_created_accounts() {
        let storage = MemoryStorage::new();
        let mut chart = ChartOfAccounts::new(storage);

        chart
            .add_account("9000", "Petty Cash", AccountType::Asset, None)
            .await
            .unwrap();

        // a non-empty store is treated as already set up
        assert_eq!(chart.seed_defaults().await.unwrap(), 0);
        assert_eq!(chart.list_accounts(true).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_code_is_rejected() {
        let storage = MemoryStorage::new();
        let mut chart = ChartOfAccounts::new(storage);

        chart
            .add_account("1000", "Cash", AccountType::Asset, None)
            .await
            .unwrap();

        let err = chart
            .add_account("1000", "Cash Again", AccountType::Asset, None)
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateCode(code) if code == "1000"));
    }

    #[tokio::test]
    async fn missing_parent_is_rejected() {
        let storage = MemoryStorage::new();
        let mut chart = ChartOfAccounts::new(storage);

        let err = chart
            .add_account(
                "1010",
                "Register Float",
                AccountType::Asset,
                Some("1000".to_string()),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[tokio::test]
    async fn deactivated_accounts_drop_out_of_default_listing() {
        let storage = MemoryStorage::new();
        let mut chart = ChartOfAccounts::new(storage);
        chart.seed_defaults().await.unwrap();

        chart.deactivate_account(codes::BANK).await.unwrap();

        let active = chart.list_accounts(true).await.unwrap();
        assert_eq!(active.len(), 21);
        assert!(active.iter().all(|a| a.code != codes::BANK));

        let all = chart.list_accounts(false).await.unwrap();
        assert_eq!(all.len(), 22);
    }

    #[test]
    fn mapper_codes_are_present_in_default_chart() {
        for code in [
            codes::CASH,
            codes::INVENTORY,
            codes::ACCOUNTS_PAYABLE,
            codes::SALES_REVENUE,
            codes::COST_OF_GOODS_SOLD,
            codes::WASTE_LOSS,
        ] {
            assert!(default_name(code).is_some(), "missing default account {code}");
        }
    }
}

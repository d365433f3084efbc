//! Financial reporting derived from ledger aggregates
//!
//! All three statements are read-only aggregate queries. Periods with no
//! activity produce empty line collections and zero totals rather than
//! errors.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::chart::codes;
use crate::traits::LedgerStorage;
use crate::types::*;

/// One account's contribution to a statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLine {
    pub account_code: String,
    pub account_name: String,
    pub amount: BigDecimal,
}

/// Profit & Loss statement for a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitAndLoss {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub revenue: Vec<ReportLine>,
    pub expenses: Vec<ReportLine>,
    pub total_revenue: BigDecimal,
    pub total_expenses: BigDecimal,
    pub net_income: BigDecimal,
}

/// Balance sheet as of a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub as_of_date: NaiveDate,
    pub assets: Vec<ReportLine>,
    pub liabilities: Vec<ReportLine>,
    pub equity: Vec<ReportLine>,
    pub total_assets: BigDecimal,
    pub total_liabilities: BigDecimal,
    pub total_equity: BigDecimal,
}

/// One grouped line item on the cash flow statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowItem {
    pub description: String,
    pub amount: BigDecimal,
}

/// Cash flow statement for a period
///
/// Every period item is classified as operating; the investing and
/// financing buckets are always empty in this implementation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub operating: Vec<CashFlowItem>,
    pub investing: Vec<CashFlowItem>,
    pub financing: Vec<CashFlowItem>,
    pub beginning_cash: BigDecimal,
    pub net_cash_flow: BigDecimal,
    pub ending_cash: BigDecimal,
}

/// Reporting engine over the ledger store
pub struct Reports<S: LedgerStorage> {
    storage: S,
}

impl<S: LedgerStorage> Reports<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Profit & Loss over `[start_date, end_date]`
    ///
    /// Revenue accounts contribute their credit balance as-is; expense
    /// accounts are sign-flipped to positive. Near-zero aggregates are
    /// dropped.
    pub async fn profit_and_loss(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> LedgerResult<ProfitAndLoss> {
        let activity = self
            .storage
            .account_activity(Some(start_date), Some(end_date))
            .await?;

        let tolerance = balance_tolerance();
        let mut revenue = Vec::new();
        let mut expenses = Vec::new();
        let mut total_revenue = BigDecimal::from(0);
        let mut total_expenses = BigDecimal::from(0);

        for account in activity {
            let balance = &account.total_credit - &account.total_debit;
            if balance.abs() <= tolerance {
                continue;
            }
            match account.account_type {
                AccountType::Revenue => {
                    total_revenue += &balance;
                    revenue.push(ReportLine {
                        account_code: account.account_code,
                        account_name: account.account_name,
                        amount: balance,
                    });
                }
                AccountType::Expense => {
                    let amount = (&account.total_debit - &account.total_credit).abs();
                    total_expenses += &amount;
                    expenses.push(ReportLine {
                        account_code: account.account_code,
                        account_name: account.account_name,
                        amount,
                    });
                }
                _ => {}
            }
        }

        let net_income = &total_revenue - &total_expenses;
        Ok(ProfitAndLoss {
            start_date,
            end_date,
            revenue,
            expenses,
            total_revenue,
            total_expenses,
            net_income,
        })
    }

    /// Balance sheet as of a date (entries dated on the date included)
    ///
    /// Assets carry their debit balance as-is; liabilities and equity are
    /// sign-flipped to positive. Assets = Liabilities + Equity is an
    /// emergent property of balanced postings, not something enforced
    /// here.
    pub async fn balance_sheet(&self, as_of_date: NaiveDate) -> LedgerResult<BalanceSheet> {
        let activity = self.storage.account_activity(None, Some(as_of_date)).await?;

        let tolerance = balance_tolerance();
        let mut assets = Vec::new();
        let mut liabilities = Vec::new();
        let mut equity = Vec::new();
        let mut total_assets = BigDecimal::from(0);
        let mut total_liabilities = BigDecimal::from(0);
        let mut total_equity = BigDecimal::from(0);

        for account in activity {
            let balance = &account.total_debit - &account.total_credit;
            if balance.abs() <= tolerance {
                continue;
            }
            let line = |amount: BigDecimal| ReportLine {
                account_code: account.account_code.clone(),
                account_name: account.account_name.clone(),
                amount,
            };
            match account.account_type {
                AccountType::Asset => {
                    total_assets += &balance;
                    assets.push(line(balance));
                }
                AccountType::Liability => {
                    let amount = -balance;
                    total_liabilities += &amount;
                    liabilities.push(line(amount));
                }
                AccountType::Equity => {
                    let amount = -balance;
                    total_equity += &amount;
                    equity.push(line(amount));
                }
                _ => {}
            }
        }

        Ok(BalanceSheet {
            as_of_date,
            assets,
            liabilities,
            equity,
            total_assets,
            total_liabilities,
            total_equity,
        })
    }

    /// Cash flow over `[start_date, end_date]`
    ///
    /// Cash-account lines in the period are grouped by their entry's
    /// description; `ending_cash = beginning_cash + net_cash_flow` holds by
    /// construction.
    pub async fn cash_flow(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> LedgerResult<CashFlow> {
        let period_lines = self
            .storage
            .account_lines(codes::CASH, Some(start_date), Some(end_date))
            .await?;

        // group by entry description, preserving first-seen order
        let mut operating: Vec<CashFlowItem> = Vec::new();
        for line in &period_lines {
            let delta = &line.debit - &line.credit;
            match operating
                .iter_mut()
                .find(|item| item.description == line.entry_description)
            {
                Some(item) => item.amount += delta,
                None => operating.push(CashFlowItem {
                    description: line.entry_description.clone(),
                    amount: delta,
                }),
            }
        }

        let beginning_cash = match start_date.pred_opt() {
            Some(day_before) => {
                let prior = self
                    .storage
                    .account_lines(codes::CASH, None, Some(day_before))
                    .await?;
                prior
                    .iter()
                    .map(|line| &line.debit - &line.credit)
                    .sum()
            }
            None => BigDecimal::from(0),
        };

        let net_cash_flow: BigDecimal = operating.iter().map(|item| &item.amount).sum();
        let ending_cash = &beginning_cash + &net_cash_flow;

        Ok(CashFlow {
            start_date,
            end_date,
            operating,
            investing: Vec::new(),
            financing: Vec::new(),
            beginning_cash,
            net_cash_flow,
            ending_cash,
        })
    }
}

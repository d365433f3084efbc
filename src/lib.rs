//! # POS Accounting
//!
//! Double-entry accounting core for a restaurant point-of-sale and
//! back-office system: a chart of accounts, an append-style general
//! ledger, automated posting of completed orders and stock movements, and
//! financial reporting derived from ledger aggregates.
//!
//! ## Features
//!
//! - **Chart of accounts**: coded, typed accounts with a canonical
//!   restaurant default chart seeded on first use
//! - **Journal**: balanced journal entries with atomic header-plus-lines
//!   writes and filtered historical queries
//! - **Event-to-ledger posting**: completed orders and inventory movements
//!   become balanced entries automatically, with failures logged rather
//!   than surfaced to the business operation
//! - **Reconciliation sync**: an idempotent catch-up job that backfills
//!   any event the live posting missed
//! - **Reporting**: Profit & Loss, Balance Sheet, and Cash Flow statements
//! - **Storage abstraction**: database-agnostic design with a trait-based
//!   storage seam
//!
//! ## Quick Start
//!
//! ```rust
//! use bigdecimal::BigDecimal;
//! use chrono::NaiveDate;
//! use pos_accounting::{
//!     ChartOfAccounts, EntryBuilder, Journal, Reports,
//!     utils::MemoryStorage,
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), pos_accounting::LedgerError> {
//! let storage = MemoryStorage::new();
//!
//! let mut chart = ChartOfAccounts::new(storage.clone());
//! chart.seed_defaults().await?;
//!
//! let mut journal = Journal::new(storage.clone());
//! let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
//! journal
//!     .create_entry(
//!         EntryBuilder::new(date, "sales_receipt")
//!             .description("Evening service")
//!             .debit("1000", "Cash", BigDecimal::from(1200))
//!             .credit("4000", "Sales Revenue", BigDecimal::from(1200))
//!             .build(),
//!     )
//!     .await?;
//!
//! let reports = Reports::new(storage);
//! let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let pnl = reports.profit_and_loss(start, end).await?;
//! assert_eq!(pnl.total_revenue, BigDecimal::from(1200));
//! # Ok(())
//! # }
//! ```

pub mod chart;
pub mod events;
pub mod ledger;
pub mod report;
pub mod sync;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use chart::*;
pub use events::*;
pub use ledger::*;
pub use report::*;
pub use sync::*;
pub use traits::*;
pub use types::*;

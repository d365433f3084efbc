//! General ledger: journal entry creation, lookup, and maintenance

pub mod journal;

pub use journal::*;

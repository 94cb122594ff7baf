//! Double-entry posting logic.
//!
//! This module implements the core ledger functionality:
//! - Ledger entries (debits and credits)
//! - Voucher domain types
//! - Business rule validation
//! - The posting service that validates events before persistence
//! - Posting recipes (what debits what, per business event)
//! - Per-account activity accumulation
//! - Error types for ledger operations

pub mod balance;
pub mod entry;
pub mod error;
pub mod recipes;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod service_props;
#[cfg(test)]
mod validation_props;

pub use balance::AccountActivity;
pub use entry::{EntryState, EntryType, LedgerEntry};
pub use error::LedgerError;
pub use recipes::PostingRecipes;
pub use service::LedgerService;
pub use types::{
    LineInput, PostingEvent, SourceType, Voucher, VoucherRef, VoucherStatus, VoucherTotals,
};

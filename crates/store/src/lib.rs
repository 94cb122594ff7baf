//! Books storage, posting engine and balance aggregation for Mizan.
//!
//! This crate is the durable layer behind the pure logic in
//! `mizan-core`. All writes go through a single books lock, the
//! in-memory equivalent of the request-scoped database transaction: a
//! voucher's number allocation, validation and entry insertion happen
//! atomically, and period close/lock is serialized against in-flight
//! postings on the same lock.
//!
//! # Components
//!
//! - [`Books`] - the shared in-memory state handle
//! - [`AccountRegistry`] - chart of accounts
//! - [`FiscalCalendar`] - fiscal period lifecycle, closing entries
//! - [`LedgerStore`] - append-only entry storage and queries
//! - [`PostingEngine`] - the single entry point for posting and reversal
//! - [`BalanceAggregator`] - balances derived from the entry set
//! - [`SubsidiaryLedgers`] - AR/AP counterparty ledgers
//! - [`ReconciliationService`] - statement-to-ledger reconciliation

mod books;
#[cfg(test)]
mod store_props;

pub mod aggregator;
pub mod clock;
pub mod engine;
pub mod fiscal;
pub mod reconcile;
pub mod registry;
pub mod sequence;
pub mod store;
pub mod subsidiary;

pub use aggregator::BalanceAggregator;
pub use books::Books;
pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::PostingEngine;
pub use fiscal::{CalendarError, FiscalCalendar, PeriodCloseSummary};
pub use reconcile::{ReconcileError, ReconciliationService};
pub use registry::{AccountRegistry, RegistryError};
pub use store::{EntryFilter, LedgerStore};
pub use subsidiary::{SubsidiaryError, SubsidiaryLedgers};

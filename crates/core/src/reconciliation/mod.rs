//! Bank reconciliation: statement-to-ledger comparison.

pub mod error;
pub mod types;

pub use error::ReconciliationError;
pub use types::{Reconciliation, ReconciliationStatus};

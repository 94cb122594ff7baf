//! Fiscal period lifecycle.

pub mod error;
pub mod period;

pub use error::FiscalError;
pub use period::{FiscalPeriod, PeriodStatus};

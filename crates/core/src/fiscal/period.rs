//! Fiscal period types and state transitions.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mizan_shared::types::FiscalPeriodId;

use super::error::FiscalError;

/// Status of a fiscal period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    /// Period is open for posting.
    Open,
    /// Period is closed, no new postings allowed.
    Closed,
    /// Period is locked, no changes allowed (not even reopening).
    Locked,
}

impl PeriodStatus {
    /// Returns true if vouchers may be posted into the period.
    #[must_use]
    pub fn allows_posting(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// A fiscal period: a date range with a posting status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiscalPeriod {
    /// Unique identifier.
    pub id: FiscalPeriodId,
    /// Period name (e.g. "March 2026").
    pub name: String,
    /// Start date of the period (inclusive).
    pub start_date: NaiveDate,
    /// End date of the period (inclusive).
    pub end_date: NaiveDate,
    /// Current status.
    pub status: PeriodStatus,
    /// Number of the closing-entries voucher, once closed.
    pub closing_voucher: Option<String>,
    /// Net income computed at close time.
    pub net_income: Option<Decimal>,
}

impl FiscalPeriod {
    /// Creates a new open period.
    #[must_use]
    pub fn new(name: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: FiscalPeriodId::new(),
            name: name.into(),
            start_date,
            end_date,
            status: PeriodStatus::Open,
            closing_voucher: None,
            net_income: None,
        }
    }

    /// Returns true if transactions can be posted to this period.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == PeriodStatus::Open
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns true if this period's range overlaps another's.
    #[must_use]
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && start <= self.end_date
    }

    /// Closes the period, blocking further posting.
    ///
    /// # Errors
    ///
    /// `AlreadyClosed` if closed, `CloseLocked` if locked.
    pub fn close(&mut self) -> Result<(), FiscalError> {
        match self.status {
            PeriodStatus::Closed => Err(FiscalError::AlreadyClosed),
            PeriodStatus::Locked => Err(FiscalError::CloseLocked),
            PeriodStatus::Open => {
                self.status = PeriodStatus::Closed;
                Ok(())
            }
        }
    }

    /// Reopens a closed period.
    ///
    /// # Errors
    ///
    /// `ReopenLocked` if locked, `NotClosed` if open.
    pub fn reopen(&mut self) -> Result<(), FiscalError> {
        match self.status {
            PeriodStatus::Locked => Err(FiscalError::ReopenLocked),
            PeriodStatus::Open => Err(FiscalError::NotClosed),
            PeriodStatus::Closed => {
                self.status = PeriodStatus::Open;
                Ok(())
            }
        }
    }

    /// Locks a closed period, blocking even reopening.
    ///
    /// # Errors
    ///
    /// `AlreadyLocked` if locked, `LockOpen` if still open.
    pub fn lock(&mut self) -> Result<(), FiscalError> {
        match self.status {
            PeriodStatus::Locked => Err(FiscalError::AlreadyLocked),
            PeriodStatus::Open => Err(FiscalError::LockOpen),
            PeriodStatus::Closed => {
                self.status = PeriodStatus::Locked;
                Ok(())
            }
        }
    }

    /// Unlocks a locked period back to closed.
    ///
    /// The close itself is never undone by unlocking.
    ///
    /// # Errors
    ///
    /// `NotLocked` if the period is not locked.
    pub fn unlock(&mut self) -> Result<(), FiscalError> {
        match self.status {
            PeriodStatus::Locked => {
                self.status = PeriodStatus::Closed;
                Ok(())
            }
            _ => Err(FiscalError::NotLocked),
        }
    }
}

//! Fiscal period store: opening, closing with closing entries, locking.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use mizan_core::accounts::AccountKind;
use mizan_core::fiscal::{FiscalError, FiscalPeriod, PeriodStatus};
use mizan_core::ledger::{
    AccountActivity, LedgerError, LineInput, PostingEvent, SourceType, VoucherRef,
};
use mizan_shared::config::LedgerConfig;
use mizan_shared::types::{FiscalPeriodId, UserId};

use crate::books::Books;
use crate::clock::Clock;

/// Errors from fiscal calendar operations.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// A period lifecycle rule was violated.
    #[error(transparent)]
    Fiscal(#[from] FiscalError),

    /// Posting the closing entries failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Result of closing a period.
#[derive(Debug, Clone)]
pub struct PeriodCloseSummary {
    /// Revenue minus expenses as of the period end.
    pub net_income: Decimal,
    /// The closing-entries voucher, when there was activity to close.
    pub closing_voucher: Option<VoucherRef>,
}

/// Fiscal period lifecycle over the books.
///
/// Close and lock take the books writer lock for their whole duration,
/// so they are serialized against in-flight postings: no voucher can
/// slip into a period between its closing entries and the status flip.
#[derive(Clone)]
pub struct FiscalCalendar {
    books: Books,
    retained_earnings: String,
    clock: Arc<dyn Clock>,
}

impl FiscalCalendar {
    /// Creates a calendar over the given books.
    #[must_use]
    pub fn new(books: &Books, config: &LedgerConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            books: books.clone(),
            retained_earnings: config.accounts.retained_earnings.clone(),
            clock,
        }
    }

    /// Opens a new period.
    ///
    /// # Errors
    ///
    /// `Overlap` if the range intersects an existing period.
    pub fn open_period(
        &self,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<FiscalPeriodId, CalendarError> {
        let mut inner = self.books.write();
        if inner.periods.iter().any(|p| p.overlaps(start_date, end_date)) {
            return Err(FiscalError::Overlap.into());
        }
        let period = FiscalPeriod::new(name, start_date, end_date);
        let id = period.id;
        inner.periods.push(period);
        Ok(id)
    }

    /// The period containing a date, if any.
    #[must_use]
    pub fn period_for(&self, date: NaiveDate) -> Option<FiscalPeriod> {
        self.books.read().period_for(date).cloned()
    }

    /// Fetches a period by id.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id.
    pub fn get(&self, id: FiscalPeriodId) -> Result<FiscalPeriod, CalendarError> {
        self.books
            .read()
            .periods
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| FiscalError::NotFound(id.to_string()).into())
    }

    /// Closes a period: posts closing entries dated the period end
    /// (zeroing every revenue and expense balance into retained
    /// earnings), then flips the status to closed.
    ///
    /// The whole operation holds the books writer lock, so no posting
    /// can interleave with it.
    ///
    /// # Errors
    ///
    /// `AlreadyClosed` / `CloseLocked` for wrong states, `NotFound` for
    /// an unknown id, or a [`LedgerError`] if the closing voucher fails
    /// to post.
    pub fn close_period(
        &self,
        id: FiscalPeriodId,
        closed_by: UserId,
    ) -> Result<PeriodCloseSummary, CalendarError> {
        let now = self.clock.now();
        let mut inner = self.books.write();

        let index = inner
            .periods
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| FiscalError::NotFound(id.to_string()))?;

        match inner.periods[index].status {
            PeriodStatus::Closed => return Err(FiscalError::AlreadyClosed.into()),
            PeriodStatus::Locked => return Err(FiscalError::CloseLocked.into()),
            PeriodStatus::Open => {}
        }

        let end_date = inner.periods[index].end_date;
        let period_name = inner.periods[index].name.clone();

        let mut lines = Vec::new();
        let mut net_income = Decimal::ZERO;

        for account in inner.accounts.values().filter(|a| {
            a.is_active && matches!(a.kind, AccountKind::Revenue | AccountKind::Expense)
        }) {
            let mut activity = AccountActivity::default();
            for entry in inner.entries.iter().filter(|e| {
                e.account_code == account.code && !e.is_closed && e.voucher_date <= end_date
            }) {
                activity.add(entry.entry_type, entry.amount);
            }

            let net = activity.net(account.kind);
            if net == Decimal::ZERO {
                continue;
            }

            // Zero the account toward its off side; a balance that sits
            // on the off side already closes from the other direction.
            let description = format!("Closing entry - {period_name}");
            let close_with_debit = if account.kind == AccountKind::Revenue {
                net_income += net;
                net > Decimal::ZERO
            } else {
                net_income -= net;
                net < Decimal::ZERO
            };
            lines.push(if close_with_debit {
                LineInput::debit(&account.code, net.abs(), description)
            } else {
                LineInput::credit(&account.code, net.abs(), description)
            });
        }

        if net_income != Decimal::ZERO {
            let description = format!("Net income transfer - {period_name}");
            let line = if net_income > Decimal::ZERO {
                LineInput::credit(&self.retained_earnings, net_income.abs(), description)
            } else {
                LineInput::debit(&self.retained_earnings, net_income.abs(), description)
            };
            lines.push(line);
        }

        let closing_voucher = if lines.is_empty() {
            None
        } else {
            let event = PostingEvent::new(
                SourceType::PeriodClose,
                end_date,
                format!("Closing entries - {period_name}"),
                lines,
                closed_by,
            );
            let (voucher, _) = inner.append_event(&event, now)?;
            Some(voucher)
        };

        let period = &mut inner.periods[index];
        period.close()?;
        period.net_income = Some(net_income);
        period.closing_voucher = closing_voucher.as_ref().map(|v| v.number.clone());

        tracing::info!(
            period = %period_name,
            %net_income,
            voucher = closing_voucher.as_ref().map_or("none", |v| v.number.as_str()),
            "fiscal period closed"
        );

        Ok(PeriodCloseSummary {
            net_income,
            closing_voucher,
        })
    }

    /// Reopens a closed period.
    ///
    /// # Errors
    ///
    /// `ReopenLocked` / `NotClosed` for wrong states, `NotFound` for an
    /// unknown id.
    pub fn reopen_period(&self, id: FiscalPeriodId) -> Result<(), CalendarError> {
        let mut inner = self.books.write();
        let period = inner
            .periods
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| FiscalError::NotFound(id.to_string()))?;
        period.reopen()?;
        Ok(())
    }

    /// Locks a closed period and marks its entries closed, excluding
    /// them from balance queries.
    ///
    /// # Errors
    ///
    /// `AlreadyLocked` / `LockOpen` for wrong states, `NotFound` for an
    /// unknown id.
    pub fn lock_period(&self, id: FiscalPeriodId) -> Result<(), CalendarError> {
        let mut inner = self.books.write();
        let index = inner
            .periods
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| FiscalError::NotFound(id.to_string()))?;

        inner.periods[index].lock()?;

        let (start, end) = (inner.periods[index].start_date, inner.periods[index].end_date);
        for entry in inner
            .entries
            .iter_mut()
            .filter(|e| e.voucher_date >= start && e.voucher_date <= end)
        {
            entry.is_closed = true;
        }
        Ok(())
    }

    /// Unlocks a locked period back to closed and unmarks its entries.
    ///
    /// # Errors
    ///
    /// `NotLocked` for wrong states, `NotFound` for an unknown id.
    pub fn unlock_period(&self, id: FiscalPeriodId) -> Result<(), CalendarError> {
        let mut inner = self.books.write();
        let index = inner
            .periods
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| FiscalError::NotFound(id.to_string()))?;

        inner.periods[index].unlock()?;

        let (start, end) = (inner.periods[index].start_date, inner.periods[index].end_date);
        for entry in inner
            .entries
            .iter_mut()
            .filter(|e| e.voucher_date >= start && e.voucher_date <= end)
        {
            entry.is_closed = false;
        }
        Ok(())
    }
}

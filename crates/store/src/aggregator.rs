//! Balance aggregation over the entry store.
//!
//! Balances are always computed from the entry set at read time. There
//! is no mutable balance counter anywhere: a "balance" is the result of
//! a fold, so concurrent postings can never leave a stale figure behind.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use mizan_core::ledger::{AccountActivity, EntryType, LedgerError};
use mizan_core::reports::{
    AccountActivityRow, BalancePoint, ReportService, TrialBalanceReport,
};
use mizan_shared::config::LedgerConfig;

use crate::books::Books;

/// Read-only balance computation.
#[derive(Debug, Clone)]
pub struct BalanceAggregator {
    books: Books,
    include_closed: bool,
    currency: String,
}

impl BalanceAggregator {
    /// Creates an aggregator over the given books.
    #[must_use]
    pub fn new(books: &Books, config: &LedgerConfig) -> Self {
        Self {
            books: books.clone(),
            include_closed: config.include_closed_entries,
            currency: config.base_currency.clone(),
        }
    }

    /// Signed net balance of one account over an optional date range.
    ///
    /// The sign convention follows the account kind: Asset/Expense
    /// accounts report debits minus credits, the rest credits minus
    /// debits. Entries of locked periods are excluded unless configured
    /// otherwise.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` for an unknown code.
    pub fn account_balance(
        &self,
        account_code: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Decimal, LedgerError> {
        let inner = self.books.read();
        let account = inner
            .accounts
            .get(account_code)
            .ok_or_else(|| LedgerError::AccountNotFound(account_code.to_string()))?;

        let mut activity = AccountActivity::default();
        for entry in inner.entries.iter().filter(|e| {
            e.account_code == account_code
                && (self.include_closed || !e.is_closed)
                && from.is_none_or(|d| e.voucher_date >= d)
                && to.is_none_or(|d| e.voucher_date <= d)
        }) {
            activity.add(entry.entry_type, entry.amount);
        }

        Ok(activity.net(account.kind))
    }

    /// Trial balance over all active accounts as of a date.
    ///
    /// The report only lists accounts with activity; its debit and
    /// credit columns must agree after any sequence of postings.
    #[must_use]
    pub fn trial_balance(&self, as_of: Option<NaiveDate>) -> TrialBalanceReport {
        let inner = self.books.read();
        let mut rows = Vec::new();

        for account in inner.accounts.values().filter(|a| a.is_active) {
            let mut activity = AccountActivity::default();
            for entry in inner.entries.iter().filter(|e| {
                e.account_code == account.code
                    && (self.include_closed || !e.is_closed)
                    && as_of.is_none_or(|d| e.voucher_date <= d)
            }) {
                activity.add(entry.entry_type, entry.amount);
            }

            rows.push(AccountActivityRow {
                code: account.code.clone(),
                name: account.name.clone(),
                kind: account.kind,
                debit_total: activity.debit_total,
                credit_total: activity.credit_total,
            });
        }

        ReportService::trial_balance(rows, as_of, &self.currency)
    }

    /// Monthly balance movement of one account.
    ///
    /// Only months with at least one entry are emitted; no gap filling.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` for an unknown code.
    pub fn balance_history(
        &self,
        account_code: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<BalancePoint>, LedgerError> {
        let inner = self.books.read();
        let account = inner
            .accounts
            .get(account_code)
            .ok_or_else(|| LedgerError::AccountNotFound(account_code.to_string()))?;
        let kind = account.kind;

        let changes: Vec<(NaiveDate, Decimal)> = inner
            .entries
            .iter()
            .filter(|e| {
                e.account_code == account_code
                    && (self.include_closed || !e.is_closed)
                    && from.is_none_or(|d| e.voucher_date >= d)
                    && to.is_none_or(|d| e.voucher_date <= d)
            })
            .map(|e| {
                let change = match e.entry_type {
                    EntryType::Debit => kind.balance_change(e.amount, Decimal::ZERO),
                    EntryType::Credit => kind.balance_change(Decimal::ZERO, e.amount),
                };
                (e.voucher_date, change)
            })
            .collect();

        Ok(ReportService::monthly_history(changes))
    }
}

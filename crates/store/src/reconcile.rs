//! Reconciliation service: compares statement balances against the
//! ledger and drives the difference to zero via adjusting postings.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use mizan_core::ledger::{EntryType, LedgerError, PostingEvent, SourceType};
use mizan_core::reconciliation::{Reconciliation, ReconciliationError};
use mizan_shared::config::LedgerConfig;
use mizan_shared::types::{ReconciliationId, SourceDocumentId, UserId};

use crate::aggregator::BalanceAggregator;
use crate::books::Books;
use crate::clock::Clock;
use crate::engine::PostingEngine;

/// Errors from reconciliation operations.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// A reconciliation rule was violated.
    #[error(transparent)]
    Reconciliation(#[from] ReconciliationError),

    /// Posting the adjustment failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Statement-to-ledger reconciliation over the configured cash account.
#[derive(Clone)]
pub struct ReconciliationService {
    books: Books,
    engine: PostingEngine,
    aggregator: BalanceAggregator,
    cash_account: String,
    clock: Arc<dyn Clock>,
}

impl ReconciliationService {
    /// Creates a reconciliation service over the given books.
    #[must_use]
    pub fn new(
        books: &Books,
        config: &LedgerConfig,
        engine: &PostingEngine,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            books: books.clone(),
            engine: engine.clone(),
            aggregator: BalanceAggregator::new(books, config),
            cash_account: config.accounts.cash.clone(),
            clock,
        }
    }

    /// Creates a reconciliation snapshot for a statement.
    ///
    /// The ledger balance is aggregated as of the statement date; the
    /// difference is statement minus ledger.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` if the cash account is missing from the chart.
    pub fn create(
        &self,
        statement_balance: Decimal,
        date: NaiveDate,
        notes: Option<String>,
    ) -> Result<Reconciliation, ReconcileError> {
        let cash_account = self.cash_account.clone();
        self.create_for_account(&cash_account, statement_balance, date, notes)
    }

    /// Creates a reconciliation snapshot for a specific bank account.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` for an unknown account code.
    pub fn create_for_account(
        &self,
        account_code: &str,
        statement_balance: Decimal,
        date: NaiveDate,
        notes: Option<String>,
    ) -> Result<Reconciliation, ReconcileError> {
        let ledger_balance = self
            .aggregator
            .account_balance(account_code, None, Some(date))?;

        let reconciliation = Reconciliation::new(
            account_code,
            date,
            statement_balance,
            ledger_balance,
            notes,
            self.clock.now(),
        );

        tracing::info!(
            id = %reconciliation.id,
            %statement_balance,
            %ledger_balance,
            difference = %reconciliation.difference,
            "reconciliation created"
        );

        self.books
            .write()
            .reconciliations
            .insert(reconciliation.id, reconciliation.clone());
        Ok(reconciliation)
    }

    /// Fetches a reconciliation by id.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id.
    pub fn get(&self, id: ReconciliationId) -> Result<Reconciliation, ReconcileError> {
        self.books
            .read()
            .reconciliations
            .get(&id)
            .cloned()
            .ok_or_else(|| ReconciliationError::NotFound(id.to_string()).into())
    }

    /// Lists reconciliations, most recent statement first.
    #[must_use]
    pub fn list(&self) -> Vec<Reconciliation> {
        let mut all: Vec<Reconciliation> =
            self.books.read().reconciliations.values().cloned().collect();
        all.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        all
    }

    /// Posts an adjustment voucher and recomputes the reconciliation.
    ///
    /// The voucher is dated the statement date so the point-in-time
    /// recompute sees it. The new ledger balance and difference are
    /// re-aggregated from the entry store, never patched, and the
    /// status flips to `Matched` when the difference reaches zero.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown reconciliation, `InvalidAmount` for a
    /// non-positive amount, or any posting error.
    pub fn post_adjustment(
        &self,
        id: ReconciliationId,
        amount: Decimal,
        entry_type: EntryType,
        description: &str,
        posted_by: UserId,
    ) -> Result<Reconciliation, ReconcileError> {
        if amount <= Decimal::ZERO {
            return Err(ReconciliationError::InvalidAmount.into());
        }

        let reconciliation = self.get(id)?;

        let lines = self
            .engine
            .recipes()
            .reconciliation_adjustment(amount, entry_type, description);
        let event = PostingEvent::new(
            SourceType::Reconciliation,
            reconciliation.date,
            format!("Reconciliation adjustment - {description}"),
            lines,
            posted_by,
        )
        .with_source(SourceDocumentId::from_uuid(id.into_inner()));

        let voucher = self.engine.post(&event)?;

        let ledger_balance = self.aggregator.account_balance(
            &reconciliation.account_code,
            None,
            Some(reconciliation.date),
        )?;

        let mut inner = self.books.write();
        let stored = inner
            .reconciliations
            .get_mut(&id)
            .ok_or_else(|| ReconciliationError::NotFound(id.to_string()))?;
        stored.recompute(ledger_balance);
        stored.adjustment_vouchers.push(voucher.number.clone());

        tracing::info!(
            id = %id,
            voucher = %voucher.number,
            difference = %stored.difference,
            "reconciliation adjustment posted"
        );

        Ok(stored.clone())
    }
}

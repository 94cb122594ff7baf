//! The posting engine: single entry point for turning business events
//! into balanced vouchers.

use std::sync::Arc;

use chrono::Duration;

use mizan_core::ledger::{LedgerError, PostingEvent, PostingRecipes, SourceType, VoucherRef};
use mizan_shared::config::{EditWindows, LedgerConfig};
use mizan_shared::types::UserId;

use crate::books::Books;
use crate::clock::Clock;
use crate::store::LedgerStore;

/// The single entry point through which every subsystem posts to the
/// ledger.
///
/// Validation, voucher numbering and the entry insert are delegated to
/// the store's atomic append; the engine adds the retry-idempotency
/// contract and the per-document-type reversal windows.
#[derive(Clone)]
pub struct PostingEngine {
    store: LedgerStore,
    recipes: PostingRecipes,
    windows: EditWindows,
    clock: Arc<dyn Clock>,
}

impl PostingEngine {
    /// Creates an engine over the given books.
    #[must_use]
    pub fn new(books: &Books, config: &LedgerConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: LedgerStore::new(books),
            recipes: PostingRecipes::new(config.accounts.clone()),
            windows: config.edit_windows.clone(),
            clock,
        }
    }

    /// The line builders for the configured chart.
    #[must_use]
    pub fn recipes(&self) -> &PostingRecipes {
        &self.recipes
    }

    /// Posts a business event as a balanced voucher.
    ///
    /// If the event carries an idempotency key that matches an earlier
    /// posting, the existing voucher reference is returned and nothing
    /// is written - safe to call from retried requests.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`]; on failure nothing is persisted.
    pub fn post(&self, event: &PostingEvent) -> Result<VoucherRef, LedgerError> {
        let (voucher, created) = self.store.append_tracked(event, self.clock.now())?;

        if created {
            tracing::info!(
                voucher = %voucher.number,
                source = %event.source_type,
                date = %event.date,
                lines = event.lines.len(),
                "voucher posted"
            );
        } else {
            tracing::info!(
                voucher = %voucher.number,
                key = event.idempotency_key.as_deref().unwrap_or_default(),
                "idempotent replay, returning existing voucher"
            );
        }

        Ok(voucher)
    }

    /// Reverses a posted voucher within its document type's edit window.
    ///
    /// The mirroring voucher is dated today, so it lands in the current
    /// open period even when the original's period has since closed.
    /// Outside the window the reversal is rejected and the correction
    /// has to be a manual voucher.
    ///
    /// # Errors
    ///
    /// `VoucherNotFound`, `AlreadyReversed`, `EditWindowExpired`, or any
    /// posting error for the mirror.
    pub fn reverse(
        &self,
        voucher_number: &str,
        reversed_by: UserId,
    ) -> Result<VoucherRef, LedgerError> {
        let voucher = self
            .store
            .voucher(voucher_number)
            .ok_or_else(|| LedgerError::VoucherNotFound(voucher_number.to_string()))?;

        let now = self.clock.now();
        if let Some(window) = self.reversal_window(voucher.source_type) {
            if now - voucher.created_at > window {
                return Err(LedgerError::EditWindowExpired {
                    number: voucher.number,
                    source_type: voucher.source_type.to_string(),
                    limit_hours: window.num_hours(),
                });
            }
        }

        let reversal = self
            .store
            .reverse(voucher_number, self.clock.today(), now, reversed_by)?;

        tracing::info!(
            voucher = %voucher_number,
            reversal = %reversal.number,
            "voucher reversed"
        );

        Ok(reversal)
    }

    /// The reversal window for a document type, if any.
    fn reversal_window(&self, source: SourceType) -> Option<Duration> {
        match source {
            SourceType::Purchase | SourceType::PurchaseReturn => self.windows.purchase(),
            SourceType::Invoice => self.windows.invoice(),
            SourceType::Reconciliation => self.windows.ar_adjustment(),
            SourceType::Payroll
            | SourceType::Manual
            | SourceType::Revaluation
            | SourceType::Recurring
            | SourceType::PeriodClose => None,
        }
    }
}

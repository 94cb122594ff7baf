//! Reconciliation domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mizan_shared::types::ReconciliationId;

/// Reconciliation status.
///
/// A reconciliation is `Matched` exactly when the difference is zero.
/// There is no separate terminal state: recording a new cash transaction
/// dated on or before the reconciliation date reopens it on the next
/// recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconciliationStatus {
    /// The statement and ledger balances differ.
    Open,
    /// The statement and ledger balances agree.
    Matched,
}

impl ReconciliationStatus {
    /// Derives the status from a difference.
    #[must_use]
    pub fn for_difference(difference: Decimal) -> Self {
        if difference == Decimal::ZERO {
            Self::Matched
        } else {
            Self::Open
        }
    }
}

/// A snapshot comparison of an external statement against the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Unique identifier.
    pub id: ReconciliationId,
    /// The reconciled (cash/bank) account code.
    pub account_code: String,
    /// Statement date; the ledger balance is taken as of this date.
    pub date: NaiveDate,
    /// The externally reported balance.
    pub statement_balance: Decimal,
    /// The ledger-derived balance as of `date`.
    pub ledger_balance: Decimal,
    /// `statement_balance - ledger_balance`.
    pub difference: Decimal,
    /// Current status.
    pub status: ReconciliationStatus,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Voucher numbers of posted adjustments.
    pub adjustment_vouchers: Vec<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Reconciliation {
    /// Creates a reconciliation snapshot.
    #[must_use]
    pub fn new(
        account_code: impl Into<String>,
        date: NaiveDate,
        statement_balance: Decimal,
        ledger_balance: Decimal,
        notes: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let difference = statement_balance - ledger_balance;
        Self {
            id: ReconciliationId::new(),
            account_code: account_code.into(),
            date,
            statement_balance,
            ledger_balance,
            difference,
            status: ReconciliationStatus::for_difference(difference),
            notes,
            adjustment_vouchers: Vec::new(),
            created_at,
        }
    }

    /// Recomputes the difference from a freshly aggregated ledger balance.
    ///
    /// The difference is always rederived, never patched incrementally,
    /// so it cannot drift from the entry store.
    pub fn recompute(&mut self, ledger_balance: Decimal) {
        self.ledger_balance = ledger_balance;
        self.difference = self.statement_balance - ledger_balance;
        self.status = ReconciliationStatus::for_difference(self.difference);
    }
}

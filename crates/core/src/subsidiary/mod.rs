//! Subsidiary (AR/AP) counterparty ledgers.
//!
//! Customer and supplier balances are derived values: a full sum over the
//! counterparty's active transactions. They are recomputed after every
//! write, never incrementally patched, so the cached value can never
//! drift from the transaction set.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mizan_shared::types::{SourceDocumentId, UserId};

/// Which side of the business a subsidiary ledger tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterpartyKind {
    /// Accounts receivable (customers).
    Customer,
    /// Accounts payable (suppliers).
    Supplier,
}

/// Kind of a subsidiary transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubsidiaryTransactionKind {
    /// An invoice raises the counterparty balance.
    Invoice,
    /// Money received lowers a customer balance.
    Receipt,
    /// Money paid lowers a supplier balance.
    Payment,
    /// A return lowers the counterparty balance.
    Return,
}

impl SubsidiaryTransactionKind {
    /// Signed effect of this kind on the counterparty balance.
    #[must_use]
    pub fn signed_effect(self, amount: Decimal) -> Decimal {
        match self {
            Self::Invoice => amount,
            Self::Receipt | Self::Payment | Self::Return => -amount,
        }
    }
}

/// Lifecycle state of a subsidiary transaction.
///
/// Soft deletion is a tagged state so every consumer has to decide what
/// to do with deleted rows explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionState {
    /// The transaction counts toward the balance.
    Active,
    /// The transaction was soft-deleted (e.g. by a reversal).
    Deleted,
}

/// One transaction in a counterparty's subsidiary ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsidiaryTransaction {
    /// Unique identifier.
    pub id: SourceDocumentId,
    /// Transaction kind.
    pub kind: SubsidiaryTransactionKind,
    /// Positive amount.
    pub amount: Decimal,
    /// Description.
    pub description: String,
    /// The originating document, if any.
    pub reference: Option<SourceDocumentId>,
    /// Lifecycle state.
    pub state: TransactionState,
    /// The user who recorded the transaction.
    pub created_by: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl SubsidiaryTransaction {
    /// Creates a new active transaction.
    #[must_use]
    pub fn new(
        kind: SubsidiaryTransactionKind,
        amount: Decimal,
        description: impl Into<String>,
        created_by: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: SourceDocumentId::new(),
            kind,
            amount,
            description: description.into(),
            reference: None,
            state: TransactionState::Active,
            created_by,
            created_at,
        }
    }

    /// Attaches the originating document reference.
    #[must_use]
    pub fn with_reference(mut self, reference: SourceDocumentId) -> Self {
        self.reference = Some(reference);
        self
    }
}

/// Recomputes a counterparty balance from its full transaction set.
///
/// Invoices add; receipts, payments and returns subtract. Deleted
/// transactions are excluded unless explicitly requested.
#[must_use]
pub fn recompute_balance(
    transactions: &[SubsidiaryTransaction],
    include_deleted: bool,
) -> Decimal {
    transactions
        .iter()
        .filter(|txn| include_deleted || txn.state == TransactionState::Active)
        .map(|txn| txn.kind.signed_effect(txn.amount))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn txn(kind: SubsidiaryTransactionKind, amount: Decimal) -> SubsidiaryTransaction {
        SubsidiaryTransaction::new(kind, amount, "test", UserId::new(), Utc::now())
    }

    #[test]
    fn test_signed_effects() {
        use SubsidiaryTransactionKind::{Invoice, Payment, Receipt, Return};
        assert_eq!(Invoice.signed_effect(dec!(100)), dec!(100));
        assert_eq!(Receipt.signed_effect(dec!(100)), dec!(-100));
        assert_eq!(Payment.signed_effect(dec!(100)), dec!(-100));
        assert_eq!(Return.signed_effect(dec!(100)), dec!(-100));
    }

    #[test]
    fn test_recompute_invoice_minus_payment() {
        let txns = vec![
            txn(SubsidiaryTransactionKind::Invoice, dec!(100)),
            txn(SubsidiaryTransactionKind::Payment, dec!(40)),
        ];
        assert_eq!(recompute_balance(&txns, false), dec!(60));
    }

    #[test]
    fn test_recompute_excludes_deleted() {
        let mut deleted = txn(SubsidiaryTransactionKind::Invoice, dec!(500));
        deleted.state = TransactionState::Deleted;
        let txns = vec![txn(SubsidiaryTransactionKind::Invoice, dec!(100)), deleted];

        assert_eq!(recompute_balance(&txns, false), dec!(100));
        assert_eq!(recompute_balance(&txns, true), dec!(600));
    }

    #[test]
    fn test_recompute_empty_is_zero() {
        assert_eq!(recompute_balance(&[], false), Decimal::ZERO);
    }
}

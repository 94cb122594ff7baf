//! Ledger entry domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mizan_shared::types::{LedgerEntryId, UserId};

/// Type of ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Debit entry (increases assets/expenses, decreases liabilities/equity/revenue).
    Debit,
    /// Credit entry (decreases assets/expenses, increases liabilities/equity/revenue).
    Credit,
}

impl EntryType {
    /// Returns the opposite side, used when mirroring a voucher.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

/// Lifecycle state of a ledger entry.
///
/// Entries are never physically deleted; a reversal marks the original
/// entries `Reversed` and appends a mirrored voucher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryState {
    /// The entry counts toward balances.
    Active,
    /// The entry belongs to a reversed voucher.
    Reversed,
}

/// A single debit or credit line in the general ledger.
///
/// Entries belonging to one voucher must balance (debits = credits).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier for this entry.
    pub id: LedgerEntryId,
    /// The voucher this entry belongs to.
    pub voucher_number: String,
    /// The business date of the voucher.
    pub voucher_date: NaiveDate,
    /// Code of the account affected by this entry.
    pub account_code: String,
    /// Whether this is a debit or credit.
    pub entry_type: EntryType,
    /// Positive amount in the functional currency.
    pub amount: Decimal,
    /// Line description.
    pub description: String,
    /// The user who posted the voucher.
    pub created_by: UserId,
    /// Wall-clock timestamp of posting.
    pub created_at: DateTime<Utc>,
    /// Set when the covering fiscal period is locked.
    pub is_closed: bool,
    /// Lifecycle state.
    pub state: EntryState,
}

impl LedgerEntry {
    /// Returns the signed amount (positive for debit, negative for credit).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.entry_type {
            EntryType::Debit => self.amount,
            EntryType::Credit => -self.amount,
        }
    }

    /// Returns true if the entry still counts toward balances.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == EntryState::Active
    }
}

//! Voucher domain types for posting and validation.
//!
//! A voucher is a named, balanced group of ledger entries produced by one
//! business event. Every subsystem (sales, purchases, payroll, manual
//! journals, reconciliation, revaluation) reaches the ledger by building a
//! [`PostingEvent`] and handing it to the posting engine.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mizan_shared::types::{SourceDocumentId, UserId, VoucherId};

use super::entry::EntryType;

/// The business event a voucher originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Sales invoice.
    Invoice,
    /// Purchase voucher.
    Purchase,
    /// Purchase return to a supplier.
    PurchaseReturn,
    /// Payroll run.
    Payroll,
    /// Manual journal voucher.
    Manual,
    /// Bank reconciliation adjustment.
    Reconciliation,
    /// Currency revaluation.
    Revaluation,
    /// Generated from a recurring template.
    Recurring,
    /// Fiscal period closing entries.
    PeriodClose,
}

impl SourceType {
    /// Document-sequence prefix used in voucher numbers.
    #[must_use]
    pub fn voucher_prefix(self) -> &'static str {
        match self {
            Self::Invoice => "INV",
            Self::Purchase => "PUR",
            Self::PurchaseReturn => "PRT",
            Self::Payroll => "PAY",
            Self::Manual => "JV",
            Self::Reconciliation => "REC",
            Self::Revaluation => "REV",
            Self::Recurring => "RCR",
            Self::PeriodClose => "CLS",
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Invoice => "invoice",
            Self::Purchase => "purchase",
            Self::PurchaseReturn => "purchase_return",
            Self::Payroll => "payroll",
            Self::Manual => "manual",
            Self::Reconciliation => "reconciliation",
            Self::Revaluation => "revaluation",
            Self::Recurring => "recurring",
            Self::PeriodClose => "period_close",
        };
        write!(f, "{s}")
    }
}

/// Voucher lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoucherStatus {
    /// Posted to the ledger; entries are immutable.
    Posted,
    /// Offset by a mirroring reversal voucher.
    Reversed,
}

/// A voucher header: the logical grouping of a balanced entry set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Voucher {
    /// Unique identifier.
    pub id: VoucherId,
    /// Sequence-formatted voucher number (e.g. "JV-000001").
    pub number: String,
    /// Originating business event.
    pub source_type: SourceType,
    /// The originating domain document, if any.
    pub source_id: Option<SourceDocumentId>,
    /// Business date of the voucher.
    pub date: NaiveDate,
    /// Header description.
    pub description: String,
    /// Lifecycle status.
    pub status: VoucherStatus,
    /// The user who posted the voucher.
    pub created_by: UserId,
    /// Wall-clock timestamp of posting.
    pub created_at: DateTime<Utc>,
    /// Number of the voucher that reversed this one, if any.
    pub reversed_by: Option<String>,
    /// Number of the voucher this one reverses, if any.
    pub reversal_of: Option<String>,
}

/// Reference to a posted voucher, returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherRef {
    /// Unique identifier.
    pub id: VoucherId,
    /// Sequence-formatted voucher number.
    pub number: String,
}

/// One line of a posting event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineInput {
    /// Code of the account to post to.
    pub account_code: String,
    /// Whether this line debits or credits the account.
    pub entry_type: EntryType,
    /// Positive amount in the functional currency.
    pub amount: Decimal,
    /// Line description.
    pub description: String,
}

impl LineInput {
    /// Creates a debit line.
    #[must_use]
    pub fn debit(
        account_code: impl Into<String>,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            account_code: account_code.into(),
            entry_type: EntryType::Debit,
            amount,
            description: description.into(),
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(
        account_code: impl Into<String>,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            account_code: account_code.into(),
            entry_type: EntryType::Credit,
            amount,
            description: description.into(),
        }
    }

    /// Returns the mirrored line (debit/credit swapped).
    #[must_use]
    pub fn mirrored(&self, description: impl Into<String>) -> Self {
        Self {
            account_code: self.account_code.clone(),
            entry_type: self.entry_type.opposite(),
            amount: self.amount,
            description: description.into(),
        }
    }
}

/// A business event to be turned into a balanced voucher.
#[derive(Debug, Clone)]
pub struct PostingEvent {
    /// Originating business event.
    pub source_type: SourceType,
    /// The originating domain document, if any.
    pub source_id: Option<SourceDocumentId>,
    /// Business date of the voucher.
    pub date: NaiveDate,
    /// Header description.
    pub description: String,
    /// The lines (must have at least 2 and balance).
    pub lines: Vec<LineInput>,
    /// The user posting the event.
    pub created_by: UserId,
    /// Optional key for retry-safe posting.
    pub idempotency_key: Option<String>,
}

impl PostingEvent {
    /// Creates a posting event with no idempotency key.
    #[must_use]
    pub fn new(
        source_type: SourceType,
        date: NaiveDate,
        description: impl Into<String>,
        lines: Vec<LineInput>,
        created_by: UserId,
    ) -> Self {
        Self {
            source_type,
            source_id: None,
            date,
            description: description.into(),
            lines,
            created_by,
            idempotency_key: None,
        }
    }

    /// Attaches the originating document reference.
    #[must_use]
    pub fn with_source(mut self, source_id: SourceDocumentId) -> Self {
        self.source_id = Some(source_id);
        self
    }

    /// Attaches an idempotency key for retry-safe posting.
    #[must_use]
    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }
}

/// Voucher totals for validation and display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoucherTotals {
    /// Total debit amount.
    pub debits: Decimal,
    /// Total credit amount.
    pub credits: Decimal,
    /// Whether the voucher is balanced (debits == credits).
    pub is_balanced: bool,
}

impl VoucherTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub fn new(debits: Decimal, credits: Decimal) -> Self {
        Self {
            debits,
            credits,
            is_balanced: debits == credits,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debits - self.credits
    }
}

//! Chart of accounts types and balance rules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mizan_shared::types::AccountId;

/// Account classification in the chart of accounts.
///
/// The kind determines the account's normal side:
/// - Asset/Expense accounts carry debit balances
/// - Liability/Equity/Revenue accounts carry credit balances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// Resources owned (cash, receivables, inventory).
    Asset,
    /// Obligations owed (payables, VAT, accrued salaries).
    Liability,
    /// Owner claims (capital, retained earnings).
    Equity,
    /// Income earned.
    Revenue,
    /// Costs incurred.
    Expense,
}

impl AccountKind {
    /// Returns true for accounts whose balance grows with debits.
    #[must_use]
    pub fn is_debit_normal(self) -> bool {
        matches!(self, Self::Asset | Self::Expense)
    }

    /// Calculates the signed balance change an entry causes.
    ///
    /// Debit-normal: `debit - credit`; credit-normal: `credit - debit`.
    #[must_use]
    pub fn balance_change(self, debit: Decimal, credit: Decimal) -> Decimal {
        if self.is_debit_normal() {
            debit - credit
        } else {
            credit - debit
        }
    }
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        };
        write!(f, "{s}")
    }
}

/// A node in the chart of accounts.
///
/// The code is immutable once ledger entries exist against the account;
/// accounts with entries are deactivated, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Short numeric code, unique within the chart (e.g. "1110").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Account classification.
    pub kind: AccountKind,
    /// Whether the account accepts new postings.
    pub is_active: bool,
    /// Code of the parent (summary) account, if any.
    pub parent_code: Option<String>,
}

impl Account {
    /// Creates a new active account.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, kind: AccountKind) -> Self {
        Self {
            id: AccountId::new(),
            code: code.into(),
            name: name.into(),
            kind,
            is_active: true,
            parent_code: None,
        }
    }

    /// Sets the parent (summary) account code.
    #[must_use]
    pub fn with_parent(mut self, parent_code: impl Into<String>) -> Self {
        self.parent_code = Some(parent_code.into());
        self
    }
}

/// The slice of account state the posting validator needs.
///
/// Summary accounts (those with children) reject direct posting so that
/// their balances stay pure roll-ups.
#[derive(Debug, Clone)]
pub struct AccountSnapshot {
    /// The account ID.
    pub id: AccountId,
    /// The account code.
    pub code: String,
    /// The account classification.
    pub kind: AccountKind,
    /// Whether the account is active.
    pub is_active: bool,
    /// Whether the account has child accounts.
    pub is_summary: bool,
}

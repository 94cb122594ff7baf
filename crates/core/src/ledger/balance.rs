//! Per-account activity accumulation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::AccountKind;

use super::entry::EntryType;

/// Accumulated debit and credit totals for one account.
///
/// Balances are always derived from the entry set at read time; this
/// accumulator is the single place that folds entries into totals.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AccountActivity {
    /// Total debit amount.
    pub debit_total: Decimal,
    /// Total credit amount.
    pub credit_total: Decimal,
}

impl AccountActivity {
    /// Folds one entry into the totals.
    pub fn add(&mut self, entry_type: EntryType, amount: Decimal) {
        match entry_type {
            EntryType::Debit => self.debit_total += amount,
            EntryType::Credit => self.credit_total += amount,
        }
    }

    /// Returns true if any entry touched the account.
    #[must_use]
    pub fn has_activity(&self) -> bool {
        self.debit_total != Decimal::ZERO || self.credit_total != Decimal::ZERO
    }

    /// Signed net balance under the account's sign convention.
    ///
    /// Asset/Expense: debits minus credits; Liability/Equity/Revenue:
    /// credits minus debits.
    #[must_use]
    pub fn net(&self, kind: AccountKind) -> Decimal {
        kind.balance_change(self.debit_total, self.credit_total)
    }
}

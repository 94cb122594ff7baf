//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::AccountKind;

/// Aggregated activity for one account, the input to report generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountActivityRow {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account classification.
    pub kind: AccountKind,
    /// Total debit amount.
    pub debit_total: Decimal,
    /// Total credit amount.
    pub credit_total: Decimal,
}

/// One trial balance line.
///
/// The account's net balance lands in the debit or credit column
/// according to its sign under the account's normal side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Account classification.
    pub account_kind: AccountKind,
    /// Net balance when it falls on the debit side.
    pub debit_balance: Decimal,
    /// Net balance when it falls on the credit side.
    pub credit_balance: Decimal,
}

/// Trial balance totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    /// Sum of the debit column.
    pub total_debit: Decimal,
    /// Sum of the credit column.
    pub total_credit: Decimal,
    /// Whether the columns balance.
    pub is_balanced: bool,
}

/// Trial balance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// Balances include entries dated up to here (None = all time).
    pub as_of: Option<NaiveDate>,
    /// Functional currency code.
    pub currency: String,
    /// Rows, one per account with activity.
    pub rows: Vec<TrialBalanceRow>,
    /// Column totals.
    pub totals: TrialBalanceTotals,
}

/// One point of an account's balance history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancePoint {
    /// Calendar bucket label, `YYYY-MM`.
    pub period: String,
    /// Net signed movement within the bucket.
    pub balance: Decimal,
}

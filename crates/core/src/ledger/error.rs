//! Ledger error types for validation and state errors.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// A voucher must have at least 2 lines.
    #[error("Voucher must have at least 2 lines")]
    InsufficientLines,

    /// The lines do not balance (debits != credits).
    #[error("Voucher is not balanced. Debit: {debits}, Credit: {credits}")]
    Unbalanced {
        /// Total debit amount.
        debits: Decimal,
        /// Total credit amount.
        credits: Decimal,
    },

    /// Line amount cannot be zero.
    #[error("Line amount cannot be zero")]
    ZeroAmount,

    /// Line amount cannot be negative.
    #[error("Line amount cannot be negative")]
    NegativeAmount,

    /// A voucher needs both debit and credit lines.
    #[error("Voucher must have both debit and credit lines")]
    SingleSided,

    // ========== Account Errors ==========
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Account is inactive and cannot be posted to.
    #[error("Account {0} is inactive")]
    AccountInactive(String),

    /// Summary accounts (those with children) reject direct posting.
    #[error("Cannot post to summary account {0}")]
    SummaryAccount(String),

    // ========== Fiscal Period Errors ==========
    /// No fiscal period covers the voucher date.
    #[error("Voucher date {0} is outside any fiscal period")]
    NoFiscalPeriod(NaiveDate),

    /// The covering fiscal period is closed.
    #[error("Cannot post to a closed fiscal period")]
    PeriodClosed,

    /// The covering fiscal period is locked.
    #[error("Cannot post to a locked fiscal period")]
    PeriodLocked,

    // ========== Voucher State Errors ==========
    /// Voucher not found.
    #[error("Voucher not found: {0}")]
    VoucherNotFound(String),

    /// The voucher was already reversed.
    #[error("Voucher {0} is already reversed")]
    AlreadyReversed(String),

    /// The reversal window for this document type has passed.
    #[error("Reversal window of {limit_hours}h expired for {source_type} voucher {number}")]
    EditWindowExpired {
        /// The voucher number.
        number: String,
        /// The originating document type.
        source_type: String,
        /// The configured window in hours.
        limit_hours: i64,
    },

    // ========== Concurrency Errors ==========
    /// The fiscal period changed under an in-flight posting.
    #[error("Concurrent period change detected, please retry")]
    ConcurrencyConflict,
}

impl LedgerError {
    /// Returns the stable error code for API consumers.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientLines => "INSUFFICIENT_LINES",
            Self::Unbalanced { .. } => "UNBALANCED_VOUCHER",
            Self::ZeroAmount => "ZERO_AMOUNT",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::SingleSided => "SINGLE_SIDED",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
            Self::SummaryAccount(_) => "SUMMARY_ACCOUNT",
            Self::NoFiscalPeriod(_) => "NO_FISCAL_PERIOD",
            Self::PeriodClosed => "PERIOD_CLOSED",
            Self::PeriodLocked => "PERIOD_LOCKED",
            Self::VoucherNotFound(_) => "VOUCHER_NOT_FOUND",
            Self::AlreadyReversed(_) => "ALREADY_REVERSED",
            Self::EditWindowExpired { .. } => "EDIT_WINDOW_EXPIRED",
            Self::ConcurrencyConflict => "CONCURRENCY_CONFLICT",
        }
    }

    /// Returns true if retrying the operation may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            LedgerError::InsufficientLines.error_code(),
            "INSUFFICIENT_LINES"
        );
        assert_eq!(
            LedgerError::Unbalanced {
                debits: dec!(100),
                credits: dec!(50),
            }
            .error_code(),
            "UNBALANCED_VOUCHER"
        );
        assert_eq!(
            LedgerError::PeriodLocked.error_code(),
            "PERIOD_LOCKED"
        );
    }

    #[test]
    fn test_error_display() {
        let err = LedgerError::Unbalanced {
            debits: dec!(100.00),
            credits: dec!(50.00),
        };
        assert_eq!(
            err.to_string(),
            "Voucher is not balanced. Debit: 100.00, Credit: 50.00"
        );

        let err = LedgerError::NoFiscalPeriod(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
        assert_eq!(
            err.to_string(),
            "Voucher date 2026-01-15 is outside any fiscal period"
        );
    }

    #[test]
    fn test_retryable() {
        assert!(LedgerError::ConcurrencyConflict.is_retryable());
        assert!(!LedgerError::ZeroAmount.is_retryable());
    }
}

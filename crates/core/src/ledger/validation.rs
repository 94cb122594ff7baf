//! Business rule validation for posting events.

use rust_decimal::Decimal;

use super::entry::EntryType;
use super::error::LedgerError;
use super::types::{LineInput, VoucherTotals};

/// Validates that a set of lines forms a postable voucher.
///
/// Rules, checked in order per line and then across the batch:
/// - at least two lines
/// - every amount strictly positive
/// - both a debit and a credit side present
/// - total debits equal total credits
///
/// # Errors
///
/// Returns the first violated rule as a [`LedgerError`].
pub fn validate_lines(lines: &[LineInput]) -> Result<VoucherTotals, LedgerError> {
    if lines.len() < 2 {
        return Err(LedgerError::InsufficientLines);
    }

    let mut debits = Decimal::ZERO;
    let mut credits = Decimal::ZERO;
    let mut has_debit = false;
    let mut has_credit = false;

    for line in lines {
        if line.amount == Decimal::ZERO {
            return Err(LedgerError::ZeroAmount);
        }
        if line.amount < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount);
        }

        match line.entry_type {
            EntryType::Debit => {
                debits += line.amount;
                has_debit = true;
            }
            EntryType::Credit => {
                credits += line.amount;
                has_credit = true;
            }
        }
    }

    if !has_debit || !has_credit {
        return Err(LedgerError::SingleSided);
    }

    if debits != credits {
        return Err(LedgerError::Unbalanced { debits, credits });
    }

    Ok(VoucherTotals::new(debits, credits))
}

/// Calculates voucher totals without validating.
#[must_use]
pub fn totals(lines: &[LineInput]) -> VoucherTotals {
    let debits = lines
        .iter()
        .filter(|l| l.entry_type == EntryType::Debit)
        .map(|l| l.amount)
        .sum();
    let credits = lines
        .iter()
        .filter(|l| l.entry_type == EntryType::Credit)
        .map(|l| l.amount)
        .sum();
    VoucherTotals::new(debits, credits)
}

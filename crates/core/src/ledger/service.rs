//! Posting validation service.
//!
//! This service contains pure business logic with no storage dependencies.
//! The chart-of-accounts and fiscal-period state are injected as lookup
//! functions so the same rules run against any backing store.

use chrono::NaiveDate;

use crate::accounts::AccountSnapshot;
use crate::fiscal::PeriodStatus;

use super::error::LedgerError;
use super::types::{PostingEvent, VoucherTotals};
use super::validation::validate_lines;

/// Stateless validator for posting events.
pub struct LedgerService;

impl LedgerService {
    /// Validates a posting event against the ledger's business rules.
    ///
    /// Steps:
    /// 1. Line rules: at least 2 lines, positive amounts, both sides
    ///    present, debits equal credits.
    /// 2. The fiscal period covering the voucher date exists and is open.
    /// 3. Every account exists, is active, and is not a summary account.
    ///
    /// # Arguments
    ///
    /// * `event` - The posting event to validate
    /// * `account_lookup` - Resolves an account code to its snapshot
    /// * `period_lookup` - Resolves a date to the covering period status
    ///
    /// # Errors
    ///
    /// Returns the first violated rule as a [`LedgerError`]; nothing is
    /// persisted by this function, so a failure has no side effects.
    pub fn validate_event<A, P>(
        event: &PostingEvent,
        account_lookup: A,
        period_lookup: P,
    ) -> Result<VoucherTotals, LedgerError>
    where
        A: Fn(&str) -> Option<AccountSnapshot>,
        P: Fn(NaiveDate) -> Option<PeriodStatus>,
    {
        let totals = validate_lines(&event.lines)?;

        match period_lookup(event.date) {
            None => return Err(LedgerError::NoFiscalPeriod(event.date)),
            Some(PeriodStatus::Locked) => return Err(LedgerError::PeriodLocked),
            Some(PeriodStatus::Closed) => return Err(LedgerError::PeriodClosed),
            Some(PeriodStatus::Open) => {}
        }

        for line in &event.lines {
            let account = account_lookup(&line.account_code)
                .ok_or_else(|| LedgerError::AccountNotFound(line.account_code.clone()))?;
            if !account.is_active {
                return Err(LedgerError::AccountInactive(account.code));
            }
            if account.is_summary {
                return Err(LedgerError::SummaryAccount(account.code));
            }
        }

        Ok(totals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::AccountKind;
    use crate::ledger::types::{LineInput, SourceType};
    use mizan_shared::types::{AccountId, UserId};
    use rust_decimal_macros::dec;

    fn snapshot(code: &str) -> AccountSnapshot {
        AccountSnapshot {
            id: AccountId::new(),
            code: code.to_string(),
            kind: AccountKind::Asset,
            is_active: true,
            is_summary: false,
        }
    }

    fn event(lines: Vec<LineInput>) -> PostingEvent {
        PostingEvent::new(
            SourceType::Manual,
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            "Test voucher",
            lines,
            UserId::new(),
        )
    }

    fn balanced_lines() -> Vec<LineInput> {
        vec![
            LineInput::debit("1110", dec!(100.00), "Cash"),
            LineInput::credit("4101", dec!(100.00), "Revenue"),
        ]
    }

    #[test]
    fn test_valid_event() {
        let result = LedgerService::validate_event(
            &event(balanced_lines()),
            |code| Some(snapshot(code)),
            |_| Some(PeriodStatus::Open),
        );
        let totals = result.unwrap();
        assert!(totals.is_balanced);
        assert_eq!(totals.debits, dec!(100.00));
    }

    #[test]
    fn test_no_fiscal_period() {
        let result = LedgerService::validate_event(
            &event(balanced_lines()),
            |code| Some(snapshot(code)),
            |_| None,
        );
        assert!(matches!(result, Err(LedgerError::NoFiscalPeriod(_))));
    }

    #[test]
    fn test_closed_period() {
        let result = LedgerService::validate_event(
            &event(balanced_lines()),
            |code| Some(snapshot(code)),
            |_| Some(PeriodStatus::Closed),
        );
        assert!(matches!(result, Err(LedgerError::PeriodClosed)));
    }

    #[test]
    fn test_locked_period() {
        let result = LedgerService::validate_event(
            &event(balanced_lines()),
            |code| Some(snapshot(code)),
            |_| Some(PeriodStatus::Locked),
        );
        assert!(matches!(result, Err(LedgerError::PeriodLocked)));
    }

    #[test]
    fn test_unknown_account() {
        let result = LedgerService::validate_event(
            &event(balanced_lines()),
            |_| None,
            |_| Some(PeriodStatus::Open),
        );
        assert!(matches!(result, Err(LedgerError::AccountNotFound(_))));
    }

    #[test]
    fn test_inactive_account() {
        let result = LedgerService::validate_event(
            &event(balanced_lines()),
            |code| {
                let mut snap = snapshot(code);
                snap.is_active = false;
                Some(snap)
            },
            |_| Some(PeriodStatus::Open),
        );
        assert!(matches!(result, Err(LedgerError::AccountInactive(_))));
    }

    #[test]
    fn test_summary_account_rejected() {
        let result = LedgerService::validate_event(
            &event(balanced_lines()),
            |code| {
                let mut snap = snapshot(code);
                snap.is_summary = code == "1110";
                Some(snap)
            },
            |_| Some(PeriodStatus::Open),
        );
        assert!(matches!(result, Err(LedgerError::SummaryAccount(_))));
    }

    #[test]
    fn test_line_rules_checked_before_period() {
        // Unbalanced lines fail even when the period lookup would also fail.
        let lines = vec![
            LineInput::debit("1110", dec!(100.00), ""),
            LineInput::credit("4101", dec!(40.00), ""),
        ];
        let result =
            LedgerService::validate_event(&event(lines), |code| Some(snapshot(code)), |_| None);
        assert!(matches!(result, Err(LedgerError::Unbalanced { .. })));
    }
}

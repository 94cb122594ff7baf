//! Property-based tests for posting event validation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use mizan_shared::types::{AccountId, UserId};

use crate::accounts::{AccountKind, AccountSnapshot};
use crate::fiscal::PeriodStatus;

use super::error::LedgerError;
use super::service::LedgerService;
use super::types::{LineInput, PostingEvent, SourceType};
use super::validation::totals;

fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn amounts(max_len: usize) -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(positive_amount(), 1..=max_len)
}

fn period_status() -> impl Strategy<Value = PeriodStatus> {
    prop_oneof![
        Just(PeriodStatus::Open),
        Just(PeriodStatus::Closed),
        Just(PeriodStatus::Locked),
    ]
}

fn snapshot(code: &str) -> AccountSnapshot {
    AccountSnapshot {
        id: AccountId::new(),
        code: code.to_string(),
        kind: AccountKind::Asset,
        is_active: true,
        is_summary: false,
    }
}

fn balanced_event(amounts: &[Decimal]) -> PostingEvent {
    let mut lines = Vec::with_capacity(amounts.len() * 2);
    for &amount in amounts {
        lines.push(LineInput::debit("1110", amount, ""));
        lines.push(LineInput::credit("4101", amount, ""));
    }
    PostingEvent::new(
        SourceType::Manual,
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        "prop",
        lines,
        UserId::new(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Posting into a non-open period always fails with the matching
    /// period error, no matter how well-formed the lines are.
    #[test]
    fn prop_period_state_gates_posting(
        amounts in amounts(6),
        status in period_status(),
    ) {
        let event = balanced_event(&amounts);
        let result = LedgerService::validate_event(
            &event,
            |code| Some(snapshot(code)),
            |_| Some(status),
        );

        match status {
            PeriodStatus::Open => prop_assert!(result.is_ok()),
            PeriodStatus::Closed => {
                prop_assert!(matches!(result, Err(LedgerError::PeriodClosed)));
            }
            PeriodStatus::Locked => {
                prop_assert!(matches!(result, Err(LedgerError::PeriodLocked)));
            }
        }
    }

    /// An inactive account anywhere in the voucher rejects the whole
    /// event.
    #[test]
    fn prop_inactive_account_rejects(amounts in amounts(6)) {
        let event = balanced_event(&amounts);
        let result = LedgerService::validate_event(
            &event,
            |code| {
                let mut snap = snapshot(code);
                snap.is_active = code != "4101";
                Some(snap)
            },
            |_| Some(PeriodStatus::Open),
        );
        prop_assert!(matches!(result, Err(LedgerError::AccountInactive(_))));
    }

    /// The totals reported by a successful validation equal the raw sums
    /// over the lines.
    #[test]
    fn prop_totals_match_raw_sums(amounts in amounts(6)) {
        let event = balanced_event(&amounts);
        let validated = LedgerService::validate_event(
            &event,
            |code| Some(snapshot(code)),
            |_| Some(PeriodStatus::Open),
        )
        .unwrap();

        let raw = totals(&event.lines);
        prop_assert_eq!(validated.debits, raw.debits);
        prop_assert_eq!(validated.credits, raw.credits);
    }
}

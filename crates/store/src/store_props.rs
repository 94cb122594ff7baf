//! Property-based tests for the posting path: random balanced vouchers
//! always post, random unbalanced ones never leave a trace.

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use mizan_core::accounts::{Account, AccountKind};
use mizan_core::fiscal::FiscalPeriod;
use mizan_core::ledger::{EntryType, LedgerError, LineInput, PostingEvent, SourceType};
use mizan_shared::types::UserId;

use crate::books::Books;
use crate::store::{EntryFilter, LedgerStore};

fn setup() -> LedgerStore {
    let books = Books::new();
    {
        let mut inner = books.write();
        for (code, kind) in [
            ("1110", AccountKind::Asset),
            ("1120", AccountKind::Asset),
            ("2110", AccountKind::Liability),
            ("4101", AccountKind::Revenue),
            ("5210", AccountKind::Expense),
        ] {
            inner
                .accounts
                .insert(code.to_string(), Account::new(code, code, kind));
        }
        inner.periods.push(FiscalPeriod::new(
            "2026",
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        ));
    }
    LedgerStore::new(&books)
}

const CODES: [&str; 5] = ["1110", "1120", "2110", "4101", "5210"];

fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// A balanced voucher: every debit amount mirrored by a credit on a
/// (possibly different) account.
fn balanced_event() -> impl Strategy<Value = PostingEvent> {
    (
        prop::collection::vec((positive_amount(), 0usize..5, 0usize..5), 1..6),
        (1u32..=12, 1u32..=28),
    )
        .prop_map(|(pairs, (month, day))| {
            let mut lines = Vec::with_capacity(pairs.len() * 2);
            for (amount, debit_idx, credit_idx) in pairs {
                lines.push(LineInput::debit(CODES[debit_idx], amount, ""));
                lines.push(LineInput::credit(CODES[credit_idx], amount, ""));
            }
            PostingEvent::new(
                SourceType::Manual,
                NaiveDate::from_ymd_opt(2026, month, day).unwrap(),
                "prop voucher",
                lines,
                UserId::new(),
            )
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Every randomly generated balanced voucher posts, and the trial
    /// balance invariant survives the whole sequence.
    #[test]
    fn prop_balanced_vouchers_post(events in prop::collection::vec(balanced_event(), 1..8)) {
        let store = setup();
        for event in &events {
            store.append(event, Utc::now()).unwrap();
        }

        let entries = store.entries(&EntryFilter::default());
        let debits: Decimal = entries
            .iter()
            .filter(|e| e.entry_type == EntryType::Debit)
            .map(|e| e.amount)
            .sum();
        let credits: Decimal = entries
            .iter()
            .filter(|e| e.entry_type == EntryType::Credit)
            .map(|e| e.amount)
            .sum();
        prop_assert_eq!(debits, credits);
    }

    /// Perturbing any line of a balanced voucher makes the whole append
    /// fail, and nothing at all is persisted.
    #[test]
    fn prop_unbalanced_vouchers_leave_no_trace(
        event in balanced_event(),
        delta in positive_amount(),
        position in any::<prop::sample::Index>(),
    ) {
        let store = setup();
        let mut broken = event;
        let idx = position.index(broken.lines.len());
        broken.lines[idx].amount += delta;

        let result = store.append(&broken, Utc::now());
        let is_unbalanced = matches!(result, Err(LedgerError::Unbalanced { .. }));
        prop_assert!(is_unbalanced);
        prop_assert!(store.entries(&EntryFilter::default()).is_empty());
    }
}

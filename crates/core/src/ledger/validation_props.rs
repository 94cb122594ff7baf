//! Property-based tests for posting line validation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::entry::EntryType;
use super::error::LedgerError;
use super::types::LineInput;
use super::validation::validate_lines;

/// Strategy for a positive amount between 0.01 and 1,000,000.00.
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for a set of 1..8 positive amounts.
fn amounts(max_len: usize) -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(positive_amount(), 1..=max_len)
}

fn line(entry_type: EntryType, amount: Decimal) -> LineInput {
    LineInput {
        account_code: "1110".to_string(),
        entry_type,
        amount,
        description: String::new(),
    }
}

/// Builds a balanced voucher: each debit amount mirrored by one credit.
fn balanced_lines(amounts: &[Decimal]) -> Vec<LineInput> {
    let mut lines = Vec::with_capacity(amounts.len() * 2);
    for &amount in amounts {
        lines.push(line(EntryType::Debit, amount));
        lines.push(line(EntryType::Credit, amount));
    }
    lines
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Any mirrored set of positive amounts validates and reports
    /// matching totals.
    #[test]
    fn prop_balanced_sets_validate(amounts in amounts(8)) {
        let lines = balanced_lines(&amounts);
        let totals = validate_lines(&lines).unwrap();
        let expected: Decimal = amounts.iter().copied().sum();
        prop_assert!(totals.is_balanced);
        prop_assert_eq!(totals.debits, expected);
        prop_assert_eq!(totals.credits, expected);
    }

    /// Perturbing one side of a balanced voucher always fails with
    /// `Unbalanced`, and the reported totals reflect the perturbation.
    #[test]
    fn prop_perturbed_sets_fail(amounts in amounts(8), delta in positive_amount()) {
        let mut lines = balanced_lines(&amounts);
        let last = lines.last_mut().unwrap();
        last.amount += delta;

        match validate_lines(&lines) {
            Err(LedgerError::Unbalanced { debits, credits }) => {
                prop_assert_eq!(credits - debits, delta);
            }
            other => prop_assert!(false, "expected Unbalanced, got {:?}", other.err()),
        }
    }

    /// A voucher where every line sits on one side is rejected before
    /// the balance check can pass vacuously.
    #[test]
    fn prop_single_sided_rejected(
        amounts in amounts(8),
        debit_side in any::<bool>(),
    ) {
        prop_assume!(amounts.len() >= 2);
        let entry_type = if debit_side { EntryType::Debit } else { EntryType::Credit };
        let lines: Vec<LineInput> = amounts.iter().map(|&a| line(entry_type, a)).collect();

        prop_assert!(matches!(
            validate_lines(&lines),
            Err(LedgerError::SingleSided)
        ));
    }

    /// A zero or negative amount anywhere fails validation regardless of
    /// the rest of the voucher.
    #[test]
    fn prop_nonpositive_amount_rejected(
        amounts in amounts(4),
        position in any::<prop::sample::Index>(),
        negative in any::<bool>(),
    ) {
        let mut lines = balanced_lines(&amounts);
        let idx = position.index(lines.len());
        lines[idx].amount = if negative { Decimal::new(-1, 2) } else { Decimal::ZERO };

        let result = validate_lines(&lines);
        prop_assert!(matches!(
            result,
            Err(LedgerError::ZeroAmount | LedgerError::NegativeAmount)
        ));
    }

    /// Validation is a pure function: the same input always produces the
    /// same outcome.
    #[test]
    fn prop_validation_deterministic(amounts in amounts(6)) {
        let lines = balanced_lines(&amounts);
        let first = validate_lines(&lines).unwrap();
        let second = validate_lines(&lines).unwrap();
        prop_assert_eq!(first.debits, second.debits);
        prop_assert_eq!(first.credits, second.credits);
    }
}

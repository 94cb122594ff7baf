//! Currency revaluation of open foreign-currency balances.
//!
//! Revaluation compares a foreign balance at its booked rate against the
//! current rate and produces the unrealized gain or loss to post.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::conversion::convert_amount;

/// Whether a revaluation produced a gain or a loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RevaluationDirection {
    /// The functional value of the balance increased.
    Gain,
    /// The functional value of the balance decreased.
    Loss,
}

/// Result of revaluing one foreign-currency balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevaluationOutcome {
    /// The balance in the foreign currency.
    pub foreign_balance: Decimal,
    /// The rate the balance was booked at.
    pub previous_rate: Decimal,
    /// The current rate.
    pub new_rate: Decimal,
    /// Functional value at the booked rate.
    pub previous_reference_balance: Decimal,
    /// Functional value at the current rate.
    pub new_reference_balance: Decimal,
    /// Absolute unrealized gain/loss amount.
    pub amount: Decimal,
    /// Gain or loss.
    pub direction: RevaluationDirection,
}

/// Revalues a foreign balance from its booked rate to the current rate.
///
/// An unchanged functional value yields a `Gain` of zero, which callers
/// treat as "nothing to post".
#[must_use]
pub fn revalue(
    foreign_balance: Decimal,
    previous_rate: Decimal,
    new_rate: Decimal,
    decimal_places: u32,
) -> RevaluationOutcome {
    let previous_reference_balance = convert_amount(foreign_balance, previous_rate, decimal_places);
    let new_reference_balance = convert_amount(foreign_balance, new_rate, decimal_places);
    let delta = new_reference_balance - previous_reference_balance;

    let direction = if delta >= Decimal::ZERO {
        RevaluationDirection::Gain
    } else {
        RevaluationDirection::Loss
    };

    RevaluationOutcome {
        foreign_balance,
        previous_rate,
        new_rate,
        previous_reference_balance,
        new_reference_balance,
        amount: delta.abs(),
        direction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rate_increase_is_gain() {
        let outcome = revalue(dec!(1000), dec!(3.70), dec!(3.80), 2);
        assert_eq!(outcome.previous_reference_balance, dec!(3700.00));
        assert_eq!(outcome.new_reference_balance, dec!(3800.00));
        assert_eq!(outcome.amount, dec!(100.00));
        assert_eq!(outcome.direction, RevaluationDirection::Gain);
    }

    #[test]
    fn test_rate_decrease_is_loss() {
        let outcome = revalue(dec!(1000), dec!(3.80), dec!(3.70), 2);
        assert_eq!(outcome.amount, dec!(100.00));
        assert_eq!(outcome.direction, RevaluationDirection::Loss);
    }

    #[test]
    fn test_unchanged_rate_is_zero_gain() {
        let outcome = revalue(dec!(1000), dec!(3.75), dec!(3.75), 2);
        assert_eq!(outcome.amount, Decimal::ZERO);
        assert_eq!(outcome.direction, RevaluationDirection::Gain);
    }

    #[test]
    fn test_reference_balances_rounded() {
        let outcome = revalue(dec!(333.33), dec!(3.755), dec!(3.765), 2);
        // 333.33 * 3.755 = 1251.654... -> 1251.65 (banker's)
        assert_eq!(outcome.previous_reference_balance, dec!(1251.65));
        assert_eq!(outcome.new_reference_balance, dec!(1254.99));
        assert_eq!(outcome.amount, dec!(3.34));
    }
}

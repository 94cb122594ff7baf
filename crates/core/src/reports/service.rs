//! Report generation service.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use super::types::{
    AccountActivityRow, BalancePoint, TrialBalanceReport, TrialBalanceRow, TrialBalanceTotals,
};

/// Service for generating financial reports.
pub struct ReportService;

impl ReportService {
    /// Generates a trial balance from per-account activity.
    ///
    /// Only accounts with activity appear. Each account's net balance is
    /// placed in the debit or credit column by its sign under the
    /// account's normal side; the column totals must balance after any
    /// sequence of balanced postings.
    #[must_use]
    pub fn trial_balance(
        activity: Vec<AccountActivityRow>,
        as_of: Option<NaiveDate>,
        currency: &str,
    ) -> TrialBalanceReport {
        let mut rows = Vec::with_capacity(activity.len());
        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;

        for account in activity {
            if account.debit_total == Decimal::ZERO && account.credit_total == Decimal::ZERO {
                continue;
            }

            let net = account
                .kind
                .balance_change(account.debit_total, account.credit_total);

            let (debit_balance, credit_balance) = if account.kind.is_debit_normal() {
                if net >= Decimal::ZERO {
                    (net, Decimal::ZERO)
                } else {
                    (Decimal::ZERO, net.abs())
                }
            } else if net >= Decimal::ZERO {
                (Decimal::ZERO, net)
            } else {
                (net.abs(), Decimal::ZERO)
            };

            total_debit += debit_balance;
            total_credit += credit_balance;

            rows.push(TrialBalanceRow {
                account_code: account.code,
                account_name: account.name,
                account_kind: account.kind,
                debit_balance,
                credit_balance,
            });
        }

        rows.sort_by(|a, b| a.account_code.cmp(&b.account_code));

        TrialBalanceReport {
            as_of,
            currency: currency.to_string(),
            rows,
            totals: TrialBalanceTotals {
                total_debit,
                total_credit,
                is_balanced: total_debit == total_credit,
            },
        }
    }

    /// Buckets signed balance changes into calendar months.
    ///
    /// Only months containing at least one entry are emitted; there is no
    /// gap filling between them. Callers that want contiguous series
    /// interpolate on top of this.
    #[must_use]
    pub fn monthly_history(changes: impl IntoIterator<Item = (NaiveDate, Decimal)>) -> Vec<BalancePoint> {
        let mut buckets: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();

        for (date, change) in changes {
            *buckets.entry((date.year(), date.month())).or_default() += change;
        }

        buckets
            .into_iter()
            .map(|((year, month), balance)| BalancePoint {
                period: format!("{year:04}-{month:02}"),
                balance,
            })
            .collect()
    }
}

//! Posting recipes: which accounts each business event debits and credits.
//!
//! Every domain module (sales, purchases, payroll, reconciliation,
//! revaluation, recurring templates) builds its lines through these
//! recipes, so the "what debits what" rules live in exactly one place.

use rust_decimal::Decimal;

use mizan_shared::config::StandardAccounts;

use super::entry::EntryType;
use super::types::LineInput;
use crate::currency::{RevaluationDirection, RevaluationOutcome};

/// Line builders over the configured standard account codes.
#[derive(Debug, Clone)]
pub struct PostingRecipes {
    accounts: StandardAccounts,
}

impl PostingRecipes {
    /// Creates recipes over the given account mapping.
    #[must_use]
    pub fn new(accounts: StandardAccounts) -> Self {
        Self { accounts }
    }

    /// Returns the configured account mapping.
    #[must_use]
    pub fn accounts(&self) -> &StandardAccounts {
        &self.accounts
    }

    /// Sales invoice.
    ///
    /// Debits receivables (or cash for a cash sale) for the total,
    /// credits revenue for the subtotal and VAT output for the tax.
    #[must_use]
    pub fn invoice(
        &self,
        subtotal: Decimal,
        tax: Decimal,
        cash_sale: bool,
        reference: &str,
    ) -> Vec<LineInput> {
        let receivable = if cash_sale {
            &self.accounts.cash
        } else {
            &self.accounts.accounts_receivable
        };

        let mut lines = vec![LineInput::debit(
            receivable,
            subtotal + tax,
            format!("Invoice {reference}"),
        )];
        lines.push(LineInput::credit(
            &self.accounts.sales_revenue,
            subtotal,
            format!("Sales - Invoice {reference}"),
        ));
        if tax > Decimal::ZERO {
            lines.push(LineInput::credit(
                &self.accounts.output_vat,
                tax,
                format!("VAT Output - Invoice {reference}"),
            ));
        }
        lines
    }

    /// Payment received against an invoice.
    #[must_use]
    pub fn invoice_payment(&self, amount: Decimal, reference: &str) -> Vec<LineInput> {
        vec![
            LineInput::debit(
                &self.accounts.cash,
                amount,
                format!("Payment - Invoice {reference}"),
            ),
            LineInput::credit(
                &self.accounts.accounts_receivable,
                amount,
                format!("Payment - Invoice {reference}"),
            ),
        ]
    }

    /// Purchase of inventory.
    ///
    /// Debits inventory for the subtotal and VAT input for the tax,
    /// credits payables (credit purchase) or cash for the total.
    #[must_use]
    pub fn purchase(
        &self,
        subtotal: Decimal,
        tax: Decimal,
        on_credit: bool,
        reference: &str,
    ) -> Vec<LineInput> {
        let mut lines = vec![LineInput::debit(
            &self.accounts.inventory,
            subtotal,
            format!("Purchase - Voucher {reference}"),
        )];
        if tax > Decimal::ZERO {
            lines.push(LineInput::debit(
                &self.accounts.input_vat,
                tax,
                format!("VAT Input - Voucher {reference}"),
            ));
        }
        let payment_account = if on_credit {
            &self.accounts.accounts_payable
        } else {
            &self.accounts.cash
        };
        lines.push(LineInput::credit(
            payment_account,
            subtotal + tax,
            format!("Purchase Payment - Voucher {reference}"),
        ));
        lines
    }

    /// Purchase return: the mirror of [`Self::purchase`].
    #[must_use]
    pub fn purchase_return(
        &self,
        subtotal: Decimal,
        tax: Decimal,
        on_credit: bool,
        reference: &str,
    ) -> Vec<LineInput> {
        self.purchase(subtotal, tax, on_credit, reference)
            .iter()
            .map(|line| line.mirrored(format!("Return - {}", line.description)))
            .collect()
    }

    /// Payroll run accrual.
    ///
    /// Debits gross salary expense; credits withheld deductions and the
    /// net salaries payable.
    #[must_use]
    pub fn payroll_accrual(
        &self,
        gross: Decimal,
        deductions: Decimal,
        reference: &str,
    ) -> Vec<LineInput> {
        let mut lines = vec![LineInput::debit(
            &self.accounts.salaries_expense,
            gross,
            format!("Payroll {reference}"),
        )];
        if deductions > Decimal::ZERO {
            lines.push(LineInput::credit(
                &self.accounts.payroll_deductions,
                deductions,
                format!("Deductions - Payroll {reference}"),
            ));
        }
        lines.push(LineInput::credit(
            &self.accounts.salaries_payable,
            gross - deductions,
            format!("Net Salaries - Payroll {reference}"),
        ));
        lines
    }

    /// Payroll payment: settles accrued salaries with cash.
    #[must_use]
    pub fn payroll_payment(&self, net: Decimal, reference: &str) -> Vec<LineInput> {
        vec![
            LineInput::debit(
                &self.accounts.salaries_payable,
                net,
                format!("Salary Payment - Payroll {reference}"),
            ),
            LineInput::credit(
                &self.accounts.cash,
                net,
                format!("Salary Payment - Payroll {reference}"),
            ),
        ]
    }

    /// Bank reconciliation adjustment.
    ///
    /// A `Debit` adjustment increases the cash account with the suspense
    /// account as offset; a `Credit` adjustment is the reverse.
    #[must_use]
    pub fn reconciliation_adjustment(
        &self,
        amount: Decimal,
        entry_type: EntryType,
        description: &str,
    ) -> Vec<LineInput> {
        let cash = LineInput {
            account_code: self.accounts.cash.clone(),
            entry_type,
            amount,
            description: description.to_string(),
        };
        let offset = LineInput {
            account_code: self.accounts.reconciliation_suspense.clone(),
            entry_type: entry_type.opposite(),
            amount,
            description: description.to_string(),
        };
        vec![cash, offset]
    }

    /// Currency revaluation of a foreign-currency monetary account.
    ///
    /// A gain debits the revalued account and credits exchange gains; a
    /// loss is mirrored.
    #[must_use]
    pub fn revaluation(&self, account_code: &str, outcome: &RevaluationOutcome) -> Vec<LineInput> {
        let description = format!(
            "Revaluation {} -> {}",
            outcome.previous_rate, outcome.new_rate
        );
        match outcome.direction {
            RevaluationDirection::Gain => vec![
                LineInput::debit(account_code, outcome.amount, description.clone()),
                LineInput::credit(&self.accounts.exchange_gain, outcome.amount, description),
            ],
            RevaluationDirection::Loss => vec![
                LineInput::credit(account_code, outcome.amount, description.clone()),
                LineInput::debit(&self.accounts.exchange_loss, outcome.amount, description),
            ],
        }
    }

    /// Recurring expense template generation.
    #[must_use]
    pub fn recurring_expense(
        &self,
        expense_account: &str,
        amount: Decimal,
        description: &str,
    ) -> Vec<LineInput> {
        vec![
            LineInput::debit(expense_account, amount, description),
            LineInput::credit(&self.accounts.cash, amount, description),
        ]
    }

    /// Recurring revenue template generation.
    #[must_use]
    pub fn recurring_revenue(
        &self,
        revenue_account: &str,
        amount: Decimal,
        description: &str,
    ) -> Vec<LineInput> {
        vec![
            LineInput::debit(&self.accounts.cash, amount, description),
            LineInput::credit(revenue_account, amount, description),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::revalue;
    use crate::ledger::validation::validate_lines;
    use rust_decimal_macros::dec;

    fn recipes() -> PostingRecipes {
        PostingRecipes::new(StandardAccounts::default())
    }

    #[test]
    fn test_credit_invoice_recipe() {
        let lines = recipes().invoice(dec!(100.00), dec!(15.00), false, "INV-000001");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].account_code, "1120"); // receivables
        assert_eq!(lines[0].amount, dec!(115.00));
        assert_eq!(lines[1].account_code, "4101"); // revenue
        assert_eq!(lines[2].account_code, "2210"); // output VAT
        assert!(validate_lines(&lines).unwrap().is_balanced);
    }

    #[test]
    fn test_cash_invoice_targets_cash() {
        let lines = recipes().invoice(dec!(100.00), dec!(0), true, "INV-000002");
        assert_eq!(lines.len(), 2); // no VAT line
        assert_eq!(lines[0].account_code, "1110");
    }

    #[test]
    fn test_invoice_payment_settles_receivable() {
        let lines = recipes().invoice_payment(dec!(115.00), "INV-000001");
        assert_eq!(lines[0].account_code, "1110");
        assert_eq!(lines[0].entry_type, EntryType::Debit);
        assert_eq!(lines[1].account_code, "1120");
        assert_eq!(lines[1].entry_type, EntryType::Credit);
        assert!(validate_lines(&lines).unwrap().is_balanced);
    }

    #[test]
    fn test_purchase_recipe() {
        let lines = recipes().purchase(dec!(200.00), dec!(30.00), true, "PUR-000001");
        assert_eq!(lines[0].account_code, "1130"); // inventory
        assert_eq!(lines[1].account_code, "2220"); // input VAT
        assert_eq!(lines[2].account_code, "2110"); // payables
        assert_eq!(lines[2].amount, dec!(230.00));
        assert!(validate_lines(&lines).unwrap().is_balanced);
    }

    #[test]
    fn test_purchase_return_mirrors_purchase() {
        let r = recipes();
        let purchase = r.purchase(dec!(200.00), dec!(30.00), true, "PUR-000001");
        let ret = r.purchase_return(dec!(200.00), dec!(30.00), true, "PUR-000001");
        assert_eq!(purchase.len(), ret.len());
        for (p, r) in purchase.iter().zip(&ret) {
            assert_eq!(p.account_code, r.account_code);
            assert_eq!(p.amount, r.amount);
            assert_eq!(p.entry_type.opposite(), r.entry_type);
        }
    }

    #[test]
    fn test_payroll_accrual_balances() {
        let lines = recipes().payroll_accrual(dec!(10000.00), dec!(1500.00), "2026-03");
        assert_eq!(lines[0].account_code, "5220");
        assert_eq!(lines[0].amount, dec!(10000.00));
        assert_eq!(lines[1].account_code, "2130");
        assert_eq!(lines[2].account_code, "2120");
        assert_eq!(lines[2].amount, dec!(8500.00));
        assert!(validate_lines(&lines).unwrap().is_balanced);
    }

    #[test]
    fn test_payroll_payment() {
        let lines = recipes().payroll_payment(dec!(8500.00), "2026-03");
        assert_eq!(lines[0].account_code, "2120");
        assert_eq!(lines[1].account_code, "1110");
        assert!(validate_lines(&lines).unwrap().is_balanced);
    }

    #[test]
    fn test_reconciliation_debit_adjustment() {
        let lines = recipes().reconciliation_adjustment(dec!(100.00), EntryType::Debit, "Deposit");
        assert_eq!(lines[0].account_code, "1110");
        assert_eq!(lines[0].entry_type, EntryType::Debit);
        assert_eq!(lines[1].account_code, "5290");
        assert_eq!(lines[1].entry_type, EntryType::Credit);
    }

    #[test]
    fn test_reconciliation_credit_adjustment() {
        let lines = recipes().reconciliation_adjustment(dec!(100.00), EntryType::Credit, "Bank Fee");
        assert_eq!(lines[0].entry_type, EntryType::Credit);
        assert_eq!(lines[1].entry_type, EntryType::Debit);
        assert!(validate_lines(&lines).unwrap().is_balanced);
    }

    #[test]
    fn test_revaluation_gain_recipe() {
        let outcome = revalue(dec!(1000), dec!(3.70), dec!(3.80), 2);
        let lines = recipes().revaluation("1115", &outcome);
        assert_eq!(lines[0].account_code, "1115");
        assert_eq!(lines[0].entry_type, EntryType::Debit);
        assert_eq!(lines[0].amount, dec!(100.00));
        assert_eq!(lines[1].account_code, "4210");
    }

    #[test]
    fn test_revaluation_loss_recipe() {
        let outcome = revalue(dec!(1000), dec!(3.80), dec!(3.70), 2);
        let lines = recipes().revaluation("1115", &outcome);
        assert_eq!(lines[0].entry_type, EntryType::Credit);
        assert_eq!(lines[1].account_code, "5230");
        assert!(validate_lines(&lines).unwrap().is_balanced);
    }

    #[test]
    fn test_recurring_templates() {
        let r = recipes();
        let expense = r.recurring_expense("5210", dec!(500.00), "Office rent");
        assert_eq!(expense[0].account_code, "5210");
        assert_eq!(expense[1].account_code, "1110");

        let revenue = r.recurring_revenue("4210", dec!(250.00), "Interest");
        assert_eq!(revenue[0].account_code, "1110");
        assert_eq!(revenue[1].account_code, "4210");
    }
}

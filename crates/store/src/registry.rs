//! Chart of accounts registry.

use thiserror::Error;

use mizan_core::accounts::{Account, AccountKind, AccountSnapshot};
use mizan_shared::types::AccountId;

use crate::books::Books;

/// Errors that can occur managing the chart of accounts.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The account code is already taken.
    #[error("Account code already exists: {0}")]
    DuplicateCode(String),

    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(String),

    /// Accounts with ledger entries are deactivated, never deleted.
    #[error("Account {0} has ledger entries and cannot be deleted")]
    HasEntries(String),
}

/// Repository for chart-of-accounts operations.
///
/// Account codes have no rename operation: a code is fixed at creation,
/// which is what makes it safe as the entry-store key.
#[derive(Debug, Clone)]
pub struct AccountRegistry {
    books: Books,
}

impl AccountRegistry {
    /// Creates a registry over the given books.
    #[must_use]
    pub fn new(books: &Books) -> Self {
        Self {
            books: books.clone(),
        }
    }

    /// Adds an account to the chart.
    ///
    /// # Errors
    ///
    /// `DuplicateCode` if the code is taken.
    pub fn create(&self, account: Account) -> Result<AccountId, RegistryError> {
        let mut inner = self.books.write();
        if inner.accounts.contains_key(&account.code) {
            return Err(RegistryError::DuplicateCode(account.code));
        }
        let id = account.id;
        inner.accounts.insert(account.code.clone(), account);
        Ok(id)
    }

    /// Fetches an account by code.
    ///
    /// # Errors
    ///
    /// `NotFound` if no account carries the code.
    pub fn get(&self, code: &str) -> Result<Account, RegistryError> {
        self.books
            .read()
            .accounts
            .get(code)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(code.to_string()))
    }

    /// Lists the chart ordered by code.
    #[must_use]
    pub fn list(&self) -> Vec<Account> {
        self.books.read().accounts.values().cloned().collect()
    }

    /// Resolves the validation snapshot for an account code.
    #[must_use]
    pub fn snapshot(&self, code: &str) -> Option<AccountSnapshot> {
        self.books.read().account_snapshot(code)
    }

    /// Activates or deactivates an account.
    ///
    /// # Errors
    ///
    /// `NotFound` if no account carries the code.
    pub fn set_active(&self, code: &str, active: bool) -> Result<(), RegistryError> {
        let mut inner = self.books.write();
        let account = inner
            .accounts
            .get_mut(code)
            .ok_or_else(|| RegistryError::NotFound(code.to_string()))?;
        account.is_active = active;
        Ok(())
    }

    /// Removes an account that has never been posted to.
    ///
    /// # Errors
    ///
    /// `HasEntries` if ledger entries reference the account,
    /// `NotFound` if no account carries the code.
    pub fn delete(&self, code: &str) -> Result<(), RegistryError> {
        let mut inner = self.books.write();
        if !inner.accounts.contains_key(code) {
            return Err(RegistryError::NotFound(code.to_string()));
        }
        if inner.entries.iter().any(|e| e.account_code == code) {
            return Err(RegistryError::HasEntries(code.to_string()));
        }
        inner.accounts.remove(code);
        Ok(())
    }

    /// Seeds the standard chart of accounts.
    ///
    /// Group accounts (1000, 1100, ...) exist purely as roll-up parents;
    /// direct posting targets the leaf accounts.
    ///
    /// # Errors
    ///
    /// `DuplicateCode` if any of the standard codes is taken.
    pub fn seed_standard_chart(&self) -> Result<(), RegistryError> {
        use AccountKind::{Asset, Equity, Expense, Liability, Revenue};

        let chart: [(&str, &str, AccountKind, Option<&str>); 29] = [
            ("1000", "Assets", Asset, None),
            ("1100", "Current Assets", Asset, Some("1000")),
            ("1110", "Cash", Asset, Some("1100")),
            ("1120", "Accounts Receivable", Asset, Some("1100")),
            ("1130", "Inventory", Asset, Some("1100")),
            ("1200", "Fixed Assets", Asset, Some("1000")),
            ("1210", "Equipment", Asset, Some("1200")),
            ("1220", "Accumulated Depreciation", Asset, Some("1200")),
            ("2000", "Liabilities", Liability, None),
            ("2100", "Current Liabilities", Liability, Some("2000")),
            ("2110", "Accounts Payable", Liability, Some("2100")),
            ("2120", "Salaries Payable", Liability, Some("2100")),
            ("2130", "Payroll Deductions Payable", Liability, Some("2100")),
            ("2200", "VAT", Liability, Some("2000")),
            ("2210", "VAT Output", Liability, Some("2200")),
            ("2220", "VAT Input", Liability, Some("2200")),
            ("3000", "Equity", Equity, None),
            ("3100", "Capital", Equity, Some("3000")),
            ("3200", "Retained Earnings", Equity, Some("3000")),
            ("4000", "Revenue", Revenue, None),
            ("4101", "Sales", Revenue, Some("4000")),
            ("4110", "Sales Discounts", Revenue, Some("4000")),
            ("4210", "Other Revenue", Revenue, Some("4000")),
            ("5100", "Cost of Goods Sold", Expense, None),
            ("5101", "Bank Charges", Expense, None),
            ("5210", "Operating Expenses", Expense, None),
            ("5220", "Salaries Expense", Expense, None),
            ("5230", "Exchange Losses", Expense, None),
            ("5290", "Reconciliation Differences", Expense, None),
        ];

        for (code, name, kind, parent) in chart {
            let mut account = Account::new(code, name, kind);
            if let Some(parent) = parent {
                account = account.with_parent(parent);
            }
            self.create(account)?;
        }

        Ok(())
    }
}

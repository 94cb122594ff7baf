//! Ledger configuration management.
//!
//! Standard account codes and edit-window rules vary per deployment, so
//! they are configuration rather than constants. Defaults mirror the
//! standard chart of accounts shipped with the system.

use chrono::Duration;
use serde::Deserialize;

/// Top-level ledger configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// ISO 4217 code of the functional currency.
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    /// Decimal places amounts are rounded to.
    #[serde(default = "default_amount_decimals")]
    pub amount_decimals: u32,
    /// Whether balance queries include entries of locked periods.
    #[serde(default)]
    pub include_closed_entries: bool,
    /// Standard account code mapping.
    #[serde(default)]
    pub accounts: StandardAccounts,
    /// Per-document-type reversal windows.
    #[serde(default)]
    pub edit_windows: EditWindows,
}

fn default_base_currency() -> String {
    "SAR".to_string()
}

fn default_amount_decimals() -> u32 {
    2
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            base_currency: default_base_currency(),
            amount_decimals: default_amount_decimals(),
            include_closed_entries: false,
            accounts: StandardAccounts::default(),
            edit_windows: EditWindows::default(),
        }
    }
}

impl LedgerConfig {
    /// Loads configuration from config files and environment.
    ///
    /// Sources are layered: `config/default`, then `config/{RUN_MODE}`,
    /// then `MIZAN__`-prefixed environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or deserialized.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("MIZAN").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

/// Account codes the posting recipes target.
///
/// Codes follow the seeded chart: 1xxx assets, 2xxx liabilities,
/// 3xxx equity, 4xxx revenue, 5xxx expenses.
#[derive(Debug, Clone, Deserialize)]
pub struct StandardAccounts {
    /// Cash / bank account.
    #[serde(default = "d_cash")]
    pub cash: String,
    /// Accounts receivable control account.
    #[serde(default = "d_ar")]
    pub accounts_receivable: String,
    /// Inventory account.
    #[serde(default = "d_inventory")]
    pub inventory: String,
    /// Accounts payable control account.
    #[serde(default = "d_ap")]
    pub accounts_payable: String,
    /// Accrued salaries liability.
    #[serde(default = "d_salaries_payable")]
    pub salaries_payable: String,
    /// Payroll deductions withheld from employees.
    #[serde(default = "d_payroll_deductions")]
    pub payroll_deductions: String,
    /// VAT collected on sales.
    #[serde(default = "d_output_vat")]
    pub output_vat: String,
    /// VAT paid on purchases.
    #[serde(default = "d_input_vat")]
    pub input_vat: String,
    /// Retained earnings (closing target).
    #[serde(default = "d_retained_earnings")]
    pub retained_earnings: String,
    /// Sales revenue.
    #[serde(default = "d_sales_revenue")]
    pub sales_revenue: String,
    /// Unrealized exchange gains.
    #[serde(default = "d_exchange_gain")]
    pub exchange_gain: String,
    /// Cost of goods sold.
    #[serde(default = "d_cogs")]
    pub cost_of_goods_sold: String,
    /// Bank fees and charges.
    #[serde(default = "d_bank_charges")]
    pub bank_charges: String,
    /// Gross salary expense.
    #[serde(default = "d_salaries_expense")]
    pub salaries_expense: String,
    /// Unrealized exchange losses.
    #[serde(default = "d_exchange_loss")]
    pub exchange_loss: String,
    /// Suspense account for reconciliation differences.
    #[serde(default = "d_suspense")]
    pub reconciliation_suspense: String,
}

fn d_cash() -> String {
    "1110".to_string()
}
fn d_ar() -> String {
    "1120".to_string()
}
fn d_inventory() -> String {
    "1130".to_string()
}
fn d_ap() -> String {
    "2110".to_string()
}
fn d_salaries_payable() -> String {
    "2120".to_string()
}
fn d_payroll_deductions() -> String {
    "2130".to_string()
}
fn d_output_vat() -> String {
    "2210".to_string()
}
fn d_input_vat() -> String {
    "2220".to_string()
}
fn d_retained_earnings() -> String {
    "3200".to_string()
}
fn d_sales_revenue() -> String {
    "4101".to_string()
}
fn d_exchange_gain() -> String {
    "4210".to_string()
}
fn d_cogs() -> String {
    "5100".to_string()
}
fn d_bank_charges() -> String {
    "5101".to_string()
}
fn d_salaries_expense() -> String {
    "5220".to_string()
}
fn d_exchange_loss() -> String {
    "5230".to_string()
}
fn d_suspense() -> String {
    "5290".to_string()
}

impl Default for StandardAccounts {
    fn default() -> Self {
        Self {
            cash: d_cash(),
            accounts_receivable: d_ar(),
            inventory: d_inventory(),
            accounts_payable: d_ap(),
            salaries_payable: d_salaries_payable(),
            payroll_deductions: d_payroll_deductions(),
            output_vat: d_output_vat(),
            input_vat: d_input_vat(),
            retained_earnings: d_retained_earnings(),
            sales_revenue: d_sales_revenue(),
            exchange_gain: d_exchange_gain(),
            cost_of_goods_sold: d_cogs(),
            bank_charges: d_bank_charges(),
            salaries_expense: d_salaries_expense(),
            exchange_loss: d_exchange_loss(),
            reconciliation_suspense: d_suspense(),
        }
    }
}

/// How long after creation a posted voucher may still be reversed.
///
/// The window length is a business rule that varies per document type,
/// so each source carries its own setting. `None` means no time limit.
#[derive(Debug, Clone, Deserialize)]
pub struct EditWindows {
    /// Hours a purchase voucher stays reversible.
    #[serde(default = "d_purchase_hours")]
    pub purchase_hours: Option<i64>,
    /// Hours an invoice voucher stays reversible.
    #[serde(default = "d_invoice_hours")]
    pub invoice_hours: Option<i64>,
    /// Hours an AR adjustment stays reversible.
    #[serde(default = "d_ar_adjustment_hours")]
    pub ar_adjustment_hours: Option<i64>,
}

fn d_purchase_hours() -> Option<i64> {
    Some(24)
}
fn d_invoice_hours() -> Option<i64> {
    Some(48)
}
fn d_ar_adjustment_hours() -> Option<i64> {
    Some(48)
}

impl Default for EditWindows {
    fn default() -> Self {
        Self {
            purchase_hours: d_purchase_hours(),
            invoice_hours: d_invoice_hours(),
            ar_adjustment_hours: d_ar_adjustment_hours(),
        }
    }
}

impl EditWindows {
    /// Window for purchase vouchers.
    #[must_use]
    pub fn purchase(&self) -> Option<Duration> {
        self.purchase_hours.map(Duration::hours)
    }

    /// Window for invoice vouchers.
    #[must_use]
    pub fn invoice(&self) -> Option<Duration> {
        self.invoice_hours.map(Duration::hours)
    }

    /// Window for AR adjustment vouchers.
    #[must_use]
    pub fn ar_adjustment(&self) -> Option<Duration> {
        self.ar_adjustment_hours.map(Duration::hours)
    }
}

//! Shared fixture for end-to-end ledger tests.

// Not every test binary touches every fixture field.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use mizan_core::ledger::{LineInput, PostingEvent, SourceType, VoucherRef};
use mizan_shared::config::LedgerConfig;
use mizan_shared::types::{FiscalPeriodId, UserId};
use mizan_store::{
    AccountRegistry, BalanceAggregator, Books, FiscalCalendar, FixedClock, LedgerStore,
    PostingEngine, ReconciliationService, SubsidiaryLedgers,
};

/// A fully wired ledger stack over fresh books.
pub struct TestLedger {
    pub registry: AccountRegistry,
    pub calendar: FiscalCalendar,
    pub engine: PostingEngine,
    pub store: LedgerStore,
    pub aggregator: BalanceAggregator,
    pub subsidiary: SubsidiaryLedgers,
    pub reconciliation: ReconciliationService,
    pub clock: Arc<FixedClock>,
    pub user: UserId,
    pub march: FiscalPeriodId,
}

/// 2026-03-14 09:00 UTC, inside the seeded March period.
pub fn start_instant() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-03-14T09:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

pub fn day(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, month, day).unwrap()
}

/// Seeds the standard chart, opens March 2026 and pins the clock inside
/// it.
pub fn setup() -> TestLedger {
    let config = LedgerConfig::default();
    let books = Books::new();
    let clock = Arc::new(FixedClock::at(start_instant()));

    let registry = AccountRegistry::new(&books);
    registry.seed_standard_chart().unwrap();

    let calendar = FiscalCalendar::new(&books, &config, clock.clone());
    let march = calendar
        .open_period("March 2026", day(3, 1), day(3, 31))
        .unwrap();

    let engine = PostingEngine::new(&books, &config, clock.clone());
    let reconciliation = ReconciliationService::new(&books, &config, &engine, clock.clone());

    TestLedger {
        store: LedgerStore::new(&books),
        aggregator: BalanceAggregator::new(&books, &config),
        subsidiary: SubsidiaryLedgers::new(&books),
        registry,
        calendar,
        engine,
        reconciliation,
        clock,
        user: UserId::new(),
        march,
    }
}

impl TestLedger {
    /// Posts a manual two-line voucher.
    pub fn post_manual(
        &self,
        date: NaiveDate,
        debit_account: &str,
        credit_account: &str,
        amount: Decimal,
        description: &str,
    ) -> VoucherRef {
        let event = PostingEvent::new(
            SourceType::Manual,
            date,
            description,
            vec![
                LineInput::debit(debit_account, amount, description),
                LineInput::credit(credit_account, amount, description),
            ],
            self.user,
        );
        self.engine.post(&event).unwrap()
    }

    /// Balance over all time.
    pub fn balance(&self, account_code: &str) -> Decimal {
        self.aggregator
            .account_balance(account_code, None, None)
            .unwrap()
    }
}

//! The books: shared in-memory state behind a single writer lock.
//!
//! The lock is the transaction boundary. Everything a posting touches -
//! sequence allocation, idempotency check, period status, account
//! lookups, entry insertion - happens under one `write()`, so a failed
//! posting leaves no trace and a concurrent period close can never
//! interleave with an in-flight voucher.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use mizan_core::accounts::{Account, AccountSnapshot};
use mizan_core::fiscal::{FiscalPeriod, PeriodStatus};
use mizan_core::ledger::{
    EntryState, LedgerEntry, LedgerError, LedgerService, LineInput, PostingEvent, Voucher,
    VoucherRef, VoucherStatus,
};
use mizan_core::reconciliation::Reconciliation;
use mizan_core::subsidiary::SubsidiaryTransaction;
use mizan_shared::types::{
    CustomerId, LedgerEntryId, ReconciliationId, SupplierId, UserId, VoucherId,
};

use crate::sequence::DocumentSequences;

/// A counterparty (AR customer / AP supplier) with its transaction set
/// and recompute-on-write cached balance.
#[derive(Debug)]
pub(crate) struct CounterpartyAccount {
    pub name: String,
    pub transactions: Vec<SubsidiaryTransaction>,
    /// Cache of the active-transaction sum; refreshed by full recompute
    /// after every write, never patched in place.
    pub current_balance: Decimal,
}

impl CounterpartyAccount {
    pub fn new(name: String) -> Self {
        Self {
            name,
            transactions: Vec::new(),
            current_balance: Decimal::ZERO,
        }
    }
}

/// All ledger state.
#[derive(Debug, Default)]
pub(crate) struct BooksInner {
    pub accounts: BTreeMap<String, Account>,
    pub periods: Vec<FiscalPeriod>,
    pub entries: Vec<LedgerEntry>,
    pub vouchers: HashMap<String, Voucher>,
    pub sequences: DocumentSequences,
    pub idempotency: HashMap<String, VoucherRef>,
    pub customers: HashMap<CustomerId, CounterpartyAccount>,
    pub suppliers: HashMap<SupplierId, CounterpartyAccount>,
    pub reconciliations: HashMap<ReconciliationId, Reconciliation>,
}

impl BooksInner {
    /// Resolves an account code for validation. Summary accounts are
    /// those referenced as a parent by any other account.
    pub fn account_snapshot(&self, code: &str) -> Option<AccountSnapshot> {
        let account = self.accounts.get(code)?;
        let is_summary = self
            .accounts
            .values()
            .any(|a| a.parent_code.as_deref() == Some(code));
        Some(AccountSnapshot {
            id: account.id,
            code: account.code.clone(),
            kind: account.kind,
            is_active: account.is_active,
            is_summary,
        })
    }

    /// Finds the fiscal period containing the given date.
    pub fn period_for(&self, date: NaiveDate) -> Option<&FiscalPeriod> {
        self.periods.iter().find(|p| p.contains_date(date))
    }

    fn period_status_for(&self, date: NaiveDate) -> Option<PeriodStatus> {
        self.period_for(date).map(|p| p.status)
    }

    /// Appends a validated voucher: the atomic multi-write at the heart
    /// of the store. Returns the voucher reference and whether it was
    /// newly created (false = idempotent replay).
    pub fn append_event(
        &mut self,
        event: &PostingEvent,
        now: DateTime<Utc>,
    ) -> Result<(VoucherRef, bool), LedgerError> {
        if let Some(key) = &event.idempotency_key {
            if let Some(existing) = self.idempotency.get(key) {
                return Ok((existing.clone(), false));
            }
        }

        {
            let inner: &Self = self;
            LedgerService::validate_event(
                event,
                |code| inner.account_snapshot(code),
                |date| inner.period_status_for(date),
            )?;
        }

        let number = self.sequences.next(event.source_type.voucher_prefix());
        let voucher = Voucher {
            id: VoucherId::new(),
            number: number.clone(),
            source_type: event.source_type,
            source_id: event.source_id,
            date: event.date,
            description: event.description.clone(),
            status: VoucherStatus::Posted,
            created_by: event.created_by,
            created_at: now,
            reversed_by: None,
            reversal_of: None,
        };

        for line in &event.lines {
            self.entries.push(LedgerEntry {
                id: LedgerEntryId::new(),
                voucher_number: number.clone(),
                voucher_date: event.date,
                account_code: line.account_code.clone(),
                entry_type: line.entry_type,
                amount: line.amount,
                description: line.description.clone(),
                created_by: event.created_by,
                created_at: now,
                is_closed: false,
                state: EntryState::Active,
            });
        }

        let voucher_ref = VoucherRef {
            id: voucher.id,
            number: number.clone(),
        };
        self.vouchers.insert(number, voucher);

        if let Some(key) = &event.idempotency_key {
            self.idempotency.insert(key.clone(), voucher_ref.clone());
        }

        Ok((voucher_ref, true))
    }

    /// Reverses a posted voucher by appending its mirror and marking the
    /// original. Entries are never physically deleted.
    pub fn reverse_voucher(
        &mut self,
        number: &str,
        date: NaiveDate,
        now: DateTime<Utc>,
        reversed_by: UserId,
    ) -> Result<VoucherRef, LedgerError> {
        let original = self
            .vouchers
            .get(number)
            .ok_or_else(|| LedgerError::VoucherNotFound(number.to_string()))?;

        if original.status == VoucherStatus::Reversed {
            return Err(LedgerError::AlreadyReversed(number.to_string()));
        }

        let source_type = original.source_type;
        let source_id = original.source_id;

        let lines: Vec<_> = self
            .entries
            .iter()
            .filter(|e| e.voucher_number == number)
            .map(|e| LineInput {
                account_code: e.account_code.clone(),
                entry_type: e.entry_type.opposite(),
                amount: e.amount,
                description: format!("Reversal of {}", e.description),
            })
            .collect();

        let mut event = PostingEvent::new(
            source_type,
            date,
            format!("Reversal of voucher {number}"),
            lines,
            reversed_by,
        );
        event.source_id = source_id;

        let (reversal_ref, _) = self.append_event(&event, now)?;

        if let Some(original) = self.vouchers.get_mut(number) {
            original.status = VoucherStatus::Reversed;
            original.reversed_by = Some(reversal_ref.number.clone());
        }
        if let Some(reversal) = self.vouchers.get_mut(&reversal_ref.number) {
            reversal.reversal_of = Some(number.to_string());
        }
        for entry in self
            .entries
            .iter_mut()
            .filter(|e| e.voucher_number == number)
        {
            entry.state = EntryState::Reversed;
        }

        Ok(reversal_ref)
    }
}

/// Cloneable handle to the shared books.
///
/// The handle plays the role a database connection does in a SQL-backed
/// deployment: every repository and service holds one and goes through
/// it for reads and writes.
#[derive(Debug, Clone, Default)]
pub struct Books {
    inner: Arc<RwLock<BooksInner>>,
}

impl Books {
    /// Creates empty books.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, BooksInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, BooksInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

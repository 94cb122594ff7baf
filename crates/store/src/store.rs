//! Append-only ledger entry store.

use chrono::{DateTime, NaiveDate, Utc};

use mizan_core::ledger::{LedgerEntry, LedgerError, PostingEvent, Voucher, VoucherRef};
use mizan_shared::types::{PageRequest, PageResponse, UserId};

use crate::books::Books;

/// Structured filter for entry queries.
///
/// Filters are explicit fields, never assembled from strings, so a
/// query can only ever select on what the store indexes.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Restrict to one account code.
    pub account_code: Option<String>,
    /// Restrict to one voucher.
    pub voucher_number: Option<String>,
    /// Earliest voucher date (inclusive).
    pub date_from: Option<NaiveDate>,
    /// Latest voucher date (inclusive).
    pub date_to: Option<NaiveDate>,
    /// Include entries of reversed vouchers (default: excluded).
    pub include_reversed: bool,
    /// Optional pagination window.
    pub page: Option<PageRequest>,
}

impl EntryFilter {
    /// Filter for one account's entries.
    #[must_use]
    pub fn for_account(code: impl Into<String>) -> Self {
        Self {
            account_code: Some(code.into()),
            ..Self::default()
        }
    }

    /// Filter for one voucher's entries.
    #[must_use]
    pub fn for_voucher(number: impl Into<String>) -> Self {
        Self {
            voucher_number: Some(number.into()),
            ..Self::default()
        }
    }

    fn matches(&self, entry: &LedgerEntry) -> bool {
        if let Some(code) = &self.account_code {
            if &entry.account_code != code {
                return false;
            }
        }
        if let Some(number) = &self.voucher_number {
            if &entry.voucher_number != number {
                return false;
            }
        }
        if let Some(from) = self.date_from {
            if entry.voucher_date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if entry.voucher_date > to {
                return false;
            }
        }
        if !self.include_reversed && !entry.is_active() {
            return false;
        }
        true
    }
}

/// Durable, append-mostly storage of ledger entries.
///
/// Entries are only ever created through [`Self::append`] and
/// [`Self::reverse`]; nothing mutates an entry's amount or account after
/// the fact, and nothing deletes one.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    books: Books,
}

impl LedgerStore {
    /// Creates a store over the given books.
    #[must_use]
    pub fn new(books: &Books) -> Self {
        Self {
            books: books.clone(),
        }
    }

    /// Appends a voucher's entries atomically.
    ///
    /// Validation (balance, amounts, accounts, fiscal period) and the
    /// insert happen under one writer lock: a failed posting leaves no
    /// partial voucher behind.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] for any violated posting rule.
    pub fn append(
        &self,
        event: &PostingEvent,
        now: DateTime<Utc>,
    ) -> Result<VoucherRef, LedgerError> {
        let (voucher_ref, _) = self.books.write().append_event(event, now)?;
        Ok(voucher_ref)
    }

    /// Appends and reports whether the voucher was newly created
    /// (`false` = idempotent replay of an earlier posting).
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] for any violated posting rule.
    pub fn append_tracked(
        &self,
        event: &PostingEvent,
        now: DateTime<Utc>,
    ) -> Result<(VoucherRef, bool), LedgerError> {
        self.books.write().append_event(event, now)
    }

    /// Reverses a posted voucher with a mirroring voucher dated `date`.
    ///
    /// # Errors
    ///
    /// `VoucherNotFound` for an unknown voucher, `AlreadyReversed` if it
    /// was reversed before, plus any posting error for the mirror (for
    /// example a closed period on `date`).
    pub fn reverse(
        &self,
        voucher_number: &str,
        date: NaiveDate,
        now: DateTime<Utc>,
        reversed_by: UserId,
    ) -> Result<VoucherRef, LedgerError> {
        self.books
            .write()
            .reverse_voucher(voucher_number, date, now, reversed_by)
    }

    /// Fetches a voucher header by number.
    #[must_use]
    pub fn voucher(&self, number: &str) -> Option<Voucher> {
        self.books.read().vouchers.get(number).cloned()
    }

    /// Queries entries, ordered by voucher date descending (then most
    /// recently created first). The query is pure: no cursor state is
    /// retained, so it can be re-run from any page.
    #[must_use]
    pub fn entries(&self, filter: &EntryFilter) -> Vec<LedgerEntry> {
        let inner = self.books.read();
        let mut matched: Vec<LedgerEntry> = inner
            .entries
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();

        matched.sort_by(|a, b| {
            b.voucher_date
                .cmp(&a.voucher_date)
                .then(b.created_at.cmp(&a.created_at))
        });

        if let Some(page) = &filter.page {
            matched
                .into_iter()
                .skip(page.offset())
                .take(page.limit())
                .collect()
        } else {
            matched
        }
    }

    /// Queries one page of entries with pagination metadata.
    #[must_use]
    pub fn entries_page(
        &self,
        filter: &EntryFilter,
        page: PageRequest,
    ) -> PageResponse<LedgerEntry> {
        let unpaged = EntryFilter {
            page: None,
            ..filter.clone()
        };
        let all = self.entries(&unpaged);
        let total = all.len() as u64;
        let data = all
            .into_iter()
            .skip(page.offset())
            .take(page.limit())
            .collect();
        PageResponse::new(data, page.page, page.per_page, total)
    }
}

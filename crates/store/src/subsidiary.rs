//! AR/AP subsidiary ledgers with recompute-on-write cached balances.

use rust_decimal::Decimal;
use thiserror::Error;

use mizan_core::subsidiary::{recompute_balance, SubsidiaryTransaction, TransactionState};
use mizan_shared::types::{CustomerId, SourceDocumentId, SupplierId};

use crate::books::{Books, CounterpartyAccount};

/// Errors that can occur in the subsidiary ledgers.
#[derive(Debug, Error)]
pub enum SubsidiaryError {
    /// Customer not found.
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    /// Supplier not found.
    #[error("Supplier not found: {0}")]
    SupplierNotFound(SupplierId),
}

/// Per-counterparty transaction ledgers for customers (AR) and
/// suppliers (AP).
///
/// Each counterparty carries a cached `current_balance`, but the cache
/// is a convenience only: it is refreshed by a full recompute over the
/// active transaction set after every write, and the query path
/// recomputes live, so the two can never drift apart.
#[derive(Debug, Clone)]
pub struct SubsidiaryLedgers {
    books: Books,
}

impl SubsidiaryLedgers {
    /// Creates subsidiary ledgers over the given books.
    #[must_use]
    pub fn new(books: &Books) -> Self {
        Self {
            books: books.clone(),
        }
    }

    /// Registers a customer.
    #[must_use]
    pub fn register_customer(&self, name: impl Into<String>) -> CustomerId {
        let id = CustomerId::new();
        self.books
            .write()
            .customers
            .insert(id, CounterpartyAccount::new(name.into()));
        id
    }

    /// Registers a supplier.
    #[must_use]
    pub fn register_supplier(&self, name: impl Into<String>) -> SupplierId {
        let id = SupplierId::new();
        self.books
            .write()
            .suppliers
            .insert(id, CounterpartyAccount::new(name.into()));
        id
    }

    /// Records a customer transaction and refreshes the cached balance.
    ///
    /// Returns the recomputed balance.
    ///
    /// # Errors
    ///
    /// `CustomerNotFound` for an unknown customer.
    pub fn record_customer(
        &self,
        customer: CustomerId,
        transaction: SubsidiaryTransaction,
    ) -> Result<Decimal, SubsidiaryError> {
        let mut inner = self.books.write();
        let account = inner
            .customers
            .get_mut(&customer)
            .ok_or(SubsidiaryError::CustomerNotFound(customer))?;
        account.transactions.push(transaction);
        account.current_balance = recompute_balance(&account.transactions, false);
        Ok(account.current_balance)
    }

    /// Records a supplier transaction and refreshes the cached balance.
    ///
    /// # Errors
    ///
    /// `SupplierNotFound` for an unknown supplier.
    pub fn record_supplier(
        &self,
        supplier: SupplierId,
        transaction: SubsidiaryTransaction,
    ) -> Result<Decimal, SubsidiaryError> {
        let mut inner = self.books.write();
        let account = inner
            .suppliers
            .get_mut(&supplier)
            .ok_or(SubsidiaryError::SupplierNotFound(supplier))?;
        account.transactions.push(transaction);
        account.current_balance = recompute_balance(&account.transactions, false);
        Ok(account.current_balance)
    }

    /// Live customer balance, recomputed from the transaction set.
    ///
    /// # Errors
    ///
    /// `CustomerNotFound` for an unknown customer.
    pub fn customer_balance(
        &self,
        customer: CustomerId,
        include_deleted: bool,
    ) -> Result<Decimal, SubsidiaryError> {
        let inner = self.books.read();
        let account = inner
            .customers
            .get(&customer)
            .ok_or(SubsidiaryError::CustomerNotFound(customer))?;
        Ok(recompute_balance(&account.transactions, include_deleted))
    }

    /// Live supplier balance, recomputed from the transaction set.
    ///
    /// # Errors
    ///
    /// `SupplierNotFound` for an unknown supplier.
    pub fn supplier_balance(
        &self,
        supplier: SupplierId,
        include_deleted: bool,
    ) -> Result<Decimal, SubsidiaryError> {
        let inner = self.books.read();
        let account = inner
            .suppliers
            .get(&supplier)
            .ok_or(SubsidiaryError::SupplierNotFound(supplier))?;
        Ok(recompute_balance(&account.transactions, include_deleted))
    }

    /// The cached customer balance as refreshed by the last write.
    ///
    /// # Errors
    ///
    /// `CustomerNotFound` for an unknown customer.
    pub fn cached_customer_balance(
        &self,
        customer: CustomerId,
    ) -> Result<Decimal, SubsidiaryError> {
        self.books
            .read()
            .customers
            .get(&customer)
            .map(|a| a.current_balance)
            .ok_or(SubsidiaryError::CustomerNotFound(customer))
    }

    /// The cached supplier balance as refreshed by the last write.
    ///
    /// # Errors
    ///
    /// `SupplierNotFound` for an unknown supplier.
    pub fn cached_supplier_balance(
        &self,
        supplier: SupplierId,
    ) -> Result<Decimal, SubsidiaryError> {
        self.books
            .read()
            .suppliers
            .get(&supplier)
            .map(|a| a.current_balance)
            .ok_or(SubsidiaryError::SupplierNotFound(supplier))
    }

    /// Soft-deletes every supplier transaction referencing a document
    /// (used when the document is reversed) and refreshes the cache.
    ///
    /// Returns the number of transactions marked deleted.
    ///
    /// # Errors
    ///
    /// `SupplierNotFound` for an unknown supplier.
    pub fn delete_supplier_reference(
        &self,
        supplier: SupplierId,
        reference: SourceDocumentId,
    ) -> Result<usize, SubsidiaryError> {
        let mut inner = self.books.write();
        let account = inner
            .suppliers
            .get_mut(&supplier)
            .ok_or(SubsidiaryError::SupplierNotFound(supplier))?;

        let mut marked = 0;
        for txn in account
            .transactions
            .iter_mut()
            .filter(|t| t.reference == Some(reference) && t.state == TransactionState::Active)
        {
            txn.state = TransactionState::Deleted;
            marked += 1;
        }
        account.current_balance = recompute_balance(&account.transactions, false);
        Ok(marked)
    }

    /// Soft-deletes every customer transaction referencing a document
    /// and refreshes the cache.
    ///
    /// # Errors
    ///
    /// `CustomerNotFound` for an unknown customer.
    pub fn delete_customer_reference(
        &self,
        customer: CustomerId,
        reference: SourceDocumentId,
    ) -> Result<usize, SubsidiaryError> {
        let mut inner = self.books.write();
        let account = inner
            .customers
            .get_mut(&customer)
            .ok_or(SubsidiaryError::CustomerNotFound(customer))?;

        let mut marked = 0;
        for txn in account
            .transactions
            .iter_mut()
            .filter(|t| t.reference == Some(reference) && t.state == TransactionState::Active)
        {
            txn.state = TransactionState::Deleted;
            marked += 1;
        }
        account.current_balance = recompute_balance(&account.transactions, false);
        Ok(marked)
    }

    /// Restores soft-deleted customer transactions for a document and
    /// refreshes the cache.
    ///
    /// # Errors
    ///
    /// `CustomerNotFound` for an unknown customer.
    pub fn restore_customer_reference(
        &self,
        customer: CustomerId,
        reference: SourceDocumentId,
    ) -> Result<usize, SubsidiaryError> {
        let mut inner = self.books.write();
        let account = inner
            .customers
            .get_mut(&customer)
            .ok_or(SubsidiaryError::CustomerNotFound(customer))?;

        let mut restored = 0;
        for txn in account
            .transactions
            .iter_mut()
            .filter(|t| t.reference == Some(reference) && t.state == TransactionState::Deleted)
        {
            txn.state = TransactionState::Active;
            restored += 1;
        }
        account.current_balance = recompute_balance(&account.transactions, false);
        Ok(restored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mizan_core::subsidiary::SubsidiaryTransactionKind;
    use mizan_shared::types::UserId;
    use rust_decimal_macros::dec;

    fn txn(kind: SubsidiaryTransactionKind, amount: Decimal) -> SubsidiaryTransaction {
        SubsidiaryTransaction::new(kind, amount, "test", UserId::new(), Utc::now())
    }

    #[test]
    fn test_customer_invoice_and_payment() {
        let ledgers = SubsidiaryLedgers::new(&Books::new());
        let customer = ledgers.register_customer("Acme");

        ledgers
            .record_customer(customer, txn(SubsidiaryTransactionKind::Invoice, dec!(100)))
            .unwrap();
        let balance = ledgers
            .record_customer(customer, txn(SubsidiaryTransactionKind::Receipt, dec!(40)))
            .unwrap();

        assert_eq!(balance, dec!(60));
        assert_eq!(ledgers.customer_balance(customer, false).unwrap(), dec!(60));
        assert_eq!(ledgers.cached_customer_balance(customer).unwrap(), dec!(60));
    }

    #[test]
    fn test_unknown_counterparty() {
        let ledgers = SubsidiaryLedgers::new(&Books::new());
        assert!(matches!(
            ledgers.customer_balance(CustomerId::new(), false),
            Err(SubsidiaryError::CustomerNotFound(_))
        ));
        assert!(matches!(
            ledgers.record_supplier(
                SupplierId::new(),
                txn(SubsidiaryTransactionKind::Invoice, dec!(1))
            ),
            Err(SubsidiaryError::SupplierNotFound(_))
        ));
    }

    #[test]
    fn test_supplier_return_decrements() {
        let ledgers = SubsidiaryLedgers::new(&Books::new());
        let supplier = ledgers.register_supplier("Parts Co");

        ledgers
            .record_supplier(supplier, txn(SubsidiaryTransactionKind::Invoice, dec!(230)))
            .unwrap();
        let balance = ledgers
            .record_supplier(supplier, txn(SubsidiaryTransactionKind::Return, dec!(30)))
            .unwrap();
        assert_eq!(balance, dec!(200));
    }

    #[test]
    fn test_soft_delete_by_reference_recomputes() {
        let ledgers = SubsidiaryLedgers::new(&Books::new());
        let supplier = ledgers.register_supplier("Parts Co");
        let purchase = SourceDocumentId::new();

        ledgers
            .record_supplier(
                supplier,
                txn(SubsidiaryTransactionKind::Invoice, dec!(230)).with_reference(purchase),
            )
            .unwrap();
        ledgers
            .record_supplier(supplier, txn(SubsidiaryTransactionKind::Invoice, dec!(100)))
            .unwrap();

        let marked = ledgers.delete_supplier_reference(supplier, purchase).unwrap();
        assert_eq!(marked, 1);
        assert_eq!(ledgers.supplier_balance(supplier, false).unwrap(), dec!(100));
        assert_eq!(ledgers.cached_supplier_balance(supplier).unwrap(), dec!(100));
        // The deleted row is still there when explicitly requested.
        assert_eq!(ledgers.supplier_balance(supplier, true).unwrap(), dec!(330));
    }

    #[test]
    fn test_restore_after_delete() {
        let ledgers = SubsidiaryLedgers::new(&Books::new());
        let customer = ledgers.register_customer("Acme");
        let invoice = SourceDocumentId::new();

        ledgers
            .record_customer(
                customer,
                txn(SubsidiaryTransactionKind::Invoice, dec!(100)).with_reference(invoice),
            )
            .unwrap();
        ledgers.delete_customer_reference(customer, invoice).unwrap();
        assert_eq!(ledgers.customer_balance(customer, false).unwrap(), dec!(0));

        let restored = ledgers.restore_customer_reference(customer, invoice).unwrap();
        assert_eq!(restored, 1);
        assert_eq!(ledgers.customer_balance(customer, false).unwrap(), dec!(100));
    }

    #[test]
    fn test_cache_never_drifts_from_recompute() {
        let ledgers = SubsidiaryLedgers::new(&Books::new());
        let customer = ledgers.register_customer("Acme");

        for (kind, amount) in [
            (SubsidiaryTransactionKind::Invoice, dec!(100)),
            (SubsidiaryTransactionKind::Receipt, dec!(40)),
            (SubsidiaryTransactionKind::Invoice, dec!(75.50)),
            (SubsidiaryTransactionKind::Return, dec!(25.50)),
        ] {
            ledgers.record_customer(customer, txn(kind, amount)).unwrap();
            assert_eq!(
                ledgers.cached_customer_balance(customer).unwrap(),
                ledgers.customer_balance(customer, false).unwrap()
            );
        }
        assert_eq!(ledgers.customer_balance(customer, false).unwrap(), dec!(110));
    }
}

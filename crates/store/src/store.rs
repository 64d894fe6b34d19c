use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use factureclair_catalog::{Client, ClientId, Product, ProductId};
use factureclair_invoicing::{numbering, Invoice, InvoiceId};

use crate::error::{StoreError, StoreResult};

/// A stored record plus its insertion sequence number. Listings are ordered
/// most-recent-first, so every insert records where it happened in time.
#[derive(Debug, Clone)]
pub(crate) struct Stored<T> {
    pub item: T,
    pub seq: u64,
}

/// All mutable state, guarded by one lock.
#[derive(Debug, Default)]
pub(crate) struct StoreState {
    pub clients: HashMap<ClientId, Stored<Client>>,
    pub products: HashMap<ProductId, Stored<Product>>,
    pub invoices: HashMap<InvoiceId, Stored<Invoice>>,
    /// Last counter value handed out by [`StoreState::next_number`]. Never
    /// decremented: deleting an invoice leaves a gap rather than reusing its
    /// number.
    last_number: u64,
    next_seq: u64,
}

impl StoreState {
    pub fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Advance the invoice counter and format the resulting number. Only ever
    /// called under the write lock, so two invoices can never draw the same
    /// value.
    pub fn next_number(&mut self) -> String {
        self.last_number += 1;
        numbering::format_number(self.last_number)
    }
}

/// The in-memory store. One `RwLock` serializes every mutating operation
/// against reads and against each other.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from previously persisted records, given in creation
    /// order. The invoice counter is seeded from the most recent invoice's
    /// number so new invoices continue the sequence.
    pub fn restore(
        clients: Vec<Client>,
        products: Vec<Product>,
        invoices: Vec<Invoice>,
    ) -> Self {
        let mut state = StoreState {
            last_number: numbering::seed_from(invoices.last().map(Invoice::numero)),
            ..StoreState::default()
        };
        for client in clients {
            let seq = state.next_seq();
            state.clients.insert(client.id_typed(), Stored { item: client, seq });
        }
        for product in products {
            let seq = state.next_seq();
            state
                .products
                .insert(product.id_typed(), Stored { item: product, seq });
        }
        for invoice in invoices {
            let seq = state.next_seq();
            state
                .invoices
                .insert(invoice.id_typed(), Stored { item: invoice, seq });
        }
        Self {
            state: RwLock::new(state),
        }
    }

    pub(crate) fn read(&self) -> StoreResult<RwLockReadGuard<'_, StoreState>> {
        self.state.read().map_err(|_| StoreError::LockPoisoned)
    }

    pub(crate) fn write(&self) -> StoreResult<RwLockWriteGuard<'_, StoreState>> {
        self.state.write().map_err(|_| StoreError::LockPoisoned)
    }
}

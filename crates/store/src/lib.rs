//! `factureclair-store`: the shared mutable resource.
//!
//! A single in-memory store holding clients, products, and invoices, plus the
//! invoice number counter. Every mutating operation takes the write lock for
//! its whole unit of work, so the critical sections the domain requires
//! (number assignment atomic with insert, full line replacement never
//! observable half-done, delete guards consistent with concurrent creates)
//! are serialized by construction.
//!
//! Intended for a single-process deployment. Not optimized for large data
//! sets: lists scan.

pub mod catalog;
pub mod error;
pub mod invoices;
pub mod stats;
mod store;

pub use error::{StoreError, StoreResult};
pub use invoices::{InvoiceDetail, InvoiceFilter, InvoiceSummary, LineDetail};
pub use stats::{DashboardStats, MonthlyRevenue};
pub use store::MemoryStore;

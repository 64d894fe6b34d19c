//! `factureclair-invoicing`: pure invoice domain.
//!
//! The invoice lifecycle core: line-item totals computation, sequential
//! numbering, and the invoice entity binding a client reference, an issue
//! date, a status, and its owned line items. No IO; the store layer drives
//! these types transactionally.

pub mod invoice;
pub mod lines;
pub mod numbering;

pub use invoice::{Invoice, InvoiceDraft, InvoiceId, InvoiceLine, InvoiceStatus};
pub use lines::{compute_totals, InvoiceTotals, LineInput, LineTotals, PriceSnapshot};

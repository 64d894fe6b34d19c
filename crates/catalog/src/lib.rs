//! `factureclair-catalog`: client and product catalog domain.
//!
//! Leaf data providers referenced by invoices. Pure domain: validation and
//! update rules live here, storage and referential guards live in the store.

pub mod client;
pub mod product;

pub use client::{Client, ClientDraft, ClientId};
pub use product::{Product, ProductDraft, ProductId, DEFAULT_TVA};

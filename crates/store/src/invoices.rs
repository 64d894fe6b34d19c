//! Invoice operations.
//!
//! The invoice is the unit of consistency: header and lines are created,
//! replaced, and deleted together, under the write lock, with the number
//! assigned atomically with the insert. Reads return enriched views joining
//! the referenced client and product records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use factureclair_catalog::{ClientId, ProductId};
use factureclair_core::{DomainError, DomainResult};
use factureclair_invoicing::{
    compute_totals, Invoice, InvoiceDraft, InvoiceId, InvoiceStatus, InvoiceTotals,
};

use crate::error::StoreResult;
use crate::store::{MemoryStore, Stored, StoreState};

/// Listing filters. All criteria are conjunctive; `None` means "don't filter".
#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
    /// Case-insensitive substring over the invoice number and the client name.
    pub search: Option<String>,
    pub statut: Option<InvoiceStatus>,
    pub client_id: Option<ClientId>,
    /// Inclusive lower bound on the issue date.
    pub date_debut: Option<NaiveDate>,
    /// Inclusive upper bound on the issue date.
    pub date_fin: Option<NaiveDate>,
}

/// Listing view: invoice header joined with the client's display fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceSummary {
    pub id: InvoiceId,
    pub numero: String,
    pub client_id: ClientId,
    pub client_nom: String,
    pub client_email: Option<String>,
    pub date: NaiveDate,
    pub statut: InvoiceStatus,
    pub totals: InvoiceTotals,
}

/// One line joined with the product's display fields. Pricing comes from the
/// line's snapshot, never from the current catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineDetail {
    pub produit_id: ProductId,
    pub produit_nom: String,
    pub produit_description: Option<String>,
    pub quantite: i64,
    pub prix_unitaire: Decimal,
    pub tva: Decimal,
}

/// Detail view: the full invoice, its client's contact fields, and its lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceDetail {
    pub id: InvoiceId,
    pub numero: String,
    pub client_id: ClientId,
    pub client_nom: String,
    pub client_email: Option<String>,
    pub client_telephone: Option<String>,
    pub client_adresse: Option<String>,
    pub client_ice: Option<String>,
    pub date: NaiveDate,
    pub statut: InvoiceStatus,
    pub totals: InvoiceTotals,
    pub details: Vec<LineDetail>,
}

impl MemoryStore {
    /// Create an invoice: checks the client and every referenced product
    /// exist, validates the lines, then assigns the next number and inserts,
    /// all under one write lock, so concurrent creates get distinct numbers.
    pub fn create_invoice(&self, draft: InvoiceDraft) -> StoreResult<InvoiceDetail> {
        let mut state = self.write()?;
        check_draft(&state, &draft)?;
        let numero = state.next_number();
        let invoice = Invoice::create(InvoiceId::new(), numero, draft)?;
        let detail = detail_view(&state, &invoice)?;
        let seq = state.next_seq();
        state
            .invoices
            .insert(invoice.id_typed(), Stored { item: invoice, seq });
        tracing::info!(numero = %detail.numero, "facture créée");
        Ok(detail)
    }

    pub fn get_invoice(&self, id: InvoiceId) -> StoreResult<InvoiceDetail> {
        let state = self.read()?;
        let stored = state.invoices.get(&id).ok_or(DomainError::NotFound)?;
        Ok(detail_view(&state, &stored.item)?)
    }

    /// List invoices matching the filter, most recent first.
    pub fn list_invoices(&self, filter: &InvoiceFilter) -> StoreResult<Vec<InvoiceSummary>> {
        let state = self.read()?;
        let mut matched: Vec<&Stored<Invoice>> = Vec::new();
        for stored in state.invoices.values() {
            if matches_filter(&state, &stored.item, filter) {
                matched.push(stored);
            }
        }
        matched.sort_by(|a, b| b.seq.cmp(&a.seq));
        matched
            .into_iter()
            .map(|s| Ok(summary_view(&state, &s.item)?))
            .collect()
    }

    /// Full-replace update: the draft's lines replace the entire line set and
    /// totals are recomputed; the number never changes. Same referential
    /// checks as creation.
    pub fn update_invoice(&self, id: InvoiceId, draft: InvoiceDraft) -> StoreResult<InvoiceDetail> {
        let mut state = self.write()?;
        if !state.invoices.contains_key(&id) {
            return Err(DomainError::NotFound.into());
        }
        check_draft(&state, &draft)?;
        let mut invoice = state.invoices[&id].item.clone();
        invoice.replace(draft)?;
        let detail = detail_view(&state, &invoice)?;
        if let Some(stored) = state.invoices.get_mut(&id) {
            stored.item = invoice;
        }
        Ok(detail)
    }

    /// Delete an invoice and its lines. The number is not reused.
    pub fn delete_invoice(&self, id: InvoiceId) -> StoreResult<()> {
        let mut state = self.write()?;
        let stored = state.invoices.remove(&id).ok_or(DomainError::NotFound)?;
        tracing::info!(numero = %stored.item.numero(), "facture supprimée");
        Ok(())
    }
}

/// Draft checks shared by create and update: at least one line, the client
/// and every referenced product exist, and all line values are valid.
fn check_draft(state: &StoreState, draft: &InvoiceDraft) -> StoreResult<()> {
    if draft.lignes.is_empty() {
        return Err(DomainError::validation("au moins un produit est requis").into());
    }
    if !state.clients.contains_key(&draft.client_id) {
        return Err(DomainError::NotFound.into());
    }
    for ligne in &draft.lignes {
        if !state.products.contains_key(&ligne.produit_id) {
            return Err(DomainError::NotFound.into());
        }
    }
    compute_totals(&draft.lignes)?;
    Ok(())
}

fn matches_filter(state: &StoreState, invoice: &Invoice, filter: &InvoiceFilter) -> bool {
    if let Some(statut) = filter.statut {
        if invoice.statut() != statut {
            return false;
        }
    }
    if let Some(client_id) = filter.client_id {
        if invoice.client_id() != client_id {
            return false;
        }
    }
    if let Some(debut) = filter.date_debut {
        if invoice.date() < debut {
            return false;
        }
    }
    if let Some(fin) = filter.date_fin {
        if invoice.date() > fin {
            return false;
        }
    }
    if let Some(needle) = filter.search.as_deref() {
        let needle = needle.to_lowercase();
        let numero_match = invoice.numero().to_lowercase().contains(&needle);
        let client_match = state
            .clients
            .get(&invoice.client_id())
            .is_some_and(|s| s.item.nom().to_lowercase().contains(&needle));
        if !numero_match && !client_match {
            return false;
        }
    }
    true
}

fn summary_view(state: &StoreState, invoice: &Invoice) -> DomainResult<InvoiceSummary> {
    let client = state
        .clients
        .get(&invoice.client_id())
        .map(|s| &s.item)
        .ok_or_else(|| DomainError::invariant("client introuvable pour la facture"))?;
    Ok(InvoiceSummary {
        id: invoice.id_typed(),
        numero: invoice.numero().to_string(),
        client_id: invoice.client_id(),
        client_nom: client.nom().to_string(),
        client_email: client.email().map(str::to_string),
        date: invoice.date(),
        statut: invoice.statut(),
        totals: invoice.totals(),
    })
}

fn detail_view(state: &StoreState, invoice: &Invoice) -> DomainResult<InvoiceDetail> {
    let client = state
        .clients
        .get(&invoice.client_id())
        .map(|s| &s.item)
        .ok_or_else(|| DomainError::invariant("client introuvable pour la facture"))?;
    let mut details = Vec::with_capacity(invoice.lignes().len());
    for ligne in invoice.lignes() {
        let product = state
            .products
            .get(&ligne.produit_id)
            .map(|s| &s.item)
            .ok_or_else(|| DomainError::invariant("produit introuvable pour la facture"))?;
        details.push(LineDetail {
            produit_id: ligne.produit_id,
            produit_nom: product.nom().to_string(),
            produit_description: product.description().map(str::to_string),
            quantite: ligne.quantite,
            prix_unitaire: ligne.prix_unitaire,
            tva: ligne.tva,
        });
    }
    Ok(InvoiceDetail {
        id: invoice.id_typed(),
        numero: invoice.numero().to_string(),
        client_id: invoice.client_id(),
        client_nom: client.nom().to_string(),
        client_email: client.email().map(str::to_string),
        client_telephone: client.telephone().map(str::to_string),
        client_adresse: client.adresse().map(str::to_string),
        client_ice: client.ice().map(str::to_string),
        date: invoice.date(),
        statut: invoice.statut(),
        totals: invoice.totals(),
        details,
    })
}

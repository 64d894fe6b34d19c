//! Request DTOs and JSON mapping helpers.
//!
//! Client and product requests deserialize straight into the domain drafts
//! (the wire shape and the draft shape coincide); invoices need mapping
//! because ids arrive as strings and line snapshots are caller-supplied.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

use factureclair_catalog::ClientId;
use factureclair_core::money::round_display;
use factureclair_core::DomainResult;
use factureclair_invoicing::{InvoiceDraft, InvoiceStatus, LineInput, PriceSnapshot};
use factureclair_store::{InvoiceDetail, InvoiceFilter, InvoiceSummary, LineDetail};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct InvoiceLineRequest {
    pub produit_id: String,
    pub quantite: i64,
    pub prix_unitaire: Decimal,
    pub tva: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct SaveInvoiceRequest {
    pub client_id: String,
    pub date: NaiveDate,
    pub statut: Option<InvoiceStatus>,
    pub produits: Vec<InvoiceLineRequest>,
}

impl SaveInvoiceRequest {
    pub fn into_draft(self) -> DomainResult<InvoiceDraft> {
        let mut lignes = Vec::with_capacity(self.produits.len());
        for ligne in self.produits {
            lignes.push(LineInput {
                produit_id: ligne.produit_id.parse()?,
                quantite: ligne.quantite,
                snapshot: PriceSnapshot {
                    prix_unitaire: ligne.prix_unitaire,
                    tva: ligne.tva,
                },
            });
        }
        Ok(InvoiceDraft {
            client_id: self.client_id.parse()?,
            date: self.date,
            statut: self.statut,
            lignes,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

impl SearchQuery {
    /// A blank search parameter means "no filter".
    pub fn needle(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct InvoiceListQuery {
    pub search: Option<String>,
    pub statut: Option<InvoiceStatus>,
    pub client_id: Option<String>,
    pub date_debut: Option<NaiveDate>,
    pub date_fin: Option<NaiveDate>,
}

impl InvoiceListQuery {
    pub fn into_filter(self) -> DomainResult<InvoiceFilter> {
        let client_id: Option<ClientId> = match self.client_id.as_deref() {
            Some(raw) => Some(raw.parse()?),
            None => None,
        };
        Ok(InvoiceFilter {
            search: self
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            statut: self.statut,
            client_id,
            date_debut: self.date_debut,
            date_fin: self.date_fin,
        })
    }
}

// -------------------------
// Response mapping
// -------------------------

pub fn invoice_summary_to_json(summary: &InvoiceSummary) -> Value {
    json!({
        "id": summary.id,
        "numero": summary.numero,
        "client_id": summary.client_id,
        "client_nom": summary.client_nom,
        "client_email": summary.client_email,
        "date": summary.date,
        "statut": summary.statut,
        "total_ht": round_display(summary.totals.total_ht),
        "total_tva": round_display(summary.totals.total_tva),
        "total_ttc": round_display(summary.totals.total_ttc),
    })
}

pub fn invoice_detail_to_json(detail: &InvoiceDetail) -> Value {
    json!({
        "id": detail.id,
        "numero": detail.numero,
        "client_id": detail.client_id,
        "client_nom": detail.client_nom,
        "client_email": detail.client_email,
        "client_telephone": detail.client_telephone,
        "client_adresse": detail.client_adresse,
        "client_ice": detail.client_ice,
        "date": detail.date,
        "statut": detail.statut,
        "total_ht": round_display(detail.totals.total_ht),
        "total_tva": round_display(detail.totals.total_tva),
        "total_ttc": round_display(detail.totals.total_ttc),
        "details": detail.details.iter().map(line_detail_to_json).collect::<Vec<_>>(),
    })
}

fn line_detail_to_json(ligne: &LineDetail) -> Value {
    json!({
        "produit_id": ligne.produit_id,
        "produit_nom": ligne.produit_nom,
        "produit_description": ligne.produit_description,
        "quantite": ligne.quantite,
        "prix_unitaire": ligne.prix_unitaire,
        "tva": ligne.tva,
    })
}

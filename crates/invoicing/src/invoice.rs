use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use factureclair_catalog::ClientId;
use factureclair_core::{impl_uuid_newtype, DomainError, DomainResult, Entity};

use crate::lines::{compute_totals, InvoiceTotals, LineInput};

/// Invoice identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(Uuid);

impl_uuid_newtype!(InvoiceId, "InvoiceId");

/// Invoice payment status.
///
/// Transitions are unrestricted user-driven writes: any status may move to
/// any other (including `Payée` back to `Brouillon`). The system deliberately
/// imposes no workflow ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InvoiceStatus {
    #[default]
    Brouillon,
    #[serde(rename = "Payée")]
    Payee,
    #[serde(rename = "Non payée")]
    NonPayee,
}

impl core::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            InvoiceStatus::Brouillon => "Brouillon",
            InvoiceStatus::Payee => "Payée",
            InvoiceStatus::NonPayee => "Non payée",
        };
        f.write_str(s)
    }
}

/// One persisted invoice line: product reference, quantity, and the price
/// snapshot captured when the line was added.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub produit_id: factureclair_catalog::ProductId,
    pub quantite: i64,
    pub prix_unitaire: rust_decimal::Decimal,
    pub tva: rust_decimal::Decimal,
}

impl InvoiceLine {
    fn from_input(input: &LineInput) -> Self {
        Self {
            produit_id: input.produit_id,
            quantite: input.quantite,
            prix_unitaire: input.snapshot.prix_unitaire,
            tva: input.snapshot.tva,
        }
    }
}

/// Caller-supplied invoice fields for Create and Update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    pub client_id: ClientId,
    pub date: NaiveDate,
    /// `None` means `Brouillon` (creation default).
    pub statut: Option<InvoiceStatus>,
    pub lignes: Vec<LineInput>,
}

impl InvoiceDraft {
    fn validate(&self) -> DomainResult<()> {
        if self.lignes.is_empty() {
            return Err(DomainError::validation("au moins un produit est requis"));
        }
        Ok(())
    }
}

/// Entity: an invoice and its owned line items.
///
/// The unit of consistency: header and lines are created, replaced, and
/// deleted together. Totals are always derived from the lines, never
/// authored independently, and `numero` is immutable once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    id: InvoiceId,
    numero: String,
    client_id: ClientId,
    date: NaiveDate,
    statut: InvoiceStatus,
    totals: InvoiceTotals,
    lignes: Vec<InvoiceLine>,
}

impl Invoice {
    /// Build a new invoice from a validated draft and a freshly assigned
    /// number. Computes totals from the lines; rejects an empty line list.
    pub fn create(id: InvoiceId, numero: String, draft: InvoiceDraft) -> DomainResult<Self> {
        draft.validate()?;
        let (_, totals) = compute_totals(&draft.lignes)?;
        Ok(Self {
            id,
            numero,
            client_id: draft.client_id,
            date: draft.date,
            statut: draft.statut.unwrap_or_default(),
            totals,
            lignes: draft.lignes.iter().map(InvoiceLine::from_input).collect(),
        })
    }

    /// Full-replace update: same validation as creation, the entire line set
    /// is swapped for the draft's lines, and totals are recomputed. `numero`
    /// is untouched.
    pub fn replace(&mut self, draft: InvoiceDraft) -> DomainResult<()> {
        draft.validate()?;
        let (_, totals) = compute_totals(&draft.lignes)?;
        self.client_id = draft.client_id;
        self.date = draft.date;
        self.statut = draft.statut.unwrap_or(self.statut);
        self.totals = totals;
        self.lignes = draft.lignes.iter().map(InvoiceLine::from_input).collect();
        Ok(())
    }

    pub fn id_typed(&self) -> InvoiceId {
        self.id
    }

    pub fn numero(&self) -> &str {
        &self.numero
    }

    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn statut(&self) -> InvoiceStatus {
        self.statut
    }

    pub fn totals(&self) -> InvoiceTotals {
        self.totals
    }

    pub fn lignes(&self) -> &[InvoiceLine] {
        &self.lignes
    }

    /// Whether this invoice counts toward revenue statistics.
    pub fn is_revenue(&self) -> bool {
        self.statut == InvoiceStatus::Payee
    }
}

impl Entity for Invoice {
    type Id = InvoiceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

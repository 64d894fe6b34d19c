//! Line-item calculator.
//!
//! Pure functions from line inputs to per-line and aggregate totals. All
//! arithmetic is exact decimal; nothing here rounds. Presentation rounding
//! is the caller's concern (`factureclair_core::money::round_display`).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use factureclair_catalog::ProductId;
use factureclair_core::{DomainError, DomainResult, ValueObject};

/// Unit price and tax rate captured when a line is added to an invoice.
///
/// Deliberately a snapshot, not a live catalog reference: later product edits
/// must not alter historical invoices.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub prix_unitaire: Decimal,
    /// Tax rate in percent, `[0, 100]`.
    pub tva: Decimal,
}

impl ValueObject for PriceSnapshot {}

/// One line-item input: product reference, quantity, snapshotted pricing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineInput {
    pub produit_id: ProductId,
    pub quantite: i64,
    pub snapshot: PriceSnapshot,
}

impl LineInput {
    fn validate(&self) -> DomainResult<()> {
        if self.quantite <= 0 {
            return Err(DomainError::validation("la quantité doit être positive"));
        }
        if self.snapshot.prix_unitaire < Decimal::ZERO {
            return Err(DomainError::validation(
                "le prix unitaire doit être positif ou nul",
            ));
        }
        if self.snapshot.tva < Decimal::ZERO || self.snapshot.tva > dec!(100) {
            return Err(DomainError::validation(
                "le taux de TVA doit être compris entre 0 et 100",
            ));
        }
        Ok(())
    }
}

/// Exact per-line amounts: pre-tax (HT), tax (TVA), tax-inclusive (TTC).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineTotals {
    pub ht: Decimal,
    pub tva: Decimal,
    pub ttc: Decimal,
}

impl ValueObject for LineTotals {}

/// Exact aggregate amounts over an invoice's lines.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub total_ht: Decimal,
    pub total_tva: Decimal,
    pub total_ttc: Decimal,
}

impl ValueObject for InvoiceTotals {}

/// Compute per-line and aggregate totals for an ordered line-item sequence.
///
/// Per line: `ht = quantite × prix_unitaire`, `tva = ht × taux/100`,
/// `ttc = ht + tva`. Aggregates are exact sums of the per-line values.
/// An empty sequence yields all-zero totals; rejecting empty invoices is the
/// aggregate manager's rule, not the calculator's.
pub fn compute_totals(lines: &[LineInput]) -> DomainResult<(Vec<LineTotals>, InvoiceTotals)> {
    let mut per_line = Vec::with_capacity(lines.len());
    let mut totals = InvoiceTotals::default();

    for line in lines {
        line.validate()?;
        let ht = line.snapshot.prix_unitaire * Decimal::from(line.quantite);
        let tva = ht * line.snapshot.tva / dec!(100);
        let ttc = ht + tva;
        totals.total_ht += ht;
        totals.total_tva += tva;
        totals.total_ttc += ttc;
        per_line.push(LineTotals { ht, tva, ttc });
    }

    Ok((per_line, totals))
}

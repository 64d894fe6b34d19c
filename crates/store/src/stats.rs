//! Dashboard statistics.
//!
//! Aggregates computed over a consistent snapshot of the store: record
//! counts, revenue over paid invoices, and a per-month revenue series over a
//! rolling twelve-month window.

use std::collections::BTreeMap;

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use factureclair_core::DomainError;
use factureclair_invoicing::InvoiceStatus;

use crate::error::StoreResult;
use crate::store::MemoryStore;

/// Revenue for one calendar month, keyed `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRevenue {
    pub mois: String,
    pub revenus: Decimal,
}

/// The dashboard read model.
///
/// `factures_payees` and `factures_non_payees` count exactly the invoices in
/// those two statuses; drafts appear only in `total_factures`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_factures: usize,
    pub factures_payees: usize,
    pub factures_non_payees: usize,
    /// Sum of `total_ttc` over paid invoices, all time.
    pub chiffre_affaires: Decimal,
    /// Paid revenue per month over a rolling twelve-month window ending
    /// today, ascending, months without revenue omitted.
    pub revenus_par_mois: Vec<MonthlyRevenue>,
    pub total_clients: usize,
    pub total_produits: usize,
}

impl MemoryStore {
    /// Compute dashboard statistics as of `today`. Taken under one read lock,
    /// so the counts and revenue figures come from the same snapshot.
    pub fn dashboard_stats(&self, today: NaiveDate) -> StoreResult<DashboardStats> {
        let state = self.read()?;

        let mut payees = 0usize;
        let mut non_payees = 0usize;
        let mut chiffre_affaires = Decimal::ZERO;
        let mut by_month: BTreeMap<String, Decimal> = BTreeMap::new();

        let window_start = today
            .checked_sub_months(Months::new(12))
            .ok_or_else(|| DomainError::invariant("date hors calendrier"))?;

        for stored in state.invoices.values() {
            let invoice = &stored.item;
            if invoice.is_revenue() {
                payees += 1;
                chiffre_affaires += invoice.totals().total_ttc;
                if invoice.date() >= window_start {
                    let key = invoice.date().format("%Y-%m").to_string();
                    *by_month.entry(key).or_default() += invoice.totals().total_ttc;
                }
            } else if invoice.statut() == InvoiceStatus::NonPayee {
                non_payees += 1;
            }
        }

        Ok(DashboardStats {
            total_factures: state.invoices.len(),
            factures_payees: payees,
            factures_non_payees: non_payees,
            chiffre_affaires,
            revenus_par_mois: by_month
                .into_iter()
                .map(|(mois, revenus)| MonthlyRevenue { mois, revenus })
                .collect(),
            total_clients: state.clients.len(),
            total_produits: state.products.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use factureclair_catalog::{ClientDraft, ProductDraft};
    use factureclair_invoicing::{InvoiceDraft, LineInput, PriceSnapshot};
    use rust_decimal_macros::dec;

    fn seeded_store() -> (MemoryStore, InvoiceDraft) {
        let store = MemoryStore::new();
        let client = store
            .create_client(ClientDraft {
                nom: "Acme".to_string(),
                email: None,
                telephone: None,
                adresse: None,
                ice: None,
            })
            .unwrap();
        let product = store
            .create_product(ProductDraft {
                nom: "Hosting".to_string(),
                description: None,
                prix: dec!(100),
                tva: Some(dec!(20)),
            })
            .unwrap();
        let draft = InvoiceDraft {
            client_id: client.id_typed(),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            statut: None,
            lignes: vec![LineInput {
                produit_id: product.id_typed(),
                quantite: 1,
                snapshot: PriceSnapshot {
                    prix_unitaire: dec!(100),
                    tva: dec!(20),
                },
            }],
        };
        (store, draft)
    }

    fn dated(draft: &InvoiceDraft, date: NaiveDate, statut: InvoiceStatus) -> InvoiceDraft {
        let mut d = draft.clone();
        d.date = date;
        d.statut = Some(statut);
        d
    }

    #[test]
    fn empty_store_yields_zero_stats() {
        let store = MemoryStore::new();
        let stats = store
            .dashboard_stats(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
            .unwrap();
        assert_eq!(stats.total_factures, 0);
        assert_eq!(stats.chiffre_affaires, Decimal::ZERO);
        assert!(stats.revenus_par_mois.is_empty());
    }

    #[test]
    fn counts_and_revenue_split_by_status() {
        let (store, draft) = seeded_store();
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        store
            .create_invoice(dated(&draft, today, InvoiceStatus::Payee))
            .unwrap();
        store
            .create_invoice(dated(&draft, today, InvoiceStatus::NonPayee))
            .unwrap();
        store
            .create_invoice(dated(&draft, today, InvoiceStatus::Brouillon))
            .unwrap();

        let stats = store.dashboard_stats(today).unwrap();
        assert_eq!(stats.total_factures, 3);
        assert_eq!(stats.factures_payees, 1);
        assert_eq!(stats.factures_non_payees, 1);
        assert_eq!(stats.chiffre_affaires, dec!(120.00));
        assert_eq!(stats.total_clients, 1);
        assert_eq!(stats.total_produits, 1);
    }

    #[test]
    fn brouillon_counts_in_neither_payment_bucket() {
        let (store, draft) = seeded_store();
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        store
            .create_invoice(dated(&draft, today, InvoiceStatus::Brouillon))
            .unwrap();

        let stats = store.dashboard_stats(today).unwrap();
        assert_eq!(stats.total_factures, 1);
        assert_eq!(stats.factures_payees, 0);
        assert_eq!(stats.factures_non_payees, 0);
        assert_eq!(stats.chiffre_affaires, Decimal::ZERO);
    }

    #[test]
    fn monthly_series_uses_rolling_twelve_month_window_ascending() {
        let (store, draft) = seeded_store();
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

        // In window: anything dated on or after 2023-06-15.
        for date in [
            NaiveDate::from_ymd_opt(2023, 6, 20).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 25).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        ] {
            store
                .create_invoice(dated(&draft, date, InvoiceStatus::Payee))
                .unwrap();
        }
        // Out of window, still in chiffre_affaires.
        store
            .create_invoice(dated(
                &draft,
                NaiveDate::from_ymd_opt(2023, 6, 10).unwrap(),
                InvoiceStatus::Payee,
            ))
            .unwrap();
        // Unpaid never counts as revenue.
        store
            .create_invoice(dated(&draft, today, InvoiceStatus::NonPayee))
            .unwrap();

        let stats = store.dashboard_stats(today).unwrap();
        assert_eq!(stats.chiffre_affaires, dec!(600.00));

        let mois: Vec<&str> = stats.revenus_par_mois.iter().map(|m| m.mois.as_str()).collect();
        assert_eq!(mois, ["2023-06", "2024-01", "2024-06"]);
        // 2023-06 keeps only the invoice inside the rolling window.
        assert_eq!(stats.revenus_par_mois[0].revenus, dec!(120.00));
        assert_eq!(stats.revenus_par_mois[1].revenus, dec!(240.00));
    }
}

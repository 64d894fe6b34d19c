//! Client and product operations.
//!
//! CRUD over the two catalog entities, plus the referential guards that keep
//! them consistent with the invoices that reference them: a client with
//! invoices cannot be deleted, nor can a product that appears on any line.

use factureclair_catalog::{Client, ClientDraft, ClientId, Product, ProductDraft, ProductId};
use factureclair_core::DomainError;

use crate::error::StoreResult;
use crate::store::{MemoryStore, Stored, StoreState};

impl MemoryStore {
    /// Create a client. Rejects a duplicate email (soft uniqueness, checked
    /// at creation only).
    pub fn create_client(&self, draft: ClientDraft) -> StoreResult<Client> {
        let mut state = self.write()?;
        if let Some(email) = draft.email.as_deref() {
            let taken = state
                .clients
                .values()
                .any(|s| s.item.email().is_some_and(|e| e.eq_ignore_ascii_case(email)));
            if taken {
                return Err(DomainError::validation("un client avec cet email existe déjà").into());
            }
        }
        let client = Client::new(ClientId::new(), draft)?;
        let seq = state.next_seq();
        state
            .clients
            .insert(client.id_typed(), Stored { item: client.clone(), seq });
        tracing::info!(client_id = %client.id_typed(), "client créé");
        Ok(client)
    }

    pub fn get_client(&self, id: ClientId) -> StoreResult<Client> {
        let state = self.read()?;
        let stored = state.clients.get(&id).ok_or(DomainError::NotFound)?;
        Ok(stored.item.clone())
    }

    /// List clients, most recent first, optionally filtered by a
    /// case-insensitive substring over nom and email.
    pub fn list_clients(&self, search: Option<&str>) -> StoreResult<Vec<Client>> {
        let state = self.read()?;
        let mut matched: Vec<&Stored<Client>> = state
            .clients
            .values()
            .filter(|s| search.is_none_or(|needle| s.item.matches_search(needle)))
            .collect();
        matched.sort_by(|a, b| b.seq.cmp(&a.seq));
        Ok(matched.into_iter().map(|s| s.item.clone()).collect())
    }

    /// Full-overwrite update. The email uniqueness check does not apply here.
    pub fn update_client(&self, id: ClientId, draft: ClientDraft) -> StoreResult<Client> {
        let mut state = self.write()?;
        let stored = state.clients.get_mut(&id).ok_or(DomainError::NotFound)?;
        stored.item.update(draft)?;
        Ok(stored.item.clone())
    }

    /// Delete a client. Refused while any invoice references it.
    pub fn delete_client(&self, id: ClientId) -> StoreResult<()> {
        let mut state = self.write()?;
        if !state.clients.contains_key(&id) {
            return Err(DomainError::NotFound.into());
        }
        let referenced = invoice_count_for(&state, id);
        if referenced > 0 {
            return Err(DomainError::conflict(
                "impossible de supprimer un client avec des factures associées",
            )
            .into());
        }
        state.clients.remove(&id);
        tracing::info!(client_id = %id, "client supprimé");
        Ok(())
    }

    /// How many invoices reference this client.
    pub fn invoice_count_for_client(&self, id: ClientId) -> StoreResult<usize> {
        let state = self.read()?;
        Ok(invoice_count_for(&state, id))
    }

    pub fn create_product(&self, draft: ProductDraft) -> StoreResult<Product> {
        let mut state = self.write()?;
        let product = Product::new(ProductId::new(), draft)?;
        let seq = state.next_seq();
        state
            .products
            .insert(product.id_typed(), Stored { item: product.clone(), seq });
        tracing::info!(produit_id = %product.id_typed(), "produit créé");
        Ok(product)
    }

    pub fn get_product(&self, id: ProductId) -> StoreResult<Product> {
        let state = self.read()?;
        let stored = state.products.get(&id).ok_or(DomainError::NotFound)?;
        Ok(stored.item.clone())
    }

    /// List products, most recent first, optionally filtered by a
    /// case-insensitive substring over nom and description.
    pub fn list_products(&self, search: Option<&str>) -> StoreResult<Vec<Product>> {
        let state = self.read()?;
        let mut matched: Vec<&Stored<Product>> = state
            .products
            .values()
            .filter(|s| search.is_none_or(|needle| s.item.matches_search(needle)))
            .collect();
        matched.sort_by(|a, b| b.seq.cmp(&a.seq));
        Ok(matched.into_iter().map(|s| s.item.clone()).collect())
    }

    /// Full-overwrite update. Existing invoice lines keep their snapshots and
    /// are not touched by catalog price edits.
    pub fn update_product(&self, id: ProductId, draft: ProductDraft) -> StoreResult<Product> {
        let mut state = self.write()?;
        let stored = state.products.get_mut(&id).ok_or(DomainError::NotFound)?;
        stored.item.update(draft)?;
        Ok(stored.item.clone())
    }

    /// Delete a product. Refused while any invoice line references it.
    pub fn delete_product(&self, id: ProductId) -> StoreResult<()> {
        let mut state = self.write()?;
        if !state.products.contains_key(&id) {
            return Err(DomainError::NotFound.into());
        }
        let referenced = line_count_for(&state, id);
        if referenced > 0 {
            return Err(DomainError::conflict(
                "impossible de supprimer un produit utilisé dans des factures",
            )
            .into());
        }
        state.products.remove(&id);
        tracing::info!(produit_id = %id, "produit supprimé");
        Ok(())
    }

    /// How many invoice lines reference this product.
    pub fn line_count_for_product(&self, id: ProductId) -> StoreResult<usize> {
        let state = self.read()?;
        Ok(line_count_for(&state, id))
    }
}

fn invoice_count_for(state: &StoreState, id: ClientId) -> usize {
    state
        .invoices
        .values()
        .filter(|s| s.item.client_id() == id)
        .count()
}

fn line_count_for(state: &StoreState, id: ProductId) -> usize {
    state
        .invoices
        .values()
        .flat_map(|s| s.item.lignes())
        .filter(|l| l.produit_id == id)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use factureclair_core::DomainError;
    use rust_decimal_macros::dec;

    use crate::error::StoreError;

    fn client_draft(nom: &str, email: Option<&str>) -> ClientDraft {
        ClientDraft {
            nom: nom.to_string(),
            email: email.map(str::to_string),
            telephone: None,
            adresse: None,
            ice: None,
        }
    }

    fn product_draft(nom: &str) -> ProductDraft {
        ProductDraft {
            nom: nom.to_string(),
            description: None,
            prix: dec!(10),
            tva: None,
        }
    }

    fn domain_err(err: StoreError) -> DomainError {
        match err {
            StoreError::Domain(e) => e,
            other => panic!("expected domain error, got {other:?}"),
        }
    }

    #[test]
    fn create_and_get_client() {
        let store = MemoryStore::new();
        let created = store
            .create_client(client_draft("Acme", Some("a@acme.ma")))
            .unwrap();
        let fetched = store.get_client(created.id_typed()).unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn duplicate_email_is_rejected_at_creation() {
        let store = MemoryStore::new();
        store
            .create_client(client_draft("Acme", Some("a@acme.ma")))
            .unwrap();
        let err = store
            .create_client(client_draft("Other", Some("A@ACME.MA")))
            .unwrap_err();
        match domain_err(err) {
            DomainError::Validation(_) => {}
            other => panic!("expected Validation, got {other:?}"),
        }
        // Two clients without email are fine.
        store.create_client(client_draft("NoMail1", None)).unwrap();
        store.create_client(client_draft("NoMail2", None)).unwrap();
    }

    #[test]
    fn duplicate_email_is_not_checked_on_update() {
        let store = MemoryStore::new();
        store
            .create_client(client_draft("Acme", Some("a@acme.ma")))
            .unwrap();
        let other = store.create_client(client_draft("Other", None)).unwrap();
        store
            .update_client(other.id_typed(), client_draft("Other", Some("a@acme.ma")))
            .unwrap();
    }

    #[test]
    fn list_clients_is_most_recent_first_and_searchable() {
        let store = MemoryStore::new();
        store.create_client(client_draft("Alpha", None)).unwrap();
        store.create_client(client_draft("Beta", None)).unwrap();
        store
            .create_client(client_draft("Alphonse", Some("al@ex.fr")))
            .unwrap();

        let all = store.list_clients(None).unwrap();
        let noms: Vec<&str> = all.iter().map(Client::nom).collect();
        assert_eq!(noms, ["Alphonse", "Beta", "Alpha"]);

        let filtered = store.list_clients(Some("alph")).unwrap();
        let noms: Vec<&str> = filtered.iter().map(Client::nom).collect();
        assert_eq!(noms, ["Alphonse", "Alpha"]);
    }

    #[test]
    fn get_unknown_client_is_not_found() {
        let store = MemoryStore::new();
        let err = store.get_client(ClientId::new()).unwrap_err();
        assert!(matches!(domain_err(err), DomainError::NotFound));
    }

    #[test]
    fn delete_client_without_invoices_succeeds() {
        let store = MemoryStore::new();
        let client = store.create_client(client_draft("Acme", None)).unwrap();
        store.delete_client(client.id_typed()).unwrap();
        let err = store.get_client(client.id_typed()).unwrap_err();
        assert!(matches!(domain_err(err), DomainError::NotFound));
    }

    #[test]
    fn product_crud_roundtrip() {
        let store = MemoryStore::new();
        let product = store.create_product(product_draft("Hosting")).unwrap();
        assert_eq!(store.get_product(product.id_typed()).unwrap().nom(), "Hosting");

        let updated = store
            .update_product(
                product.id_typed(),
                ProductDraft {
                    nom: "Hosting Pro".to_string(),
                    description: Some("offre annuelle".to_string()),
                    prix: dec!(120),
                    tva: Some(dec!(10)),
                },
            )
            .unwrap();
        assert_eq!(updated.prix(), dec!(120));

        store.delete_product(product.id_typed()).unwrap();
        let err = store.get_product(product.id_typed()).unwrap_err();
        assert!(matches!(domain_err(err), DomainError::NotFound));
    }

    #[test]
    fn update_unknown_product_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update_product(ProductId::new(), product_draft("X"))
            .unwrap_err();
        assert!(matches!(domain_err(err), DomainError::NotFound));
    }
}

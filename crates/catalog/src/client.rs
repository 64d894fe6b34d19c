use serde::{Deserialize, Serialize};
use uuid::Uuid;

use factureclair_core::{impl_uuid_newtype, DomainError, DomainResult, Entity};

/// Client identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(Uuid);

impl_uuid_newtype!(ClientId, "ClientId");

/// Caller-supplied client fields, validated before they become a [`Client`].
///
/// `nom` is required and must be non-empty after trimming; the contact fields
/// are optional. `ice` is the client's tax-registration identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDraft {
    pub nom: String,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub adresse: Option<String>,
    pub ice: Option<String>,
}

impl ClientDraft {
    fn validate(&self) -> DomainResult<()> {
        if self.nom.trim().is_empty() {
            return Err(DomainError::validation("le nom est requis"));
        }
        Ok(())
    }
}

/// Entity: a billable client.
///
/// Email uniqueness across clients is a soft constraint enforced by the store
/// at creation time, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    id: ClientId,
    nom: String,
    email: Option<String>,
    telephone: Option<String>,
    adresse: Option<String>,
    ice: Option<String>,
}

impl Client {
    pub fn new(id: ClientId, draft: ClientDraft) -> DomainResult<Self> {
        draft.validate()?;
        Ok(Self {
            id,
            nom: draft.nom,
            email: draft.email,
            telephone: draft.telephone,
            adresse: draft.adresse,
            ice: draft.ice,
        })
    }

    /// Replace all mutable fields with the draft's values (full overwrite,
    /// same validation as creation). The id never changes.
    pub fn update(&mut self, draft: ClientDraft) -> DomainResult<()> {
        draft.validate()?;
        self.nom = draft.nom;
        self.email = draft.email;
        self.telephone = draft.telephone;
        self.adresse = draft.adresse;
        self.ice = draft.ice;
        Ok(())
    }

    pub fn id_typed(&self) -> ClientId {
        self.id
    }

    pub fn nom(&self) -> &str {
        &self.nom
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn telephone(&self) -> Option<&str> {
        self.telephone.as_deref()
    }

    pub fn adresse(&self) -> Option<&str> {
        self.adresse.as_deref()
    }

    pub fn ice(&self) -> Option<&str> {
        self.ice.as_deref()
    }

    /// Case-insensitive substring match over nom and email, used by list
    /// filtering in the store.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        if self.nom.to_lowercase().contains(&needle) {
            return true;
        }
        self.email
            .as_deref()
            .is_some_and(|e| e.to_lowercase().contains(&needle))
    }
}

impl Entity for Client {
    type Id = ClientId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(nom: &str) -> ClientDraft {
        ClientDraft {
            nom: nom.to_string(),
            email: None,
            telephone: None,
            adresse: None,
            ice: None,
        }
    }

    #[test]
    fn new_client_keeps_fields() {
        let d = ClientDraft {
            nom: "Acme SARL".to_string(),
            email: Some("contact@acme.ma".to_string()),
            telephone: Some("+212600000000".to_string()),
            adresse: Some("12 Rue Centrale".to_string()),
            ice: Some("001234567000089".to_string()),
        };
        let client = Client::new(ClientId::new(), d.clone()).unwrap();
        assert_eq!(client.nom(), "Acme SARL");
        assert_eq!(client.email(), Some("contact@acme.ma"));
        assert_eq!(client.ice(), Some("001234567000089"));
    }

    #[test]
    fn new_client_rejects_empty_name() {
        let err = Client::new(ClientId::new(), draft("   ")).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn update_replaces_all_fields_but_not_id() {
        let id = ClientId::new();
        let mut client = Client::new(id, draft("Old Name")).unwrap();
        client
            .update(ClientDraft {
                nom: "New Name".to_string(),
                email: Some("new@example.com".to_string()),
                telephone: None,
                adresse: None,
                ice: None,
            })
            .unwrap();
        assert_eq!(client.id_typed(), id);
        assert_eq!(client.nom(), "New Name");
        assert_eq!(client.email(), Some("new@example.com"));
        assert_eq!(client.telephone(), None);
    }

    #[test]
    fn update_rejects_empty_name_and_leaves_state_untouched() {
        let mut client = Client::new(ClientId::new(), draft("Kept")).unwrap();
        let err = client.update(draft("")).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            other => panic!("expected Validation error, got {other:?}"),
        }
        assert_eq!(client.nom(), "Kept");
    }

    #[test]
    fn search_matches_name_and_email_case_insensitively() {
        let mut d = draft("Maison Dupont");
        d.email = Some("Contact@Dupont.fr".to_string());
        let client = Client::new(ClientId::new(), d).unwrap();
        assert!(client.matches_search("dupont"));
        assert!(client.matches_search("MAISON"));
        assert!(client.matches_search("contact@"));
        assert!(!client.matches_search("durand"));
    }
}

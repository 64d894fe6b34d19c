use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use factureclair_core::{impl_uuid_newtype, DomainError, DomainResult, Entity};

/// Product identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl_uuid_newtype!(ProductId, "ProductId");

/// Default tax rate (percent) applied when a draft carries none.
pub const DEFAULT_TVA: Decimal = dec!(20);

/// Caller-supplied product fields, validated before they become a [`Product`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub nom: String,
    pub description: Option<String>,
    pub prix: Decimal,
    /// Tax rate in percent; `None` means [`DEFAULT_TVA`].
    pub tva: Option<Decimal>,
}

impl ProductDraft {
    fn validate(&self) -> DomainResult<Decimal> {
        if self.nom.trim().is_empty() {
            return Err(DomainError::validation("le nom est requis"));
        }
        if self.prix < Decimal::ZERO {
            return Err(DomainError::validation("le prix doit être positif ou nul"));
        }
        let tva = self.tva.unwrap_or(DEFAULT_TVA);
        if tva < Decimal::ZERO || tva > dec!(100) {
            return Err(DomainError::validation(
                "le taux de TVA doit être compris entre 0 et 100",
            ));
        }
        Ok(tva)
    }
}

/// Entity: a catalog product.
///
/// `prix` and `tva` are the *current* catalog values; invoices snapshot them
/// per line at creation time and are unaffected by later edits here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    nom: String,
    description: Option<String>,
    prix: Decimal,
    tva: Decimal,
}

impl Product {
    pub fn new(id: ProductId, draft: ProductDraft) -> DomainResult<Self> {
        let tva = draft.validate()?;
        Ok(Self {
            id,
            nom: draft.nom,
            description: draft.description,
            prix: draft.prix,
            tva,
        })
    }

    /// Replace all mutable fields with the draft's values (full overwrite,
    /// same validation as creation). The id never changes.
    pub fn update(&mut self, draft: ProductDraft) -> DomainResult<()> {
        let tva = draft.validate()?;
        self.nom = draft.nom;
        self.description = draft.description;
        self.prix = draft.prix;
        self.tva = tva;
        Ok(())
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn nom(&self) -> &str {
        &self.nom
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn prix(&self) -> Decimal {
        self.prix
    }

    pub fn tva(&self) -> Decimal {
        self.tva
    }

    /// Case-insensitive substring match over nom and description, used by
    /// list filtering in the store.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        if self.nom.to_lowercase().contains(&needle) {
            return true;
        }
        self.description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

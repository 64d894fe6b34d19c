use axum::Router;

pub mod clients;
pub mod dashboard;
pub mod factures;
pub mod produits;
pub mod system;

/// Router for all `/api` endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/clients", clients::router())
        .nest("/produits", produits::router())
        .nest("/factures", factures::router())
        .nest("/dashboard", dashboard::router())
}

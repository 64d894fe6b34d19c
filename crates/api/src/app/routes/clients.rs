use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use factureclair_catalog::{ClientDraft, ClientId};
use factureclair_store::MemoryStore;

use crate::app::errors;
use crate::app::dto::SearchQuery;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_client).get(list_clients))
        .route("/:id", get(get_client).put(update_client).delete(delete_client))
}

pub async fn create_client(
    Extension(store): Extension<Arc<MemoryStore>>,
    Json(body): Json<ClientDraft>,
) -> axum::response::Response {
    match store.create_client(body) {
        Ok(client) => (StatusCode::CREATED, Json(client)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_clients(
    Extension(store): Extension<Arc<MemoryStore>>,
    Query(query): Query<SearchQuery>,
) -> axum::response::Response {
    match store.list_clients(query.needle()) {
        Ok(clients) => (StatusCode::OK, Json(clients)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_client(
    Extension(store): Extension<Arc<MemoryStore>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ClientId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(factureclair_store::StoreError::Domain(e)),
    };
    match store.get_client(id) {
        Ok(client) => (StatusCode::OK, Json(client)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_client(
    Extension(store): Extension<Arc<MemoryStore>>,
    Path(id): Path<String>,
    Json(body): Json<ClientDraft>,
) -> axum::response::Response {
    let id: ClientId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(factureclair_store::StoreError::Domain(e)),
    };
    match store.update_client(id, body) {
        Ok(client) => (StatusCode::OK, Json(client)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_client(
    Extension(store): Extension<Arc<MemoryStore>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ClientId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(factureclair_store::StoreError::Domain(e)),
    };
    match store.delete_client(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

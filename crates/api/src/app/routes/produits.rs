use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use factureclair_catalog::{ProductDraft, ProductId};
use factureclair_store::MemoryStore;

use crate::app::errors;
use crate::app::dto::SearchQuery;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

pub async fn create_product(
    Extension(store): Extension<Arc<MemoryStore>>,
    Json(body): Json<ProductDraft>,
) -> axum::response::Response {
    match store.create_product(body) {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_products(
    Extension(store): Extension<Arc<MemoryStore>>,
    Query(query): Query<SearchQuery>,
) -> axum::response::Response {
    match store.list_products(query.needle()) {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(store): Extension<Arc<MemoryStore>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(factureclair_store::StoreError::Domain(e)),
    };
    match store.get_product(id) {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(store): Extension<Arc<MemoryStore>>,
    Path(id): Path<String>,
    Json(body): Json<ProductDraft>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(factureclair_store::StoreError::Domain(e)),
    };
    match store.update_product(id, body) {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(store): Extension<Arc<MemoryStore>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(factureclair_store::StoreError::Domain(e)),
    };
    match store.delete_product(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

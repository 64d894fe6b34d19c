use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use factureclair_invoicing::InvoiceId;
use factureclair_store::{MemoryStore, StoreError};

use crate::app::dto::{self, InvoiceListQuery, SaveInvoiceRequest};
use crate::app::errors;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_invoice).get(list_invoices))
        .route(
            "/:id",
            get(get_invoice).put(update_invoice).delete(delete_invoice),
        )
}

pub async fn create_invoice(
    Extension(store): Extension<Arc<MemoryStore>>,
    Json(body): Json<SaveInvoiceRequest>,
) -> axum::response::Response {
    let draft = match body.into_draft() {
        Ok(d) => d,
        Err(e) => return errors::store_error_to_response(StoreError::Domain(e)),
    };
    match store.create_invoice(draft) {
        Ok(detail) => {
            (StatusCode::CREATED, Json(dto::invoice_detail_to_json(&detail))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_invoices(
    Extension(store): Extension<Arc<MemoryStore>>,
    Query(query): Query<InvoiceListQuery>,
) -> axum::response::Response {
    let filter = match query.into_filter() {
        Ok(f) => f,
        Err(e) => return errors::store_error_to_response(StoreError::Domain(e)),
    };
    match store.list_invoices(&filter) {
        Ok(summaries) => {
            let items: Vec<_> = summaries.iter().map(dto::invoice_summary_to_json).collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_invoice(
    Extension(store): Extension<Arc<MemoryStore>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: InvoiceId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(StoreError::Domain(e)),
    };
    match store.get_invoice(id) {
        Ok(detail) => (StatusCode::OK, Json(dto::invoice_detail_to_json(&detail))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_invoice(
    Extension(store): Extension<Arc<MemoryStore>>,
    Path(id): Path<String>,
    Json(body): Json<SaveInvoiceRequest>,
) -> axum::response::Response {
    let id: InvoiceId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(StoreError::Domain(e)),
    };
    let draft = match body.into_draft() {
        Ok(d) => d,
        Err(e) => return errors::store_error_to_response(StoreError::Domain(e)),
    };
    match store.update_invoice(id, draft) {
        Ok(detail) => (StatusCode::OK, Json(dto::invoice_detail_to_json(&detail))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_invoice(
    Extension(store): Extension<Arc<MemoryStore>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: InvoiceId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(StoreError::Domain(e)),
    };
    match store.delete_invoice(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

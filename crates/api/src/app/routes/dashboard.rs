use std::sync::Arc;

use axum::{
    extract::Extension, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use chrono::Utc;

use factureclair_store::MemoryStore;

use crate::app::errors;

pub fn router() -> Router {
    Router::new().route("/", get(stats))
}

pub async fn stats(Extension(store): Extension<Arc<MemoryStore>>) -> axum::response::Response {
    match store.dashboard_stats(Utc::now().date_naive()) {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

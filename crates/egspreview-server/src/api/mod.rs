mod preview;

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use egspreview_store::ProductCatalog;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::{request_id, RequestId};

/// Shared, read-only request state: the product catalog (which owns the
/// outbound connection pool and relay session binding).
pub struct AppState<C> {
    pub catalog: Arc<C>,
}

impl<C> AppState<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ResponseMeta {
    fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    relay_session: Option<String>,
}

pub fn build_app<C: ProductCatalog>(state: AppState<C>) -> Router {
    Router::new()
        .route("/health", get(health::<C>))
        .route("/{locale}/p/{slug}", get(preview::get_store_preview::<C>))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}

async fn health<C: ProductCatalog>(
    State(state): State<AppState<C>>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: HealthData {
                status: "ok",
                relay_session: state.catalog.session_name().map(str::to_owned),
            },
            meta: ResponseMeta::new(req_id.0),
        }),
    )
}

#[cfg(test)]
mod tests;

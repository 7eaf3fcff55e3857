//! HTTP API
//!
//! Router-per-resource, merged here. Handlers return `AppResult<Json<T>>`;
//! errors convert to the shared response envelope with a mapped status.

pub mod auth;
pub mod cart;
pub mod products;

use crate::core::ServerState;
use axum::{Json, Router, routing::get};
use shared::ApiResponse;

pub fn create_router(state: ServerState) -> Router {
    Router::new()
        .merge(products::router())
        .merge(cart::router())
        .merge(auth::router())
        .route("/api/health", get(health))
        .with_state(state)
}

async fn health() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::success("ok"))
}

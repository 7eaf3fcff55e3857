//! Cart and checkout API

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cart", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create_session))
        .route("/{session}", get(handler::view).delete(handler::clear))
        .route("/{session}/items", post(handler::add_item))
        .route("/{session}/items/{line}", patch(handler::update_quantity))
        .route(
            "/{session}/coupon",
            post(handler::apply_coupon).delete(handler::remove_coupon),
        )
        .route("/{session}/rappel", post(handler::toggle_rappel))
        .route(
            "/{session}/cross-sell",
            get(handler::cross_sell_offers).post(handler::accept_cross_sell),
        )
        .route("/{session}/totals", get(handler::totals))
        .route("/{session}/checkout", post(handler::checkout))
}

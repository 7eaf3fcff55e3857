//! Cart and checkout handlers
//!
//! Session state lives in the server's DashMap registry. Handlers that
//! need both the store (async) and the session (locked) read what they
//! need, release the lock, await, then re-acquire, so a shard lock is
//! never held across an await point. Fallible multi-step operations work on a
//! clone and write back only on success, so a failed request leaves the
//! session untouched.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::CartSession;
use crate::core::ServerState;
use crate::marketing::cross_sell::{self, BundleChoice, LaminateOffer};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::ApiResponse;
use shared::models::{Order, ShippingMethod};
use shared::order::{CartLine, LineConfig, TotalsBreakdown};

#[derive(Deserialize, Default)]
pub struct CreateSessionRequest {
    /// Bind the session to an authenticated client
    pub client_email: Option<String>,
}

#[derive(Serialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
}

/// POST /api/cart - open a cart session
pub async fn create_session(
    State(state): State<ServerState>,
    body: Option<Json<CreateSessionRequest>>,
) -> AppResult<Json<SessionCreated>> {
    let req = body.map(|Json(r)| r).unwrap_or_default();

    let session = match req.client_email {
        Some(email) => {
            state
                .clients
                .find_by_email(&email)
                .await?
                .ok_or_else(|| AppError::new(ErrorCode::ClientNotFound))?;
            CartSession::for_client(email)
        }
        None => CartSession::new(),
    };

    let session_id = session.session_id;
    state.sessions.insert(session_id, session);
    Ok(Json(SessionCreated { session_id }))
}

#[derive(Serialize)]
pub struct CartView {
    pub session_id: Uuid,
    pub lines: Vec<CartLine>,
    pub subtotal: Decimal,
    pub coupon_code: Option<String>,
    pub redeem_rappel: bool,
}

/// GET /api/cart/:session - current cart contents
pub async fn view(
    State(state): State<ServerState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<CartView>> {
    let session = state
        .sessions
        .get(&session_id)
        .ok_or_else(|| AppError::new(ErrorCode::SessionNotFound))?;

    Ok(Json(CartView {
        session_id,
        lines: session.lines().to_vec(),
        subtotal: session.subtotal(),
        coupon_code: session.applied_coupon().map(|c| c.code.clone()),
        redeem_rappel: session.redeem_rappel(),
    }))
}

#[derive(Deserialize)]
pub struct AddItemRequest {
    pub reference: String,
    pub quantity: i32,
    #[serde(default)]
    pub config: LineConfig,
}

/// POST /api/cart/:session/items - add a product to the cart
pub async fn add_item(
    State(state): State<ServerState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<AddItemRequest>,
) -> AppResult<Json<CartLine>> {
    let product = state
        .catalog
        .find_by_reference(&req.reference)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;
    let client = state.session_client(session_id).await?;

    let mut session = state
        .sessions
        .get_mut(&session_id)
        .ok_or_else(|| AppError::new(ErrorCode::SessionNotFound))?;
    let line = session
        .add_item(&product, client.as_ref(), req.quantity, req.config)?
        .clone();
    Ok(Json(line))
}

#[derive(Deserialize)]
pub struct QuantityDelta {
    pub delta: i32,
}

/// PATCH /api/cart/:session/items/:line - adjust quantity by a delta
pub async fn update_quantity(
    State(state): State<ServerState>,
    Path((session_id, line_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<QuantityDelta>,
) -> AppResult<Json<ApiResponse<()>>> {
    let mut session = state
        .sessions
        .get_mut(&session_id)
        .ok_or_else(|| AppError::new(ErrorCode::SessionNotFound))?;
    session.update_quantity(line_id, req.delta)?;
    Ok(Json(ApiResponse::ok()))
}

/// DELETE /api/cart/:session - empty the cart
pub async fn clear(
    State(state): State<ServerState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    let mut session = state
        .sessions
        .get_mut(&session_id)
        .ok_or_else(|| AppError::new(ErrorCode::SessionNotFound))?;
    session.clear();
    Ok(Json(ApiResponse::ok()))
}

#[derive(Deserialize)]
pub struct CouponRequest {
    pub code: String,
}

#[derive(Serialize)]
pub struct CouponApplied {
    pub code: String,
    pub discount: Decimal,
}

/// POST /api/cart/:session/coupon - validate and apply a promotional code
pub async fn apply_coupon(
    State(state): State<ServerState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<CouponRequest>,
) -> AppResult<Json<CouponApplied>> {
    let client = state.require_session_client(session_id).await?;

    let mut session = state
        .sessions
        .get(&session_id)
        .ok_or_else(|| AppError::new(ErrorCode::SessionNotFound))?
        .clone();
    let discount = state
        .checkout
        .apply_coupon(&mut session, &client, &req.code)
        .await?;
    let code = session
        .applied_coupon()
        .map(|c| c.code.clone())
        .unwrap_or_default();
    state.sessions.insert(session_id, session);

    Ok(Json(CouponApplied { code, discount }))
}

/// DELETE /api/cart/:session/coupon - drop the applied coupon
pub async fn remove_coupon(
    State(state): State<ServerState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    let mut session = state
        .sessions
        .get_mut(&session_id)
        .ok_or_else(|| AppError::new(ErrorCode::SessionNotFound))?;
    session.remove_coupon();
    // redemption is gated on the coupon; dropping it drops the opt-in
    session.set_redeem_rappel(false);
    Ok(Json(ApiResponse::ok()))
}

#[derive(Deserialize)]
pub struct RappelRequest {
    pub enable: bool,
}

/// POST /api/cart/:session/rappel - opt in/out of balance redemption
pub async fn toggle_rappel(
    State(state): State<ServerState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<RappelRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let client = state.require_session_client(session_id).await?;

    let mut session = state
        .sessions
        .get_mut(&session_id)
        .ok_or_else(|| AppError::new(ErrorCode::SessionNotFound))?;
    state.checkout.toggle_rappel(&mut session, &client, req.enable)?;
    Ok(Json(ApiResponse::ok()))
}

/// GET /api/cart/:session/cross-sell - laminate offers for cart vinyls
pub async fn cross_sell_offers(
    State(state): State<ServerState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<Vec<LaminateOffer>>> {
    let catalog = state.catalog.list_products().await?;
    let session = state
        .sessions
        .get(&session_id)
        .ok_or_else(|| AppError::new(ErrorCode::SessionNotFound))?;
    Ok(Json(cross_sell::find_offers(&session, &catalog)))
}

/// POST /api/cart/:session/cross-sell - accept a vinyl/laminate pairing
pub async fn accept_cross_sell(
    State(state): State<ServerState>,
    Path(session_id): Path<Uuid>,
    Json(choice): Json<BundleChoice>,
) -> AppResult<Json<ApiResponse<()>>> {
    let laminate = state
        .catalog
        .find_by_reference(&choice.laminate_reference)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::LaminateNotFound))?;

    let mut session = state
        .sessions
        .get_mut(&session_id)
        .ok_or_else(|| AppError::new(ErrorCode::SessionNotFound))?;
    cross_sell::accept_bundle(&mut session, &laminate, &choice)?;
    Ok(Json(ApiResponse::ok()))
}

#[derive(Deserialize)]
pub struct TotalsQuery {
    pub shipping: Option<ShippingMethod>,
}

/// GET /api/cart/:session/totals - full breakdown at the current state
pub async fn totals(
    State(state): State<ServerState>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<TotalsQuery>,
) -> AppResult<Json<TotalsBreakdown>> {
    let client = state.session_client(session_id).await?;
    let session = state
        .sessions
        .get(&session_id)
        .ok_or_else(|| AppError::new(ErrorCode::SessionNotFound))?;

    let method = query.shipping.unwrap_or(ShippingMethod::OwnDelivery);
    Ok(Json(
        state.checkout.compute_totals(&session, client.as_ref(), method),
    ))
}

#[derive(Deserialize)]
pub struct CheckoutRequest {
    pub shipping_method: ShippingMethod,
    pub observations: Option<String>,
}

/// POST /api/cart/:session/checkout - submit the order
pub async fn checkout(
    State(state): State<ServerState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<CheckoutRequest>,
) -> AppResult<Json<Order>> {
    let client = state.require_session_client(session_id).await?;

    let mut session = state
        .sessions
        .get(&session_id)
        .ok_or_else(|| AppError::new(ErrorCode::SessionNotFound))?
        .clone();
    let order = state
        .checkout
        .finalize(&mut session, &client, req.shipping_method, req.observations)
        .await?;
    state.sessions.insert(session_id, session);

    Ok(Json(order))
}

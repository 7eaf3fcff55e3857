//! Authentication handlers

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::cart::CartSession;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::ApiResponse;
use shared::models::{Client, ClientRole};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub session_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: ClientRole,
    pub rappel_accumulated: Decimal,
    pub hide_prices: bool,
}

/// POST /api/auth/login - verify credentials and open a bound cart session
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let client = state
        .clients
        .find_by_username(&req.username)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    let verified = client
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("password verification failed: {e}")))?;
    if !verified {
        return Err(AppError::invalid_credentials());
    }

    let session = CartSession::for_client(client.email.clone());
    let session_id = session.session_id;
    state.sessions.insert(session_id, session);

    tracing::info!(username = %req.username, "client logged in");
    Ok(Json(LoginResponse {
        session_id,
        name: client.name,
        email: client.email,
        role: client.role,
        rappel_accumulated: client.rappel_accumulated,
        hide_prices: client.hide_prices,
    }))
}

#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "invalid email"))]
    pub email: String,
    #[validate(length(min = 3, message = "username must be at least 3 characters"))]
    pub username: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    pub sales_rep: Option<String>,
    pub delegation: Option<String>,
    pub address: Option<String>,
}

/// POST /api/auth/register - create a client account
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    if state.clients.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::new(ErrorCode::ClientEmailExists));
    }

    let password_hash = Client::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))?;

    let client = Client {
        id: Uuid::new_v4(),
        name: req.name,
        email: req.email,
        username: req.username,
        password_hash,
        role: ClientRole::Client,
        rappel_accumulated: Decimal::ZERO,
        custom_prices: Default::default(),
        used_coupons: Default::default(),
        sales_rep: req.sales_rep,
        delegation: req.delegation,
        address: req.address,
        hide_prices: false,
    };
    state.clients.upsert_client(client).await?;

    Ok(Json(ApiResponse::ok()))
}

#[derive(Deserialize)]
pub struct LogoutRequest {
    pub session_id: Uuid,
}

/// POST /api/auth/logout - drop the session (and its cart with it)
pub async fn logout(
    State(state): State<ServerState>,
    Json(req): Json<LogoutRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.sessions.remove(&req.session_id);
    Ok(Json(ApiResponse::ok()))
}

//! Handler functions for authentication-related API endpoints.
//!
//! These functions parse the registration and login bodies, delegate to
//! `auth::service`, and shape the `{token}` responses.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::models::{LoginRequest, RegisterRequest, TokenResponse};
use crate::app::AppState;
use crate::errors::ApiError;

/// POST /register: create a business account and return a session token.
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    let Json(req) = body?;
    let token = state.auth.register(req).await?;
    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

/// POST /login: exchange email and password for a session token.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(req) = body?;
    let token = state.auth.login(req).await?;
    Ok(Json(TokenResponse { token }))
}

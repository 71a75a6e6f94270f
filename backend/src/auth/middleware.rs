//! Middleware for protecting authenticated routes.
//!
//! `require_identity` validates the bearer token, loads the account it names and
//! inserts a [`CurrentAccount`] into the request extensions before the protected
//! handler runs. Any failure short-circuits with the matching error response.

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;

use super::errors::AuthError;
use super::models::CurrentAccount;
use crate::app::AppState;
use crate::errors::ApiError;

/// Extract bearer token from the Authorization header. The scheme must be
/// exactly `Bearer ` followed by a non-empty token.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(|v| v.split(' ').next())
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingToken)
}

pub async fn require_identity(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(req.headers())?.to_owned();
    let account: CurrentAccount = state.auth.resolve(&token).await?;

    req.extensions_mut().insert(account);
    Ok(next.run(req).await)
}

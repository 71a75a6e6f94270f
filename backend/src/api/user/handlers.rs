//! Handler functions for account profile endpoints.

use axum::{Extension, Json};

use crate::auth::CurrentAccount;

/// GET /me: the account resolved by the identity middleware.
pub async fn me(Extension(account): Extension<CurrentAccount>) -> Json<CurrentAccount> {
    Json(account)
}

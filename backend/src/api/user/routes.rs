//! Defines the HTTP routes for account profile endpoints.
//!
//! Every route here requires an authenticated account; the identity middleware
//! is layered onto this router only, leaving public routes untouched.

use axum::{middleware, routing::get, Router};

use super::handlers::me;
use crate::app::AppState;
use crate::auth::require_identity;

pub fn user_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(state, require_identity))
}

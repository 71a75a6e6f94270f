//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle registration and login. They are merged into the main
//! Axum router by `app::build_router`.

use axum::{routing::post, Router};

use super::handlers::{login, register};
use crate::app::AppState;

pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

//! Defines the HTTP route for the health probe.

use axum::{routing::get, Router};

use super::handlers::health;
use crate::app::AppState;

pub fn health_router() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}

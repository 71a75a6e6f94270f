//! Handler functions for the health API.

use axum::Json;
use serde::{Deserialize, Serialize};

pub const HEALTH_STATUS: &str = "OK API";

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// GET /api/health: always public, touches no state.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTH_STATUS.to_string(),
    })
}

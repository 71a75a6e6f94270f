//! Authentication module for managing business accounts and sessions.
//!
//! This module provides the public interface for registration, login, token
//! management, and the identity middleware guarding protected routes.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;

// Re-exports for convenience
pub use errors::AuthError;
pub use middleware::require_identity;
pub use models::CurrentAccount;
pub use routes::auth_router;
pub use service::{AuthService, TokenService};

//! Custom error types specific to authentication failures.
//!
//! `AuthError` is the full failure taxonomy of the register/login/identity flow.
//! The conversion into an HTTP response lives in `crate::errors`.

use axum::http::StatusCode;
use restosys_adapters::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("email {0} is already registered")]
    DuplicateKey(String),

    /// Unknown email or wrong password; callers must not be able to tell which.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("missing or malformed bearer token")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// The token verified but its account no longer exists.
    #[error("account {0} not found")]
    UnknownAccount(String),

    #[error("store failure: {0}")]
    Store(StoreError),

    #[error("password hashing failure: {0}")]
    Hashing(String),

    #[error("token signing failure: {0}")]
    Signing(String),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) | AuthError::DuplicateKey(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials | AuthError::MissingToken | AuthError::InvalidToken(_) => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::UnknownAccount(_) => StatusCode::NOT_FOUND,
            AuthError::Store(_) | AuthError::Hashing(_) | AuthError::Signing(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to send to the client.
    pub fn public_message(&self) -> String {
        let msg = match self {
            AuthError::Validation(detail) => return detail.clone(),
            AuthError::DuplicateKey(_) => "Email is already registered",
            AuthError::InvalidCredentials => "Invalid credentials",
            AuthError::MissingToken => "Token not provided",
            AuthError::InvalidToken(_) => "Invalid or expired token",
            AuthError::UnknownAccount(_) => "Account not found",
            AuthError::Store(_) | AuthError::Hashing(_) | AuthError::Signing(_) => {
                "Internal server error"
            }
        };
        msg.to_string()
    }

    pub fn is_internal(&self) -> bool {
        self.status().is_server_error()
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey(email) => AuthError::DuplicateKey(email),
            other => AuthError::Store(other),
        }
    }
}

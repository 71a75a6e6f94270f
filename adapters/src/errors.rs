//! Custom error types specific to the `adapters` crate.
//!
//! Every store implementation reports failures through [`StoreError`], so the
//! backend can tell a uniqueness violation apart from an I/O or decoding failure.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("duplicate key: email {0} is already registered")]
    DuplicateKey(String),

    #[error("invalid object id: {0}")]
    InvalidId(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("corrupt document {id}: {reason}")]
    Corrupt { id: String, reason: String },
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        StoreError::Backend(format!("store task failed: {err}"))
    }
}

//! Core `adapters` crate for abstracting account document storage.
//!
//! This crate defines the `AccountStore` trait, which outlines the operations the
//! backend needs from a persistent account collection, and provides the concrete
//! implementations (in-memory, SQLite-backed documents).

pub mod errors;
pub mod memory;
pub mod models;
pub mod sqlite;

use async_trait::async_trait;

pub use errors::StoreError;
pub use memory::MemoryStore;
pub use models::{AccountDocument, NewAccount, ObjectId};
pub use sqlite::SqliteStore;

/// Persistence seam for business accounts.
///
/// Implementations must enforce email uniqueness themselves: `create` either
/// inserts the document or fails with [`StoreError::DuplicateKey`] without
/// touching existing state.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Exact-match lookup on the login email.
    async fn find_by_email(&self, email: &str) -> Result<Option<AccountDocument>, StoreError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<AccountDocument>, StoreError>;

    /// Persists a new account, assigning its id and creation time.
    async fn create(&self, account: NewAccount) -> Result<AccountDocument, StoreError>;

    /// Removes an account. Returns `false` when no document had that id.
    async fn delete(&self, id: &ObjectId) -> Result<bool, StoreError>;

    /// Short backend name used in startup logs.
    fn kind(&self) -> &'static str;
}

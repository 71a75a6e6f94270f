//! In-process account store.
//!
//! Keeps documents in a map guarded by a `tokio` read/write lock, with a second
//! map acting as the unique email index. Nothing survives a restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::StoreError;
use crate::models::{AccountDocument, NewAccount, ObjectId};
use crate::AccountStore;

#[derive(Default)]
struct Collection {
    documents: HashMap<ObjectId, AccountDocument>,
    by_email: HashMap<String, ObjectId>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collection>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.documents.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<AccountDocument>, StoreError> {
        let coll = self.inner.read().await;
        Ok(coll
            .by_email
            .get(email)
            .and_then(|id| coll.documents.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<AccountDocument>, StoreError> {
        Ok(self.inner.read().await.documents.get(id).cloned())
    }

    async fn create(&self, account: NewAccount) -> Result<AccountDocument, StoreError> {
        let mut coll = self.inner.write().await;
        if coll.by_email.contains_key(&account.email) {
            return Err(StoreError::DuplicateKey(account.email));
        }

        let doc = account.into_document();
        coll.by_email.insert(doc.email.clone(), doc.id);
        coll.documents.insert(doc.id, doc.clone());
        log::debug!("memory store: inserted account {}", doc.id);
        Ok(doc)
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, StoreError> {
        let mut coll = self.inner.write().await;
        match coll.documents.remove(id) {
            Some(doc) => {
                coll.by_email.remove(&doc.email);
                log::debug!("memory store: deleted account {id}");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}

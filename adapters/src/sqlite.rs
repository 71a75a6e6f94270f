//! SQLite-backed document store.
//!
//! Each account is stored as one JSON document next to the columns SQLite needs
//! to index it:
//! - `id`: primary key (hex object id)
//! - `email`: `UNIQUE`, so duplicate registrations are rejected by the database
//! - `document`: the serialized `AccountDocument`
//!
//! Calls run on the blocking thread pool; the connection sits behind a mutex.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};

use crate::errors::StoreError;
use crate::models::{AccountDocument, NewAccount, ObjectId};
use crate::AccountStore;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS accounts (
        id TEXT PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        document TEXT NOT NULL
    );";

#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the account database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;

        // WAL mode for concurrent reads + crash safety
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;
        log::info!("sqlite store opened at {}", path.display());
        Self::init(conn)
    }

    /// Private database that disappears with the store.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || f(&*conn.lock())).await?
    }
}

fn decode(id: &str, raw: &str) -> Result<AccountDocument, StoreError> {
    serde_json::from_str(raw).map_err(|e| StoreError::Corrupt {
        id: id.to_string(),
        reason: e.to_string(),
    })
}

fn find_one(
    conn: &Connection,
    sql: &str,
    key: &str,
) -> Result<Option<AccountDocument>, StoreError> {
    let row = conn
        .query_row(sql, params![key], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .optional()?;

    match row {
        Some((id, raw)) => decode(&id, &raw).map(Some),
        None => Ok(None),
    }
}

#[async_trait]
impl AccountStore for SqliteStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<AccountDocument>, StoreError> {
        let email = email.to_string();
        self.with_conn(move |conn| {
            find_one(conn, "SELECT id, document FROM accounts WHERE email = ?1", &email)
        })
        .await
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<AccountDocument>, StoreError> {
        let id = id.to_hex();
        self.with_conn(move |conn| {
            find_one(conn, "SELECT id, document FROM accounts WHERE id = ?1", &id)
        })
        .await
    }

    async fn create(&self, account: NewAccount) -> Result<AccountDocument, StoreError> {
        let doc = account.into_document();
        self.with_conn(move |conn| {
            let raw = serde_json::to_string(&doc).map_err(|e| StoreError::Corrupt {
                id: doc.id.to_hex(),
                reason: e.to_string(),
            })?;

            let result = conn.execute(
                "INSERT INTO accounts (id, email, document) VALUES (?1, ?2, ?3)",
                params![doc.id.to_hex(), doc.email, raw],
            );

            match result {
                Ok(_) => {
                    log::debug!("sqlite store: inserted account {}", doc.id);
                    Ok(doc)
                }
                Err(rusqlite::Error::SqliteFailure(err, _))
                    if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
                {
                    Err(StoreError::DuplicateKey(doc.email))
                }
                Err(e) => Err(e.into()),
            }
        })
        .await
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, StoreError> {
        let id = id.to_hex();
        self.with_conn(move |conn| {
            let removed = conn.execute("DELETE FROM accounts WHERE id = ?1", params![id])?;
            Ok(removed > 0)
        })
        .await
    }

    fn kind(&self) -> &'static str {
        "sqlite"
    }
}

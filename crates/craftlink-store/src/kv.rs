//! Generic blob store over the `kv` table.
//!
//! Each logical collection (accounts, current session, favorites) lives
//! under one key as a single JSON blob, mirroring the browser-local
//! storage model of the original client. Reads fail open: an absent or
//! unparsable blob yields the type's default value instead of an error.
//! This is the single decision point for that policy — no other module
//! inspects raw blobs.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::db::Database;
use crate::error::StoreResult;

/// Read/modify/write access to named JSON blobs.
#[derive(Clone)]
pub struct KvStore {
    db: Database,
}

impl KvStore {
    /// Create a new blob store backed by `db`.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Read and deserialize the blob under `key`.
    ///
    /// Returns `T::default()` if the key is absent or the stored blob no
    /// longer parses as `T` (fail-open). SQLite failures still propagate.
    #[instrument(skip(self))]
    pub async fn read<T>(&self, key: &str) -> StoreResult<T>
    where
        T: DeserializeOwned + Default + Send + 'static,
    {
        let key = key.to_string();
        self.db
            .execute(move |conn| {
                let result = conn.query_row(
                    "SELECT value FROM kv WHERE key = ?1",
                    rusqlite::params![key],
                    |row| row.get::<_, String>(0),
                );
                let blob = match result {
                    Ok(blob) => blob,
                    Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(T::default()),
                    Err(e) => return Err(e.into()),
                };
                match serde_json::from_str(&blob) {
                    Ok(value) => Ok(value),
                    Err(err) => {
                        warn!(key = %key, %err, "malformed blob, treating as absent");
                        Ok(T::default())
                    }
                }
            })
            .await
    }

    /// Serialize `value` and store it under `key` (insert or replace).
    ///
    /// A single statement, so the write is atomic from the caller's
    /// perspective — readers see either the old blob or the new one.
    #[instrument(skip(self, value))]
    pub async fn write<T>(&self, key: &str, value: &T) -> StoreResult<()>
    where
        T: Serialize,
    {
        let key = key.to_string();
        let blob = serde_json::to_string(value)?;
        self.db
            .execute(move |conn| {
                conn.execute(
                    "INSERT INTO kv (key, value) VALUES (?1, ?2) \
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                    rusqlite::params![key, blob],
                )?;
                debug!(key = %key, "blob written");
                Ok(())
            })
            .await
    }

    /// Delete the blob under `key`, returning `true` if it existed.
    #[instrument(skip(self))]
    pub async fn remove(&self, key: &str) -> StoreResult<bool> {
        let key = key.to_string();
        self.db
            .execute(move |conn| {
                let deleted =
                    conn.execute("DELETE FROM kv WHERE key = ?1", rusqlite::params![key])?;
                Ok(deleted > 0)
            })
            .await
    }
}

// ── tests ────────────────────────────────────────────────────────────

//! Account directory for the marketplace.
//!
//! Accounts live under the `users` key as one JSON array in insertion
//! order. The phone number is the natural key: `upsert` merges into an
//! existing record with the same phone or appends a new one. Uniqueness
//! on registration is enforced by the auth layer, not here — `upsert`
//! is also the idempotent re-save and partial profile-edit path.
//!
//! Passwords are stored in plaintext. This mirrors the original client
//! and is a known, documented weakness; see DESIGN.md.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::error::StoreResult;
use crate::kv::KvStore;

/// Storage key for the account collection.
pub const KEY_USERS: &str = "users";

// ═══════════════════════════════════════════════════════════════════════
//  Types
// ═══════════════════════════════════════════════════════════════════════

/// A marketplace account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique identifier (UUID v7). Uniqueness matters, ordering does not.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Natural key: unique, case-sensitive, never normalized.
    pub phone: String,
    /// Plaintext password (see module docs).
    pub password: String,
    /// Which side of the marketplace this account is on.
    pub role: Role,
    /// Trade headline; empty unless `role` is `Worker`.
    #[serde(rename = "jobTitle")]
    pub job_title: String,
    /// Free-form pitch; empty unless `role` is `Worker`.
    pub description: String,
}

impl UserRecord {
    /// Build a fresh account with a generated id and empty worker fields.
    pub fn new(name: &str, phone: &str, password: &str, role: Role) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            name: name.to_string(),
            phone: phone.to_string(),
            password: password.to_string(),
            role,
            job_title: String::new(),
            description: String::new(),
        }
    }
}

/// Account roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A customer looking to hire.
    User,
    /// A tradesperson offering services.
    Worker,
}

impl Role {
    /// String form as stored in blobs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Worker => "worker",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A partial account keyed by phone, used for merge-upserts.
///
/// `Some` fields override the stored record; `None` fields keep whatever
/// is already there. When no record with the phone exists, missing
/// fields materialize as defaults (generated id, empty strings,
/// [`Role::User`]).
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    /// Natural key of the record to create or update.
    pub phone: String,
    pub id: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub job_title: Option<String>,
    pub description: Option<String>,
}

impl UserPatch {
    /// An empty patch for `phone` — set fields on it as needed.
    pub fn for_phone(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            ..Self::default()
        }
    }

    /// Overlay this patch onto an existing record.
    fn apply_to(self, existing: &mut UserRecord) {
        if let Some(id) = self.id {
            existing.id = id;
        }
        if let Some(name) = self.name {
            existing.name = name;
        }
        if let Some(password) = self.password {
            existing.password = password;
        }
        if let Some(role) = self.role {
            existing.role = role;
        }
        if let Some(job_title) = self.job_title {
            existing.job_title = job_title;
        }
        if let Some(description) = self.description {
            existing.description = description;
        }
    }

    /// Materialize a brand-new record from this patch.
    fn into_record(self) -> UserRecord {
        UserRecord {
            id: self.id.unwrap_or_else(|| Uuid::now_v7().to_string()),
            name: self.name.unwrap_or_default(),
            phone: self.phone,
            password: self.password.unwrap_or_default(),
            role: self.role.unwrap_or(Role::User),
            job_title: self.job_title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
        }
    }
}

impl From<UserRecord> for UserPatch {
    fn from(record: UserRecord) -> Self {
        Self {
            phone: record.phone,
            id: Some(record.id),
            name: Some(record.name),
            password: Some(record.password),
            role: Some(record.role),
            job_title: Some(record.job_title),
            description: Some(record.description),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  UserDirectory
// ═══════════════════════════════════════════════════════════════════════

/// Read and merge-write access to the account collection.
#[derive(Clone)]
pub struct UserDirectory {
    kv: KvStore,
}

impl UserDirectory {
    /// Create a directory backed by `kv`.
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }

    /// All accounts in insertion order.
    ///
    /// Fails open to an empty list if the stored blob is missing or
    /// malformed.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> StoreResult<Vec<UserRecord>> {
        self.kv.read(KEY_USERS).await
    }

    /// Accounts whose role matches `role` exactly, insertion order.
    #[instrument(skip(self))]
    pub async fn list_by_role(&self, role: Role) -> StoreResult<Vec<UserRecord>> {
        let users = self.list_all().await?;
        Ok(users.into_iter().filter(|u| u.role == role).collect())
    }

    /// Exact-match lookup by phone number.
    #[instrument(skip(self))]
    pub async fn find_by_phone(&self, phone: &str) -> StoreResult<Option<UserRecord>> {
        let users = self.list_all().await?;
        Ok(users.into_iter().find(|u| u.phone == phone))
    }

    /// Insert or merge-update the account identified by `patch.phone`.
    ///
    /// If a record with the same phone exists it is replaced in place by
    /// a shallow merge; otherwise the patch is materialized and appended.
    /// Returns the record as stored. Never rejects duplicates — callers
    /// that need uniqueness check before calling.
    #[instrument(skip(self, patch), fields(phone = %patch.phone))]
    pub async fn upsert(&self, patch: UserPatch) -> StoreResult<UserRecord> {
        let mut users = self.list_all().await?;

        let stored = match users.iter_mut().find(|u| u.phone == patch.phone) {
            Some(existing) => {
                patch.apply_to(existing);
                existing.clone()
            }
            None => {
                let record = patch.into_record();
                users.push(record.clone());
                record
            }
        };

        self.kv.write(KEY_USERS, &users).await?;
        debug!(user_id = %stored.id, "account upserted");
        Ok(stored)
    }
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn setup() -> UserDirectory {
        let db = Database::open_in_memory().unwrap();
        db.run_migrations().await.unwrap();
        UserDirectory::new(KvStore::new(db))
    }

    #[tokio::test]
    async fn list_all_empty_directory() {
        let dir = setup().await;
        assert!(dir.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn upsert_appends_in_insertion_order() {
        let dir = setup().await;

        dir.upsert(UserRecord::new("Ada", "111", "pw", Role::User).into())
            .await
            .unwrap();
        dir.upsert(UserRecord::new("Joe", "222", "pw", Role::Worker).into())
            .await
            .unwrap();

        let all = dir.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].phone, "111");
        assert_eq!(all[1].phone, "222");
    }

    #[tokio::test]
    async fn upsert_merges_partial_patch() {
        let dir = setup().await;

        let mut patch = UserPatch::for_phone("555");
        patch.name = Some("Ada".to_string());
        dir.upsert(patch).await.unwrap();

        let mut patch = UserPatch::for_phone("555");
        patch.job_title = Some("Plumber".to_string());
        dir.upsert(patch).await.unwrap();

        let all = dir.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Ada");
        assert_eq!(all[0].job_title, "Plumber");
    }

    #[tokio::test]
    async fn upsert_keeps_unpatched_fields() {
        let dir = setup().await;

        let record = UserRecord::new("Ada", "555", "secret", Role::Worker);
        let original_id = record.id.clone();
        dir.upsert(record.into()).await.unwrap();

        let mut patch = UserPatch::for_phone("555");
        patch.description = Some("Pipes fixed fast".to_string());
        let stored = dir.upsert(patch).await.unwrap();

        assert_eq!(stored.id, original_id);
        assert_eq!(stored.name, "Ada");
        assert_eq!(stored.password, "secret");
        assert_eq!(stored.description, "Pipes fixed fast");
    }

    #[tokio::test]
    async fn list_by_role_filters_exactly() {
        let dir = setup().await;

        dir.upsert(UserRecord::new("Ada", "111", "pw", Role::User).into())
            .await
            .unwrap();
        dir.upsert(UserRecord::new("Joe", "222", "pw", Role::Worker).into())
            .await
            .unwrap();
        dir.upsert(UserRecord::new("Sam", "333", "pw", Role::Worker).into())
            .await
            .unwrap();

        let workers = dir.list_by_role(Role::Worker).await.unwrap();
        assert_eq!(workers.len(), 2);
        assert!(workers.iter().all(|u| u.role == Role::Worker));
    }

    #[tokio::test]
    async fn find_by_phone_is_case_sensitive_exact() {
        let dir = setup().await;

        dir.upsert(UserRecord::new("Ada", "555-A", "pw", Role::User).into())
            .await
            .unwrap();

        assert!(dir.find_by_phone("555-A").await.unwrap().is_some());
        assert!(dir.find_by_phone("555-a").await.unwrap().is_none());
        assert!(dir.find_by_phone("555").await.unwrap().is_none());
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Worker).unwrap();
        assert_eq!(json, "\"worker\"");
    }

    #[test]
    fn record_blob_uses_camel_case_job_title() {
        let record = UserRecord::new("Ada", "555", "pw", Role::Worker);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"jobTitle\""));
    }
}

//! Current-session persistence.
//!
//! The `current_user` key holds a full JSON copy of whichever account is
//! signed in, or nothing. The copy is a snapshot taken at login or
//! registration: later edits to the directory are not reflected here
//! until the session is re-established. That staleness matches the
//! original client and is preserved deliberately.

use tracing::{debug, instrument};

use crate::error::StoreResult;
use crate::kv::KvStore;
use crate::users::UserRecord;

/// Storage key for the session snapshot.
pub const KEY_CURRENT_USER: &str = "current_user";

/// Tracks the single signed-in account, if any.
///
/// Two states: anonymous (no blob) and authenticated (one snapshot).
/// [`set_current`](SessionStore::set_current) moves to authenticated and
/// silently replaces any prior session; [`clear`](SessionStore::clear)
/// moves back to anonymous.
#[derive(Clone)]
pub struct SessionStore {
    kv: KvStore,
}

impl SessionStore {
    /// Create a session store backed by `kv`.
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }

    /// The stored session snapshot, or `None` when signed out.
    ///
    /// A malformed snapshot reads as `None` (fail-open).
    #[instrument(skip(self))]
    pub async fn current(&self) -> StoreResult<Option<UserRecord>> {
        self.kv.read(KEY_CURRENT_USER).await
    }

    /// Overwrite the session with a full copy of `user`.
    ///
    /// Unconditional: no check that `user` exists in the directory, and
    /// no distinction between refreshing the same account and switching
    /// to another one.
    #[instrument(skip(self, user), fields(phone = %user.phone))]
    pub async fn set_current(&self, user: &UserRecord) -> StoreResult<()> {
        self.kv.write(KEY_CURRENT_USER, user).await?;
        debug!(user_id = %user.id, "session established");
        Ok(())
    }

    /// Drop the session. No-op when already signed out.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> StoreResult<()> {
        self.kv.remove(KEY_CURRENT_USER).await?;
        Ok(())
    }
}

// ── tests ────────────────────────────────────────────────────────────

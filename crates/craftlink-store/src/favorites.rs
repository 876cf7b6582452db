//! Per-user favorite workers.
//!
//! The `favorites` key holds one JSON object mapping an owner's phone to
//! the list of worker phones they favorited. Entries are created lazily
//! on first toggle and pruned when they empty, so an empty set and a
//! missing entry are the same thing on disk. Favoriting requires an
//! active session; without one every operation is a no-op.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::error::StoreResult;
use crate::kv::KvStore;
use crate::session::SessionStore;

/// Storage key for the favorites map.
pub const KEY_FAVORITES: &str = "favorites";

/// Owner phone → favorited worker phones.
type FavoritesMap = BTreeMap<String, Vec<String>>;

/// Toggle-style favorites keyed by the current session's account.
#[derive(Clone)]
pub struct FavoritesIndex {
    kv: KvStore,
    sessions: SessionStore,
}

impl FavoritesIndex {
    /// Create an index backed by `kv`, resolving ownership via `sessions`.
    pub fn new(kv: KvStore, sessions: SessionStore) -> Self {
        Self { kv, sessions }
    }

    /// Flip `worker_phone` in the current user's favorite set.
    ///
    /// Returns the membership state after the call: `true` means the
    /// worker is now favorited, `false` means it is not. Exactly one
    /// membership flip happens per call. With no active session nothing
    /// is written and the result is `false`.
    #[instrument(skip(self))]
    pub async fn toggle(&self, worker_phone: &str) -> StoreResult<bool> {
        let Some(user) = self.sessions.current().await? else {
            debug!("toggle ignored, no active session");
            return Ok(false);
        };

        let mut map: FavoritesMap = self.kv.read(KEY_FAVORITES).await?;
        let set = map.entry(user.phone.clone()).or_default();

        let now_favorite = match set.iter().position(|p| p == worker_phone) {
            Some(index) => {
                set.remove(index);
                false
            }
            None => {
                set.push(worker_phone.to_string());
                true
            }
        };

        // Keep "empty set" and "no entry" indistinguishable.
        if set.is_empty() {
            map.remove(&user.phone);
        }

        self.kv.write(KEY_FAVORITES, &map).await?;
        debug!(owner = %user.phone, favorited = now_favorite, "favorite toggled");
        Ok(now_favorite)
    }

    /// Whether `worker_phone` is in the current user's favorite set.
    ///
    /// `false` when signed out.
    #[instrument(skip(self))]
    pub async fn is_favorite(&self, worker_phone: &str) -> StoreResult<bool> {
        let Some(user) = self.sessions.current().await? else {
            return Ok(false);
        };

        let map: FavoritesMap = self.kv.read(KEY_FAVORITES).await?;
        Ok(map
            .get(&user.phone)
            .is_some_and(|set| set.iter().any(|p| p == worker_phone)))
    }

    /// The current user's favorited worker phones, insertion order.
    ///
    /// Empty when signed out or when nothing has been favorited.
    #[instrument(skip(self))]
    pub async fn favorites_of_current(&self) -> StoreResult<Vec<String>> {
        let Some(user) = self.sessions.current().await? else {
            return Ok(Vec::new());
        };

        let mut map: FavoritesMap = self.kv.read(KEY_FAVORITES).await?;
        Ok(map.remove(&user.phone).unwrap_or_default())
    }
}

// ── tests ────────────────────────────────────────────────────────────

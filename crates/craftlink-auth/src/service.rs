//! The register / login / logout state machine.
//!
//! [`AuthService`] orchestrates the account directory and the session
//! store. It is the only place that enforces phone uniqueness (before
//! upserting) and the only place that compares credentials. Successful
//! operations push a fixed templated message into the notifier; failures
//! surface to the caller, which owns rendering them.
//!
//! Credentials are compared as exact plaintext strings, matching the
//! stored records. Known weakness, preserved; see DESIGN.md.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use craftlink_store::{Database, KvStore, Role, SessionStore, UserDirectory, UserRecord};
use craftlink_ui::{NoticeKind, Notifier};

use crate::error::{AuthError, AuthResult};

/// Authentication flow over a shared database handle.
#[derive(Clone)]
pub struct AuthService {
    directory: UserDirectory,
    sessions: SessionStore,
    notifier: Arc<dyn Notifier>,
}

impl AuthService {
    /// Wire the service over `db`, delivering notifications to `notifier`.
    pub fn new(db: Database, notifier: Arc<dyn Notifier>) -> Self {
        let kv = KvStore::new(db);
        Self {
            directory: UserDirectory::new(kv.clone()),
            sessions: SessionStore::new(kv),
            notifier,
        }
    }

    /// The account directory this service writes to.
    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    /// The session store this service establishes sessions in.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Create an account and sign it in.
    ///
    /// Fails with [`AuthError::DuplicatePhone`] if `phone` already has an
    /// account (exact match, no normalization), leaving the directory
    /// unchanged. On success the new record becomes the current session
    /// and is returned.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        name: &str,
        phone: &str,
        password: &str,
        role: Role,
    ) -> AuthResult<UserRecord> {
        if self.directory.find_by_phone(phone).await?.is_some() {
            warn!(phone = %phone, "registration refused, phone taken");
            return Err(AuthError::DuplicatePhone {
                phone: phone.to_string(),
            });
        }

        let record = UserRecord::new(name, phone, password, role);
        let stored = self.directory.upsert(record.into()).await?;
        self.sessions.set_current(&stored).await?;

        info!(user_id = %stored.id, role = %stored.role, "account registered");
        self.notifier.notify(
            &format!("Welcome to CraftLink, {}!", stored.name),
            NoticeKind::Success,
        );
        Ok(stored)
    }

    /// Sign in with a phone number and password.
    ///
    /// Fails with [`AuthError::InvalidCredentials`] unless some account
    /// matches both fields exactly. The matched record becomes the
    /// session snapshot as matched — it is not re-read afterwards.
    #[instrument(skip(self, password))]
    pub async fn login(&self, phone: &str, password: &str) -> AuthResult<UserRecord> {
        let users = self.directory.list_all().await?;
        let matched = users
            .into_iter()
            .find(|u| u.phone == phone && u.password == password)
            .ok_or(AuthError::InvalidCredentials)?;

        self.sessions.set_current(&matched).await?;

        info!(user_id = %matched.id, "signed in");
        self.notifier.notify(
            &format!("Welcome back, {}!", matched.name),
            NoticeKind::Success,
        );
        Ok(matched)
    }

    /// The current session snapshot, or `None` when signed out.
    #[instrument(skip(self))]
    pub async fn check_auth(&self) -> AuthResult<Option<UserRecord>> {
        Ok(self.sessions.current().await?)
    }

    /// Drop the current session. Idempotent.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> AuthResult<()> {
        self.sessions.clear().await?;

        debug!("signed out");
        self.notifier
            .notify("You have been signed out.", NoticeKind::Success);
        Ok(())
    }
}

// ── tests ────────────────────────────────────────────────────────────

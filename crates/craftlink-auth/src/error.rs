//! Error types for the auth crate.
//!
//! The two user-facing variants are precondition violations surfaced to
//! the caller, which routes them to the notification collaborator. They
//! are not transient: the service never retries them.

use craftlink_store::StoreError;

/// Unified error type for the CraftLink auth flow.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Registration attempted with a phone number that already has an
    /// account. The directory is left unchanged.
    #[error("phone number already registered: {phone}")]
    DuplicatePhone {
        /// The phone number that was already taken.
        phone: String,
    },

    /// Login with no account matching both phone and password.
    ///
    /// Deliberately does not say which half was wrong.
    #[error("invalid phone or password")]
    InvalidCredentials,

    /// An error propagated from the storage layer.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Convenience alias used throughout this crate.
pub type AuthResult<T> = Result<T, AuthError>;

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_duplicate_phone() {
        let err = AuthError::DuplicatePhone {
            phone: "555".to_string(),
        };
        assert_eq!(err.to_string(), "phone number already registered: 555");
    }

    #[test]
    fn error_display_invalid_credentials() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "invalid phone or password"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthError>();
    }
}

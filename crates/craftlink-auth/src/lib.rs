//! # craftlink-auth
//!
//! Authentication flow for CraftLink.
//!
//! A small state machine over [`craftlink_store`]: register creates an
//! account (phone numbers are unique) and signs it in, login matches
//! credentials exactly, logout drops the session. The session is a full
//! snapshot of the account at sign-in time — later profile edits are not
//! reflected until the next login.
//!
//! ```text
//! AuthService
//! ├── UserDirectory  (lookup, uniqueness check, upsert)
//! ├── SessionStore   (establish / clear the snapshot)
//! └── Notifier       (transient success toasts, craftlink-ui)
//! ```
//!
//! Passwords are plaintext and compared exactly — a preserved weakness
//! of the original client, out of scope to fix here. See DESIGN.md.

pub mod error;
pub mod service;

// ── re-exports ───────────────────────────────────────────────────────

pub use error::{AuthError, AuthResult};
pub use service::AuthService;

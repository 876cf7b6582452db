//! # craftlink-store
//!
//! Storage layer for CraftLink, the marketplace client connecting
//! customers and tradespeople.
//!
//! Persists account records, the current session, and per-user favorites
//! as JSON blobs in a SQLite `kv` table — the same one-blob-per-key shape
//! as the browser-local storage it replaces. Every store re-reads from
//! the database on each call; nothing is cached, so the `kv` table is the
//! single source of truth.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  UserDirectory   SessionStore  FavoritesIndex │
//! ├──────────────────────────────────────────────┤
//! │  KvStore   (JSON blob per key, fail-open)     │
//! ├──────────────────────────────────────────────┤
//! │  Database  (rusqlite WAL)                     │
//! │  Migrations (versioned, transactional)        │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Quick start
//!
//! ```ignore
//! use craftlink_store::{Database, KvStore, SessionStore, UserDirectory};
//!
//! let db = Database::open_and_migrate("data/craftlink.db").await?;
//! let kv = KvStore::new(db);
//! let directory = UserDirectory::new(kv.clone());
//! let sessions = SessionStore::new(kv.clone());
//! ```
//!
//! A known weakness carried over from the original client: passwords are
//! stored in plaintext and compared exactly. See DESIGN.md.

pub mod db;
pub mod error;
pub mod favorites;
pub mod kv;
pub mod migration;
pub mod session;
pub mod users;

// ── re-exports ───────────────────────────────────────────────────────

pub use db::Database;
pub use error::{StoreError, StoreResult};
pub use favorites::FavoritesIndex;
pub use kv::KvStore;
pub use session::SessionStore;
pub use users::{Role, UserDirectory, UserPatch, UserRecord};

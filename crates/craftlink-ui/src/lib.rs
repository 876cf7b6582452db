//! # craftlink-ui
//!
//! UI collaborator contract for CraftLink.
//!
//! The data layer treats the UI as an external collaborator: it emits
//! transient notifications through the [`Notifier`] trait and leaves all
//! rendering to whichever frontend implements it. This crate defines
//! that contract plus the pure derived-presentation helpers (avatar
//! color, pseudo-rating) that frontends share.
//!
//! Nothing here touches storage.

pub mod notify;
pub mod presentation;

// ── re-exports ───────────────────────────────────────────────────────

pub use notify::{LogNotifier, MemoryNotifier, Notice, NoticeKind, Notifier, Renderer};
pub use presentation::{AVATAR_PALETTE, avatar_color, pseudo_rating};

//! Transient notification sink.
//!
//! The data layer never renders anything itself; it pushes messages into
//! a [`Notifier`] and moves on. Auto-dismiss timing belongs to whatever
//! frontend implements the trait and never affects stored data.

use std::sync::Mutex;

use tracing::{error, info};

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// The operation succeeded.
    Success,
    /// The operation failed and the user should be told.
    Error,
}

/// A notification as handed to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// User-facing message text.
    pub message: String,
    /// Severity, typically mapped to toast styling.
    pub kind: NoticeKind,
}

/// Fire-and-forget sink for transient notifications.
///
/// Concrete frontends render these as auto-dismissing toasts. The core
/// never consumes a return value, so implementations are free to drop
/// messages on the floor.
pub trait Notifier: Send + Sync {
    /// Deliver one notification.
    fn notify(&self, message: &str, kind: NoticeKind);
}

/// Markup sink for named UI regions.
///
/// Concrete implementations are provided by the frontends; the data
/// layer itself never calls this, it exists so collaborators share one
/// contract.
pub trait Renderer: Send + Sync {
    /// Inject `html` into the region identified by `target`.
    fn render(&self, target: &str, html: &str);
}

/// Headless notifier that forwards notifications to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str, kind: NoticeKind) {
        match kind {
            NoticeKind::Success => info!(target: "craftlink::notify", "{message}"),
            NoticeKind::Error => error!(target: "craftlink::notify", "{message}"),
        }
    }
}

/// Buffering notifier for tests.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryNotifier {
    /// A fresh, empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything delivered so far, oldest first.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("notifier mutex poisoned").clone()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, message: &str, kind: NoticeKind) {
        self.notices
            .lock()
            .expect("notifier mutex poisoned")
            .push(Notice {
                message: message.to_string(),
                kind,
            });
    }
}

// ── tests ────────────────────────────────────────────────────────────

//! Toast notification model shared by the frontend and the API layer.
//!
//! A [`ToastRegistry`] is a process-wide, ordered set of visible toasts.
//! Toasts may carry a stable string key; pushing a toast whose key matches
//! a visible entry replaces that entry in place instead of appending, so a
//! later subsystem (the websocket listener) can overwrite a toast another
//! subsystem created. Unkeyed toasts always append.

use serde::{Deserialize, Serialize};

/// Key of the toast shown when a broker sync has been accepted.
///
/// The trigger hook creates this toast; the websocket listener replaces it
/// under the same key once the run completes or fails.
pub const SYNC_START_TOAST_KEY: &str = "dse-broker-sync-start";

/// Severity of a toast.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ToastIntent {
    /// An operation is in flight; stays visible until replaced.
    Loading,
    Info,
    Success,
    Error,
}

/// A transient user-facing message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Toast {
    /// Stable identifier for replace-in-place updates. `None` for
    /// one-shot toasts.
    pub key: Option<String>,
    pub intent: ToastIntent,
    pub message: String,
}

impl Toast {
    pub fn new(intent: ToastIntent, message: impl Into<String>) -> Self {
        Self {
            key: None,
            intent,
            message: message.into(),
        }
    }

    /// Attach a stable key so later pushes can replace this toast.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

/// Registry-assigned identity of a visible toast.
pub type ToastHandle = u64;

/// A toast currently visible to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastEntry {
    pub handle: ToastHandle,
    pub toast: Toast,
}

/// Ordered registry of visible toasts with update-or-insert semantics
/// for keyed entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastRegistry {
    next_handle: ToastHandle,
    entries: Vec<ToastEntry>,
}

impl ToastRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a toast.
    ///
    /// If the toast carries a key and an entry with that key is visible,
    /// the entry is replaced in place: same handle, same position. The
    /// invariant is at most one visible entry per key.
    pub fn push(&mut self, toast: Toast) -> ToastHandle {
        if let Some(key) = toast.key.as_deref()
            && let Some(entry) = self
                .entries
                .iter_mut()
                .find(|e| e.toast.key.as_deref() == Some(key))
        {
            entry.toast = toast;
            return entry.handle;
        }

        let handle = self.next_handle;
        self.next_handle += 1;
        self.entries.push(ToastEntry { handle, toast });
        handle
    }

    /// Dismiss a toast by handle. Unknown handles are ignored.
    pub fn dismiss(&mut self, handle: ToastHandle) {
        self.entries.retain(|e| e.handle != handle);
    }

    /// Dismiss the toast with the given key, if visible.
    pub fn dismiss_key(&mut self, key: &str) {
        self.entries.retain(|e| e.toast.key.as_deref() != Some(key));
    }

    /// Visible toasts in display order.
    pub fn entries(&self) -> &[ToastEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Toast shown when the broker accepted a sync start request.
///
/// Keyed, so the completion listener can overwrite it later. The hook
/// that creates it never dismisses it itself.
pub fn sync_started_toast() -> Toast {
    Toast::new(ToastIntent::Loading, "Syncing DSE broker data...")
        .with_key(SYNC_START_TOAST_KEY)
}

/// Toast shown when the sync start request itself failed.
///
/// A missing or empty failure message falls back to "Unknown error" so
/// the user always sees a non-empty diagnostic.
pub fn sync_start_failed_toast(message: Option<&str>) -> Toast {
    let detail = message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or("Unknown error");
    Toast::new(
        ToastIntent::Error,
        format!("Failed to start DSE sync: {}", detail),
    )
}

#[cfg(test)]
#[path = "notifications_test.rs"]
mod notifications_test;

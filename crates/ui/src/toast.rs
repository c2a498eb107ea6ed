//! Transient user notifications.
//!
//! Controllers report outcomes as toasts through a `Toaster`. The sink decides
//! how to show them; the CLI prints them to stderr.

use std::fmt;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A single transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self.kind {
            ToastKind::Success => "✓",
            ToastKind::Error => "✗",
        };
        write!(f, "{} {}", icon, self.message)
    }
}

/// Callback for toasts.
pub type ToastCallback = Arc<dyn Fn(Toast) + Send + Sync>;

/// Emits toasts through a callback and mirrors them to tracing.
#[derive(Clone)]
pub struct Toaster {
    callback: Option<ToastCallback>,
}

impl Toaster {
    pub fn new(callback: ToastCallback) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    /// A toaster that only logs.
    pub fn noop() -> Self {
        Self { callback: None }
    }

    /// A toaster that keeps every toast in memory, plus the shared list.
    pub fn recording() -> (Self, Arc<Mutex<Vec<Toast>>>) {
        let toasts = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&toasts);
        let toaster = Self::new(Arc::new(move |toast| {
            if let Ok(mut list) = sink.lock() {
                list.push(toast);
            }
        }));
        (toaster, toasts)
    }

    pub fn show(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Success => tracing::info!(message = %toast.message, "toast"),
            ToastKind::Error => tracing::warn!(message = %toast.message, "toast"),
        }

        if let Some(callback) = &self.callback {
            callback(toast);
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(Toast::success(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(Toast::error(message));
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for Toaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toaster")
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

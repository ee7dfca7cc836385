//! Transient notifications shown on top of a widget.

use std::time::{Duration, Instant};

/// How long a toast stays visible by default
pub const TOAST_LIFETIME: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub expires_at: Instant,
}

/// Active toasts, oldest first
#[derive(Debug, Clone)]
pub struct Toasts {
    lifetime: Duration,
    active: Vec<Toast>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::with_lifetime(TOAST_LIFETIME)
    }

    pub fn with_lifetime(lifetime: Duration) -> Self {
        Self {
            lifetime,
            active: Vec::new(),
        }
    }

    pub fn push(&mut self, title: impl Into<String>, description: impl Into<String>, now: Instant) {
        self.active.push(Toast {
            title: title.into(),
            description: description.into(),
            expires_at: now + self.lifetime,
        });
    }

    /// Drop every toast that expired at or before `now`
    pub fn prune(&mut self, now: Instant) {
        self.active.retain(|toast| toast.expires_at > now);
    }

    /// Most recent toast still active
    pub fn latest(&self) -> Option<&Toast> {
        self.active.last()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

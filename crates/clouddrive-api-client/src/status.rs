//! Transient status messages shown to the user.

use std::fmt;
use std::time::{Duration, Instant};

/// Success messages disappear on their own after this long.
pub const SUCCESS_DISMISS_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    pub created_at: Instant,
}

impl StatusMessage {
    pub fn auto_dismiss(&self) -> bool {
        self.kind == StatusKind::Success
    }

    fn expired(&self, now: Instant) -> bool {
        self.auto_dismiss()
            && now.saturating_duration_since(self.created_at) >= SUCCESS_DISMISS_AFTER
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.kind {
            StatusKind::Success => "ok",
            StatusKind::Error => "error",
            StatusKind::Info => "info",
        };
        write!(f, "[{}] {}", tag, self.text)
    }
}

/// Append-only message list. Every message can be dismissed; none is fatal.
#[derive(Debug, Default)]
pub struct StatusLog {
    messages: Vec<StatusMessage>,
}

impl StatusLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: StatusKind, text: impl Into<String>) {
        let text = text.into();
        match kind {
            StatusKind::Error => tracing::warn!(message = %text, "status"),
            _ => tracing::debug!(message = %text, "status"),
        }
        self.messages.push(StatusMessage {
            kind,
            text,
            created_at: Instant::now(),
        });
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(StatusKind::Success, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(StatusKind::Error, text);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(StatusKind::Info, text);
    }

    pub fn dismiss(&mut self, index: usize) -> Option<StatusMessage> {
        (index < self.messages.len()).then(|| self.messages.remove(index))
    }

    /// Drop success messages older than [`SUCCESS_DISMISS_AFTER`].
    pub fn prune_expired(&mut self, now: Instant) {
        self.messages.retain(|m| !m.expired(now));
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[StatusMessage] {
        &self.messages
    }

    pub fn latest(&self) -> Option<&StatusMessage> {
        self.messages.last()
    }

    pub fn contains(&self, kind: StatusKind, text: &str) -> bool {
        self.messages.iter().any(|m| m.kind == kind && m.text == text)
    }
}

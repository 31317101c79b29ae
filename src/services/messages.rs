//! User-facing notifications.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;

/// Message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

/// A notification about one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Severity.
    pub level: MessageLevel,
    /// File the message is about.
    pub path: PathBuf,
    /// Human readable text.
    pub text: String,
}

impl Message {
    pub fn error(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            path: path.into(),
            text: text.into(),
        }
    }
}

/// Receives notifications produced while renaming.
pub trait MessageSink: Send + Sync {
    fn push(&self, message: Message);
}

/// Forwards messages to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl MessageSink for TracingSink {
    fn push(&self, message: Message) {
        match message.level {
            MessageLevel::Info => tracing::info!("{}: {}", message.path.display(), message.text),
            MessageLevel::Warning => tracing::warn!("{}: {}", message.path.display(), message.text),
            MessageLevel::Error => tracing::error!("{}: {}", message.path.display(), message.text),
        }
    }
}

/// Keeps messages in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    messages: Mutex<Vec<Message>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the collected messages.
    pub fn messages(&self) -> Vec<Message> {
        match self.messages.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl MessageSink for CollectingSink {
    fn push(&self, message: Message) {
        match self.messages.lock() {
            Ok(mut guard) => guard.push(message),
            Err(poisoned) => poisoned.into_inner().push(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_sink() {
        let sink = CollectingSink::new();
        sink.push(Message::error("/m/a.jpg", "denied"));
        let messages = sink.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].level, MessageLevel::Error);
        assert_eq!(messages[0].text, "denied");
    }
}

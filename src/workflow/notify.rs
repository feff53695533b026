use log::warn;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Warning,
}

/// A transient message for the user, shown as a toast by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub button_text: String,
    pub duration: Duration,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn warning(text: impl Into<String>) -> Self {
        Notification {
            text: text.into(),
            button_text: "Okay".to_string(),
            duration: Duration::from_millis(3000),
            kind: NotificationKind::Warning,
        }
    }
}

impl From<&ValidationError> for Notification {
    fn from(error: &ValidationError) -> Self {
        match error {
            ValidationError::EmptyIngredient => {
                Notification::warning("Please type in an ingredient, it cannot be empty!")
            }
        }
    }
}

/// Displays notifications to the user
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Writes notifications to the log. Used when the host provides no notifier.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) {
        warn!("{}", notification.text);
    }
}

/// Keeps every notification; clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    seen: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.seen
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(notification.clone());
        }
    }
}

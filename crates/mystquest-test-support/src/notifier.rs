//! Test notifier — records every published notification.

use std::sync::Mutex;

use async_trait::async_trait;
use mystquest_core::notifier::{Notification, Notifier};

/// A notifier that records all published notifications in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    published: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Create an empty recording notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of everything published so far, in publish order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn published(&self) -> Vec<Notification> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn publish(&self, notification: Notification) {
        self.published.lock().unwrap().push(notification);
    }
}

//! In-process notification fan-out.
//!
//! One broadcast channel per game session. Mutating handlers publish through
//! the [`Notifier`] trait; a push transport (server-sent events, websocket)
//! subscribes per session and forwards to connected clients. Publishing to a
//! session nobody listens to is a no-op.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use mystquest_core::notifier::{Notification, Notifier};
use tokio::sync::broadcast;
use uuid::Uuid;

const CHANNEL_CAPACITY: usize = 64;

/// Broadcast-channel [`Notifier`], keyed by game session id.
#[derive(Debug, Default)]
pub struct ChannelNotifier {
    channels: Mutex<HashMap<Uuid, broadcast::Sender<Notification>>>,
}

impl ChannelNotifier {
    /// Creates a notifier with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to one game session's notifications. Slow subscribers that
    /// fall more than [`CHANNEL_CAPACITY`] messages behind lose the oldest.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn subscribe(&self, game_session_id: Uuid) -> broadcast::Receiver<Notification> {
        self.channels
            .lock()
            .unwrap()
            .entry(game_session_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn publish(&self, notification: Notification) {
        let sender = self
            .channels
            .lock()
            .unwrap()
            .get(&notification.game_session_id)
            .cloned();
        if let Some(sender) = sender {
            // Err means every receiver hung up; delivery is best effort.
            if sender.send(notification).is_err() {
                tracing::debug!("notification dropped: no live subscribers");
            }
        }
    }
}

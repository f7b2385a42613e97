//! Notification broadcaster abstraction.
//!
//! Mutating operations describe what happened as a [`Notification`] and hand
//! it to a [`Notifier`]; how the description reaches connected clients (push
//! channel, polling, …) is a transport concern outside the core. Delivery is
//! best effort and at-most-once-attempted.

use async_trait::async_trait;
use uuid::Uuid;

/// A serialized event description routed by game session.
#[derive(Debug, Clone)]
pub struct Notification {
    /// The game session whose subscribers should receive this.
    pub game_session_id: Uuid,
    /// Event type name for client-side routing.
    pub event_type: String,
    /// Serialized event payload.
    pub payload: serde_json::Value,
}

/// Outbound boundary for session/round/content/connection change events.
///
/// Within one session, callers publish in the order the triggering
/// operations completed; no ordering is promised across sessions.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Publish a notification. Infallible by contract: implementations
    /// swallow and log delivery failures rather than failing the operation
    /// that produced the event.
    async fn publish(&self, notification: Notification);
}

/// A notifier that discards everything. Used when no delivery transport is
/// wired up.
#[derive(Debug, Clone, Copy)]
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn publish(&self, _notification: Notification) {}
}
